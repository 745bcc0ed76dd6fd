//! libdesk binary entry point

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use libdesk::{cli::Commands, config::Config, tui::App};

#[derive(Parser)]
#[command(name = "libdesk")]
#[command(about = "Terminal client for the library REST service")]
#[command(version)]
struct Cli {
    /// Run a subcommand and exit; without one, the interactive TUI starts
    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "libdesk=info");
    }

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    // CLI mode: print output and exit without the TUI
    if let Some(command) = cli.command {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();

        return libdesk::cli::run_command(command, &config).await;
    }

    // Initialize logging to file for TUI mode to avoid interfering
    // with the display
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("libdesk.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    info!("Starting libdesk TUI...");

    // Setup terminal for TUI mode
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run the application
    let mut app = App::new(config)?;
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(_) => {
            info!("libdesk exited successfully");
        }
        Err(e) => {
            error!("libdesk encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
