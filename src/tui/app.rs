//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::{error, info};

use super::screens::*;
use super::ui::{centered_rect, Styles};
use crate::api::ApiClient;
use crate::config::Config;

/// Application screens
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    MainMenu,
    AddBook,
    AddReader,
    IssueLoan,
    Catalog,
    Readers,
    Help,
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: Screen,
    /// Application configuration
    pub config: Config,
    /// HTTP client, constructed once at startup
    pub api: ApiClient,

    // Screen states
    pub main_menu: MainMenuScreen,
    pub add_book: AddBookScreen,
    pub add_reader: AddReaderScreen,
    pub issue_loan: IssueLoanScreen,
    pub catalog: CatalogScreen,
    pub readers: ReadersScreen,
    pub help: HelpScreen,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config)?;

        Ok(Self {
            current_screen: Screen::MainMenu,
            config,
            api,

            main_menu: MainMenuScreen::new(),
            add_book: AddBookScreen::new(),
            add_reader: AddReaderScreen::new(),
            issue_loan: IssueLoanScreen::new(),
            catalog: CatalogScreen::new(),
            readers: ReadersScreen::new(),
            help: HelpScreen::new(),

            should_quit: false,
            show_help_popup: false,
            status_message: None,
            error_message: None,
        })
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.set_status(format!("Ready - backend at {}", self.config.api_base_url));

        loop {
            // Draw the UI
            terminal.draw(|f| self.draw(f))?;

            // Handle events; the only suspension points are the HTTP
            // calls inside the submit and reload handlers
            if let Ok(event) = crossterm::event::read() {
                if let crossterm::event::Event::Key(key) = event {
                    self.handle_key_event(key).await?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Global shortcuts. Character keys stay with the screens so the
        // forms can accept them as input.
        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return Ok(());
            }
            KeyCode::Esc if self.show_help_popup => {
                self.show_help_popup = false;
                return Ok(());
            }
            _ => {}
        }

        if self.show_help_popup {
            return Ok(());
        }

        match self.current_screen {
            Screen::MainMenu => self.handle_main_menu_event(key).await?,
            Screen::AddBook => self.handle_add_book_event(key).await?,
            Screen::AddReader => self.handle_add_reader_event(key).await?,
            Screen::IssueLoan => self.handle_issue_loan_event(key).await?,
            Screen::Catalog => self.handle_catalog_event(key).await?,
            Screen::Readers => self.handle_readers_event(key).await?,
            Screen::Help => self.handle_help_event(key),
        }

        Ok(())
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        match self.current_screen {
            Screen::MainMenu => self.main_menu.draw(f, chunks[0]),
            Screen::AddBook => self.add_book.draw(f, chunks[0]),
            Screen::AddReader => self.add_reader.draw(f, chunks[0]),
            Screen::IssueLoan => self.issue_loan.draw(f, chunks[0]),
            Screen::Catalog => self.catalog.draw(f, chunks[0]),
            Screen::Readers => self.readers.draw(f, chunks[0]),
            Screen::Help => self.help.draw(f, chunks[0]),
        }

        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Draw status bar: the status region for the most recent operation
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if let Some(ref msg) = self.status_message {
            format!("Status: {}", msg)
        } else if let Some(ref err) = self.error_message {
            format!("Error: {}", err)
        } else {
            format!(
                "libdesk - {} | Esc: Back | F1: Help",
                match self.current_screen {
                    Screen::MainMenu => "Main Menu",
                    Screen::AddBook => "Add Book",
                    Screen::AddReader => "Add Reader",
                    Screen::IssueLoan => "Issue Loan",
                    Screen::Catalog => "Catalog",
                    Screen::Readers => "Readers",
                    Screen::Help => "Help",
                }
            )
        };

        let status_bar = Paragraph::new(status_text)
            .style(self.status_bar_style())
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }

    fn status_bar_style(&self) -> Style {
        if self.error_message.is_some() {
            Styles::error()
        } else if self.status_message.is_some() {
            Styles::success()
        } else {
            Styles::inactive()
        }
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 60, area);

        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .block(
                Block::default()
                    .title("Help - Context Shortcuts")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    fn get_context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            F1 - Toggle this help\n\
            Esc - Go back\n\n";

        let screen_help = match self.current_screen {
            Screen::MainMenu => {
                "Main Menu:\n\
                ↑/↓ - Navigate menu\n\
                Enter - Select option\n\
                B/R/L/C/D/H - Direct access\n\
                q - Quit"
            }
            Screen::AddBook | Screen::AddReader | Screen::IssueLoan => {
                "Form:\n\
                Tab/Shift+Tab - Next/previous field\n\
                ↑/↓ - Move between fields\n\
                Enter - Submit\n\
                Esc - Back to main menu\n\n\
                On success the server's message is shown and the\n\
                fields are cleared. On rejection your input stays."
            }
            Screen::Catalog => {
                "Catalog:\n\
                ↑/↓ - Navigate books\n\
                r - Refresh current page\n\
                PageUp/PageDown - Previous/next page\n\
                / - Filter by author/topic\n\
                Esc - Back to main menu"
            }
            Screen::Readers => {
                "Readers:\n\
                ↑/↓ - Navigate readers\n\
                r - Refresh current page\n\
                PageUp/PageDown - Previous/next page\n\
                Esc - Back to main menu"
            }
            Screen::Help => {
                "Help Screen:\n\
                ↑/↓ - Switch section\n\
                PageUp/PageDown - Scroll content"
            }
        };

        format!("{}{}", global_help, screen_help)
    }

    /// Navigate to a specific screen
    pub fn navigate_to_screen(&mut self, screen: Screen) {
        self.current_screen = screen;
        self.clear_messages();
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    // Event handlers for each screen

    async fn handle_main_menu_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up => self.main_menu.select_previous(),
            KeyCode::Down => self.main_menu.select_next(),
            KeyCode::Enter => {
                if let Some(option) = self.main_menu.selected_option() {
                    let target = option.screen.clone();
                    self.enter_screen(target).await;
                }
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char(c) => {
                if let Some(target) = self.main_menu.screen_for_shortcut(c) {
                    self.enter_screen(target).await;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Navigate from the menu, loading list screens on entry
    async fn enter_screen(&mut self, target: Screen) {
        self.navigate_to_screen(target.clone());
        match target {
            Screen::Catalog => {
                if let Err(e) = self.reload_catalog().await {
                    error!("catalog load failed: {}", e);
                    self.set_error(format!("Failed to load catalog: {}", e));
                }
            }
            Screen::Readers => {
                if let Err(e) = self.reload_readers().await {
                    error!("reader list load failed: {}", e);
                    self.set_error(format!("Failed to load readers: {}", e));
                }
            }
            _ => {}
        }
    }

    async fn handle_add_book_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.add_book.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.add_book.form.previous_field(),
            KeyCode::Enter => self.submit_book().await,
            KeyCode::Esc => self.navigate_to_screen(Screen::MainMenu),
            KeyCode::Char(c) => self.add_book.form.handle_char(c),
            KeyCode::Backspace => self.add_book.form.handle_backspace(),
            KeyCode::Delete => self.add_book.form.handle_delete(),
            KeyCode::Left => self.add_book.form.cursor_left(),
            KeyCode::Right => self.add_book.form.cursor_right(),
            KeyCode::Home => self.add_book.form.cursor_home(),
            KeyCode::End => self.add_book.form.cursor_end(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_add_reader_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.add_reader.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.add_reader.form.previous_field(),
            KeyCode::Enter => self.submit_reader().await,
            KeyCode::Esc => self.navigate_to_screen(Screen::MainMenu),
            KeyCode::Char(c) => self.add_reader.form.handle_char(c),
            KeyCode::Backspace => self.add_reader.form.handle_backspace(),
            KeyCode::Delete => self.add_reader.form.handle_delete(),
            KeyCode::Left => self.add_reader.form.cursor_left(),
            KeyCode::Right => self.add_reader.form.cursor_right(),
            KeyCode::Home => self.add_reader.form.cursor_home(),
            KeyCode::End => self.add_reader.form.cursor_end(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_issue_loan_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.issue_loan.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.issue_loan.form.previous_field(),
            KeyCode::Enter => self.submit_loan().await,
            KeyCode::Esc => self.navigate_to_screen(Screen::MainMenu),
            KeyCode::Char(c) => self.issue_loan.form.handle_char(c),
            KeyCode::Backspace => self.issue_loan.form.handle_backspace(),
            KeyCode::Delete => self.issue_loan.form.handle_delete(),
            KeyCode::Left => self.issue_loan.form.cursor_left(),
            KeyCode::Right => self.issue_loan.form.cursor_right(),
            KeyCode::Home => self.issue_loan.form.cursor_home(),
            KeyCode::End => self.issue_loan.form.cursor_end(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_catalog_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.catalog.show_filter_form {
            return self.handle_catalog_filter_event(key).await;
        }

        match key.code {
            KeyCode::Up => self.catalog.select_previous(),
            KeyCode::Down => self.catalog.select_next(),
            KeyCode::Char('r') => {
                match self.reload_catalog().await {
                    Ok(()) => self.set_status("Catalog refreshed".to_string()),
                    Err(e) => {
                        error!("catalog refresh failed: {}", e);
                        self.set_error(format!("Refresh failed: {}", e));
                    }
                }
            }
            KeyCode::Char('/') => {
                self.catalog.show_filter_form = true;
            }
            KeyCode::PageDown => self.step_catalog_page(true).await,
            KeyCode::PageUp => self.step_catalog_page(false).await,
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.navigate_to_screen(Screen::MainMenu),
            _ => {}
        }
        Ok(())
    }

    async fn handle_catalog_filter_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.catalog.filter_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.catalog.filter_form.previous_field(),
            KeyCode::Enter => {
                self.catalog.filter = self.catalog.applied_filter();
                self.catalog.skip = 0;
                self.catalog.show_filter_form = false;
                if let Err(e) = self.reload_catalog().await {
                    error!("filtered catalog load failed: {}", e);
                    self.set_error(format!("Search failed: {}", e));
                }
            }
            KeyCode::Esc => {
                self.catalog.show_filter_form = false;
            }
            KeyCode::Char(c) => self.catalog.filter_form.handle_char(c),
            KeyCode::Backspace => self.catalog.filter_form.handle_backspace(),
            KeyCode::Delete => self.catalog.filter_form.handle_delete(),
            KeyCode::Left => self.catalog.filter_form.cursor_left(),
            KeyCode::Right => self.catalog.filter_form.cursor_right(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_readers_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up => self.readers.select_previous(),
            KeyCode::Down => self.readers.select_next(),
            KeyCode::Char('r') => {
                match self.reload_readers().await {
                    Ok(()) => self.set_status("Reader list refreshed".to_string()),
                    Err(e) => {
                        error!("reader list refresh failed: {}", e);
                        self.set_error(format!("Refresh failed: {}", e));
                    }
                }
            }
            KeyCode::PageDown => self.step_readers_page(true).await,
            KeyCode::PageUp => self.step_readers_page(false).await,
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.navigate_to_screen(Screen::MainMenu),
            _ => {}
        }
        Ok(())
    }

    fn handle_help_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.help.previous_section(),
            KeyCode::Down => self.help.next_section(),
            KeyCode::PageUp => {
                self.help.scroll_offset = self.help.scroll_offset.saturating_sub(5);
            }
            KeyCode::PageDown => {
                self.help.scroll_offset += 5;
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.navigate_to_screen(Screen::MainMenu),
            _ => {}
        }
    }

    // Submission handlers: one request per Enter press, no debounce
    // and no retry. The status region shows the outcome.

    async fn submit_book(&mut self) {
        let payload = match self.add_book.payload() {
            Ok(payload) => payload,
            Err(message) => {
                self.set_error(message);
                return;
            }
        };

        match self.api.create_book(&payload).await {
            Ok(message) => {
                info!("book created: {}", payload.title);
                self.add_book.form.clear_all();
                self.set_status(message);
                // A new book changes the catalog page
                if let Err(e) = self.reload_catalog().await {
                    error!("catalog refresh after create failed: {}", e);
                    self.set_error(format!("Book added, but catalog refresh failed: {}", e));
                }
            }
            Err(e) => {
                error!("add book failed: {}", e);
                self.set_error(format!("Add book failed: {}", e));
            }
        }
    }

    async fn submit_reader(&mut self) {
        let payload = match self.add_reader.payload() {
            Ok(payload) => payload,
            Err(message) => {
                self.set_error(message);
                return;
            }
        };

        match self.api.create_reader(&payload).await {
            Ok(message) => {
                info!("reader created: {}", payload.name);
                self.add_reader.form.clear_all();
                self.set_status(message);
            }
            Err(e) => {
                error!("add reader failed: {}", e);
                self.set_error(format!("Add reader failed: {}", e));
            }
        }
    }

    async fn submit_loan(&mut self) {
        let payload = match self.issue_loan.payload() {
            Ok(payload) => payload,
            Err(message) => {
                self.set_error(message);
                return;
            }
        };

        match self.api.create_loan(&payload).await {
            Ok(message) => {
                info!(
                    "loan issued: book {} to reader {}",
                    payload.book_id, payload.reader_id
                );
                self.issue_loan.form.clear_all();
                self.set_status(message);
                // Issuing a loan changes book availability
                if let Err(e) = self.reload_catalog().await {
                    error!("catalog refresh after loan failed: {}", e);
                    self.set_error(format!("Loan issued, but catalog refresh failed: {}", e));
                }
            }
            Err(e) => {
                error!("issue loan failed: {}", e);
                self.set_error(format!("Issue loan failed: {}", e));
            }
        }
    }

    /// Fetch the current catalog page and swap it in. On failure the
    /// previously rendered page stays.
    async fn reload_catalog(&mut self) -> Result<(), crate::api::ApiError> {
        let limit = self.config.page_limit;
        let books = match &self.catalog.filter {
            Some(filter) => {
                self.api
                    .search_books(
                        filter.author.as_deref(),
                        filter.topic.as_deref(),
                        self.catalog.skip,
                        limit,
                    )
                    .await?
            }
            None => self.api.list_books(self.catalog.skip, limit).await?,
        };
        self.catalog.set_books(books);
        Ok(())
    }

    async fn reload_readers(&mut self) -> Result<(), crate::api::ApiError> {
        let readers = self
            .api
            .list_readers(self.readers.skip, self.config.page_limit)
            .await?;
        self.readers.set_readers(readers);
        Ok(())
    }

    async fn step_catalog_page(&mut self, forward: bool) {
        let limit = self.config.page_limit;
        let previous = self.catalog.skip;
        self.catalog.skip = if forward {
            previous + limit
        } else {
            previous.saturating_sub(limit)
        };

        if let Err(e) = self.reload_catalog().await {
            self.catalog.skip = previous;
            error!("catalog page load failed: {}", e);
            self.set_error(format!("Failed to load page: {}", e));
        }
    }

    async fn step_readers_page(&mut self, forward: bool) {
        let limit = self.config.page_limit;
        let previous = self.readers.skip;
        self.readers.skip = if forward {
            previous + limit
        } else {
            previous.saturating_sub(limit)
        };

        if let Err(e) = self.reload_readers().await {
            self.readers.skip = previous;
            error!("reader page load failed: {}", e);
            self.set_error(format!("Failed to load page: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_uses_palette_styles() {
        let mut app = App::new(Config::from_env().unwrap()).unwrap();
        assert_eq!(app.status_bar_style(), Styles::inactive());

        app.set_status("Book added".to_string());
        assert_eq!(app.status_bar_style(), Styles::success());

        app.set_error("Add book failed".to_string());
        assert_eq!(app.status_bar_style(), Styles::error());
        assert!(app.status_message.is_none());
    }
}
