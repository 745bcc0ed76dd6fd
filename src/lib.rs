//! libdesk - terminal client for the library REST service
//!
//! Talks to the library backend over HTTP: create books and readers,
//! issue loans, and browse the catalog either interactively (TUI) or
//! from scripts (CLI subcommands).

pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod tui;
