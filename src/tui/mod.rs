//! Terminal user interface for libdesk
//!
//! One screen per operation: the three create forms, the catalog and
//! reader list views, a main menu, and a help screen.

pub mod app;
pub mod screens;
pub mod ui;

pub use app::App;

pub use screens::{
    AddBookScreen, AddReaderScreen, CatalogScreen, HelpScreen, IssueLoanScreen, MainMenuScreen,
    ReadersScreen,
};
