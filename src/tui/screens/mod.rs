//! Screen modules for the libdesk TUI

pub mod add_book;
pub mod add_reader;
pub mod catalog;
pub mod help;
pub mod issue_loan;
pub mod main_menu;
pub mod readers;

pub use add_book::AddBookScreen;
pub use add_reader::AddReaderScreen;
pub use catalog::CatalogScreen;
pub use help::HelpScreen;
pub use issue_loan::IssueLoanScreen;
pub use main_menu::MainMenuScreen;
pub use readers::ReadersScreen;
