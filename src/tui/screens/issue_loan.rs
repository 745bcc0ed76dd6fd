//! Issue-loan form screen

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::NewLoan;
use crate::tui::ui::{FieldKind, Form, InputField, Styles};

const READER_ID: usize = 0;
const BOOK_ID: usize = 1;
const ISSUE_DATE: usize = 2;
const DUE_DATE: usize = 3;

/// Issue-loan screen state
pub struct IssueLoanScreen {
    pub form: Form,
}

impl IssueLoanScreen {
    pub fn new() -> Self {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        Self {
            form: Form::new(vec![
                InputField::new("Reader ID", FieldKind::Integer).with_placeholder("e.g., 7"),
                InputField::new("Book ID", FieldKind::Integer).with_placeholder("e.g., 42"),
                InputField::new("Issue Date (YYYY-MM-DD)", FieldKind::Date)
                    .with_placeholder(&today),
                InputField::new("Due Date (YYYY-MM-DD)", FieldKind::Date)
                    .with_placeholder("2025-12-31"),
            ]),
        }
    }

    /// Validate the form and build the create payload. Identifiers must
    /// parse as integers and dates as ISO calendar dates; nothing is
    /// sent to the server otherwise.
    pub fn payload(&self) -> Result<NewLoan, String> {
        self.form.validate_all()?;

        let reader_id = self
            .form
            .value(READER_ID)
            .parse::<i64>()
            .map_err(|_| "Reader ID must be a whole number".to_string())?;
        let book_id = self
            .form
            .value(BOOK_ID)
            .parse::<i64>()
            .map_err(|_| "Book ID must be a whole number".to_string())?;
        let issue_date = NaiveDate::parse_from_str(self.form.value(ISSUE_DATE), "%Y-%m-%d")
            .map_err(|_| "Issue Date must be a date (YYYY-MM-DD)".to_string())?;
        let due_date = NaiveDate::parse_from_str(self.form.value(DUE_DATE), "%Y-%m-%d")
            .map_err(|_| "Due Date must be a date (YYYY-MM-DD)".to_string())?;

        if due_date < issue_date {
            return Err("Due Date must not be before Issue Date".to_string());
        }

        Ok(NewLoan {
            reader_id,
            book_id,
            issue_date,
            due_date,
        })
    }

    /// Draw the issue-loan screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Form
                Constraint::Length(4), // Instructions
            ])
            .split(area);

        let title_widget = Paragraph::new("Issue Loan")
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title_widget, chunks[0]);

        self.form.render(f, chunks[1]);

        let instructions = vec![
            Line::from("Tab/Shift+Tab or ↑/↓: Move between fields | Enter: Submit"),
            Line::from("Esc: Back to main menu | IDs come from the catalog and reader list"),
        ];
        let instructions_widget = Paragraph::new(instructions)
            .style(Styles::info())
            .block(
                Block::default()
                    .title("Instructions")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(instructions_widget, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(screen: &mut IssueLoanScreen, index: usize, text: &str) {
        for c in text.chars() {
            screen.form.fields[index].insert_char(c);
        }
    }

    #[test]
    fn payload_parses_ids_and_dates() {
        let mut screen = IssueLoanScreen::new();
        fill(&mut screen, READER_ID, "7");
        fill(&mut screen, BOOK_ID, "42");
        fill(&mut screen, ISSUE_DATE, "2025-03-01");
        fill(&mut screen, DUE_DATE, "2025-03-15");

        let payload = screen.payload().unwrap();
        assert_eq!(payload.reader_id, 7);
        assert_eq!(payload.book_id, 42);
        assert_eq!(payload.issue_date.to_string(), "2025-03-01");
        assert_eq!(payload.due_date.to_string(), "2025-03-15");
    }

    #[test]
    fn non_numeric_id_is_rejected_before_any_request() {
        let mut screen = IssueLoanScreen::new();
        fill(&mut screen, READER_ID, "seven");
        fill(&mut screen, BOOK_ID, "42");
        fill(&mut screen, ISSUE_DATE, "2025-03-01");
        fill(&mut screen, DUE_DATE, "2025-03-15");

        let err = screen.payload().unwrap_err();
        assert!(err.contains("Reader ID"));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut screen = IssueLoanScreen::new();
        fill(&mut screen, READER_ID, "7");
        fill(&mut screen, BOOK_ID, "42");
        fill(&mut screen, ISSUE_DATE, "03/01/2025");
        fill(&mut screen, DUE_DATE, "2025-03-15");

        assert!(screen.payload().is_err());
    }

    #[test]
    fn due_date_must_not_precede_issue_date() {
        let mut screen = IssueLoanScreen::new();
        fill(&mut screen, READER_ID, "7");
        fill(&mut screen, BOOK_ID, "42");
        fill(&mut screen, ISSUE_DATE, "2025-03-15");
        fill(&mut screen, DUE_DATE, "2025-03-01");

        let err = screen.payload().unwrap_err();
        assert!(err.contains("Due Date"));
    }
}
