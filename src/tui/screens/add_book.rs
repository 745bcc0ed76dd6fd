//! Add-book form screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::NewBook;
use crate::tui::ui::{FieldKind, Form, InputField, Styles};

const TITLE: usize = 0;
const AUTHOR: usize = 1;
const PUBLISHER: usize = 2;
const TOPIC: usize = 3;

/// Add-book screen state
pub struct AddBookScreen {
    pub form: Form,
}

impl AddBookScreen {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                InputField::new("Title", FieldKind::Text).with_placeholder("e.g., The Trial"),
                InputField::new("Author", FieldKind::Text).with_placeholder("e.g., Franz Kafka"),
                InputField::new("Publisher", FieldKind::Text),
                InputField::new("Topic", FieldKind::Text).with_placeholder("e.g., Fiction"),
            ]),
        }
    }

    /// Validate the form and build the create payload. Field values go
    /// into the payload verbatim apart from whitespace trimming.
    pub fn payload(&self) -> Result<NewBook, String> {
        self.form.validate_all()?;
        Ok(NewBook {
            title: self.form.value(TITLE).to_string(),
            author: self.form.value(AUTHOR).to_string(),
            publisher: self.form.value(PUBLISHER).to_string(),
            topic: self.form.value(TOPIC).to_string(),
        })
    }

    /// Draw the add-book screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Form
                Constraint::Length(4), // Instructions
            ])
            .split(area);

        let title_widget = Paragraph::new("Add Book")
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title_widget, chunks[0]);

        self.form.render(f, chunks[1]);

        let instructions = vec![
            Line::from("Tab/Shift+Tab or ↑/↓: Move between fields | Enter: Submit"),
            Line::from("Esc: Back to main menu | All fields are required"),
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

    fn fill(form: &mut Form, index: usize, text: &str) {
        form.current_field = index;
        for c in text.chars() {
            form.fields[index].insert_char(c);
        }
    }

    #[test]
    fn payload_carries_entered_values_verbatim() {
        let mut screen = AddBookScreen::new();
        fill(&mut screen.form, TITLE, "Dune");
        fill(&mut screen.form, AUTHOR, "Frank Herbert");
        fill(&mut screen.form, PUBLISHER, "Chilton");
        fill(&mut screen.form, TOPIC, "SF");

        let payload = screen.payload().unwrap();
        assert_eq!(payload.title, "Dune");
        assert_eq!(payload.author, "Frank Herbert");
        assert_eq!(payload.publisher, "Chilton");
        assert_eq!(payload.topic, "SF");
    }

    #[test]
    fn payload_rejects_missing_field() {
        let mut screen = AddBookScreen::new();
        fill(&mut screen.form, TITLE, "Dune");
        // author, publisher, topic left empty
        let err = screen.payload().unwrap_err();
        assert!(err.contains("Author"));
    }

    #[test]
    fn values_survive_a_rejected_submission() {
        // A failed submit must not clear the form; only an explicit
        // clear_all after a success does.
        let mut screen = AddBookScreen::new();
        fill(&mut screen.form, TITLE, "Dune");
        assert!(screen.payload().is_err());
        assert_eq!(screen.form.value(TITLE), "Dune");
    }
}
