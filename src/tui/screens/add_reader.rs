//! Add-reader form screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::NewReader;
use crate::tui::ui::{FieldKind, Form, InputField, Styles};

const NAME: usize = 0;
const ADDRESS: usize = 1;
const PHONE: usize = 2;

/// Add-reader screen state
pub struct AddReaderScreen {
    pub form: Form,
}

impl AddReaderScreen {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                InputField::new("Name", FieldKind::Text).with_placeholder("e.g., Ada Lovelace"),
                InputField::new("Address", FieldKind::Text),
                InputField::new("Phone", FieldKind::Text).with_placeholder("e.g., +49 30 1234567"),
            ]),
        }
    }

    /// Validate the form and build the create payload
    pub fn payload(&self) -> Result<NewReader, String> {
        self.form.validate_all()?;
        Ok(NewReader {
            name: self.form.value(NAME).to_string(),
            address: self.form.value(ADDRESS).to_string(),
            phone: self.form.value(PHONE).to_string(),
        })
    }

    /// Draw the add-reader screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Form
                Constraint::Length(4), // Instructions
            ])
            .split(area);

        let title_widget = Paragraph::new("Add Reader")
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
