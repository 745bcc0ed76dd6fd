//! Common UI components and utilities for the libdesk TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default()
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn inactive() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_border() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn inactive_border() -> Style {
        Style::default().fg(Color::Gray)
    }
}

/// What an input field accepts; checked before submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Integer,
    Date,
}

/// Input field widget with cursor editing
///
/// `cursor_position` is a byte offset into `value` and always sits on
/// a char boundary; all cursor movement steps by whole characters.
#[derive(Debug, Clone)]
pub struct InputField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub kind: FieldKind,
    pub required: bool,
    pub is_focused: bool,
    pub cursor_position: usize,
}

impl InputField {
    pub fn new(label: &str, kind: FieldKind) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            kind,
            required: true,
            is_focused: false,
            cursor_position: 0,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if let Some((start, _)) = self.value[..self.cursor_position].char_indices().next_back() {
            self.value.remove(start);
            self.cursor_position = start;
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.value.len() {
            self.value.remove(self.cursor_position);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some((start, _)) = self.value[..self.cursor_position].char_indices().next_back() {
            self.cursor_position = start;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.value[self.cursor_position..].chars().next() {
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Check the value against the field kind. Format rules apply only
    /// to non-empty values; emptiness is governed by `required`.
    pub fn validate(&self) -> Result<(), String> {
        if self.value.is_empty() {
            if self.required {
                return Err(format!("{} is required", self.label));
            }
            return Ok(());
        }

        match self.kind {
            FieldKind::Text => Ok(()),
            FieldKind::Integer => self
                .value
                .trim()
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| format!("{} must be a whole number", self.label)),
            FieldKind::Date => {
                chrono::NaiveDate::parse_from_str(self.value.trim(), "%Y-%m-%d")
                    .map(|_| ())
                    .map_err(|_| format!("{} must be a date (YYYY-MM-DD)", self.label))
            }
        }
    }

    /// Render the input field as a widget
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            &self.placeholder
        } else {
            &self.value
        };

        let style = if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let block = Block::default()
            .title(self.label.as_str())
            .borders(Borders::ALL)
            .border_style(style);

        let input_style = if self.value.is_empty() && !self.placeholder.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let paragraph = Paragraph::new(display_text.to_string())
            .style(input_style)
            .block(block);

        f.render_widget(paragraph, area);

        // Render cursor if focused. The byte offset is converted to a
        // column count so multi-byte characters occupy one cell.
        if self.is_focused {
            let cursor_col = self.value[..self.cursor_position].chars().count() as u16;
            let cursor_x = area.x + 1 + cursor_col;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Form container that manages fields and focus cycling
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<InputField>,
    pub current_field: usize,
}

impl Form {
    pub fn new(fields: Vec<InputField>) -> Self {
        let mut form = Self {
            fields,
            current_field: 0,
        };
        form.update_focus();
        form
    }

    fn update_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(i == self.current_field);
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.fields.len();
        self.update_focus();
    }

    pub fn previous_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.fields.len() - 1
        } else {
            self.current_field - 1
        };
        self.update_focus();
    }

    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.current_field) {
            field.insert_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.current_field) {
            field.delete_char();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(field) = self.fields.get_mut(self.current_field) {
            field.delete_char_forward();
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(field) = self.fields.get_mut(self.current_field) {
            field.move_cursor_left();
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(field) = self.fields.get_mut(self.current_field) {
            field.move_cursor_right();
        }
    }

    pub fn cursor_home(&mut self) {
        if let Some(field) = self.fields.get_mut(self.current_field) {
            field.move_cursor_to_start();
        }
    }

    pub fn cursor_end(&mut self) {
        if let Some(field) = self.fields.get_mut(self.current_field) {
            field.move_cursor_to_end();
        }
    }

    /// Trimmed value of the field at `index`
    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.value.trim())
            .unwrap_or("")
    }

    /// Clear every field and refocus the first one
    pub fn clear_all(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.current_field = 0;
        self.update_focus();
    }

    /// Validate all fields, reporting the first problem
    pub fn validate_all(&self) -> Result<(), String> {
        for field in &self.fields {
            field.validate()?;
        }
        Ok(())
    }

    /// Render fields stacked vertically, three rows each
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|_| Constraint::Length(3))
            .chain(std::iter::once(Constraint::Min(0)))
            .collect();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (field, chunk) in self.fields.iter().zip(chunks.iter()) {
            field.render(f, *chunk);
        }
    }
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_field_editing() {
        let mut field = InputField::new("Title", FieldKind::Text);
        field.insert_char('a');
        field.insert_char('c');
        field.move_cursor_left();
        field.insert_char('b');
        assert_eq!(field.value, "abc");

        field.delete_char();
        assert_eq!(field.value, "ac");

        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.cursor_position, 0);
    }

    #[test]
    fn input_field_edits_multibyte_characters() {
        let mut field = InputField::new("Author", FieldKind::Text);
        field.insert_char('é');
        field.insert_char('x');
        assert_eq!(field.value, "éx");

        field.move_cursor_left();
        field.move_cursor_left();
        field.insert_char('ß');
        assert_eq!(field.value, "ßéx");

        field.move_cursor_right();
        field.delete_char();
        assert_eq!(field.value, "ßx");

        field.delete_char();
        field.delete_char_forward();
        assert_eq!(field.value, "");
        assert_eq!(field.cursor_position, 0);
    }

    #[test]
    fn backspace_after_multibyte_character() {
        let mut field = InputField::new("Name", FieldKind::Text);
        field.insert_char('ß');
        field.delete_char();
        assert!(field.is_empty());
        assert_eq!(field.cursor_position, 0);
    }

    #[test]
    fn required_field_rejects_empty() {
        let field = InputField::new("Title", FieldKind::Text);
        assert!(field.validate().is_err());

        let optional = InputField::new("Author filter", FieldKind::Text).optional();
        assert!(optional.validate().is_ok());
    }

    #[test]
    fn integer_field_rejects_non_numeric() {
        let mut field = InputField::new("Book ID", FieldKind::Integer);
        for c in "12x".chars() {
            field.insert_char(c);
        }
        assert!(field.validate().is_err());

        let mut field = InputField::new("Book ID", FieldKind::Integer);
        for c in "42".chars() {
            field.insert_char(c);
        }
        assert!(field.validate().is_ok());
    }

    #[test]
    fn date_field_requires_iso_format() {
        let mut field = InputField::new("Due Date", FieldKind::Date);
        for c in "15/03/2025".chars() {
            field.insert_char(c);
        }
        assert!(field.validate().is_err());

        field.clear();
        for c in "2025-03-15".chars() {
            field.insert_char(c);
        }
        assert!(field.validate().is_ok());
    }

    #[test]
    fn form_focus_cycles() {
        let mut form = Form::new(vec![
            InputField::new("A", FieldKind::Text),
            InputField::new("B", FieldKind::Text),
        ]);
        assert!(form.fields[0].is_focused);

        form.next_field();
        assert!(!form.fields[0].is_focused);
        assert!(form.fields[1].is_focused);

        form.next_field();
        assert!(form.fields[0].is_focused);

        form.previous_field();
        assert!(form.fields[1].is_focused);
    }

    #[test]
    fn clear_all_empties_fields_and_refocuses() {
        let mut form = Form::new(vec![
            InputField::new("A", FieldKind::Text),
            InputField::new("B", FieldKind::Text),
        ]);
        form.handle_char('x');
        form.next_field();
        form.handle_char('y');

        form.clear_all();
        assert!(form.fields.iter().all(|f| f.is_empty()));
        assert_eq!(form.current_field, 0);
    }
}
