//! Reader directory screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::Reader;
use crate::tui::ui::Styles;

/// Readers screen state
pub struct ReadersScreen {
    pub readers: Vec<Reader>,
    pub list_state: ListState,
    pub skip: usize,
    pub has_loaded: bool,
}

impl ReadersScreen {
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
            list_state: ListState::default(),
            skip: 0,
            has_loaded: false,
        }
    }

    /// Replace the rendered page; only called after a successful fetch
    pub fn set_readers(&mut self, readers: Vec<Reader>) {
        let selected = self.list_state.selected();
        self.readers = readers;
        self.has_loaded = true;

        if self.readers.is_empty() {
            self.list_state.select(None);
        } else {
            match selected {
                Some(i) if i < self.readers.len() => self.list_state.select(Some(i)),
                _ => self.list_state.select(Some(0)),
            }
        }
    }

    pub fn select_previous(&mut self) {
        if self.readers.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.readers.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_next(&mut self) {
        if self.readers.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.readers.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn format_row(reader: &Reader) -> String {
        format!(
            "{:>4} | {} — {} ({})",
            reader.id, reader.name, reader.address, reader.phone
        )
    }

    /// Draw the readers screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Reader list
                Constraint::Length(3), // Instructions
            ])
            .split(area);

        let title = format!(
            "Readers - {} records from offset {}",
            self.readers.len(),
            self.skip
        );
        let title_widget = Paragraph::new(title)
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title_widget, chunks[0]);

        let items: Vec<ListItem> = self
            .readers
            .iter()
            .enumerate()
            .map(|(i, reader)| {
                let style = if Some(i) == self.list_state.selected() {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(Self::format_row(reader), style)))
            })
            .collect();

        let block = Block::default()
            .title("Readers")
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        if items.is_empty() {
            let text = if self.has_loaded {
                "No readers on this page"
            } else {
                "Press r to load the reader list"
            };
            let placeholder = Paragraph::new(text).style(Styles::inactive()).block(block);
            f.render_widget(placeholder, chunks[1]);
        } else {
            let list = List::new(items)
                .block(block)
                .highlight_style(Styles::selected());
            f.render_stateful_widget(list, chunks[1], &mut self.list_state);
        }

        let instructions = Paragraph::new(Line::from(
            "↑/↓: Navigate | r: Refresh | PageUp/PageDown: Page | Esc: Back",
        ))
        .style(Styles::info())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(instructions, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_readers_selects_first_row() {
        let mut screen = ReadersScreen::new();
        screen.set_readers(vec![Reader {
            id: 1,
            name: "Ada".to_string(),
            address: "Berlin".to_string(),
            phone: "123".to_string(),
            email: None,
        }]);
        assert_eq!(screen.list_state.selected(), Some(0));
        assert!(screen.has_loaded);
    }
}
