//! Book catalog screen: the list view over GET /books/

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::Book;
use crate::tui::ui::{centered_rect, FieldKind, Form, InputField, Styles};

const FILTER_AUTHOR: usize = 0;
const FILTER_TOPIC: usize = 1;

/// Active author/topic filter, applied via the search endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFilter {
    pub author: Option<String>,
    pub topic: Option<String>,
}

/// Catalog screen state
pub struct CatalogScreen {
    pub books: Vec<Book>,
    pub list_state: ListState,
    /// Offset of the currently displayed page
    pub skip: usize,
    pub filter: Option<CatalogFilter>,
    pub show_filter_form: bool,
    pub filter_form: Form,
    pub has_loaded: bool,
}

impl CatalogScreen {
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            list_state: ListState::default(),
            skip: 0,
            filter: None,
            show_filter_form: false,
            filter_form: Form::new(vec![
                InputField::new("Author", FieldKind::Text).optional(),
                InputField::new("Topic", FieldKind::Text).optional(),
            ]),
            has_loaded: false,
        }
    }

    /// Replace the rendered page. Only called after a successful fetch,
    /// so a failed refresh leaves the previous list untouched.
    pub fn set_books(&mut self, books: Vec<Book>) {
        let selected = self.list_state.selected();
        self.books = books;
        self.has_loaded = true;

        if self.books.is_empty() {
            self.list_state.select(None);
        } else {
            match selected {
                Some(i) if i < self.books.len() => self.list_state.select(Some(i)),
                _ => self.list_state.select(Some(0)),
            }
        }
    }

    pub fn select_previous(&mut self) {
        if self.books.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.books.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_next(&mut self) {
        if self.books.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.books.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Read the filter form into an applied filter. Both fields empty
    /// means no filter (plain listing).
    pub fn applied_filter(&self) -> Option<CatalogFilter> {
        let author = self.filter_form.value(FILTER_AUTHOR);
        let topic = self.filter_form.value(FILTER_TOPIC);
        if author.is_empty() && topic.is_empty() {
            None
        } else {
            Some(CatalogFilter {
                author: (!author.is_empty()).then(|| author.to_string()),
                topic: (!topic.is_empty()).then(|| topic.to_string()),
            })
        }
    }

    /// One rendered row per record, plain text interpolation of the
    /// four descriptive fields plus the server-assigned id.
    pub fn format_row(book: &Book) -> String {
        format!(
            "{:>4} | {} — {} ({}, {})",
            book.id, book.title, book.author, book.publisher, book.topic
        )
    }

    /// Draw the catalog screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Book list
                Constraint::Length(4), // Instructions
            ])
            .split(area);

        self.draw_title(f, chunks[0]);
        self.draw_list(f, chunks[1]);
        self.draw_instructions(f, chunks[2]);

        if self.show_filter_form {
            self.draw_filter_popup(f, area);
        }
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let filter_text = match &self.filter {
            Some(filter) => {
                let mut parts = Vec::new();
                if let Some(author) = &filter.author {
                    parts.push(format!("author={}", author));
                }
                if let Some(topic) = &filter.topic {
                    parts.push(format!("topic={}", topic));
                }
                format!(" | filter: {}", parts.join(", "))
            }
            None => String::new(),
        };

        let title = format!(
            "Catalog - {} records from offset {}{}",
            self.books.len(),
            self.skip,
            filter_text
        );
        let title_widget = Paragraph::new(title)
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title_widget, area);
    }

    fn draw_list(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .books
            .iter()
            .enumerate()
            .map(|(i, book)| {
                let style = if Some(i) == self.list_state.selected() {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(Self::format_row(book), style)))
            })
            .collect();

        let block = Block::default()
            .title("Books")
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        if items.is_empty() {
            let text = if self.has_loaded {
                "No books on this page"
            } else {
                "Press r to load the catalog"
            };
            let placeholder = Paragraph::new(text).style(Styles::inactive()).block(block);
            f.render_widget(placeholder, area);
        } else {
            let list = List::new(items)
                .block(block)
                .highlight_style(Styles::selected());
            f.render_stateful_widget(list, area, &mut self.list_state);
        }
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let instructions = vec![
            Line::from("↑/↓: Navigate | r: Refresh | PageUp/PageDown: Previous/next page"),
            Line::from("/: Filter by author/topic | Esc: Back to main menu"),
        ];
        let instructions_widget = Paragraph::new(instructions)
            .style(Styles::info())
            .block(
                Block::default()
                    .title("Instructions")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(instructions_widget, area);
    }

    fn draw_filter_popup(&mut self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 40, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Filter Catalog (Enter: apply, Esc: cancel)")
            .borders(Borders::ALL)
            .border_style(Styles::active_border());
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        self.filter_form.render(f, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "A".to_string(),
            publisher: "P".to_string(),
            topic: "T".to_string(),
            year_published: None,
        }
    }

    #[test]
    fn rendering_the_same_page_twice_is_identical() {
        let books = vec![book(1, "Dune"), book(2, "The Trial")];
        let first: Vec<String> = books.iter().map(CatalogScreen::format_row).collect();
        let second: Vec<String> = books.iter().map(CatalogScreen::format_row).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn failed_refresh_leaves_previous_page_visible() {
        let mut screen = CatalogScreen::new();
        screen.set_books(vec![book(1, "Dune")]);
        // A fetch error never reaches set_books, so the list stands.
        assert_eq!(screen.books.len(), 1);
        assert_eq!(screen.list_state.selected(), Some(0));
    }

    #[test]
    fn selection_clamps_when_page_shrinks() {
        let mut screen = CatalogScreen::new();
        screen.set_books(vec![book(1, "a"), book(2, "b"), book(3, "c")]);
        screen.list_state.select(Some(2));

        screen.set_books(vec![book(1, "a")]);
        assert_eq!(screen.list_state.selected(), Some(0));

        screen.set_books(Vec::new());
        assert_eq!(screen.list_state.selected(), None);
    }

    #[test]
    fn empty_filter_form_means_no_filter() {
        let screen = CatalogScreen::new();
        assert_eq!(screen.applied_filter(), None);
    }

    #[test]
    fn filter_form_builds_partial_filters() {
        let mut screen = CatalogScreen::new();
        for c in "Kafka".chars() {
            screen.filter_form.fields[FILTER_AUTHOR].insert_char(c);
        }
        let filter = screen.applied_filter().unwrap();
        assert_eq!(filter.author.as_deref(), Some("Kafka"));
        assert_eq!(filter.topic, None);
    }
}
