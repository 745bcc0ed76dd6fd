//! Help screen with keyboard reference

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::tui::ui::Styles;

/// One help section: a title and its body text
pub struct HelpSection {
    pub title: &'static str,
    pub content: &'static str,
}

/// Help screen state
pub struct HelpScreen {
    pub sections: Vec<HelpSection>,
    pub section_state: ListState,
    pub current_section: usize,
    pub scroll_offset: u16,
}

impl HelpScreen {
    pub fn new() -> Self {
        let sections = vec![
            HelpSection {
                title: "Overview",
                content: "libdesk is a terminal client for the library service.\n\n\
                    The three forms (Add Book, Add Reader, Issue Loan) each send a \
                    single request when submitted. The outcome appears in the status \
                    bar at the bottom: the server's own message on success, the \
                    server's error text on rejection. A successful book or loan \
                    submission also refreshes the catalog.\n\n\
                    Nothing is retried automatically; press Enter again to resubmit.",
            },
            HelpSection {
                title: "Forms",
                content: "Tab / Shift+Tab / Up / Down move between fields.\n\
                    Enter submits the form.\n\
                    Esc returns to the main menu without submitting.\n\n\
                    All fields are required. Loan identifiers must be whole numbers \
                    and dates must be YYYY-MM-DD; invalid input is reported locally \
                    and nothing is sent.\n\n\
                    After a successful submission the fields are cleared. After a \
                    rejected one, your input stays put so you can correct it.",
            },
            HelpSection {
                title: "Catalog & Readers",
                content: "r reloads the current page.\n\
                    PageUp / PageDown step through pages (offset moves by the \
                    configured page limit, default 10).\n\
                    / opens the author/topic filter; Enter applies it, Esc cancels. \
                    An empty filter form returns to the plain listing.\n\n\
                    If a refresh fails, the previously displayed page is kept.",
            },
            HelpSection {
                title: "Configuration",
                content: "LIBDESK_API_URL - base URL of the backend \
                    (default http://127.0.0.1:3000)\n\
                    LIBDESK_PAGE_LIMIT - records per list page (default 10)\n\
                    LIBDESK_HTTP_TIMEOUT_SECONDS - request timeout (default 30)\n\
                    LIBDESK_USER_AGENT - HTTP user agent\n\n\
                    In TUI mode, diagnostics go to libdesk.log in the working \
                    directory; set RUST_LOG to adjust verbosity.",
            },
        ];

        let mut section_state = ListState::default();
        section_state.select(Some(0));

        Self {
            sections,
            section_state,
            current_section: 0,
            scroll_offset: 0,
        }
    }

    pub fn previous_section(&mut self) {
        if self.current_section > 0 {
            self.current_section -= 1;
            self.section_state.select(Some(self.current_section));
            self.scroll_offset = 0;
        }
    }

    pub fn next_section(&mut self) {
        if self.current_section < self.sections.len() - 1 {
            self.current_section += 1;
            self.section_state.select(Some(self.current_section));
            self.scroll_offset = 0;
        }
    }

    /// Draw the help screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(area);

        let items: Vec<ListItem> = self
            .sections
            .iter()
            .enumerate()
            .map(|(i, section)| {
                let style = if i == self.current_section {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(section.title, style)))
            })
            .collect();

        let section_list = List::new(items)
            .block(
                Block::default()
                    .title("Help Sections")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected());
        f.render_stateful_widget(section_list, chunks[0], &mut self.section_state);

        let content = self
            .sections
            .get(self.current_section)
            .map(|s| s.content)
            .unwrap_or("");
        let content_widget = Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset, 0))
            .block(
                Block::default()
                    .title("↑/↓: Section | PageUp/PageDown: Scroll | Esc: Back")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(content_widget, chunks[1]);
    }
}
