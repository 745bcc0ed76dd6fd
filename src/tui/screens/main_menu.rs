//! Main menu screen for the libdesk TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::{app::Screen, ui::Styles};

/// Main menu options
#[derive(Debug, Clone)]
pub struct MenuOption {
    pub title: String,
    pub description: String,
    pub shortcut: char,
    pub screen: Screen,
}

impl MenuOption {
    pub fn new(title: &str, description: &str, shortcut: char, screen: Screen) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            shortcut,
            screen,
        }
    }
}

/// Main menu screen state
pub struct MainMenuScreen {
    pub menu_state: ListState,
    pub menu_options: Vec<MenuOption>,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        let menu_options = vec![
            MenuOption::new(
                "Add Book",
                "Register a new book with title, author, publisher, and topic",
                'B',
                Screen::AddBook,
            ),
            MenuOption::new(
                "Add Reader",
                "Register a new reader with name, address, and phone",
                'R',
                Screen::AddReader,
            ),
            MenuOption::new(
                "Issue Loan",
                "Issue a book to a reader by their identifiers",
                'L',
                Screen::IssueLoan,
            ),
            MenuOption::new(
                "Catalog",
                "Browse the book catalog, page through it, filter by author or topic",
                'C',
                Screen::Catalog,
            ),
            MenuOption::new(
                "Readers",
                "Browse registered readers",
                'D',
                Screen::Readers,
            ),
            MenuOption::new("Help", "View help and keyboard shortcuts", 'H', Screen::Help),
        ];

        let mut menu_state = ListState::default();
        menu_state.select(Some(0));

        Self {
            menu_state,
            menu_options,
        }
    }

    pub fn select_previous(&mut self) {
        let selected = self.menu_state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.menu_options.len() - 1
        } else {
            selected - 1
        };
        self.menu_state.select(Some(new_selected));
    }

    pub fn select_next(&mut self) {
        let selected = self.menu_state.selected().unwrap_or(0);
        let new_selected = (selected + 1) % self.menu_options.len();
        self.menu_state.select(Some(new_selected));
    }

    pub fn selected_option(&self) -> Option<&MenuOption> {
        self.menu_state
            .selected()
            .and_then(|i| self.menu_options.get(i))
    }

    /// Find the target screen for a shortcut key (case insensitive)
    pub fn screen_for_shortcut(&self, c: char) -> Option<Screen> {
        let upper = c.to_ascii_uppercase();
        self.menu_options
            .iter()
            .find(|option| option.shortcut == upper)
            .map(|option| option.screen.clone())
    }

    /// Draw the main menu screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Menu
                Constraint::Length(5), // Instructions
            ])
            .split(area);

        self.draw_title(f, chunks[0]);
        self.draw_menu(f, chunks[1]);
        self.draw_instructions(f, chunks[2]);
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new("Library Desk")
            .style(Styles::title().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn draw_menu(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .menu_options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = if Some(i) == self.menu_state.selected() {
                    Styles::selected()
                } else {
                    Style::default()
                };

                let content = vec![
                    Line::from(vec![
                        Span::styled(format!("[{}] ", option.shortcut), Styles::info()),
                        Span::styled(&option.title, style.add_modifier(Modifier::BOLD)),
                    ]),
                    Line::from(Span::styled(
                        format!("     {}", option.description),
                        if Some(i) == self.menu_state.selected() {
                            style
                        } else {
                            Styles::inactive()
                        },
                    )),
                ];

                ListItem::new(content)
            })
            .collect();

        let menu = List::new(items)
            .block(
                Block::default()
                    .title("Main Menu")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected());

        f.render_stateful_widget(menu, area, &mut self.menu_state);
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let instructions = vec![
            Line::from(vec![
                Span::styled("Navigation: ", Styles::info()),
                Span::raw("↑/↓ to move, "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" to select"),
            ]),
            Line::from(vec![
                Span::styled("Shortcuts: ", Styles::info()),
                Span::styled("B/R/L/C/D/H", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" for direct access, "),
                Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" to quit"),
            ]),
            Line::from(vec![
                Span::styled("Global: ", Styles::info()),
                Span::styled("F1", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" for context help on any screen"),
            ]),
        ];

        let instructions_paragraph = Paragraph::new(instructions).block(
            Block::default()
                .title("Instructions")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );

        f.render_widget(instructions_paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcut_lookup_is_case_insensitive() {
        let menu = MainMenuScreen::new();
        assert_eq!(menu.screen_for_shortcut('b'), Some(Screen::AddBook));
        assert_eq!(menu.screen_for_shortcut('B'), Some(Screen::AddBook));
        assert_eq!(menu.screen_for_shortcut('z'), None);
    }

    #[test]
    fn selection_wraps_around() {
        let mut menu = MainMenuScreen::new();
        menu.select_previous();
        assert_eq!(
            menu.menu_state.selected(),
            Some(menu.menu_options.len() - 1)
        );
        menu.select_next();
        assert_eq!(menu.menu_state.selected(), Some(0));
    }
}
