use crate::state::{AppState, AuthTab, Field, Screen};
use parley_core::{ActionKind, SessionState};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

/// Status bar widget that displays context-aware information
pub struct StatusBarWidget<'a> {
    state: &'a AppState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Busy indicator while an action is in flight
    fn get_mode_info(&self) -> Option<(String, Style)> {
        let label = match self.state.pending? {
            ActionKind::Login => "SIGNING IN",
            ActionKind::Signup => "SIGNING UP",
            ActionKind::UpdateProfile => "SAVING",
            ActionKind::Logout => return None,
        };
        Some((
            label.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    }

    /// Current route plus who is signed in
    fn get_navigation_breadcrumb(&self) -> String {
        let route = format!(" {}", self.state.route);
        match (self.state.session_state(), &self.state.session.identity) {
            (SessionState::Unknown, _) => " Starting".to_string(),
            (_, Some(identity)) => format!("{} • {}", route, identity.email),
            (_, None) => route,
        }
    }

    /// Get context-aware keyboard shortcuts
    fn get_shortcuts(&self) -> &'static str {
        match self.state.screen() {
            Screen::Loading => "Esc: Quit",
            Screen::Auth => match self.state.tab {
                AuthTab::Login => "Tab: Next • Enter: Login • Ctrl+T: Signup • Esc: Quit",
                AuthTab::Signup => "Tab: Next • Enter: Signup • Ctrl+T: Login • Esc: Quit",
            },
            Screen::Profile => match self.state.focused_field() {
                Some(Field::Color) => "←/→: Color • Enter: Save • Ctrl+L: Logout • Esc: Quit",
                _ => "Tab: Next • Enter: Save • Ctrl+L: Logout • Esc: Quit",
            },
            Screen::Chat => "Ctrl+L: Logout • Esc: Quit",
            Screen::NotFound(_) => "Enter: Home • Esc: Quit",
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mode_info = self.get_mode_info();
        let breadcrumb = self.get_navigation_breadcrumb();
        let shortcuts = self.get_shortcuts();
        let shortcuts_width = shortcuts.chars().count() as u16;

        let chunks = if let Some((ref mode_text, _)) = mode_info {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(mode_text.len() as u16 + 2), // Mode indicator
                    Constraint::Min(20),                            // Breadcrumb
                    Constraint::Length(shortcuts_width),            // Shortcuts
                ])
                .split(area)
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(20), Constraint::Length(shortcuts_width)])
                .split(area)
        };

        let mut current_chunk = 0;

        if let Some((mode_text, mode_style)) = mode_info {
            Paragraph::new(format!(" {} ", mode_text))
                .style(mode_style)
                .block(Block::default())
                .render(chunks[current_chunk], buf);
            current_chunk += 1;
        }

        Paragraph::new(breadcrumb)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default())
            .render(chunks[current_chunk], buf);
        current_chunk += 1;

        Paragraph::new(shortcuts)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default())
            .render(chunks[current_chunk], buf);
    }
}
