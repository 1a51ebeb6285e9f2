pub mod auth;
pub mod chat;
pub mod profile;
pub mod widgets;

use crate::state::{AppState, Screen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use widgets::{NoticeStackWidget, StatusBarWidget};

/// Main UI rendering function
pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Main content area
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    match state.screen() {
        Screen::Loading => widgets::message::render_loading(frame, main_area),
        Screen::Auth => auth::render_with_area(frame, state, main_area),
        Screen::Profile => profile::render_with_area(frame, state, main_area),
        Screen::Chat => chat::render_with_area(frame, state, main_area),
        Screen::NotFound(path) => widgets::message::render_not_found(frame, main_area, &path),
    }

    frame.render_widget(StatusBarWidget::new(state), status_area);

    // Toasts float over the top-right corner of the main area
    frame.render_widget(NoticeStackWidget::new(&state.notices), main_area);
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::{IdentityRecord, Route, SessionSnapshot};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;
    use std::time::Duration;

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn signed_in(profile_setup: bool) -> SessionSnapshot {
        SessionSnapshot {
            resolved: true,
            loading: false,
            identity: Some(Arc::new(IdentityRecord {
                id: "u1".into(),
                email: "ada@example.com".into(),
                first_name: Some("Ada".into()),
                last_name: Some("Lovelace".into()),
                profile_setup,
                image: None,
                color: Some(3),
            })),
        }
    }

    #[test]
    fn test_loading_screen_while_unknown() {
        let state = AppState::new(Route::Chat, Duration::from_secs(4));
        assert!(draw(&state).contains("Checking your session"));
    }

    #[test]
    fn test_auth_screen_shows_tabs_and_fields() {
        let mut state = AppState::new(Route::Root, Duration::from_secs(4));
        state.apply_session(SessionSnapshot {
            resolved: true,
            ..SessionSnapshot::default()
        });

        let text = draw(&state);
        assert!(text.contains("Login"));
        assert!(text.contains("Signup"));
        assert!(text.contains("Email"));
        assert!(!text.contains("Confirm Password"));
    }

    #[test]
    fn test_chat_screen_greets_user() {
        let mut state = AppState::new(Route::Chat, Duration::from_secs(4));
        state.apply_session(signed_in(true));

        assert!(draw(&state).contains("Ada Lovelace"));
    }

    #[test]
    fn test_profile_screen_shows_color_picker() {
        let mut state = AppState::new(Route::Chat, Duration::from_secs(4));
        state.apply_session(signed_in(false));

        let text = draw(&state);
        assert!(text.contains("First Name"));
        assert!(text.contains("magenta"));
        assert!(text.contains("Lovelace"));
        assert!(text.contains("Please setup your profile first"));
    }

    #[test]
    fn test_not_found_screen() {
        let mut state = AppState::new(Route::parse("/settings"), Duration::from_secs(4));
        state.apply_session(signed_in(true));

        assert!(draw(&state).contains("/settings"));
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered_rect(area, 20, 2), Rect::new(0, 1, 10, 2));
    }
}
