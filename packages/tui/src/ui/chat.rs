use crate::state::AppState;
use crate::ui::widgets::palette_color;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Render the chat screen for a signed-in user with a complete profile
pub fn render_with_area(frame: &mut Frame, state: &AppState, area: Rect) {
    let Some(identity) = state.session.identity.as_ref() else {
        return;
    };
    let color = identity.color.map(palette_color).unwrap_or(Color::Cyan);

    let lines = vec![
        Line::from(vec![
            Span::raw("Signed in as "),
            Span::styled(
                identity.display_name(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            identity.email.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::default(),
        Line::from(Span::styled(
            "No conversations yet.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let chat = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Chat ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(chat, area);
}
