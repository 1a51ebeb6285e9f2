use crate::state::{AppState, Field};
use crate::ui::centered_rect;
use crate::ui::widgets::field::{self, FIELD_HEIGHT};
use crate::ui::widgets::palette_color;
use parley_core::forms::AVATAR_COLORS;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

const FORM_WIDTH: u16 = 56;

/// Render profile setup: two name fields and the avatar color picker
pub fn render_with_area(frame: &mut Frame, state: &AppState, area: Rect) {
    let height = 3 + FIELD_HEIGHT * 2 + 3 + 1 + 2;
    let form_area = centered_rect(area, FORM_WIDTH, height);

    let block = Block::default()
        .title(" Profile ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Avatar
            Constraint::Length(FIELD_HEIGHT), // First name
            Constraint::Length(FIELD_HEIGHT), // Last name
            Constraint::Length(3),            // Color picker
            Constraint::Length(1),            // Hint
        ])
        .split(inner);

    render_avatar(frame, state, chunks[0]);

    let focused = state.focused_field();
    for (field, area) in [(Field::FirstName, chunks[1]), (Field::LastName, chunks[2])] {
        if let Some(input) = state.input(field) {
            field::render_text_field(
                frame,
                area,
                field,
                input,
                state.field_error(field),
                focused == Some(field),
            );
        }
    }

    render_color_picker(frame, state, chunks[3], focused == Some(Field::Color));

    let hint = if state.pending.is_some() {
        "Please wait..."
    } else {
        "Enter: Save Changes • Tab: Next field • ←/→: Color"
    };
    frame.render_widget(
        Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[4],
    );
}

/// Initial letter of the name being typed, or of the email
fn render_avatar(frame: &mut Frame, state: &AppState, area: Rect) {
    let initial = state
        .first_name
        .value()
        .trim()
        .chars()
        .next()
        .or_else(|| {
            state
                .session
                .identity
                .as_ref()
                .and_then(|identity| identity.email.chars().next())
        })
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    let avatar = Paragraph::new(format!(" {} ", initial))
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(palette_color(state.profile.color))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(avatar, centered_rect(area, 5, 1));
}

fn render_color_picker(frame: &mut Frame, state: &AppState, area: Rect, focused: bool) {
    let mut spans = Vec::with_capacity(AVATAR_COLORS.len() * 2);
    for (index, name) in AVATAR_COLORS.iter().enumerate() {
        let selected = index as u8 == state.profile.color;
        let marker = if selected { "●" } else { "○" };
        let mut style = Style::default().fg(palette_color(index as u8));
        if selected {
            style = style.add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(format!("{} {}", marker, name), style));
        spans.push(Span::raw("  "));
    }

    let picker = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(Field::Color.label())
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            }),
    );
    frame.render_widget(picker, area);
}
