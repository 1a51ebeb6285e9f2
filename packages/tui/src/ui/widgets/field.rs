use crate::state::Field;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_input::Input;

/// Rows taken by one field: label, bordered input, error line
pub const FIELD_HEIGHT: u16 = 5;

const MASK: char = '•';

/// Render a labelled single-line input with its validation error
pub fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    field: Field,
    input: &Input,
    error: Option<&str>,
    is_current: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Length(3), // Input (with borders)
            Constraint::Length(1), // Error/spacing
        ])
        .split(area);
    let (label_area, input_area, error_area) = (chunks[0], chunks[1], chunks[2]);

    let label_style = if is_current {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    frame.render_widget(
        Paragraph::new(format!("{}: ", field.label())).style(label_style),
        label_area,
    );

    let width = input_area.width.max(3).saturating_sub(2) as usize;
    let scroll = input.visual_scroll(width);
    let display_value = if field.is_secret() {
        MASK.to_string().repeat(input.value().chars().count())
    } else {
        input.value().to_string()
    };

    let input_paragraph = Paragraph::new(display_value)
        .style(Style::default().fg(Color::White))
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if error.is_some() {
                    Style::default().fg(Color::Red)
                } else if is_current {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::Gray)
                }),
        );
    frame.render_widget(input_paragraph, input_area);

    if is_current {
        let cursor_x = input.visual_cursor().max(scroll) - scroll;
        frame.set_cursor_position((input_area.x + 1 + cursor_x as u16, input_area.y + 1));
    }

    if let Some(error) = error {
        frame.render_widget(
            Paragraph::new(error).style(Style::default().fg(Color::Red)),
            error_area,
        );
    }
}
