use crate::ui::centered_rect;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render_loading(frame: &mut Frame, area: Rect) {
    let loading = Paragraph::new("Checking your session...")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(loading, centered_rect(area, 40, 1));
}

pub fn render_not_found(frame: &mut Frame, area: Rect, path: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "Page not found",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Nothing lives at {}", path)),
        Line::default(),
        Line::from(Span::styled(
            "Enter: Go home",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(panel, centered_rect(area, 50, 6));
}
