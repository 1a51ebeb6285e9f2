use crate::supervisor::RenderFault;
use crate::ui::centered_rect;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Static screen shown after a render panic; draws nothing that could fail again
pub fn render(frame: &mut Frame, fault: &RenderFault) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "Something went wrong",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(fault.message.as_str()),
        Line::default(),
        Line::from(Span::styled(
            "Ctrl+R: Start over • Esc: Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(panel, centered_rect(area, 60, 9));
}
