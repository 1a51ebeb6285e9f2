use crate::notices::NoticeQueue;
use parley_core::NoticeLevel;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

/// Stack of toasts in the top-right corner, newest on top
pub struct NoticeStackWidget<'a> {
    queue: &'a NoticeQueue,
}

impl<'a> NoticeStackWidget<'a> {
    pub fn new(queue: &'a NoticeQueue) -> Self {
        Self { queue }
    }
}

fn level_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Blue,
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Error => Color::Red,
    }
}

impl<'a> Widget for NoticeStackWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = TOAST_WIDTH.min(area.width);
        let mut y = area.y;

        for notice in self.queue.visible() {
            let height = if notice.description.is_some() {
                TOAST_HEIGHT
            } else {
                TOAST_HEIGHT - 1
            };
            if y + height > area.bottom() {
                break;
            }

            // Short titles get a narrower toast
            let content_width = notice
                .description
                .as_deref()
                .map_or(0, UnicodeWidthStr::width)
                .max(notice.title.width()) as u16;
            let toast_width = (content_width + 4).max(20).min(width);
            let toast = Rect {
                x: area.right().saturating_sub(toast_width),
                y,
                width: toast_width,
                height,
            };

            let color = level_color(notice.level);
            let mut lines = vec![Line::from(Span::styled(
                notice.title.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))];
            if let Some(description) = &notice.description {
                lines.push(Line::from(description.as_str()));
            }

            Clear.render(toast, buf);
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                )
                .render(toast, buf);

            y += height;
        }
    }
}
