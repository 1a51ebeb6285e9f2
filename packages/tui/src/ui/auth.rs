use crate::state::{AppState, AuthTab};
use crate::ui::centered_rect;
use crate::ui::widgets::field::{self, FIELD_HEIGHT};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

const FORM_WIDTH: u16 = 56;

/// Render the combined login/signup screen
pub fn render_with_area(frame: &mut Frame, state: &AppState, area: Rect) {
    let fields = state.fields();
    // Title, tabs, fields, hint, borders
    let height = 2 + 2 + FIELD_HEIGHT * fields.len() as u16 + 1 + 2;
    let form_area = centered_rect(area, FORM_WIDTH, height);

    let block = Block::default()
        .title(" Welcome ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let mut constraints = vec![
        Constraint::Length(2), // Greeting
        Constraint::Length(2), // Tabs
    ];
    constraints.extend(fields.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(1)); // Hint

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let greeting = Paragraph::new("Fill in the details to get started with the best chat app!")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(greeting, chunks[0]);

    let selected = match state.tab {
        AuthTab::Login => 0,
        AuthTab::Signup => 1,
    };
    let tabs = Tabs::new([AuthTab::Login.title(), AuthTab::Signup.title()])
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    frame.render_widget(tabs, chunks[1]);

    let focused = state.focused_field();
    for (index, field) in fields.iter().enumerate() {
        if let Some(input) = state.input(*field) {
            field::render_text_field(
                frame,
                chunks[2 + index],
                *field,
                input,
                state.field_error(*field),
                focused == Some(*field),
            );
        }
    }

    let hint = if state.pending.is_some() {
        "Please wait..."
    } else {
        match state.tab {
            AuthTab::Login => "Enter: Login • Ctrl+T: Signup instead",
            AuthTab::Signup => "Enter: Signup • Ctrl+T: Login instead",
        }
    };
    frame.render_widget(
        Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[2 + fields.len()],
    );
}
