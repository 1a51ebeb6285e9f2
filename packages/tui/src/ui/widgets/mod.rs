pub mod fault;
pub mod field;
pub mod message;
pub mod notices;
pub mod status_bar;

pub use notices::NoticeStackWidget;
pub use status_bar::StatusBarWidget;

use parley_core::forms::AVATAR_COLORS;
use ratatui::style::Color;

/// Terminal color for an avatar palette index
pub fn palette_color(index: u8) -> Color {
    match AVATAR_COLORS[index as usize % AVATAR_COLORS.len()] {
        "magenta" => Color::Magenta,
        "yellow" => Color::Yellow,
        "green" => Color::Green,
        "cyan" => Color::Cyan,
        _ => Color::White,
    }
}
