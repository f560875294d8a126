//! Gruvbox theme
//! https://github.com/morhetz/gruvbox

use ratatui::style::Color;
use crate::theme::Theme;

/// Gruvbox dark
pub fn dark() -> Theme {
    Theme::default()
}

/// Gruvbox light
pub fn light() -> Theme {
    Theme {
        background: Color::Rgb(0xfb, 0xf1, 0xc7),
        panel: Color::Rgb(0xf2, 0xe5, 0xbc),
        border: Color::Rgb(0xd5, 0xc4, 0xa1),
        text: Color::Rgb(0x3c, 0x38, 0x36),
        muted: Color::Rgb(0x7c, 0x6f, 0x64),
        accent: Color::Rgb(0xb5, 0x76, 0x14),
        cursor: Color::Rgb(0x28, 0x28, 0x28),
        cursor_hover: Color::Rgb(0xaf, 0x3a, 0x03),
        progress_track: Color::Rgb(0xeb, 0xdb, 0xb2),
        progress_thumb: Color::Rgb(0x42, 0x7b, 0x58),
        error: Color::Rgb(0x9d, 0x00, 0x06),
        success: Color::Rgb(0x79, 0x74, 0x0e),
    }
}
