//! Monokai theme

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        background: Color::Rgb(0x27, 0x28, 0x22),
        panel: Color::Rgb(0x3e, 0x3d, 0x32),
        border: Color::Rgb(0x49, 0x48, 0x3e),
        text: Color::Rgb(0xf8, 0xf8, 0xf2),
        muted: Color::Rgb(0x75, 0x71, 0x5e),
        accent: Color::Rgb(0xe6, 0xdb, 0x74),
        cursor: Color::Rgb(0xf8, 0xf8, 0xf0),
        cursor_hover: Color::Rgb(0xf9, 0x26, 0x72),
        progress_track: Color::Rgb(0x49, 0x48, 0x3e),
        progress_thumb: Color::Rgb(0xa6, 0xe2, 0x2e),
        error: Color::Rgb(0xf9, 0x26, 0x72),
        success: Color::Rgb(0xa6, 0xe2, 0x2e),
    }
}
