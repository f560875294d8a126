//! Dracula theme
//! https://draculatheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        background: Color::Rgb(0x28, 0x2a, 0x36),
        panel: Color::Rgb(0x34, 0x37, 0x46),
        border: Color::Rgb(0x44, 0x47, 0x5a),
        text: Color::Rgb(0xf8, 0xf8, 0xf2),
        muted: Color::Rgb(0x62, 0x72, 0xa4),
        accent: Color::Rgb(0xbd, 0x93, 0xf9),
        cursor: Color::Rgb(0xf8, 0xf8, 0xf2),
        cursor_hover: Color::Rgb(0xff, 0x79, 0xc6),
        progress_track: Color::Rgb(0x44, 0x47, 0x5a),
        progress_thumb: Color::Rgb(0x50, 0xfa, 0x7b),
        error: Color::Rgb(0xff, 0x55, 0x55),
        success: Color::Rgb(0x50, 0xfa, 0x7b),
    }
}
