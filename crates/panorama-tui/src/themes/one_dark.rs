//! One Dark theme
//! https://github.com/joshdick/onedark.vim

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        background: Color::Rgb(0x28, 0x2c, 0x34),
        panel: Color::Rgb(0x2c, 0x31, 0x3a),
        border: Color::Rgb(0x3e, 0x44, 0x51),
        text: Color::Rgb(0xab, 0xb2, 0xbf),
        muted: Color::Rgb(0x5c, 0x63, 0x70),
        accent: Color::Rgb(0x61, 0xaf, 0xef),
        cursor: Color::Rgb(0xab, 0xb2, 0xbf),
        cursor_hover: Color::Rgb(0xe5, 0xc0, 0x7b),
        progress_track: Color::Rgb(0x3e, 0x44, 0x51),
        progress_thumb: Color::Rgb(0x98, 0xc3, 0x79),
        error: Color::Rgb(0xe0, 0x6c, 0x75),
        success: Color::Rgb(0x98, 0xc3, 0x79),
    }
}
