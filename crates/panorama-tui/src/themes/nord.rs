//! Nord theme
//! https://www.nordtheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

/// Nord default theme
pub fn default() -> Theme {
    Theme {
        // Polar Night
        background: Color::Rgb(0x2e, 0x34, 0x40), // nord0
        panel: Color::Rgb(0x3b, 0x42, 0x52),      // nord1
        border: Color::Rgb(0x4c, 0x56, 0x6a),     // nord3
        // Snow Storm
        text: Color::Rgb(0xe5, 0xe9, 0xf0),  // nord5
        muted: Color::Rgb(0xd8, 0xde, 0xe9), // nord4
        // Frost
        accent: Color::Rgb(0x88, 0xc0, 0xd0),         // nord8
        cursor: Color::Rgb(0xec, 0xef, 0xf4),         // nord6
        cursor_hover: Color::Rgb(0xeb, 0xcb, 0x8b),   // nord13
        progress_track: Color::Rgb(0x43, 0x4c, 0x5e), // nord2
        progress_thumb: Color::Rgb(0x8f, 0xbc, 0xbb), // nord7
        // Aurora
        error: Color::Rgb(0xbf, 0x61, 0x6a),   // nord11
        success: Color::Rgb(0xa3, 0xbe, 0x8c), // nord14
    }
}
