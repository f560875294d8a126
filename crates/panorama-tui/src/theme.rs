use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Surfaces
    pub background: Color,
    pub panel: Color,
    pub border: Color,

    // Text
    pub text: Color,
    pub muted: Color,
    pub accent: Color,

    // Motion elements
    pub cursor: Color,
    pub cursor_hover: Color,
    pub progress_track: Color,
    pub progress_thumb: Color,

    // Status
    pub error: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Default to Gruvbox Dark
        Self {
            background: Color::Rgb(0x28, 0x28, 0x28),
            panel: Color::Rgb(0x32, 0x30, 0x2f),
            border: Color::Rgb(0x50, 0x49, 0x45),
            text: Color::Rgb(0xd4, 0xbe, 0x98),
            muted: Color::Rgb(0x92, 0x83, 0x74),
            accent: Color::Rgb(0xd8, 0xa6, 0x57),
            cursor: Color::Rgb(0xdd, 0xc7, 0xa1),
            cursor_hover: Color::Rgb(0xe7, 0x8a, 0x4e),
            progress_track: Color::Rgb(0x45, 0x40, 0x3d),
            progress_thumb: Color::Rgb(0x89, 0xb4, 0x82),
            error: Color::Rgb(0xea, 0x69, 0x62),
            success: Color::Rgb(0xa9, 0xb6, 0x65),
        }
    }
}

/// Mix two colors; `t = 0` gives `from`, `t = 1` gives `to`
///
/// Non-RGB colors cannot be mixed and snap at the midpoint.
pub fn blend(from: Color, to: Color, t: f64) -> Color {
    use panorama_core::motion::lerp;

    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| lerp(a as f64, b as f64, t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}
