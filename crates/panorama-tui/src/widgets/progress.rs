use panorama_core::motion::LayoutMode;
use ratatui::{layout::Rect, style::Style, Frame};

use crate::app::App;
use crate::scene::ids;

/// Width of the thumb in cells
const THUMB_WIDTH: u16 = 3;

pub struct ProgressWidget;

impl ProgressWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if app.page.mode() != LayoutMode::Horizontal || area.width < THUMB_WIDTH + 2 {
            return;
        }
        let theme = &app.theme;
        let track_len = (app.config.motion.progress_track_length.round() as u16)
            .clamp(THUMB_WIDTH, area.width - 2);
        let x0 = area.x + (area.width - track_len) / 2;
        let buf = frame.buffer_mut();

        buf.set_string(
            x0,
            area.y,
            "─".repeat(track_len as usize),
            Style::default().fg(theme.progress_track).bg(theme.background),
        );

        let offset = app
            .surface
            .translation(ids::PROGRESS_THUMB)
            .map(|(x, _)| x.round().max(0.0) as u16)
            .unwrap_or(0);
        let thumb_x = x0 + offset.min(track_len - THUMB_WIDTH);
        buf.set_string(
            thumb_x,
            area.y,
            "━".repeat(THUMB_WIDTH as usize),
            Style::default().fg(theme.progress_thumb).bg(theme.background),
        );
    }
}
