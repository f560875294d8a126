use panorama_core::surface::class;
use ratatui::{layout::Rect, Frame};

use crate::app::App;
use crate::scene::ids;

/// Follower glyph drawn at the eased pointer position
pub struct CursorWidget;

impl CursorWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if !app.config.ui.show_cursor {
            return;
        }
        let Some((x, y)) = app.surface.translation(ids::CURSOR) else {
            return;
        };
        let (x, y) = (x.round(), y.round());
        if x < area.x as f64 || y < area.y as f64 || x >= area.right() as f64 || y >= area.bottom() as f64 {
            return;
        }

        let (symbol, color) = if app.surface.has_class(ids::CURSOR, class::HOVER) {
            ("◉", app.theme.cursor_hover)
        } else {
            ("●", app.theme.cursor)
        };
        if let Some(cell) = frame.buffer_mut().cell_mut((x as u16, y as u16)) {
            cell.set_symbol(symbol).set_fg(color);
        }
    }
}
