use panorama_core::motion::LayoutMode;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode, StatusKind};
use crate::text::display_width;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };
        let layout_str = match app.page.mode() {
            LayoutMode::Horizontal => "Strip",
            LayoutMode::Vertical => "Stacked",
        };

        let (status_text, fg) = match &app.status_message {
            Some(msg) => {
                let color = match msg.kind {
                    StatusKind::Info => theme.text,
                    StatusKind::Success => theme.success,
                    StatusKind::Error => theme.error,
                };
                (format!(" {}", msg.text), color)
            }
            None => (
                format!(
                    " {} | {} | {:>3}% | Panels: {}",
                    mode_str,
                    layout_str,
                    scroll_percent(app),
                    app.portfolio.panels.len()
                ),
                theme.text,
            ),
        };

        let help_hint = " q:quit h/l:scroll c:copy ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(display_width(&status_text) + display_width(help_hint));

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(fg).bg(theme.panel)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.panel)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.panel)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// How far through the content the reader is, 0 to 100
fn scroll_percent(app: &App) -> u16 {
    let fraction = match app.page.mode() {
        LayoutMode::Horizontal => {
            let scroll = &app.page.motion().scroll;
            let max = scroll.max_scroll();
            if max <= 0.0 {
                0.0
            } else {
                scroll.current_x / max
            }
        }
        LayoutMode::Vertical => {
            let max = app.surface.scene().vertical_overflow();
            if max <= 0.0 {
                0.0
            } else {
                app.surface.vertical_offset() / max
            }
        }
    };
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u16
}
