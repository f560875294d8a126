use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key binding overlay
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keys = &app.config.keymap;
        let entries = [
            (keys.scroll_left.as_str(), "scroll left"),
            (keys.scroll_right.as_str(), "scroll right"),
            (keys.page_left.as_str(), "page left"),
            (keys.page_right.as_str(), "page right"),
            (keys.jump_to_start.as_str(), "jump to start"),
            (keys.jump_to_end.as_str(), "jump to end"),
            (keys.copy.as_str(), "copy contact"),
            (keys.help.as_str(), "toggle help"),
            (keys.quit.as_str(), "quit"),
        ];

        let area = frame.area();
        let popup_width = 40u16.min(area.width.saturating_sub(4));
        let popup_height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.panel));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut lines: Vec<Line> = entries
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>10}  ", key),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*description, Style::default().fg(theme.text)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "wheel scrolls, click copies",
            Style::default().fg(theme.muted),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let rect = centered_rect(10, 4, Rect::new(0, 0, 30, 10));
        assert_eq!(rect, Rect::new(10, 3, 10, 4));

        let clamped = centered_rect(50, 4, Rect::new(0, 0, 30, 10));
        assert_eq!(clamped.x, 0);
    }
}
