use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, Mode};
use crate::widgets::{CursorWidget, PopupWidget, ProgressWidget, StatusBarWidget, StripWidget};

/// Draw one full frame of the app
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Panels
            Constraint::Length(1), // Progress track
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    StripWidget::render(frame, chunks[0], app);
    ProgressWidget::render(frame, chunks[1], app);
    StatusBarWidget::render(frame, chunks[2], app);
    CursorWidget::render(frame, chunks[0], app);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, app);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Instant;

    use panorama_core::content::Portfolio;
    use panorama_core::AppConfig;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::app::content_viewport;
    use crate::input::Action;
    use crate::theme::Theme;

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    fn screen_text(buffer: &Buffer) -> String {
        (0..buffer.area.height)
            .map(|y| row_text(buffer, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_status_bar_and_help() {
        let (mut app, _rx) = App::new(
            Arc::new(AppConfig::default()),
            Portfolio::builtin(),
            Theme::default(),
            content_viewport(120, 40),
        );
        app.mount();
        app.tick(Instant::now());

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
        let status = row_text(terminal.backend().buffer(), 39);
        assert!(status.contains("NORMAL"), "status bar: {status}");
        assert!(status.contains("Strip"));

        app.perform(Action::ToggleHelp);
        terminal.draw(|frame| draw(frame, &app)).unwrap();
        let screen = screen_text(terminal.backend().buffer());
        assert!(screen.contains("Keys"));
        assert!(screen.contains("copy contact"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_tiny_terminal_does_not_panic() {
        let (mut app, _rx) = App::new(
            Arc::new(AppConfig::default()),
            Portfolio::builtin(),
            Theme::default(),
            content_viewport(8, 4),
        );
        app.mount();
        app.tick(Instant::now());

        let mut terminal = Terminal::new(TestBackend::new(8, 4)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
    }
}
