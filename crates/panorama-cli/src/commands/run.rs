use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use panorama_core::clipboard::copy_text;
use panorama_core::content::Portfolio;
use panorama_core::AppConfig;
use panorama_tui::{
    app::{content_viewport, App},
    clipboard::Osc52Clipboard,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    keymap::Keymap,
    load_theme, ui,
};

pub async fn run(config: Arc<AppConfig>, content: Option<PathBuf>) -> Result<()> {
    let portfolio = load_portfolio(&config, content)?;
    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);
    let clipboard = Osc52Clipboard::stdout();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Panorama"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let (mut app, mut deferred_rx) = App::new(
        config.clone(),
        portfolio,
        theme,
        content_viewport(size.width, size.height),
    );
    app.mount();

    let mut event_handler = EventHandler::new(config.timing.frame_rate);
    let result = main_loop(
        &mut terminal,
        &mut app,
        &mut deferred_rx,
        &mut event_handler,
        &keymap,
        &clipboard,
    )
    .await;

    app.unmount();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Portfolio closed");
    result
}

async fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    deferred_rx: &mut tokio::sync::mpsc::UnboundedReceiver<panorama_core::timers::Deferred>,
    event_handler: &mut EventHandler,
    keymap: &Keymap,
    clipboard: &Osc52Clipboard<io::Stdout>,
) -> Result<()> {
    loop {
        // Process fired timers (non-blocking)
        while let Ok(deferred) = deferred_rx.try_recv() {
            app.handle_deferred(deferred);
        }

        terminal.draw(|frame| ui::draw(frame, app))?;

        let copy_request = match event_handler.next()? {
            Some(AppEvent::Key(key)) => {
                let action = handle_key_event(key, app, keymap);
                app.perform(action)
            }
            Some(AppEvent::Mouse(mouse)) => {
                let input = handle_mouse_event(mouse, app.config.ui.wheel_step);
                app.handle_pointer(input)
            }
            Some(AppEvent::Resize(width, height)) => {
                app.resize(width, height);
                None
            }
            Some(AppEvent::Tick) => {
                app.tick(Instant::now());
                None
            }
            None => None,
        };

        if let Some(text) = copy_request {
            let outcome = copy_text(clipboard, &text).await;
            app.copy_finished(outcome);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Panels from `--content`, the configured file, or the built-in set
fn load_portfolio(config: &AppConfig, content: Option<PathBuf>) -> Result<Portfolio> {
    match content.or_else(|| config.content_file()) {
        Some(path) if path.exists() => Portfolio::load(&path)
            .with_context(|| format!("Failed to load panels from {}", path.display())),
        Some(path) => {
            warn!("Content file {} not found, using built-in panels", path.display());
            Ok(Portfolio::builtin())
        }
        None => Ok(Portfolio::builtin()),
    }
}
