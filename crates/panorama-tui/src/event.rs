use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Event handler for terminal events
///
/// Ticks are paced by a deadline, so a stream of mouse events cannot starve
/// the animation frame.
pub struct EventHandler {
    frame_interval: Duration,
    last_tick: Instant,
}

impl EventHandler {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_interval: frame_interval(frame_rate),
            last_tick: Instant::now(),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Poll for the next event
    pub fn next(&mut self) -> Result<Option<AppEvent>> {
        let timeout = self.frame_interval.saturating_sub(self.last_tick.elapsed());
        if !timeout.is_zero() && event::poll(timeout)? {
            return Ok(match event::read()? {
                // Only handle key press events, ignore release events
                // (crossterm 0.27+ sends release events on some systems)
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
                Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                _ => None,
            });
        }

        self.last_tick = Instant::now();
        Ok(Some(AppEvent::Tick))
    }
}

/// Duration of one animation frame
pub fn frame_interval(frame_rate: u32) -> Duration {
    if frame_rate == 0 {
        Duration::from_millis(16) // ~60fps fallback
    } else {
        Duration::from_micros(1_000_000 / frame_rate as u64)
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Pointer moved, clicked or scrolled
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Animation frame is due
    Tick,
}
