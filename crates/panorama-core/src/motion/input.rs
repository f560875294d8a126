//! L3 Molecular Layer: pointer and wheel capture
//!
//! Handlers record targets and return immediately. Nothing here renders;
//! the frame loop picks the new targets up on its next tick.

use super::layout::LayoutMode;
use super::state::{CursorState, ScrollState};

/// What the host should do with the wheel event after the page handled it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// The page consumed the delta; suppress native scrolling
    PreventDefault,
    /// The page ignored the event; let the host scroll natively
    Passthrough,
}

/// Record the latest pointer position
#[inline]
pub fn handle_pointer_move(cursor: &mut CursorState, x: f64, y: f64) {
    cursor.set_raw(x, y);
}

/// Accumulate a wheel delta into the horizontal scroll target
///
/// In vertical mode the wheel belongs to the host's native scrolling.
pub fn handle_wheel(scroll: &mut ScrollState, mode: LayoutMode, delta: f64) -> WheelOutcome {
    match mode {
        LayoutMode::Horizontal => {
            scroll.scroll_by(delta);
            WheelOutcome::PreventDefault
        }
        LayoutMode::Vertical => WheelOutcome::Passthrough,
    }
}
