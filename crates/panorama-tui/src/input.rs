use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollLeft,
    ScrollRight,
    PageLeft,
    PageRight,
    JumpToStart,
    JumpToEnd,
    PendingG, // First 'g' press, waiting for second 'g'
    Copy,
    ToggleHelp,
    ExitMode,
    None,
}

/// Pointer input translated from a terminal mouse event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Move { x: f64, y: f64 },
    Wheel { delta: f64 },
    Click { x: f64, y: f64 },
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key closes help; quit still quits
        return match keymap.get(&KeyBinding::new(key.code, key.modifiers)) {
            Some(Action::Quit) => Action::Quit,
            _ => Action::ExitMode,
        };
    }

    let binding = KeyBinding::new(key.code, key.modifiers);

    if keymap.starts_double_g(&binding) {
        return if app.pending_key == Some('g') {
            keymap.double_g_action().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    keymap.get(&binding).copied().unwrap_or(Action::None)
}

/// Translate a mouse event into pointer input
///
/// Wheel notches scroll `wheel_step` units; horizontal wheels and
/// shift-wheel scroll the same way.
pub fn handle_mouse_event(mouse: MouseEvent, wheel_step: f64) -> PointerInput {
    let x = mouse.column as f64;
    let y = mouse.row as f64;

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => PointerInput::Move { x, y },
        MouseEventKind::Down(MouseButton::Left) => PointerInput::Click { x, y },
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            PointerInput::Wheel { delta: wheel_step }
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            PointerInput::Wheel { delta: -wheel_step }
        }
        _ => PointerInput::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 12,
            row: 5,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_mouse_translation() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved), 8.0),
            PointerInput::Move { x: 12.0, y: 5.0 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown), 8.0),
            PointerInput::Wheel { delta: 8.0 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollLeft), 8.0),
            PointerInput::Wheel { delta: -8.0 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left)), 8.0),
            PointerInput::Click { x: 12.0, y: 5.0 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left)), 8.0),
            PointerInput::None
        );
    }
}
