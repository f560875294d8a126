use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use panorama_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// A key press: code plus modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// What a keymap entry in the config file parses to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Key(KeyBinding),
    /// `gg`: two presses of `g`
    DoubleG,
}

/// Keys that always work, whatever the config says
const FIXED_KEYS: &[(KeyCode, Action)] = &[
    (KeyCode::Left, Action::ScrollLeft),
    (KeyCode::Right, Action::ScrollRight),
    (KeyCode::Up, Action::ScrollLeft),
    (KeyCode::Down, Action::ScrollRight),
    (KeyCode::PageUp, Action::PageLeft),
    (KeyCode::PageDown, Action::PageRight),
    (KeyCode::Home, Action::JumpToStart),
    (KeyCode::End, Action::JumpToEnd),
    (KeyCode::Enter, Action::Copy),
];

/// Key to action lookup built from [`KeymapConfig`]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    double_g: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let configured = [
            (config.quit.as_str(), Action::Quit),
            (config.scroll_left.as_str(), Action::ScrollLeft),
            (config.scroll_right.as_str(), Action::ScrollRight),
            (config.page_left.as_str(), Action::PageLeft),
            (config.page_right.as_str(), Action::PageRight),
            (config.jump_to_start.as_str(), Action::JumpToStart),
            (config.jump_to_end.as_str(), Action::JumpToEnd),
            (config.copy.as_str(), Action::Copy),
            (config.help.as_str(), Action::ToggleHelp),
        ];

        let mut keymap = Self {
            bindings: HashMap::new(),
            double_g: None,
        };
        for (notation, action) in configured {
            keymap.bind(notation, action);
        }

        keymap.bindings.insert(KeyBinding::ctrl('c'), Action::Quit);
        keymap.bindings.insert(KeyBinding::plain(KeyCode::Esc), Action::ExitMode);
        for &(code, action) in FIXED_KEYS {
            keymap.bindings.entry(KeyBinding::plain(code)).or_insert(action);
        }
        keymap
    }

    fn bind(&mut self, notation: &str, action: Action) {
        match parse_notation(notation) {
            Some(Notation::DoubleG) => self.double_g = Some(action),
            Some(Notation::Key(binding)) => match self.bindings.get(&binding) {
                Some(existing) => warn!(
                    "Key '{}' is already bound to {:?}; not binding it to {:?}",
                    notation, existing, action
                ),
                None => {
                    self.bindings.insert(binding, action);
                }
            },
            None => warn!("Unrecognised key '{}' for {:?}, left unbound", notation, action),
        }
    }

    /// Action for a key press
    ///
    /// Terminals report some symbols ('?', '!') with Shift held; those fall
    /// back to the plain binding.
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding).or_else(|| match binding.code {
            KeyCode::Char(c) if binding.modifiers == KeyModifiers::SHIFT && !c.is_alphabetic() => {
                self.bindings.get(&KeyBinding::plain(binding.code))
            }
            _ => None,
        })
    }

    /// Action bound to `gg`, if any
    pub fn double_g_action(&self) -> Option<Action> {
        self.double_g
    }

    /// True for a bare `g` while `gg` is bound
    pub fn starts_double_g(&self, binding: &KeyBinding) -> bool {
        self.double_g.is_some() && *binding == KeyBinding::plain(KeyCode::Char('g'))
    }
}

/// Parse a config key notation
///
/// Accepts a single character (uppercase letters mean Shift), `gg`,
/// `<C-x>` for Ctrl plus a letter, and the named keys `<Space>`, `<CR>`,
/// `<Esc>`, `<Left>`, `<Right>`, `<Home>`, `<End>`, `<PageUp>` and `<PageDown>`.
pub fn parse_notation(s: &str) -> Option<Notation> {
    let s = s.trim();
    if s == "gg" {
        return Some(Notation::DoubleG);
    }

    if let Some(name) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
        if let Some(letter) = name.strip_prefix("C-") {
            let mut chars = letter.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => {
                    Some(Notation::Key(KeyBinding::ctrl(c.to_ascii_lowercase())))
                }
                _ => None,
            };
        }
        let code = match name.to_ascii_lowercase().as_str() {
            "space" => KeyCode::Char(' '),
            "cr" | "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            _ => return None,
        };
        return Some(Notation::Key(KeyBinding::plain(code)));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Some(Notation::Key(KeyBinding::new(
            KeyCode::Char(c),
            KeyModifiers::SHIFT,
        ))),
        (Some(c), None) => Some(Notation::Key(KeyBinding::plain(KeyCode::Char(c)))),
        _ => None,
    }
}
