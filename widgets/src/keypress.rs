// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::WidgetError;

/// Examples.
///
/// ```rust
/// use r3bl_widgets::*;
///
/// let a = keypress!(@char 'a');
/// assert_eq!(a, KeyPress::Plain { key: Key::Character('a') });
///
/// let ctrl_l = keypress!(@char ModifierKeysMask::new().with_ctrl(), 'l');
/// assert_eq!(ctrl_l, REFRESH_KEY);
///
/// let enter = keypress!(@special SpecialKey::Enter);
/// assert_eq!(enter, KeyPress::Plain { key: Key::SpecialKey(SpecialKey::Enter) });
/// ```
#[macro_export]
macro_rules! keypress {
    // @char
    (@char $arg_char : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::Character($arg_char),
        }
    };

    (@char $arg_modifiers : expr, $arg_char : expr) => {
        $crate::KeyPress::WithModifiers {
            mask: $arg_modifiers,
            key: $crate::Key::Character($arg_char),
        }
    };

    // @special
    (@special $arg_special : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::SpecialKey($arg_special),
        }
    };

    (@special $arg_modifiers : expr, $arg_special : expr) => {
        $crate::KeyPress::WithModifiers {
            mask: $arg_modifiers,
            key: $crate::Key::SpecialKey($arg_special),
        }
    };

    // @fn
    (@fn $arg_function : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::FunctionKey($arg_function),
        }
    };
}

/// This is equivalent to [`crossterm::event::KeyEvent`] except that it is cleaned up
/// semantically and impossible states are removed. Widgets, key bindings and scripted
/// key sequences all speak [`KeyPress`], never the backend type.
///
/// Please use the [`keypress!`] macro instead of directly constructing this enum.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum KeyPress {
    Plain { key: Key },
    WithModifiers { key: Key, mask: ModifierKeysMask },
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum Key {
    /// [char] that can be printed to the console.
    Character(char),
    SpecialKey(SpecialKey),
    FunctionKey(FunctionKey),
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum FunctionKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum SpecialKey {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    BackTab, /* Shift + Tab */
    Delete,
    Insert,
    Esc,
}

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
)]
pub enum KeyState {
    Pressed,
    #[default]
    NotPressed,
}

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
)]
pub struct ModifierKeysMask {
    pub shift_key_state: KeyState,
    pub ctrl_key_state: KeyState,
    pub alt_key_state: KeyState,
}

impl ModifierKeysMask {
    #[must_use]
    pub fn new() -> Self {
        ModifierKeysMask {
            shift_key_state: KeyState::NotPressed,
            ctrl_key_state: KeyState::NotPressed,
            alt_key_state: KeyState::NotPressed,
        }
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { *self == Self::new() }
}

/// Returns `None` when no modifier (other than possibly none at all) is pressed.
#[must_use]
pub fn convert_key_modifiers(modifiers: &KeyModifiers) -> Option<ModifierKeysMask> {
    if modifiers.is_empty() {
        return None;
    }

    let mut mask = ModifierKeysMask::new();
    if modifiers.contains(KeyModifiers::SHIFT) {
        mask = mask.with_shift();
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        mask = mask.with_ctrl();
    }
    if modifiers.contains(KeyModifiers::ALT) {
        mask = mask.with_alt();
    }

    if mask.is_empty() { None } else { Some(mask) }
}

impl KeyPress {
    /// Shorthand for `Ctrl + character`.
    #[must_use]
    pub fn ctrl(character: char) -> Self {
        keypress!(@char ModifierKeysMask::new().with_ctrl(), character)
    }

    /// The printable character carried by this key, if it is a plain character key.
    #[must_use]
    pub fn as_plain_char(&self) -> Option<char> {
        match self {
            KeyPress::Plain {
                key: Key::Character(ch),
            } => Some(*ch),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_special(&self, special_key: SpecialKey) -> bool {
        matches!(
            self,
            KeyPress::Plain { key: Key::SpecialKey(it) } if *it == special_key
        )
    }
}

/// Typecast / convert [`KeyEvent`] to [`KeyPress`].
///
/// Only [`KeyEventKind::Press`] events are converted. For character keys the `SHIFT`
/// modifier is ignored, since the character itself already carries the case:
///
/// ```text
/// ╔════════════════════╦═════════════════════════════════════════╗
/// ║ User action        ║ Result                                  ║
/// ╠════════════════════╬═════════════════════════════════════════╣
/// ║ Type "x"           ║ keypress! {@char 'x'}                   ║
/// ╠════════════════════╬═════════════════════════════════════════╣
/// ║ Type "X"           ║ keypress! {@char 'X'}, SHIFT is ignored ║
/// ╚════════════════════╩═════════════════════════════════════════╝
/// ```
pub mod convert_key_event {
    use super::{FunctionKey, Key, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
                KeyPress, SpecialKey, convert_key_modifiers};

    impl TryFrom<KeyEvent> for KeyPress {
        type Error = ();

        fn try_from(key_event: KeyEvent) -> Result<Self, Self::Error> {
            if key_event.kind != KeyEventKind::Press {
                return Err(());
            }

            match key_event {
                // If character keys, then ignore SHIFT or NONE modifiers.
                KeyEvent {
                    code: KeyCode::Char(character),
                    modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                    ..
                } => Ok(keypress! { @char character }),
                // BackTab is already Shift + Tab, so SHIFT is dropped like for characters.
                KeyEvent {
                    code: KeyCode::BackTab,
                    modifiers,
                    ..
                } => {
                    let key = Key::SpecialKey(SpecialKey::BackTab);
                    match convert_key_modifiers(&modifiers.difference(KeyModifiers::SHIFT)) {
                        Some(mask) => Ok(KeyPress::WithModifiers { key, mask }),
                        None => Ok(KeyPress::Plain { key }),
                    }
                }
                // Non character keys.
                _ => {
                    let key = copy_code_from_key_event(&key_event).ok_or(())?;
                    match convert_key_modifiers(&key_event.modifiers) {
                        Some(mask) => Ok(KeyPress::WithModifiers { key, mask }),
                        None => Ok(KeyPress::Plain { key }),
                    }
                }
            }
        }
    }

    fn match_fn_key(fn_key: u8) -> Option<Key> {
        let it = match fn_key {
            1 => FunctionKey::F1,
            2 => FunctionKey::F2,
            3 => FunctionKey::F3,
            4 => FunctionKey::F4,
            5 => FunctionKey::F5,
            6 => FunctionKey::F6,
            7 => FunctionKey::F7,
            8 => FunctionKey::F8,
            9 => FunctionKey::F9,
            10 => FunctionKey::F10,
            11 => FunctionKey::F11,
            12 => FunctionKey::F12,
            _ => return None,
        };
        Some(Key::FunctionKey(it))
    }

    #[must_use]
    pub fn copy_code_from_key_event(key_event: &KeyEvent) -> Option<Key> {
        // Make the code easier to read below using this alias.
        type KC = KeyCode;
        match key_event.code {
            KC::Backspace => Key::SpecialKey(SpecialKey::Backspace).into(),
            KC::Enter => Key::SpecialKey(SpecialKey::Enter).into(),
            KC::Left => Key::SpecialKey(SpecialKey::Left).into(),
            KC::Right => Key::SpecialKey(SpecialKey::Right).into(),
            KC::Up => Key::SpecialKey(SpecialKey::Up).into(),
            KC::Down => Key::SpecialKey(SpecialKey::Down).into(),
            KC::Home => Key::SpecialKey(SpecialKey::Home).into(),
            KC::End => Key::SpecialKey(SpecialKey::End).into(),
            KC::PageUp => Key::SpecialKey(SpecialKey::PageUp).into(),
            KC::PageDown => Key::SpecialKey(SpecialKey::PageDown).into(),
            KC::Tab => Key::SpecialKey(SpecialKey::Tab).into(),
            KC::BackTab => Key::SpecialKey(SpecialKey::BackTab).into(),
            KC::Delete => Key::SpecialKey(SpecialKey::Delete).into(),
            KC::Insert => Key::SpecialKey(SpecialKey::Insert).into(),
            KC::Esc => Key::SpecialKey(SpecialKey::Esc).into(),
            KC::F(fn_key) => match_fn_key(fn_key),
            KC::Char(character) => Key::Character(character).into(),
            // Kitty keyboard protocol keys (media, modifiers, locks) are not used by
            // any widget.
            _ => None,
        }
    }
}

/// Parse human friendly key names, as used by `--keys` on the command line and by
/// [`crate::KeyBindingsConfig`]. Examples: `"down"`, `"pgdn"`, `"ctrl+x"`, `"q"`,
/// `"space"`, `"f5"`, `"shift+tab"`.
///
/// Names resolve to the key the terminal reports: `"shift+a"` is `'A'`, `"ctrl+X"` is
/// Ctrl + `'x'`, and `"ctrl+shift+a"` is rejected.
impl FromStr for KeyPress {
    type Err = WidgetError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || WidgetError::InvalidKeyName {
            name: input.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        // Single character keys are taken verbatim (so "+" and "G" work).
        let mut chars = trimmed.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Ok(keypress!(@char ch));
        }

        let mut mask = ModifierKeysMask::new();
        let mut rest = trimmed;
        loop {
            let lower = rest.to_ascii_lowercase();
            if let Some(it) = lower.strip_prefix("ctrl+") {
                mask = mask.with_ctrl();
                rest = &rest[rest.len() - it.len()..];
            } else if let Some(it) = lower.strip_prefix("alt+") {
                mask = mask.with_alt();
                rest = &rest[rest.len() - it.len()..];
            } else if let Some(it) = lower.strip_prefix("shift+") {
                mask = mask.with_shift();
                rest = &rest[rest.len() - it.len()..];
            } else {
                break;
            }
        }

        let mut key = parse_key_name(rest).ok_or_else(invalid)?;

        // Shift + Tab has its own key code.
        if mask.shift_key_state == KeyState::Pressed
            && matches!(
                key,
                Key::SpecialKey(SpecialKey::Tab | SpecialKey::BackTab)
            )
        {
            key = Key::SpecialKey(SpecialKey::BackTab);
            mask.shift_key_state = KeyState::NotPressed;
        }

        // Name characters the way the terminal reports them. Shift is folded into the
        // case. With Ctrl or Alt the terminal sends the lower case character, and
        // can't report Shift on top of them.
        if let Key::Character(ch) = key {
            let shift = mask.shift_key_state == KeyState::Pressed;
            let ctrl_or_alt = mask.ctrl_key_state == KeyState::Pressed
                || mask.alt_key_state == KeyState::Pressed;
            match (shift, ctrl_or_alt) {
                (true, true) => return Err(invalid()),
                (true, false) => {
                    key = Key::Character(ch.to_uppercase().next().unwrap_or(ch));
                    mask.shift_key_state = KeyState::NotPressed;
                }
                (false, true) => {
                    key = Key::Character(ch.to_lowercase().next().unwrap_or(ch));
                }
                (false, false) => {}
            }
        }

        if mask.is_empty() {
            Ok(KeyPress::Plain { key })
        } else {
            Ok(KeyPress::WithModifiers { key, mask })
        }
    }
}

fn parse_key_name(name: &str) -> Option<Key> {
    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Some(Key::Character(ch));
    }

    let special = match name.to_ascii_lowercase().as_str() {
        "up" => SpecialKey::Up,
        "down" => SpecialKey::Down,
        "left" => SpecialKey::Left,
        "right" => SpecialKey::Right,
        "home" => SpecialKey::Home,
        "end" => SpecialKey::End,
        "pgup" | "pageup" => SpecialKey::PageUp,
        "pgdn" | "pagedown" => SpecialKey::PageDown,
        "enter" | "return" => SpecialKey::Enter,
        "esc" | "escape" => SpecialKey::Esc,
        "tab" => SpecialKey::Tab,
        "backtab" => SpecialKey::BackTab,
        "backspace" => SpecialKey::Backspace,
        "delete" | "del" => SpecialKey::Delete,
        "insert" | "ins" => SpecialKey::Insert,
        "space" => return Some(Key::Character(' ')),
        other => {
            let number = other.strip_prefix('f')?.parse::<u8>().ok()?;
            return convert_key_event::copy_code_from_key_event(&KeyEvent::new(
                KeyCode::F(number),
                KeyModifiers::NONE,
            ));
        }
    };

    Some(Key::SpecialKey(special))
}

/// Parse a comma separated list of key names, eg: `"down, down, enter"`.
///
/// # Errors
///
/// Returns [`WidgetError::InvalidKeyName`] for the first name that can't be parsed.
pub fn parse_key_sequence(input: &str) -> Result<Vec<KeyPress>, WidgetError> {
    input
        .split(',')
        .filter(|it| !it.trim().is_empty())
        .map(KeyPress::from_str)
        .collect()
}
