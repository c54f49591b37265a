// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Key, KeyPress, KeyState, ModifierKeysMask};

const CTRL: ModifierKeysMask = ModifierKeysMask {
    shift_key_state: KeyState::NotPressed,
    ctrl_key_state: KeyState::Pressed,
    alt_key_state: KeyState::NotPressed,
};

const fn ctrl(ch: char) -> KeyPress {
    KeyPress::WithModifiers {
        key: Key::Character(ch),
        mask: CTRL,
    }
}

// Control keys shared by all widgets.
pub const REFRESH_KEY: KeyPress = ctrl('l');
pub const PAGE_BACK_KEY: KeyPress = ctrl('b');
pub const PAGE_FORWARD_KEY: KeyPress = ctrl('f');

// Entry field editing.
pub const BEGINNING_OF_LINE_KEY: KeyPress = ctrl('a');
pub const END_OF_LINE_KEY: KeyPress = ctrl('e');
pub const ERASE_KEY: KeyPress = ctrl('u');
pub const CUT_KEY: KeyPress = ctrl('x');
pub const COPY_KEY: KeyPress = ctrl('y');
pub const PASTE_KEY: KeyPress = ctrl('v');
pub const TRANSPOSE_KEY: KeyPress = ctrl('t');

// Widget defaults.
pub const DEFAULT_SAVE_LINES: usize = 100;
pub const DEFAULT_CHOICE_CHAR: char = 'X';
pub const DEFAULT_SELECTION_CHOICES: [&str; 2] = ["[ ]", "[*]"];
pub const DEFAULT_HIDDEN_CHAR: char = '*';
pub const DEFAULT_FILLER_CHAR: char = '.';
pub const BUTTON_GAP: usize = 2;
