// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::Event;

use crate::{DEVELOPMENT_MODE, KeyPress, Size};

/// One unit of input fed to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Keyboard(KeyPress),
    Resize(Size),
    /// The key source is broken (eg: stdin closed, or a scripted stream ran dry). Widgets
    /// treat this as an early exit.
    ReadFailure,
}

impl From<KeyPress> for InputEvent {
    fn from(key: KeyPress) -> Self { InputEvent::Keyboard(key) }
}

impl TryFrom<Event> for InputEvent {
    type Error = ();

    /// Typecast / convert [Event] to [`InputEvent`]. Mouse, focus and paste events are
    /// not used by any widget.
    fn try_from(event: Event) -> Result<Self, Self::Error> {
        match event {
            Event::Key(key_event) => Ok(InputEvent::Keyboard(key_event.try_into()?)),
            Event::Resize(cols, rows) => Ok(InputEvent::Resize(Size::new(rows, cols))),
            _ => Err(()),
        }
    }
}

/// Blocking source of input. There is no timeout.
pub trait KeyPressReader {
    fn read_key_press(&mut self) -> InputEvent;
}

#[derive(Debug, Default)]
pub struct CrosstermKeyPressReader;

impl KeyPressReader for CrosstermKeyPressReader {
    fn read_key_press(&mut self) -> InputEvent {
        loop {
            match crossterm::event::read() {
                Ok(event) => {
                    if let Ok(it) = InputEvent::try_from(event) {
                        return it;
                    }
                }
                Err(error) => {
                    DEVELOPMENT_MODE.then(|| {
                        tracing::debug!(message = "read_key_press failed", ?error);
                    });
                    return InputEvent::ReadFailure;
                }
            }
        }
    }
}
