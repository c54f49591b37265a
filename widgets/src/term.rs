// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, IsTerminal as _, Write};

use crossterm::{cursor::{Hide, Show},
                execute,
                terminal::{disable_raw_mode, enable_raw_mode, size}};

use crate::{DEVELOPMENT_MODE, Size};

pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// Get the terminal size.
///
/// # Errors
///
/// If the terminal can't be queried, eg: when stdout is not a terminal.
pub fn get_size() -> io::Result<Size> {
    let (columns, rows) = size()?;
    Ok(Size::new(rows, columns))
}

/// Get the terminal size. If there is a problem, return the default size.
#[must_use]
pub fn get_size_or_default() -> Size {
    get_size().unwrap_or(Size::new(DEFAULT_HEIGHT, DEFAULT_WIDTH))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdinIsPipedResult {
    StdinIsPiped,
    StdinIsNotPiped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TTYResult {
    IsInteractive,
    IsNotInteractive,
}

/// If you run `echo "test" | cargo run` the following will return
/// [`StdinIsPipedResult::StdinIsPiped`].
#[must_use]
pub fn is_stdin_piped() -> StdinIsPipedResult {
    if std::io::stdin().is_terminal() {
        StdinIsPipedResult::StdinIsNotPiped
    } else {
        StdinIsPipedResult::StdinIsPiped
    }
}

/// Widgets paint to stdout and read keys from the terminal, so stdout has to be one.
#[must_use]
pub fn is_output_interactive() -> TTYResult {
    if std::io::stdout().is_terminal() {
        TTYResult::IsInteractive
    } else {
        TTYResult::IsNotInteractive
    }
}

/// Puts the terminal in raw mode and hides the cursor while alive. Both are restored on
/// drop, including when a widget's activation returns early with an error.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// # Errors
    ///
    /// If raw mode can't be enabled.
    pub fn try_new() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), Hide)?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let result = execute!(io::stdout(), Show)
            .and_then(|()| disable_raw_mode())
            .and_then(|()| io::stdout().flush());
        if let Err(error) = result {
            DEVELOPMENT_MODE.then(|| {
                tracing::debug!(message = "could not restore terminal", ?error);
            });
        }
    }
}
