// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fakes for the collaborators around a widget (key source, display, writer, file
//! system), used by this crate's tests and available to hosts that want to test their
//! own widget setups.

use std::{fmt::{Display, Formatter},
          io::{self, Write},
          ops::Deref,
          path::{Path, PathBuf}};

use miette::IntoDiagnostic as _;

use crate::{DisplaySurface, InputEvent, KeyPress, KeyPressReader, Region, Size,
            clip_to_width};

/// Collects everything written to it as a [String].
#[derive(Debug, Default)]
pub struct TestStringWriter {
    buffer: String,
}

impl TestStringWriter {
    #[must_use]
    pub fn new() -> Self {
        TestStringWriter {
            buffer: String::new(),
        }
    }

    #[must_use]
    pub fn get_buffer(&self) -> &str { &self.buffer }
}

impl Write for TestStringWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match std::str::from_utf8(buf) {
            Ok(value) => {
                self.buffer.push_str(value);
                Ok(buf.len())
            }
            Err(_) => Ok(0),
        }
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

/// Replays `key_press_vec` in order, then reports [`InputEvent::ReadFailure`] forever,
/// like a terminal whose input stream was closed.
#[derive(Debug, Default)]
pub struct TestVecKeyPressReader {
    pub key_press_vec: Vec<InputEvent>,
    pub index: usize,
}

impl TestVecKeyPressReader {
    #[must_use]
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self {
            key_press_vec: events,
            index: 0,
        }
    }

    #[must_use]
    pub fn from_keys(keys: &[KeyPress]) -> Self {
        Self::new(keys.iter().copied().map(InputEvent::Keyboard).collect())
    }

    /// How many events have been handed out, not counting read failures.
    #[must_use]
    pub fn consumed(&self) -> usize { self.index }
}

impl KeyPressReader for TestVecKeyPressReader {
    fn read_key_press(&mut self) -> InputEvent {
        match self.key_press_vec.get(self.index) {
            Some(it) => {
                self.index += 1;
                *it
            }
            None => InputEvent::ReadFailure,
        }
    }
}

/// An in-memory grid of cells standing in for a terminal. It also counts beeps, full
/// repaint requests and flushes, and remembers the last scrollbar painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSurface {
    size: Size,
    cells: Vec<Vec<char>>,
    highlighted: Vec<Vec<bool>>,
    pub beep_count: usize,
    pub full_repaint_count: usize,
    pub flush_count: usize,
    /// `(region, thumb_row, thumb_height)`.
    pub last_scrollbar: Option<(Region, usize, usize)>,
}

impl TestSurface {
    #[must_use]
    pub fn new(size: Size) -> Self {
        let rows = usize::from(size.rows);
        let cols = usize::from(size.cols);
        Self {
            size,
            cells: vec![vec![' '; cols]; rows],
            highlighted: vec![vec![false; cols]; rows],
            beep_count: 0,
            full_repaint_count: 0,
            flush_count: 0,
            last_scrollbar: None,
        }
    }

    /// The whole screen row, including trailing spaces.
    #[must_use]
    pub fn row_text(&self, row: u16) -> String {
        self.cells
            .get(usize::from(row))
            .map(|it| it.iter().collect())
            .unwrap_or_default()
    }

    /// Cells of `row` that are painted highlighted, with trailing spaces removed.
    #[must_use]
    pub fn highlighted_text(&self, row: u16) -> String {
        let row = usize::from(row);
        let (Some(cells), Some(flags)) = (self.cells.get(row), self.highlighted.get(row))
        else {
            return String::new();
        };
        let it: String = cells
            .iter()
            .zip(flags)
            .filter(|(_, flag)| **flag)
            .map(|(ch, _)| *ch)
            .collect();
        it.trim_end().to_string()
    }

    /// Screen rows that have at least one highlighted cell.
    #[must_use]
    pub fn highlighted_rows(&self) -> Vec<u16> {
        (0..self.size.rows)
            .filter(|row| self.highlighted[usize::from(*row)].iter().any(|it| *it))
            .collect()
    }

    #[must_use]
    pub fn contains_text(&self, text: &str) -> bool {
        (0..self.size.rows).any(|row| self.row_text(row).contains(text))
    }

    fn put(&mut self, row: usize, col: usize, ch: char, highlighted: bool) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|it| it.get_mut(col)) {
            *cell = ch;
        }
        if let Some(flag) = self.highlighted.get_mut(row).and_then(|it| it.get_mut(col)) {
            *flag = highlighted;
        }
    }
}

impl Display for TestSurface {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size.rows {
            writeln!(f, "{}", self.row_text(row).trim_end())?;
        }
        Ok(())
    }
}

impl DisplaySurface for TestSurface {
    fn size(&self) -> Size { self.size }

    fn set_size(&mut self, size: Size) {
        let full_repaint_count = self.full_repaint_count;
        *self = Self {
            full_repaint_count,
            ..Self::new(size)
        };
    }

    fn paint_row(
        &mut self,
        region: Region,
        row: usize,
        content: &str,
        highlighted: bool,
    ) -> io::Result<()> {
        if row >= usize::from(region.size.rows) {
            return Ok(());
        }
        let text = clip_to_width(content, 0, usize::from(region.size.cols));
        let abs_row = usize::from(region.origin.row) + row;
        for (offset, ch) in text.chars().enumerate() {
            self.put(
                abs_row,
                usize::from(region.origin.col) + offset,
                ch,
                highlighted,
            );
        }
        Ok(())
    }

    fn paint_scrollbar(
        &mut self,
        region: Region,
        thumb_row: usize,
        thumb_height: usize,
    ) -> io::Result<()> {
        let thumb = thumb_row..thumb_row + thumb_height.max(1);
        for row in 0..usize::from(region.size.rows) {
            let ch = if thumb.contains(&row) {
                crate::SCROLLBAR_THUMB_CHAR
            } else {
                crate::SCROLLBAR_TRACK_CHAR
            };
            self.put(
                usize::from(region.origin.row) + row,
                usize::from(region.origin.col),
                ch,
                false,
            );
        }
        self.last_scrollbar = Some((region, thumb_row, thumb_height));
        Ok(())
    }

    fn paint_box(&mut self, region: Region) -> io::Result<()> {
        let rows = usize::from(region.size.rows);
        let cols = usize::from(region.size.cols);
        if rows < 2 || cols < 2 {
            return Ok(());
        }
        let top = usize::from(region.origin.row);
        let left = usize::from(region.origin.col);
        for col in 0..cols {
            let (first, last) = match col {
                0 => ('┌', '└'),
                it if it == cols - 1 => ('┐', '┘'),
                _ => ('─', '─'),
            };
            self.put(top, left + col, first, false);
            self.put(top + rows - 1, left + col, last, false);
        }
        for row in 1..rows - 1 {
            self.put(top + row, left, '│', false);
            self.put(top + row, left + cols - 1, '│', false);
        }
        Ok(())
    }

    fn erase_region(&mut self, region: Region) -> io::Result<()> {
        for row in 0..usize::from(region.size.rows) {
            for col in 0..usize::from(region.size.cols) {
                self.put(
                    usize::from(region.origin.row) + row,
                    usize::from(region.origin.col) + col,
                    ' ',
                    false,
                );
            }
        }
        Ok(())
    }

    fn request_full_repaint(&mut self) -> io::Result<()> {
        self.full_repaint_count += 1;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_count += 1;
        Ok(())
    }

    fn beep(&mut self) -> io::Result<()> {
        self.beep_count += 1;
        Ok(())
    }
}

/// Does `text` contain an ANSI escape sequence?
#[must_use]
pub fn contains_ansi_escape_sequence(text: &str) -> bool {
    text.chars().any(|it| it == '\x1b')
}

/// A temporary directory that is removed (with its contents) when dropped.
#[derive(Debug)]
pub struct TempDir {
    inner: PathBuf,
}

/// # Errors
///
/// If the directory can't be created.
pub fn try_create_temp_dir() -> miette::Result<TempDir> {
    let root = std::env::temp_dir();
    let new_temp_dir = root.join(format!("r3bl_widgets_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&new_temp_dir).into_diagnostic()?;
    Ok(TempDir {
        inner: new_temp_dir,
    })
}

impl TempDir {
    #[must_use]
    pub fn join(&self, path: impl AsRef<Path>) -> PathBuf { self.inner.join(path) }
}

impl Deref for TempDir {
    type Target = Path;

    fn deref(&self) -> &Self::Target { &self.inner }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        // Ignore errors, the OS cleans up the temp folder eventually.
        let _ = std::fs::remove_dir_all(&self.inner);
    }
}
