// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use crossterm::{cursor::MoveTo,
                queue,
                style::{Attribute, Print, SetAttribute},
                terminal::{Clear, ClearType}};

use crate::{Region, Size, WidgetError, WidgetResult, get_size};

pub const SCROLLBAR_THUMB_CHAR: char = '█';
pub const SCROLLBAR_TRACK_CHAR: char = '░';

/// Where widgets paint. Rows are relative to the region passed in, and content that
/// does not fit the region's width is cut off.
pub trait DisplaySurface {
    fn size(&self) -> Size;

    /// The terminal changed size.
    fn set_size(&mut self, size: Size);

    /// Paint `content` on `row` of `region`, padded with spaces to the region's width.
    ///
    /// # Errors
    ///
    /// When the backing writer fails.
    fn paint_row(
        &mut self,
        region: Region,
        row: usize,
        content: &str,
        highlighted: bool,
    ) -> io::Result<()>;

    /// Paint a one column scrollbar filling `region`, with the thumb starting at
    /// `thumb_row`.
    ///
    /// # Errors
    ///
    /// When the backing writer fails.
    fn paint_scrollbar(
        &mut self,
        region: Region,
        thumb_row: usize,
        thumb_height: usize,
    ) -> io::Result<()>;

    /// Paint a border along the edges of `region`.
    ///
    /// # Errors
    ///
    /// When the backing writer fails.
    fn paint_box(&mut self, region: Region) -> io::Result<()>;

    /// # Errors
    ///
    /// When the backing writer fails.
    fn erase_region(&mut self, region: Region) -> io::Result<()>;

    /// The whole screen should be redrawn, not just the widget that asked.
    ///
    /// # Errors
    ///
    /// When the backing writer fails.
    fn request_full_repaint(&mut self) -> io::Result<()>;

    /// # Errors
    ///
    /// When the backing writer fails.
    fn flush(&mut self) -> io::Result<()>;

    /// Audible signal for a key that did nothing.
    ///
    /// # Errors
    ///
    /// When the backing writer fails.
    fn beep(&mut self) -> io::Result<()>;
}

/// Cut `text` to the window `[skip, skip + width)` of its chars, padding with spaces so
/// the result is exactly `width` chars.
#[must_use]
pub fn clip_to_width(text: &str, skip: usize, width: usize) -> String {
    let mut it: String = text.chars().skip(skip).take(width).collect();
    let len = it.chars().count();
    it.extend(std::iter::repeat_n(' ', width - len));
    it
}

/// The part of a widget's region that isn't content: the optional border and the title
/// lines under its top edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    region: Region,
    boxed: bool,
    title_lines: Vec<String>,
}

impl Frame {
    /// Place a widget at `region` on a `screen` sized display. The title may span
    /// several lines (separated by `\n`).
    ///
    /// # Errors
    ///
    /// - [`WidgetError::CannotAllocateRegion`] if the region is off screen.
    /// - [`WidgetError::EmptyRegion`] if the border and title leave no content rows or
    ///   columns.
    pub fn try_new(
        region: Region,
        screen: Size,
        boxed: bool,
        title: Option<&str>,
    ) -> WidgetResult<Self> {
        let region = region.try_fit(screen)?;

        let title_lines: Vec<String> = title
            .map(|it| it.lines().map(ToString::to_string).collect())
            .unwrap_or_default();

        let it = Self {
            region,
            boxed,
            title_lines,
        };

        let content = it.content_region();
        if content.size.rows == 0 || content.size.cols == 0 {
            return Err(WidgetError::EmptyRegion);
        }

        Ok(it)
    }

    #[must_use]
    pub fn region(&self) -> Region { self.region }

    #[must_use]
    pub fn is_boxed(&self) -> bool { self.boxed }

    #[must_use]
    pub fn title_lines(&self) -> &[String] { &self.title_lines }

    #[must_use]
    pub fn content_region(&self) -> Region {
        self.region.content(self.boxed, self.title_lines.len())
    }

    /// Rows available to a widget's content.
    #[must_use]
    pub fn max_rows(&self) -> usize {
        self.region
            .content_rows(self.boxed, self.title_lines.len())
    }

    /// Erase the region, then paint the border (when `boxed` and the frame reserved
    /// space for one) and the title.
    ///
    /// # Errors
    ///
    /// When the surface fails.
    pub fn paint(&self, surface: &mut dyn DisplaySurface, boxed: bool) -> io::Result<()> {
        surface.erase_region(self.region)?;
        if boxed && self.boxed {
            surface.paint_box(self.region)?;
        }
        let inner = self.region.inner(self.boxed);
        for (row, line) in self.title_lines.iter().enumerate() {
            surface.paint_row(inner, row, line, false)?;
        }
        Ok(())
    }
}

/// Paints to a real terminal (or any [Write]) using crossterm commands. Commands are
/// queued and only sent on [`DisplaySurface::flush`].
#[derive(Debug)]
pub struct CrosstermSurface<W: Write> {
    writer: W,
    size: Size,
}

impl CrosstermSurface<io::Stdout> {
    /// # Errors
    ///
    /// If the terminal size can't be determined.
    pub fn try_new_stdout() -> io::Result<Self> {
        Ok(Self::new(io::stdout(), get_size()?))
    }
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(writer: W, size: Size) -> Self { Self { writer, size } }

    pub fn get_write(&mut self) -> &mut W { &mut self.writer }
}

fn to_u16(value: usize) -> u16 { u16::try_from(value).unwrap_or(u16::MAX) }

impl<W: Write> DisplaySurface for CrosstermSurface<W> {
    fn size(&self) -> Size { self.size }

    fn set_size(&mut self, size: Size) { self.size = size; }

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
        let row = region.origin.row.saturating_add(to_u16(row));

        queue!(self.writer, MoveTo(region.origin.col, row))?;
        if highlighted {
            queue!(
                self.writer,
                SetAttribute(Attribute::Reverse),
                Print(text),
                SetAttribute(Attribute::NoReverse)
            )
        } else {
            queue!(self.writer, Print(text))
        }
    }

    fn paint_scrollbar(
        &mut self,
        region: Region,
        thumb_row: usize,
        thumb_height: usize,
    ) -> io::Result<()> {
        let thumb = thumb_row..thumb_row + thumb_height.max(1);
        for row in 0..region.size.rows {
            let ch = if thumb.contains(&usize::from(row)) {
                SCROLLBAR_THUMB_CHAR
            } else {
                SCROLLBAR_TRACK_CHAR
            };
            queue!(
                self.writer,
                MoveTo(region.origin.col, region.origin.row + row),
                Print(ch)
            )?;
        }
        Ok(())
    }

    fn paint_box(&mut self, region: Region) -> io::Result<()> {
        let Size { rows, cols } = region.size;
        if rows < 2 || cols < 2 {
            return Ok(());
        }
        let Region { origin, .. } = region;
        let horizontal = "─".repeat(usize::from(cols - 2));

        queue!(
            self.writer,
            MoveTo(origin.col, origin.row),
            Print(format!("┌{horizontal}┐"))
        )?;
        for row in 1..rows - 1 {
            queue!(
                self.writer,
                MoveTo(origin.col, origin.row + row),
                Print('│'),
                MoveTo(origin.col + cols - 1, origin.row + row),
                Print('│')
            )?;
        }
        queue!(
            self.writer,
            MoveTo(origin.col, origin.row + rows - 1),
            Print(format!("└{horizontal}┘"))
        )
    }

    fn erase_region(&mut self, region: Region) -> io::Result<()> {
        let blank = " ".repeat(usize::from(region.size.cols));
        for row in 0..region.size.rows {
            queue!(
                self.writer,
                MoveTo(region.origin.col, region.origin.row + row),
                Print(&blank)
            )?;
        }
        Ok(())
    }

    fn request_full_repaint(&mut self) -> io::Result<()> {
        queue!(self.writer, Clear(ClearType::All))
    }

    fn flush(&mut self) -> io::Result<()> { self.writer.flush() }

    fn beep(&mut self) -> io::Result<()> { queue!(self.writer, Print('\x07')) }
}
