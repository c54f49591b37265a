// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{WidgetError, WidgetResult};

/// Row and column of a terminal cell, `0` based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub row: u16,
    pub col: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub rows: u16,
    pub cols: u16,
}

/// A rectangle of terminal cells that a widget owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Region {
    pub origin: Pos,
    pub size: Size,
}

impl Pos {
    #[must_use]
    pub fn new(row: u16, col: u16) -> Self { Self { row, col } }
}

impl Size {
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Self { Self { rows, cols } }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rows x {} cols", self.rows, self.cols)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at ({}, {})",
            self.size, self.origin.row, self.origin.col
        )
    }
}

impl Region {
    #[must_use]
    pub fn new(row: u16, col: u16, rows: u16, cols: u16) -> Self {
        Self {
            origin: Pos::new(row, col),
            size: Size::new(rows, cols),
        }
    }

    /// Exclusive bottom row.
    #[must_use]
    pub fn bottom(&self) -> u32 { u32::from(self.origin.row) + u32::from(self.size.rows) }

    /// Exclusive right column.
    #[must_use]
    pub fn right(&self) -> u32 { u32::from(self.origin.col) + u32::from(self.size.cols) }

    /// Check that this region lies entirely on a `screen` sized display.
    ///
    /// # Errors
    ///
    /// [`WidgetError::CannotAllocateRegion`] when any part of the region is off screen
    /// or the region has no cells at all.
    pub fn try_fit(self, screen: Size) -> WidgetResult<Self> {
        let fits = self.size.rows > 0
            && self.size.cols > 0
            && self.bottom() <= u32::from(screen.rows)
            && self.right() <= u32::from(screen.cols);
        if fits {
            Ok(self)
        } else {
            Err(WidgetError::CannotAllocateRegion {
                region: self,
                screen,
            })
        }
    }

    /// Number of rows left for content after the border (one row above and below) and
    /// the title lines.
    #[must_use]
    pub fn content_rows(&self, boxed: bool, title_lines: usize) -> usize {
        let border = if boxed { 2 } else { 0 };
        usize::from(self.size.rows).saturating_sub(border + title_lines)
    }

    /// The area inside the border, or the whole region when there is no border.
    #[must_use]
    pub fn inner(&self, boxed: bool) -> Region {
        if !boxed {
            return *self;
        }
        Region::new(
            self.origin.row.saturating_add(1),
            self.origin.col.saturating_add(1),
            self.size.rows.saturating_sub(2),
            self.size.cols.saturating_sub(2),
        )
    }

    /// The content area: [`Self::inner`] minus the title lines at the top.
    #[must_use]
    pub fn content(&self, boxed: bool, title_lines: usize) -> Region {
        let inner = self.inner(boxed);
        let title_lines = u16::try_from(title_lines).unwrap_or(u16::MAX);
        Region::new(
            inner.origin.row.saturating_add(title_lines),
            inner.origin.col,
            inner.size.rows.saturating_sub(title_lines),
            inner.size.cols,
        )
    }

    /// Drop the right most column, eg: to make space for a scrollbar.
    #[must_use]
    pub fn without_last_col(&self) -> Region {
        Region::new(
            self.origin.row,
            self.origin.col,
            self.size.rows,
            self.size.cols.saturating_sub(1),
        )
    }

    /// Only the right most column.
    #[must_use]
    pub fn last_col(&self) -> Region {
        Region::new(
            self.origin.row,
            self.origin.col + self.size.cols.saturating_sub(1),
            self.size.rows,
            self.size.cols.min(1),
        )
    }
}
