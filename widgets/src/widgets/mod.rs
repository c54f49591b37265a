// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Concrete widgets. Each one is a [`crate::WidgetEngine`] wrapped in a
//! [`crate::Widget`], and the list like ones each own one [`crate::ViewportState`].

// Attach.
pub mod entry;
pub mod radio_list;
pub mod scroll_list;
pub mod scroll_window;
pub mod selection_list;
pub mod viewer;

// Re-export.
pub use entry::*;
pub use radio_list::*;
pub use scroll_list::*;
pub use scroll_window::*;
pub use selection_list::*;
pub use viewer::*;

use std::io;

use crate::{DisplaySurface, Frame, Region, Size, ViewportState, WidgetResult,
            clip_to_width};

/// Look of a list like widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub title: Option<String>,
    pub boxed: bool,
    /// Prefix items with `1. `, `2. ` and so on.
    pub numbered: bool,
    /// Reserve the right most column for a scrollbar.
    pub scrollbar: bool,
}

impl ListOptions {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn boxed(mut self, boxed: bool) -> Self {
        self.boxed = boxed;
        self
    }

    #[must_use]
    pub fn numbered(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    #[must_use]
    pub fn scrollbar(mut self, scrollbar: bool) -> Self {
        self.scrollbar = scrollbar;
        self
    }

    /// # Errors
    ///
    /// See [`Frame::try_new`].
    pub fn try_create_frame(&self, region: Region, screen: Size) -> WidgetResult<Frame> {
        Frame::try_new(region, screen, self.boxed, self.title.as_deref())
    }

    /// Columns left for item text in `content`.
    #[must_use]
    pub fn text_width(&self, content: Region) -> usize {
        let cols = usize::from(content.size.cols);
        if self.scrollbar {
            cols.saturating_sub(1)
        } else {
            cols
        }
    }
}

/// Paint the visible items of a list. `highlighted` is the item to show in reverse
/// video, if any. The scrollbar is only drawn when the list overflows the viewport.
pub(crate) fn paint_list(
    surface: &mut dyn DisplaySurface,
    content: Region,
    viewport: &ViewportState,
    scrollbar: bool,
    highlighted: Option<usize>,
    item_text: impl Fn(usize) -> String,
) -> io::Result<()> {
    let text_region = if scrollbar {
        content.without_last_col()
    } else {
        content
    };
    let width = usize::from(text_region.size.cols);

    for row in 0..usize::from(content.size.rows) {
        let item = viewport.current_top() + row;
        if row < viewport.view_size() {
            let text = clip_to_width(&item_text(item), viewport.left_char(), width);
            surface.paint_row(text_region, row, &text, highlighted == Some(item))?;
        } else {
            surface.paint_row(text_region, row, "", false)?;
        }
    }

    if scrollbar {
        let bar = content.last_col();
        if viewport.list_size() > viewport.view_size() {
            surface.paint_scrollbar(
                bar,
                viewport.scrollbar_thumb_row(),
                viewport.toggle_size(),
            )?;
        } else {
            surface.erase_region(bar)?;
        }
    }

    Ok(())
}

/// Widest item, in chars.
pub(crate) fn widest(texts: impl Iterator<Item = String>) -> usize {
    texts.map(|it| it.chars().count()).max().unwrap_or(0)
}
