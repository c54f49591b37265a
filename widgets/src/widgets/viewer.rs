// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use smallvec::SmallVec;

use super::{ListOptions, paint_list, widest};
use crate::{BUTTON_GAP, DisplaySurface, Key, KeyOutcome, KeyPress, NavigationMode, Region,
            ScrollResult, Size, SpecialKey, ViewportState, Widget, WidgetEngine,
            WidgetError, WidgetKind, WidgetResult, clip_to_width};

/// Pageable text with a row of buttons under it. Tab and BackTab move between the
/// buttons, confirming returns the index of the highlighted button.
pub type Viewer = Widget<ViewerEngine>;

const BUTTON_LAYOUT_SIZE: usize = 8;

/// `(col, width)` of each button, relative to the content region.
pub type ButtonLayout = SmallVec<[(usize, usize); BUTTON_LAYOUT_SIZE]>;

/// Rows under the text taken by the separator and the buttons.
const BUTTON_ROWS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerEngine {
    info: Vec<String>,
    buttons: Vec<String>,
    current_button: usize,
    viewport: ViewportState,
    content_rows: usize,
    scrollbar: bool,
    text_width: usize,
}

impl Viewer {
    /// # Errors
    ///
    /// - If `region` doesn't fit on `screen`.
    /// - [`WidgetError::EmptyRegion`] if there are buttons and fewer than 3 content
    ///   rows (one for text, one separator, one for the buttons).
    pub fn try_new(
        region: Region,
        screen: Size,
        info: Vec<String>,
        buttons: Vec<String>,
        options: &ListOptions,
    ) -> WidgetResult<Self> {
        let frame = options.try_create_frame(region, screen)?;
        if !buttons.is_empty() && frame.max_rows() <= BUTTON_ROWS {
            return Err(WidgetError::EmptyRegion);
        }
        let mut engine = ViewerEngine::new(options, frame.content_region());
        engine.set_buttons(buttons);
        engine.set_info(info);
        Ok(Widget::new(engine, frame))
    }
}

impl ViewerEngine {
    #[must_use]
    pub fn new(options: &ListOptions, content: Region) -> Self {
        let content_rows = usize::from(content.size.rows);
        Self {
            info: vec![],
            buttons: vec![],
            current_button: 0,
            viewport: ViewportState::new(content_rows),
            content_rows,
            scrollbar: options.scrollbar,
            text_width: options.text_width(content),
        }
    }

    fn text_rows(&self) -> usize {
        if self.buttons.is_empty() {
            self.content_rows
        } else {
            self.content_rows.saturating_sub(BUTTON_ROWS).max(1)
        }
    }

    fn sync(&mut self) {
        self.viewport.set_max_rows(self.text_rows());
        self.viewport.resize_list(self.info.len());
        let content_width = widest(self.info.iter().cloned());
        self.viewport
            .set_max_left_char(content_width, self.text_width);
    }

    #[must_use]
    pub fn info(&self) -> &[String] { &self.info }

    /// Replace the text and go back to the top.
    pub fn set_info(&mut self, info: Vec<String>) {
        self.info = info;
        self.sync();
        let _ = self.viewport.set_top(0);
    }

    #[must_use]
    pub fn buttons(&self) -> &[String] { &self.buttons }

    /// Replace the buttons. The first one is highlighted.
    pub fn set_buttons(&mut self, buttons: Vec<String>) {
        self.buttons = buttons;
        self.current_button = 0;
        self.sync();
    }

    #[must_use]
    pub fn current_button(&self) -> usize { self.current_button }

    /// Clamped to the buttons.
    pub fn set_current_button(&mut self, index: usize) {
        self.current_button = index.min(self.buttons.len().saturating_sub(1));
    }

    fn cycle_button(&mut self, forward: bool) -> KeyOutcome<usize> {
        let count = self.buttons.len();
        if count == 0 {
            return KeyOutcome::Beep;
        }
        self.current_button = if forward {
            (self.current_button + 1) % count
        } else {
            (self.current_button + count - 1) % count
        };
        KeyOutcome::Handled
    }

    /// Centered in `width`. Buttons that don't fit start at the left edge and get
    /// cut off.
    #[must_use]
    pub fn button_layout(&self, width: usize) -> ButtonLayout {
        let widths = self.buttons.iter().map(|it| it.chars().count());
        let total = widths.clone().sum::<usize>()
            + BUTTON_GAP * self.buttons.len().saturating_sub(1);

        let mut col = width.saturating_sub(total) / 2;
        let mut it = ButtonLayout::new();
        for button_width in widths {
            it.push((col, button_width));
            col += button_width + BUTTON_GAP;
        }
        it
    }

    fn paint_buttons(
        &self,
        surface: &mut dyn DisplaySurface,
        content: Region,
        has_focus: bool,
    ) -> io::Result<()> {
        let text_rows = self.text_rows();
        let width = usize::from(content.size.cols);

        // A frame shrunk below the button rows keeps only the text.
        if text_rows + BUTTON_ROWS > usize::from(content.size.rows) {
            return Ok(());
        }

        surface.paint_row(content, text_rows, &"─".repeat(width), false)?;
        surface.paint_row(content, text_rows + 1, "", false)?;

        let row = content.origin.row.saturating_add(to_u16(text_rows + 1));
        for (index, (col, button_width)) in self.button_layout(width).into_iter().enumerate() {
            if col >= width {
                break;
            }
            let button_width = button_width.min(width - col);
            let region = Region::new(
                row,
                content.origin.col.saturating_add(to_u16(col)),
                1,
                to_u16(button_width),
            );
            let label = clip_to_width(&self.buttons[index], 0, button_width);
            surface.paint_row(region, 0, &label, has_focus && index == self.current_button)?;
        }
        Ok(())
    }
}

fn to_u16(value: usize) -> u16 { u16::try_from(value).unwrap_or(u16::MAX) }

impl WidgetEngine for ViewerEngine {
    type Payload = usize;

    fn kind(&self) -> WidgetKind { WidgetKind::Viewer }

    fn current_payload(&self) -> Option<usize> { Some(self.current_button) }

    fn handle_key(&mut self, key: KeyPress) -> KeyOutcome<usize> {
        if key.is_special(SpecialKey::Tab) {
            return self.cycle_button(true);
        }
        if key.is_special(SpecialKey::BackTab) {
            return self.cycle_button(false);
        }

        let paged = match key {
            KeyPress::Plain {
                key: Key::Character('b' | 'B'),
            } => Some(self.viewport.page_up()),
            KeyPress::Plain {
                key: Key::Character(' ' | 'f' | 'F'),
            } => Some(self.viewport.page_down()),
            _ => self
                .viewport
                .handle_navigation_key(key, NavigationMode::Pager),
        };

        match paged {
            Some(ScrollResult::Moved) => KeyOutcome::Handled,
            Some(ScrollResult::Beep) => KeyOutcome::Beep,
            None => KeyOutcome::NotHandled,
        }
    }

    fn render(
        &self,
        surface: &mut dyn DisplaySurface,
        content: Region,
        has_focus: bool,
    ) -> io::Result<()> {
        let text_region = Region::new(
            content.origin.row,
            content.origin.col,
            to_u16(self.text_rows()).min(content.size.rows),
            content.size.cols,
        );
        paint_list(
            surface,
            text_region,
            &self.viewport,
            self.scrollbar,
            None,
            |it| self.info.get(it).cloned().unwrap_or_default(),
        )?;

        if self.buttons.is_empty() {
            return Ok(());
        }
        self.paint_buttons(surface, content, has_focus)
    }

    fn resize(&mut self, content: Region) {
        self.content_rows = usize::from(content.size.rows);
        self.text_width = ListOptions::default()
            .scrollbar(self.scrollbar)
            .text_width(content);
        self.sync();
    }

    fn viewport(&self) -> Option<&ViewportState> { Some(&self.viewport) }
}
