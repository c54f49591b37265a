// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use super::{ListOptions, paint_list, widest};
use crate::{DisplaySurface, KeyOutcome, KeyPress, NavigationMode, Region, ScrollResult,
            Size, ViewportState, Widget, WidgetEngine, WidgetKind, WidgetResult};

/// A scrolling list of items. Confirming returns the index of the current item.
pub type ScrollList = Widget<ScrollListEngine>;

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollListEngine {
    items: Vec<String>,
    viewport: ViewportState,
    numbered: bool,
    scrollbar: bool,
    text_width: usize,
}

impl ScrollList {
    /// # Errors
    ///
    /// If `region` doesn't fit on `screen`, or leaves no room for items.
    pub fn try_new(
        region: Region,
        screen: Size,
        items: Vec<String>,
        options: &ListOptions,
    ) -> WidgetResult<Self> {
        let frame = options.try_create_frame(region, screen)?;
        let engine = ScrollListEngine::new(items, options, frame.content_region());
        Ok(Widget::new(engine, frame))
    }
}

impl ScrollListEngine {
    #[must_use]
    pub fn new(items: Vec<String>, options: &ListOptions, content: Region) -> Self {
        let mut it = Self {
            items,
            viewport: ViewportState::new(usize::from(content.size.rows)),
            numbered: options.numbered,
            scrollbar: options.scrollbar,
            text_width: options.text_width(content),
        };
        it.sync();
        it.viewport.set_position(0);
        it
    }

    fn display_text(&self, index: usize) -> String {
        let item = self.items.get(index).map_or("", String::as_str);
        if self.numbered {
            format!("{}. {item}", index + 1)
        } else {
            item.to_string()
        }
    }

    /// Bring the viewport in line with the items.
    fn sync(&mut self) {
        self.viewport.resize_list(self.items.len());
        let content_width = widest((0..self.items.len()).map(|it| self.display_text(it)));
        self.viewport
            .set_max_left_char(content_width, self.text_width);
    }

    #[must_use]
    pub fn items(&self) -> &[String] { &self.items }

    /// Replace all items and go back to the top.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.sync();
        self.viewport.set_position(0);
    }

    pub fn add_item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
        self.sync();
    }

    /// Insert before the current item.
    pub fn insert_item(&mut self, item: impl Into<String>) {
        let index = self.viewport.current_item().min(self.items.len());
        self.items.insert(index, item.into());
        self.sync();
    }

    pub fn delete_item(&mut self, index: usize) -> Option<String> {
        if index >= self.items.len() {
            return None;
        }
        let it = self.items.remove(index);
        self.sync();
        Some(it)
    }

    #[must_use]
    pub fn current_item(&self) -> usize { self.viewport.current_item() }

    pub fn set_current_item(&mut self, index: usize) { self.viewport.set_position(index); }
}

impl WidgetEngine for ScrollListEngine {
    type Payload = usize;

    fn kind(&self) -> WidgetKind { WidgetKind::ScrollList }

    fn current_payload(&self) -> Option<usize> {
        (!self.items.is_empty()).then(|| self.viewport.current_item())
    }

    fn handle_key(&mut self, key: KeyPress) -> KeyOutcome<usize> {
        match self
            .viewport
            .handle_navigation_key(key, NavigationMode::Cursor)
        {
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
        let highlighted = (has_focus && !self.items.is_empty())
            .then(|| self.viewport.current_item());
        paint_list(
            surface,
            content,
            &self.viewport,
            self.scrollbar,
            highlighted,
            |it| self.display_text(it),
        )
    }

    fn resize(&mut self, content: Region) {
        self.text_width = ListOptions::default()
            .scrollbar(self.scrollbar)
            .text_width(content);
        self.viewport.set_max_rows(usize::from(content.size.rows));
        self.sync();
    }

    fn viewport(&self) -> Option<&ViewportState> { Some(&self.viewport) }
}
