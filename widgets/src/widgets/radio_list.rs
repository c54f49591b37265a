// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use super::{ListOptions, paint_list, widest};
use crate::{DEFAULT_CHOICE_CHAR, DisplaySurface, KeyOutcome, KeyPress, NavigationMode,
            Region, ScrollResult, Size, ViewportState, Widget, WidgetEngine, WidgetKind,
            WidgetResult};

/// A list where exactly one item is chosen with Space. Confirming returns the chosen
/// index, which is not necessarily the highlighted one.
pub type RadioList = Widget<RadioListEngine>;

#[derive(Debug, Clone, PartialEq)]
pub struct RadioListEngine {
    items: Vec<String>,
    viewport: ViewportState,
    selected_item: usize,
    choice_char: char,
    scrollbar: bool,
    text_width: usize,
}

impl RadioList {
    /// # Errors
    ///
    /// If `region` doesn't fit on `screen`, or leaves no room for items.
    pub fn try_new(
        region: Region,
        screen: Size,
        items: Vec<String>,
        default_item: usize,
        options: &ListOptions,
    ) -> WidgetResult<Self> {
        let frame = options.try_create_frame(region, screen)?;
        let mut engine = RadioListEngine::new(items, options, frame.content_region());
        engine.set_selected_item(default_item);
        Ok(Widget::new(engine, frame))
    }
}

impl RadioListEngine {
    #[must_use]
    pub fn new(items: Vec<String>, options: &ListOptions, content: Region) -> Self {
        let mut it = Self {
            items,
            viewport: ViewportState::new(usize::from(content.size.rows)),
            selected_item: 0,
            choice_char: DEFAULT_CHOICE_CHAR,
            scrollbar: options.scrollbar,
            text_width: options.text_width(content),
        };
        it.sync();
        it.viewport.set_position(0);
        it
    }

    fn display_text(&self, index: usize) -> String {
        let marker = if index == self.selected_item {
            self.choice_char
        } else {
            ' '
        };
        let item = self.items.get(index).map_or("", String::as_str);
        format!("[{marker}] {item}")
    }

    fn sync(&mut self) {
        self.viewport.resize_list(self.items.len());
        self.selected_item = self
            .selected_item
            .min(self.items.len().saturating_sub(1));
        let content_width = widest((0..self.items.len()).map(|it| self.display_text(it)));
        self.viewport
            .set_max_left_char(content_width, self.text_width);
    }

    #[must_use]
    pub fn items(&self) -> &[String] { &self.items }

    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.selected_item = 0;
        self.sync();
        self.viewport.set_position(0);
    }

    #[must_use]
    pub fn selected_item(&self) -> usize { self.selected_item }

    /// Clamped into the list.
    pub fn set_selected_item(&mut self, index: usize) {
        self.selected_item = index.min(self.items.len().saturating_sub(1));
    }

    #[must_use]
    pub fn current_item(&self) -> usize { self.viewport.current_item() }

    pub fn set_current_item(&mut self, index: usize) { self.viewport.set_position(index); }

    /// The mark shown between the brackets of the chosen item.
    pub fn set_choice_char(&mut self, choice_char: char) { self.choice_char = choice_char; }
}

impl WidgetEngine for RadioListEngine {
    type Payload = usize;

    fn kind(&self) -> WidgetKind { WidgetKind::RadioList }

    fn current_payload(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.selected_item)
    }

    fn handle_key(&mut self, key: KeyPress) -> KeyOutcome<usize> {
        if key.as_plain_char() == Some(' ') {
            if self.items.is_empty() {
                return KeyOutcome::Beep;
            }
            self.selected_item = self.viewport.current_item();
            return KeyOutcome::Handled;
        }

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
