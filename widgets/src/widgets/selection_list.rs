// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use super::{ListOptions, paint_list, widest};
use crate::{DEFAULT_SELECTION_CHOICES, DisplaySurface, KeyOutcome, KeyPress,
            NavigationMode, Region, ScrollResult, Size, ViewportState, Widget,
            WidgetEngine, WidgetKind, WidgetResult};

/// A list where every item carries a choice, cycled with Space. Confirming returns the
/// choice index of every item.
pub type SelectionList = Widget<SelectionListEngine>;

/// Whether Space may change an item's choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChoiceMode {
    #[default]
    Cycle,
    Locked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionListEngine {
    items: Vec<String>,
    choices: Vec<String>,
    selections: Vec<usize>,
    modes: Vec<ChoiceMode>,
    viewport: ViewportState,
    scrollbar: bool,
    text_width: usize,
}

impl SelectionList {
    /// `choices` are the labels an item cycles through, eg: `["[ ]", "[*]"]`. When empty
    /// the default labels are used.
    ///
    /// # Errors
    ///
    /// If `region` doesn't fit on `screen`, or leaves no room for items.
    pub fn try_new(
        region: Region,
        screen: Size,
        items: Vec<String>,
        choices: Vec<String>,
        options: &ListOptions,
    ) -> WidgetResult<Self> {
        let frame = options.try_create_frame(region, screen)?;
        let mut engine = SelectionListEngine::new(items, options, frame.content_region());
        engine.set_choices(choices);
        Ok(Widget::new(engine, frame))
    }
}

impl SelectionListEngine {
    #[must_use]
    pub fn new(items: Vec<String>, options: &ListOptions, content: Region) -> Self {
        let count = items.len();
        let mut it = Self {
            items,
            choices: DEFAULT_SELECTION_CHOICES
                .iter()
                .map(ToString::to_string)
                .collect(),
            selections: vec![0; count],
            modes: vec![ChoiceMode::Cycle; count],
            viewport: ViewportState::new(usize::from(content.size.rows)),
            scrollbar: options.scrollbar,
            text_width: options.text_width(content),
        };
        it.sync();
        it.viewport.set_position(0);
        it
    }

    fn display_text(&self, index: usize) -> String {
        let choice = self
            .selections
            .get(index)
            .and_then(|it| self.choices.get(*it))
            .map_or("", String::as_str);
        let item = self.items.get(index).map_or("", String::as_str);
        format!("{choice} {item}")
    }

    fn sync(&mut self) {
        self.viewport.resize_list(self.items.len());
        let content_width = widest((0..self.items.len()).map(|it| self.display_text(it)));
        self.viewport
            .set_max_left_char(content_width, self.text_width);
    }

    #[must_use]
    pub fn items(&self) -> &[String] { &self.items }

    /// Replace the items. Every choice goes back to the first label.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.selections = vec![0; items.len()];
        self.modes = vec![ChoiceMode::Cycle; items.len()];
        self.items = items;
        self.sync();
        self.viewport.set_position(0);
    }

    /// Ignored when empty. Existing choices are clamped to the new labels.
    pub fn set_choices(&mut self, choices: Vec<String>) {
        if choices.is_empty() {
            return;
        }
        let last = choices.len() - 1;
        self.choices = choices;
        for it in &mut self.selections {
            *it = (*it).min(last);
        }
        self.sync();
    }

    #[must_use]
    pub fn choices(&self) -> &[String] { &self.choices }

    #[must_use]
    pub fn selections(&self) -> &[usize] { &self.selections }

    /// Returns `false` if `index` is not an item. The choice is clamped to the labels.
    pub fn set_selection(&mut self, index: usize, choice: usize) -> bool {
        let last = self.choices.len().saturating_sub(1);
        match self.selections.get_mut(index) {
            Some(it) => {
                *it = choice.min(last);
                true
            }
            None => false,
        }
    }

    /// Returns `false` if `index` is not an item.
    pub fn set_mode(&mut self, index: usize, mode: ChoiceMode) -> bool {
        match self.modes.get_mut(index) {
            Some(it) => {
                *it = mode;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn current_item(&self) -> usize { self.viewport.current_item() }

    pub fn set_current_item(&mut self, index: usize) { self.viewport.set_position(index); }

    fn cycle_current(&mut self) -> KeyOutcome<Vec<usize>> {
        let index = self.viewport.current_item();
        if self.items.is_empty() || self.modes[index] == ChoiceMode::Locked {
            return KeyOutcome::Beep;
        }
        self.selections[index] = (self.selections[index] + 1) % self.choices.len();
        KeyOutcome::Handled
    }
}

impl WidgetEngine for SelectionListEngine {
    type Payload = Vec<usize>;

    fn kind(&self) -> WidgetKind { WidgetKind::SelectionList }

    fn current_payload(&self) -> Option<Vec<usize>> {
        (!self.items.is_empty()).then(|| self.selections.clone())
    }

    fn handle_key(&mut self, key: KeyPress) -> KeyOutcome<Vec<usize>> {
        if key.as_plain_char() == Some(' ') {
            return self.cycle_current();
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
