// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          io};

use crate::{BEGINNING_OF_LINE_KEY, COPY_KEY, CUT_KEY, ClipboardService, DEFAULT_FILLER_CHAR,
            DEFAULT_HIDDEN_CHAR, DEVELOPMENT_MODE, DisplaySurface, END_OF_LINE_KEY,
            ERASE_KEY, Frame, KeyOutcome, KeyPress, PASTE_KEY, Region, Size, SpecialKey,
            TRANSPOSE_KEY, Widget, WidgetEngine, WidgetKind, WidgetResult};

/// A single line text field. Confirming returns the text, as long as it is at least
/// `min_length` chars long.
pub type Entry = Widget<EntryEngine>;

/// Which characters a field accepts and how they are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayType {
    /// Any printable character.
    #[default]
    Mixed,
    /// Alphabetic characters only.
    Char,
    /// ASCII digits only.
    Digit,
    /// Any printable character, shown as the hidden char.
    Hidden,
    /// Cursor movement and copy only. The value can still be set programmatically.
    ViewOnly,
}

impl DisplayType {
    /// May `ch` be typed into a field of this type?
    #[must_use]
    pub fn accepts(self, ch: char) -> bool {
        match self {
            DisplayType::Mixed | DisplayType::Hidden => !ch.is_control(),
            DisplayType::Char => ch.is_alphabetic(),
            DisplayType::Digit => ch.is_ascii_digit(),
            DisplayType::ViewOnly => false,
        }
    }

    fn is_editable(self) -> bool { self != DisplayType::ViewOnly }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOptions {
    pub title: Option<String>,
    pub boxed: bool,
    pub display_type: DisplayType,
    pub max_length: usize,
    pub min_length: usize,
    /// Shown in the unused part of the field.
    pub filler: char,
    /// Shown instead of each character of a [`DisplayType::Hidden`] field.
    pub hidden_char: char,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            title: None,
            boxed: false,
            display_type: DisplayType::default(),
            max_length: 256,
            min_length: 0,
            filler: DEFAULT_FILLER_CHAR,
            hidden_char: DEFAULT_HIDDEN_CHAR,
        }
    }
}

impl EntryOptions {
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
    pub fn display_type(mut self, display_type: DisplayType) -> Self {
        self.display_type = display_type;
        self
    }

    /// `min_length` is capped at `max_length`.
    #[must_use]
    pub fn length(mut self, min_length: usize, max_length: usize) -> Self {
        self.max_length = max_length;
        self.min_length = min_length.min(max_length);
        self
    }

    #[must_use]
    pub fn filler(mut self, filler: char) -> Self {
        self.filler = filler;
        self
    }
}

pub struct EntryEngine {
    text: Vec<char>,
    /// Index into `text` the next character is inserted at, `0..=text.len()`.
    cursor: usize,
    /// First character shown in the field.
    left_char: usize,
    field_width: usize,
    options: EntryOptions,
    clipboard: Box<dyn ClipboardService>,
}

impl Debug for EntryEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryEngine")
            .field("text", &self.value())
            .field("cursor", &self.cursor)
            .field("left_char", &self.left_char)
            .field("field_width", &self.field_width)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Entry {
    /// Cut, copy and paste go through `clipboard`. Pass clones of one
    /// [`crate::SharedClipboard`] to fields that should share a paste buffer.
    ///
    /// # Errors
    ///
    /// If `region` doesn't fit on `screen`, or leaves no room for the field.
    pub fn try_new(
        region: Region,
        screen: Size,
        options: EntryOptions,
        clipboard: impl ClipboardService + 'static,
    ) -> WidgetResult<Self> {
        let frame = Frame::try_new(region, screen, options.boxed, options.title.as_deref())?;
        let engine = EntryEngine::new(options, frame.content_region(), Box::new(clipboard));
        Ok(Widget::new(engine, frame))
    }
}

/// Editing operations, decoded from keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditOp {
    Insert(char),
    Left,
    Right,
    Home,
    End,
    Backspace,
    Delete,
    Erase,
    Transpose,
    Cut,
    Copy,
    Paste,
}

impl EditOp {
    fn from_key(key: KeyPress) -> Option<Self> {
        if let Some(ch) = key.as_plain_char() {
            return Some(EditOp::Insert(ch));
        }
        let special = [
            (SpecialKey::Left, EditOp::Left),
            (SpecialKey::Right, EditOp::Right),
            (SpecialKey::Home, EditOp::Home),
            (SpecialKey::End, EditOp::End),
            (SpecialKey::Backspace, EditOp::Backspace),
            (SpecialKey::Delete, EditOp::Delete),
        ];
        if let Some((_, op)) = special.iter().find(|(it, _)| key.is_special(*it)) {
            return Some(*op);
        }
        [
            (BEGINNING_OF_LINE_KEY, EditOp::Home),
            (END_OF_LINE_KEY, EditOp::End),
            (ERASE_KEY, EditOp::Erase),
            (TRANSPOSE_KEY, EditOp::Transpose),
            (CUT_KEY, EditOp::Cut),
            (COPY_KEY, EditOp::Copy),
            (PASTE_KEY, EditOp::Paste),
        ]
        .into_iter()
        .find(|(it, _)| *it == key)
        .map(|(_, op)| op)
    }

    fn is_edit(self) -> bool {
        matches!(
            self,
            EditOp::Insert(_)
                | EditOp::Backspace
                | EditOp::Delete
                | EditOp::Erase
                | EditOp::Transpose
                | EditOp::Cut
                | EditOp::Paste
        )
    }
}

impl EntryEngine {
    #[must_use]
    pub fn new(
        options: EntryOptions,
        content: Region,
        clipboard: Box<dyn ClipboardService>,
    ) -> Self {
        Self {
            text: vec![],
            cursor: 0,
            left_char: 0,
            field_width: usize::from(content.size.cols).max(1),
            options,
            clipboard,
        }
    }

    #[must_use]
    pub fn value(&self) -> String { self.text.iter().collect() }

    /// Replace the text, dropping characters the field doesn't allow and anything past
    /// `max_length`. The cursor goes to the end.
    pub fn set_value(&mut self, value: &str) {
        let display_type = self.options.display_type;
        self.text = value
            .chars()
            .filter(|it| match display_type {
                DisplayType::ViewOnly => !it.is_control(),
                _ => display_type.accepts(*it),
            })
            .take(self.options.max_length)
            .collect();
        self.cursor = self.text.len();
        self.left_char = 0;
        self.scroll_to_cursor();
    }

    pub fn clean(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.left_char = 0;
    }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn left_char(&self) -> usize { self.left_char }

    #[must_use]
    pub fn options(&self) -> &EntryOptions { &self.options }

    /// Keep the cursor cell inside the field.
    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.left_char {
            self.left_char = self.cursor;
        } else if self.cursor >= self.left_char + self.field_width {
            self.left_char = self.cursor + 1 - self.field_width;
        }
    }

    fn apply(&mut self, op: EditOp) -> KeyOutcome<String> {
        if op.is_edit() && !self.options.display_type.is_editable() {
            return KeyOutcome::Beep;
        }

        let done = match op {
            EditOp::Insert(ch) => {
                let fits = self.text.len() < self.options.max_length;
                if fits && self.options.display_type.accepts(ch) {
                    self.text.insert(self.cursor, ch);
                    self.cursor += 1;
                    true
                } else {
                    false
                }
            }
            EditOp::Left => {
                let moved = self.cursor > 0;
                self.cursor = self.cursor.saturating_sub(1);
                moved
            }
            EditOp::Right => {
                let moved = self.cursor < self.text.len();
                self.cursor = (self.cursor + 1).min(self.text.len());
                moved
            }
            EditOp::Home => {
                self.cursor = 0;
                true
            }
            EditOp::End => {
                self.cursor = self.text.len();
                true
            }
            EditOp::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let _ = self.text.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            EditOp::Delete => {
                if self.cursor < self.text.len() {
                    let _ = self.text.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            EditOp::Erase => {
                let had_text = !self.text.is_empty();
                self.clean();
                had_text
            }
            EditOp::Transpose => self.transpose(),
            EditOp::Cut => {
                let copied = self.copy_to_clipboard();
                if copied {
                    self.clean();
                }
                copied
            }
            EditOp::Copy => self.copy_to_clipboard(),
            EditOp::Paste => self.paste_from_clipboard(),
        };

        self.scroll_to_cursor();
        if done {
            KeyOutcome::Handled
        } else {
            KeyOutcome::Beep
        }
    }

    /// Swap the characters on either side of the cursor and step past them. At the end
    /// of the text the last two characters are swapped.
    fn transpose(&mut self) -> bool {
        if self.text.len() < 2 || self.cursor == 0 {
            return false;
        }
        let right = self.cursor.min(self.text.len() - 1);
        self.text.swap(right - 1, right);
        self.cursor = right + 1;
        true
    }

    fn copy_to_clipboard(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        match self
            .clipboard
            .try_to_put_content_into_clipboard(self.value())
        {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(message = "clipboard copy failed", %error);
                false
            }
        }
    }

    fn paste_from_clipboard(&mut self) -> bool {
        match self.clipboard.try_to_get_content_from_clipboard() {
            Ok(content) => {
                self.set_value(&content);
                true
            }
            Err(error) => {
                DEVELOPMENT_MODE.then(|| {
                    tracing::debug!(message = "nothing to paste", %error);
                });
                false
            }
        }
    }

    /// What the field shows, `field_width` chars long.
    fn field_text(&self) -> String {
        let shown = self
            .text
            .iter()
            .skip(self.left_char)
            .take(self.field_width)
            .map(|it| match self.options.display_type {
                DisplayType::Hidden => self.options.hidden_char,
                _ => *it,
            });
        let fill = std::iter::repeat(self.options.filler);
        shown.chain(fill).take(self.field_width).collect()
    }
}

impl WidgetEngine for EntryEngine {
    type Payload = String;

    fn kind(&self) -> WidgetKind { WidgetKind::Entry }

    fn current_payload(&self) -> Option<String> {
        (self.text.len() >= self.options.min_length).then(|| self.value())
    }

    fn handle_key(&mut self, key: KeyPress) -> KeyOutcome<String> {
        match EditOp::from_key(key) {
            Some(op) => self.apply(op),
            None => KeyOutcome::NotHandled,
        }
    }

    fn render(
        &self,
        surface: &mut dyn DisplaySurface,
        content: Region,
        has_focus: bool,
    ) -> io::Result<()> {
        let field = self.field_text();
        surface.paint_row(content, 0, &field, false)?;

        if has_focus {
            let offset = self.cursor - self.left_char;
            let cursor_cell = Region::new(
                content.origin.row,
                content
                    .origin
                    .col
                    .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX)),
                1,
                1,
            );
            let ch = field.chars().nth(offset).unwrap_or(self.options.filler);
            surface.paint_row(cursor_cell, 0, &ch.to_string(), true)?;
        }
        Ok(())
    }

    fn resize(&mut self, content: Region) {
        self.field_width = usize::from(content.size.cols).max(1);
        self.left_char = 0;
        self.scroll_to_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Activatable as _, ExitType, InMemoryClipboard, InputEvent, TestSurface,
                assert_eq2, keypress, new_shared_clipboard};

    fn engine(options: EntryOptions, width: u16) -> EntryEngine {
        EntryEngine::new(
            options,
            Region::new(0, 0, 1, width),
            Box::new(InMemoryClipboard::default()),
        )
    }

    fn type_text(engine: &mut EntryEngine, text: &str) {
        for ch in text.chars() {
            assert_eq2!(engine.handle_key(keypress!(@char ch)), KeyOutcome::Handled);
        }
    }

    fn key(it: KeyPress) -> InputEvent { InputEvent::Keyboard(it) }

    #[test]
    fn test_cursor_editing() {
        let mut it = engine(EntryOptions::default(), 10);
        type_text(&mut it, "hello");
        assert_eq2!(it.cursor(), 5);

        let _ = it.handle_key(keypress!(@special SpecialKey::Left));
        let _ = it.handle_key(keypress!(@special SpecialKey::Left));
        let _ = it.handle_key(keypress!(@special SpecialKey::Backspace));
        assert_eq2!(it.value(), "helo");
        let _ = it.handle_key(keypress!(@special SpecialKey::Delete));
        assert_eq2!(it.value(), "heo");

        let _ = it.handle_key(BEGINNING_OF_LINE_KEY);
        type_text(&mut it, "X");
        assert_eq2!(it.value(), "Xheo");

        let _ = it.handle_key(END_OF_LINE_KEY);
        assert_eq2!(it.handle_key(TRANSPOSE_KEY), KeyOutcome::Handled);
        assert_eq2!(it.value(), "Xhoe");

        assert_eq2!(it.handle_key(ERASE_KEY), KeyOutcome::Handled);
        assert_eq2!(it.value(), "");
        assert_eq2!(it.handle_key(ERASE_KEY), KeyOutcome::Beep);
    }

    #[test]
    fn test_boundaries_beep() {
        let mut it = engine(EntryOptions::default(), 10);
        assert_eq2!(it.handle_key(keypress!(@special SpecialKey::Left)), KeyOutcome::Beep);
        assert_eq2!(
            it.handle_key(keypress!(@special SpecialKey::Backspace)),
            KeyOutcome::Beep
        );
        assert_eq2!(it.handle_key(keypress!(@special SpecialKey::Delete)), KeyOutcome::Beep);
        assert_eq2!(it.handle_key(TRANSPOSE_KEY), KeyOutcome::Beep);
        assert_eq2!(
            it.handle_key(keypress!(@special SpecialKey::Up)),
            KeyOutcome::NotHandled
        );
    }

    #[test]
    fn test_display_type_and_max_length() {
        let options = EntryOptions::default()
            .display_type(DisplayType::Digit)
            .length(0, 3);
        let mut it = engine(options, 10);
        assert_eq2!(it.handle_key(keypress!(@char 'a')), KeyOutcome::Beep);
        type_text(&mut it, "123");
        assert_eq2!(it.handle_key(keypress!(@char '4')), KeyOutcome::Beep);
        assert_eq2!(it.value(), "123");

        it.set_value("9a8b7c6");
        assert_eq2!(it.value(), "987");

        let mut it = engine(EntryOptions::default().display_type(DisplayType::ViewOnly), 10);
        it.set_value("fixed");
        assert_eq2!(it.handle_key(keypress!(@char 'x')), KeyOutcome::Beep);
        assert_eq2!(it.handle_key(keypress!(@special SpecialKey::Home)), KeyOutcome::Handled);
        assert_eq2!(it.value(), "fixed");
    }

    #[test]
    fn test_min_length_blocks_confirm() {
        let mut surface = TestSurface::new(Size::new(1, 10));
        let mut widget = Entry::try_new(
            Region::new(0, 0, 1, 10),
            surface.size(),
            EntryOptions::default().length(2, 10),
            InMemoryClipboard::default(),
        )
        .unwrap();
        let enter = key(keypress!(@special SpecialKey::Enter));

        let _ = widget.inject(key(keypress!(@char 'a')), &mut surface);
        assert_eq2!(widget.inject(enter, &mut surface), ExitType::Unset);
        assert_eq2!(surface.beep_count, 1);

        let _ = widget.inject(key(keypress!(@char 'b')), &mut surface);
        assert_eq2!(
            widget.inject(enter, &mut surface),
            ExitType::Normal("ab".to_string())
        );
    }

    #[test]
    fn test_render_hidden_with_filler_and_cursor() {
        let mut surface = TestSurface::new(Size::new(1, 6));
        let mut widget = Entry::try_new(
            Region::new(0, 0, 1, 6),
            surface.size(),
            EntryOptions::default().display_type(DisplayType::Hidden),
            InMemoryClipboard::default(),
        )
        .unwrap();
        widget.engine_mut().set_value("pw");
        widget.draw(&mut surface, false).unwrap();

        assert_eq2!(surface.row_text(0), "**....");
        assert_eq2!(surface.highlighted_text(0), ".");
        let _ = widget.inject(key(keypress!(@special SpecialKey::Home)), &mut surface);
        assert_eq2!(surface.highlighted_text(0), "*");
    }

    #[test]
    fn test_text_scrolls_inside_field() {
        let mut surface = TestSurface::new(Size::new(1, 5));
        let mut widget = Entry::try_new(
            Region::new(0, 0, 1, 5),
            surface.size(),
            EntryOptions::default(),
            InMemoryClipboard::default(),
        )
        .unwrap();
        widget.draw(&mut surface, false).unwrap();
        for ch in "abcdefg".chars() {
            let _ = widget.inject(key(keypress!(@char ch)), &mut surface);
        }
        assert_eq2!(widget.engine().left_char(), 3);
        assert_eq2!(surface.row_text(0), "defg.");

        let _ = widget.inject(key(keypress!(@special SpecialKey::Home)), &mut surface);
        assert_eq2!(surface.row_text(0), "abcde");
        assert_eq2!(surface.highlighted_text(0), "a");
    }

    #[test]
    fn test_shared_clipboard_between_fields() {
        let clipboard = new_shared_clipboard();
        let screen = Size::new(2, 10);
        let mut surface = TestSurface::new(screen);
        let mut first = Entry::try_new(
            Region::new(0, 0, 1, 10),
            screen,
            EntryOptions::default(),
            clipboard.clone(),
        )
        .unwrap();
        let mut second = Entry::try_new(
            Region::new(1, 0, 1, 10),
            screen,
            EntryOptions::default(),
            clipboard.clone(),
        )
        .unwrap();

        assert_eq2!(
            second.engine_mut().handle_key(PASTE_KEY),
            KeyOutcome::Beep
        );

        first.engine_mut().set_value("abc");
        let _ = first.inject(key(COPY_KEY), &mut surface);
        let _ = second.inject(key(PASTE_KEY), &mut surface);
        assert_eq2!(second.engine().value(), "abc");

        second.engine_mut().set_value("xyz");
        let _ = second.inject(key(CUT_KEY), &mut surface);
        assert_eq2!(second.engine().value(), "");
        assert_eq2!(clipboard.borrow().content.as_deref(), Some("xyz"));
    }
}
