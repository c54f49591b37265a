// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque, fs, io, path::Path};

use super::{ListOptions, paint_list, widest};
use crate::{DEFAULT_SAVE_LINES, DEVELOPMENT_MODE, DisplaySurface, KeyOutcome, KeyPress,
            NavigationMode, Region, ScrollResult, Size, ViewportState, Widget, WidgetEngine,
            WidgetError, WidgetKind, WidgetResult};

/// A scroll-back window: a bounded history of lines that the user pages through.
/// Confirming returns the line shown at the top.
pub type ScrollWindow = Widget<ScrollWindowEngine>;

/// Which end of the history [`ScrollWindowEngine::add_line`] adds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddPosition {
    Top,
    #[default]
    Bottom,
}

/// Where [`ScrollWindowEngine::jump_to_line`] puts the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpTarget {
    Top,
    Bottom,
    Line(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollWindowEngine {
    lines: VecDeque<String>,
    save_lines: usize,
    viewport: ViewportState,
    scrollbar: bool,
    text_width: usize,
}

impl ScrollWindow {
    /// Keeps at most `save_lines` lines (at least one).
    ///
    /// # Errors
    ///
    /// If `region` doesn't fit on `screen`, or leaves no room for lines.
    pub fn try_new(
        region: Region,
        screen: Size,
        save_lines: usize,
        options: &ListOptions,
    ) -> WidgetResult<Self> {
        let frame = options.try_create_frame(region, screen)?;
        let engine = ScrollWindowEngine::new(save_lines, options, frame.content_region());
        Ok(Widget::new(engine, frame))
    }
}

impl ScrollWindowEngine {
    #[must_use]
    pub fn new(save_lines: usize, options: &ListOptions, content: Region) -> Self {
        Self {
            lines: VecDeque::new(),
            save_lines: save_lines.max(1),
            viewport: ViewportState::new(usize::from(content.size.rows)),
            scrollbar: options.scrollbar,
            text_width: options.text_width(content),
        }
    }

    fn sync(&mut self) {
        self.viewport.resize_list(self.lines.len());
        let content_width = widest(self.lines.iter().cloned());
        self.viewport
            .set_max_left_char(content_width, self.text_width);
    }

    #[must_use]
    pub fn save_lines(&self) -> usize { self.save_lines }

    #[must_use]
    pub fn len(&self) -> usize { self.lines.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    /// Add a line to one end of the history and show that end. When the history is full
    /// a line is dropped from the other end first.
    pub fn add_line(&mut self, text: impl Into<String>, position: AddPosition) {
        let full = self.lines.len() >= self.save_lines;
        match position {
            AddPosition::Bottom => {
                if full {
                    let _ = self.lines.pop_front();
                }
                self.lines.push_back(text.into());
                self.sync();
                let _ = self.viewport.end();
            }
            AddPosition::Top => {
                if full {
                    let _ = self.lines.pop_back();
                }
                self.lines.push_front(text.into());
                self.sync();
                let _ = self.viewport.home();
            }
        }
    }

    /// Drop every line.
    pub fn clean(&mut self) {
        self.lines.clear();
        self.sync();
    }

    /// Remove lines `begin..=end` (clamped to the history). Returns how many went.
    pub fn trim(&mut self, begin: usize, end: usize) -> usize {
        if self.lines.is_empty() || begin >= self.lines.len() {
            return 0;
        }
        let end = end.min(self.lines.len() - 1);
        if begin > end {
            return 0;
        }
        let removed = self.lines.drain(begin..=end).count();
        self.sync();

        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(message = "trim", begin, end, removed, remaining = self.lines.len());
        });

        removed
    }

    /// Put the target line (clamped) at the top of the window.
    pub fn jump_to_line(&mut self, target: JumpTarget) -> ScrollResult {
        match target {
            JumpTarget::Top => self.viewport.set_top(0),
            JumpTarget::Bottom => self.viewport.set_top(self.viewport.max_top_item()),
            JumpTarget::Line(line) => self.viewport.set_top(line),
        }
    }

    #[must_use]
    pub fn get_contents(&self) -> Vec<String> { self.lines.iter().cloned().collect() }

    /// Replace the history. Only the newest `save_lines` lines are kept.
    pub fn set_contents(&mut self, lines: Vec<String>) {
        let skip = lines.len().saturating_sub(self.save_lines);
        self.lines = lines.into_iter().skip(skip).collect();
        self.sync();
        let _ = self.viewport.home();
    }

    #[must_use]
    pub fn current_top(&self) -> usize { self.viewport.current_top() }
}

impl WidgetEngine for ScrollWindowEngine {
    type Payload = usize;

    fn kind(&self) -> WidgetKind { WidgetKind::ScrollWindow }

    fn current_payload(&self) -> Option<usize> {
        (!self.lines.is_empty()).then(|| self.viewport.current_top())
    }

    fn handle_key(&mut self, key: KeyPress) -> KeyOutcome<usize> {
        match self
            .viewport
            .handle_navigation_key(key, NavigationMode::Pager)
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
        _has_focus: bool,
    ) -> io::Result<()> {
        paint_list(
            surface,
            content,
            &self.viewport,
            self.scrollbar,
            None,
            |it| self.lines.get(it).cloned().unwrap_or_default(),
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

impl Default for ScrollWindowEngine {
    fn default() -> Self {
        Self::new(
            DEFAULT_SAVE_LINES,
            &ListOptions::default(),
            Region::new(0, 0, 1, 1),
        )
    }
}

/// Write the window's lines to `path`, one per line. Returns the number of lines.
///
/// # Errors
///
/// [`WidgetError::ContentsIo`] when the file can't be written.
pub fn save_contents_to_file(
    engine: &ScrollWindowEngine,
    path: impl AsRef<Path>,
) -> WidgetResult<usize> {
    let path = path.as_ref();
    let lines = engine.get_contents();
    let mut text = lines.join("\n");
    if !lines.is_empty() {
        text.push('\n');
    }

    fs::write(path, text).map_err(|source| WidgetError::ContentsIo {
        path: path.to_path_buf(),
        source,
    })?;

    DEVELOPMENT_MODE.then(|| {
        tracing::debug!(message = "saved contents", ?path, lines = lines.len());
    });

    Ok(lines.len())
}

/// Replace the window's lines with the lines of `path`. Returns the number of lines
/// read (the window may keep fewer, see [`ScrollWindowEngine::set_contents`]).
///
/// # Errors
///
/// [`WidgetError::ContentsIo`] when the file can't be read.
pub fn load_contents_from_file(
    engine: &mut ScrollWindowEngine,
    path: impl AsRef<Path>,
) -> WidgetResult<usize> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| WidgetError::ContentsIo {
        path: path.to_path_buf(),
        source,
    })?;

    let lines: Vec<String> = text.lines().map(ToString::to_string).collect();
    let count = lines.len();
    engine.set_contents(lines);

    DEVELOPMENT_MODE.then(|| {
        tracing::debug!(message = "loaded contents", ?path, lines = count);
    });

    Ok(count)
}
