// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Viewport engine
//!
//! [`ViewportState`] tracks how a list of `list_size` items maps onto a window of
//! `view_size` visible rows, and where the single "current" item sits inside that
//! window. Every list like widget owns exactly one of these.
//!
//! ```text
//!                    +0--------------------+
//!                    0                     |
//!                    |        above        |
//!                    |                     |
//!                    +--- current_top -----+ <- AtTopOfViewport
//!              ->    |         ↑           |      ↑
//!   current    |     |                     |      |
//!   _high      |     |      within vp      |  view_size
//!              |     |                     |      |
//!              ->    |         ↓           |      ↓
//!                    +--- current_top -----+ <- AtBottomOfViewport
//!                    |    + view_size      |
//!                    |                     |
//!                    |        below        |
//!                    |                     |
//!                    +---------------------+
//! ```
//!
//! After every operation (except [`ViewportState::set_view_size`] on its own, which
//! must be followed by [`ViewportState::set_position`]) the following hold:
//! - `current_top + current_high == current_item`
//! - `current_top <= current_item < current_top + view_size`
//! - `current_top <= max_top_item`
//! - when `list_size == 0` every position field is `0`.
//!
//! Navigation at a boundary is not an error. It leaves the state untouched and returns
//! [`ScrollResult::Beep`].

use std::ops::Range;

use crate::{DEVELOPMENT_MODE, Key, KeyPress, PAGE_BACK_KEY, PAGE_FORWARD_KEY, SpecialKey};

/// Outcome of a viewport operation.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollResult {
    Moved,
    /// Signaled no-op. Nothing changed.
    Beep,
}

impl ScrollResult {
    pub fn is_moved(self) -> bool { self == ScrollResult::Moved }
}

/// How Up and Down behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavigationMode {
    /// Up and Down move the highlighted item, scrolling only at the viewport's edges.
    #[default]
    Cursor,
    /// Up and Down scroll the whole window by one line (viewer, scroll-back window).
    Pager,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum CaretVerticalViewportLocation {
    AtAbsoluteTop,
    AtTopOfViewport,
    InMiddleOfViewport,
    AtBottomOfViewport,
    AtAbsoluteBottom,
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    list_size: usize,
    max_rows: usize,
    view_size: usize,
    current_top: usize,
    max_top_item: usize,
    current_item: usize,
    current_high: usize,
    left_char: usize,
    max_left_char: usize,
    step: f64,
    toggle_size: usize,
}

impl Default for ViewportState {
    fn default() -> Self { Self::new(1) }
}

impl ViewportState {
    /// An empty list shown in a window of at most `max_rows` rows. `max_rows` comes from
    /// the widget's geometry and is never less than `1`.
    #[must_use]
    pub fn new(max_rows: usize) -> Self {
        Self {
            list_size: 0,
            max_rows: max_rows.max(1),
            view_size: 0,
            current_top: 0,
            max_top_item: 0,
            current_item: 0,
            current_high: 0,
            left_char: 0,
            max_left_char: 0,
            step: 1.0,
            toggle_size: 1,
        }
    }

    #[must_use]
    pub fn list_size(&self) -> usize { self.list_size }

    #[must_use]
    pub fn max_rows(&self) -> usize { self.max_rows }

    #[must_use]
    pub fn view_size(&self) -> usize { self.view_size }

    #[must_use]
    pub fn current_top(&self) -> usize { self.current_top }

    #[must_use]
    pub fn max_top_item(&self) -> usize { self.max_top_item }

    #[must_use]
    pub fn current_item(&self) -> usize { self.current_item }

    #[must_use]
    pub fn current_high(&self) -> usize { self.current_high }

    #[must_use]
    pub fn left_char(&self) -> usize { self.left_char }

    #[must_use]
    pub fn max_left_char(&self) -> usize { self.max_left_char }

    #[must_use]
    pub fn step(&self) -> f64 { self.step }

    #[must_use]
    pub fn toggle_size(&self) -> usize { self.toggle_size }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.list_size == 0 }

    /// Recompute the derived sizes for a list of `list_size` items. The position fields
    /// are left alone, so follow this with [`Self::set_position`] (or use
    /// [`Self::resize_list`]).
    pub fn set_view_size(&mut self, list_size: usize) {
        self.list_size = list_size;
        self.view_size = list_size.min(self.max_rows);
        self.max_top_item = list_size - self.view_size;

        #[allow(clippy::cast_precision_loss)]
        {
            self.step = if list_size == 0 {
                1.0
            } else {
                self.view_size as f64 / list_size as f64
            };
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.toggle_size = if list_size > self.view_size {
                (self.step.ceil() as usize).max(1)
            } else {
                1
            };
        }
    }

    /// [`Self::set_view_size`] followed by re-clamping the current item. Use this after
    /// items are added or removed.
    pub fn resize_list(&mut self, list_size: usize) {
        self.set_view_size(list_size);
        self.set_position(self.current_item);
    }

    /// The geometry changed (eg: terminal resize). The current item is kept if possible.
    pub fn set_max_rows(&mut self, max_rows: usize) {
        self.max_rows = max_rows.max(1);
        self.resize_list(self.list_size);
    }

    /// Select `item` (clamped into the list) and scroll as little as the following
    /// rules allow, checked in order:
    /// 1. first item: jump to the top.
    /// 2. last item: jump to the bottom, item on the last visible row.
    /// 3. item already visible: keep the window, move the highlight.
    /// 4. otherwise: scroll so the item is on the last visible row.
    pub fn set_position(&mut self, item: usize) {
        if self.list_size == 0 {
            self.current_top = 0;
            self.current_item = 0;
            self.current_high = 0;
            return;
        }

        let last_item = self.list_size - 1;
        let item = item.min(last_item);
        self.current_top = self.current_top.min(self.max_top_item);

        if item == 0 {
            self.current_top = 0;
            self.current_item = 0;
            self.current_high = 0;
        } else if item >= last_item {
            self.current_top = self.max_top_item;
            self.current_item = last_item;
            self.current_high = self.view_size - 1;
        } else if (self.current_top..self.current_top + self.view_size).contains(&item) {
            self.current_item = item;
            self.current_high = item - self.current_top;
        } else {
            self.current_top = item.saturating_sub(self.view_size - 1);
            self.current_item = item;
            self.current_high = item - self.current_top;
        }
    }

    pub fn move_up(&mut self) -> ScrollResult {
        if self.list_size == 0 || self.current_item == 0 {
            return self.beep("move_up");
        }

        if self.current_high == 0 {
            self.current_top -= 1;
        } else {
            self.current_high -= 1;
        }
        self.current_item -= 1;

        ScrollResult::Moved
    }

    pub fn move_down(&mut self) -> ScrollResult {
        if self.list_size == 0 || self.current_item >= self.list_size - 1 {
            return self.beep("move_down");
        }

        if self.current_high + 1 >= self.view_size {
            self.current_top += 1;
        } else {
            self.current_high += 1;
        }
        self.current_item += 1;

        ScrollResult::Moved
    }

    /// Rows moved by a page: one less than the viewport, so the previous page's edge
    /// row stays visible.
    fn page_step(&self) -> usize { self.view_size.saturating_sub(1).max(1) }

    pub fn page_up(&mut self) -> ScrollResult {
        if self.list_size == 0 || self.current_top == 0 {
            return self.beep("page_up");
        }

        let step = self.page_step();
        if self.current_top >= step {
            self.current_top -= step;
            self.current_item -= step;
            ScrollResult::Moved
        } else {
            self.home()
        }
    }

    pub fn page_down(&mut self) -> ScrollResult {
        if self.list_size == 0 || self.current_top >= self.max_top_item {
            return self.beep("page_down");
        }

        let step = self.page_step();
        if self.current_top + step <= self.max_top_item {
            self.current_top += step;
            self.current_item += step;
            ScrollResult::Moved
        } else {
            self.end()
        }
    }

    pub fn home(&mut self) -> ScrollResult {
        if self.list_size == 0 {
            return self.beep("home");
        }
        self.set_position(0);
        ScrollResult::Moved
    }

    pub fn end(&mut self) -> ScrollResult {
        if self.list_size == 0 {
            return self.beep("end");
        }
        self.set_position(self.list_size - 1);
        ScrollResult::Moved
    }

    /// Pager style: shift the whole window up one line, the highlight keeps its row.
    pub fn scroll_line_up(&mut self) -> ScrollResult {
        if self.list_size == 0 || self.current_top == 0 {
            return self.beep("scroll_line_up");
        }
        self.current_top -= 1;
        self.current_item -= 1;
        ScrollResult::Moved
    }

    /// Pager style: shift the whole window down one line, the highlight keeps its row.
    pub fn scroll_line_down(&mut self) -> ScrollResult {
        if self.list_size == 0 || self.current_top >= self.max_top_item {
            return self.beep("scroll_line_down");
        }
        self.current_top += 1;
        self.current_item += 1;
        ScrollResult::Moved
    }

    /// Pager style: put `top` (clamped) on the first row, the highlight keeps its row.
    pub fn set_top(&mut self, top: usize) -> ScrollResult {
        if self.list_size == 0 {
            return self.beep("set_top");
        }
        self.current_top = top.min(self.max_top_item);
        self.current_high = self.current_high.min(self.view_size - 1);
        self.current_item = self.current_top + self.current_high;
        ScrollResult::Moved
    }

    /// Set the horizontal scroll bound from the widest line and the visible width.
    pub fn set_max_left_char(&mut self, content_width: usize, view_width: usize) {
        self.max_left_char = content_width.saturating_sub(view_width);
        self.left_char = self.left_char.min(self.max_left_char);
    }

    pub fn scroll_left(&mut self) -> ScrollResult {
        if self.list_size == 0 || self.left_char == 0 {
            return self.beep("scroll_left");
        }
        self.left_char -= 1;
        ScrollResult::Moved
    }

    pub fn scroll_right(&mut self) -> ScrollResult {
        if self.list_size == 0 || self.left_char >= self.max_left_char {
            return self.beep("scroll_right");
        }
        self.left_char += 1;
        ScrollResult::Moved
    }

    pub fn scroll_to_left_edge(&mut self) -> ScrollResult {
        if self.list_size == 0 {
            return self.beep("scroll_to_left_edge");
        }
        self.left_char = 0;
        ScrollResult::Moved
    }

    pub fn scroll_to_right_edge(&mut self) -> ScrollResult {
        if self.list_size == 0 {
            return self.beep("scroll_to_right_edge");
        }
        self.left_char = self.max_left_char;
        ScrollResult::Moved
    }

    /// Row (relative to the viewport) of the scrollbar's moving indicator.
    #[must_use]
    pub fn scrollbar_thumb_row(&self) -> usize {
        if self.view_size == 0 {
            return 0;
        }
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let row = (self.current_item as f64 * self.step).floor() as usize;
        row.min(self.view_size - 1)
    }

    /// Item indices currently on screen.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        self.current_top..self.current_top + self.view_size
    }

    /// Viewport row on which `item` is shown, if it is visible.
    #[must_use]
    pub fn row_of(&self, item: usize) -> Option<usize> {
        self.visible_range()
            .contains(&item)
            .then(|| item - self.current_top)
    }

    #[must_use]
    pub fn locate_cursor_in_viewport(&self) -> CaretVerticalViewportLocation {
        let it = if self.list_size == 0 {
            CaretVerticalViewportLocation::NotFound
        }
        // AtAbsoluteBottom takes precedence over AtAbsoluteTop when there is only one item.
        else if self.current_item == self.list_size - 1 {
            CaretVerticalViewportLocation::AtAbsoluteBottom
        } else if self.current_item == 0 {
            CaretVerticalViewportLocation::AtAbsoluteTop
        } else if self.current_high == 0 {
            CaretVerticalViewportLocation::AtTopOfViewport
        } else if self.current_high + 1 == self.view_size {
            CaretVerticalViewportLocation::AtBottomOfViewport
        } else {
            CaretVerticalViewportLocation::InMiddleOfViewport
        };

        DEVELOPMENT_MODE.then(|| {
            tracing::trace!(
                message = "locate_cursor_in_viewport",
                current_item = self.current_item,
                current_top = self.current_top,
                view_size = self.view_size,
                location = ?it
            );
        });

        it
    }

    /// Map the navigation keys every list shares onto the engine. Returns `None` for
    /// keys that are not navigation, so the caller can handle them.
    pub fn handle_navigation_key(
        &mut self,
        key: KeyPress,
        mode: NavigationMode,
    ) -> Option<ScrollResult> {
        if key == PAGE_BACK_KEY {
            return Some(self.page_up());
        }
        if key == PAGE_FORWARD_KEY {
            return Some(self.page_down());
        }

        let KeyPress::Plain { key } = key else {
            return None;
        };

        let it = match key {
            Key::SpecialKey(SpecialKey::Up) => match mode {
                NavigationMode::Cursor => self.move_up(),
                NavigationMode::Pager => self.scroll_line_up(),
            },
            Key::SpecialKey(SpecialKey::Down) => match mode {
                NavigationMode::Cursor => self.move_down(),
                NavigationMode::Pager => self.scroll_line_down(),
            },
            Key::SpecialKey(SpecialKey::PageUp) => self.page_up(),
            Key::SpecialKey(SpecialKey::PageDown) => self.page_down(),
            Key::SpecialKey(SpecialKey::Home) | Key::Character('g' | '1' | '<') => {
                self.home()
            }
            Key::SpecialKey(SpecialKey::End) | Key::Character('G' | '>') => self.end(),
            Key::SpecialKey(SpecialKey::Left) => self.scroll_left(),
            Key::SpecialKey(SpecialKey::Right) => self.scroll_right(),
            Key::Character('|') => self.scroll_to_left_edge(),
            Key::Character('$') => self.scroll_to_right_edge(),
            _ => return None,
        };

        Some(it)
    }

    fn beep(&self, operation: &'static str) -> ScrollResult {
        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(
                message = "viewport boundary",
                operation,
                list_size = self.list_size,
                current_item = self.current_item,
                current_top = self.current_top
            );
        });
        ScrollResult::Beep
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{assert_eq2, keypress};

    /// `(top, item, high)`.
    fn pos(it: &ViewportState) -> (usize, usize, usize) {
        (it.current_top(), it.current_item(), it.current_high())
    }

    fn assert_invariants(it: &ViewportState) {
        if it.list_size() == 0 {
            assert_eq2!(pos(it), (0, 0, 0));
            return;
        }
        assert_eq2!(it.current_top() + it.current_high(), it.current_item());
        assert!(it.current_top() <= it.current_item());
        assert!(it.current_item() < it.current_top() + it.view_size());
        assert!(it.current_item() < it.list_size());
        assert!(it.current_top() <= it.max_top_item());
    }

    fn viewport(list_size: usize, max_rows: usize) -> ViewportState {
        let mut it = ViewportState::new(max_rows);
        it.set_view_size(list_size);
        it.set_position(0);
        it
    }

    #[test]
    fn test_scenario_seven_moves_down_scrolls_window() {
        let mut it = viewport(20, 5);
        assert_eq2!(pos(&it), (0, 0, 0));

        for _ in 0..7 {
            assert_eq2!(it.move_down(), ScrollResult::Moved);
            assert_invariants(&it);
        }
        assert_eq2!(pos(&it), (3, 7, 4));
    }

    #[test]
    fn test_scenario_content_shorter_than_viewport() {
        let mut it = viewport(3, 8);
        assert_eq2!(it.view_size(), 3);
        assert_eq2!(it.max_top_item(), 0);

        assert_eq2!(it.move_down(), ScrollResult::Moved);
        assert_eq2!(it.move_down(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (0, 2, 2));

        let before = it.clone();
        assert_eq2!(it.move_down(), ScrollResult::Beep);
        assert_eq2!(it, before);
        assert_eq2!(it.current_top(), 0);
    }

    #[test]
    fn test_scenario_empty_list_beeps_everywhere() {
        let mut it = viewport(0, 5);
        let before = it.clone();

        let results = [
            it.move_up(),
            it.move_down(),
            it.page_up(),
            it.page_down(),
            it.home(),
            it.end(),
            it.scroll_left(),
            it.scroll_right(),
            it.scroll_line_up(),
            it.scroll_line_down(),
            it.scroll_to_left_edge(),
            it.scroll_to_right_edge(),
        ];

        assert!(results.iter().all(|it| *it == ScrollResult::Beep));
        assert_eq2!(it, before);
        assert_invariants(&it);
        assert_eq2!(it.scrollbar_thumb_row(), 0);
    }

    #[test]
    fn test_move_up_at_top_beeps_without_change() {
        let mut it = viewport(10, 4);
        let before = it.clone();
        assert_eq2!(it.move_up(), ScrollResult::Beep);
        assert_eq2!(it, before);
    }

    #[test]
    fn test_move_down_to_bottom_reaches_max_top() {
        let mut it = viewport(17, 6);
        while it.move_down().is_moved() {
            assert_invariants(&it);
        }
        assert_eq2!(it.current_item(), 16);
        assert_eq2!(it.current_top(), it.max_top_item());

        let before = it.clone();
        assert_eq2!(it.move_down(), ScrollResult::Beep);
        assert_eq2!(it, before);
    }

    #[test]
    fn test_move_up_scrolls_at_top_of_viewport() {
        let mut it = viewport(20, 5);
        it.set_position(10);
        assert_eq2!(pos(&it), (6, 10, 4));

        for _ in 0..4 {
            assert_eq2!(it.move_up(), ScrollResult::Moved);
        }
        assert_eq2!(pos(&it), (6, 6, 0));

        assert_eq2!(it.move_up(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (5, 5, 0));
        assert_invariants(&it);
    }

    #[test_case(0, (0, 0, 0) ; "first item jumps to top")]
    #[test_case(19, (15, 19, 4) ; "last item jumps to bottom")]
    #[test_case(50, (15, 19, 4) ; "past the end is clamped")]
    #[test_case(3, (0, 3, 3) ; "visible item keeps window")]
    #[test_case(12, (8, 12, 4) ; "hidden item becomes last visible row")]
    fn test_set_position_policy(item: usize, expected: (usize, usize, usize)) {
        let mut it = viewport(20, 5);
        it.set_position(item);
        assert_eq2!(pos(&it), expected);
        assert_invariants(&it);
    }

    #[test]
    fn test_set_position_above_window_keeps_invariants() {
        let mut it = viewport(20, 5);
        it.set_position(15);
        assert_eq2!(pos(&it), (11, 15, 4));

        it.set_position(2);
        assert_eq2!(pos(&it), (0, 2, 2));
        assert_invariants(&it);
    }

    #[test]
    fn test_set_position_is_idempotent() {
        let mut it = viewport(30, 7);
        for item in [0, 5, 13, 22, 29] {
            it.set_position(item);
            let first = it.clone();
            it.set_position(it.current_item());
            assert_eq2!(it, first);
        }
    }

    #[test]
    fn test_set_view_size_then_set_position_round_trip() {
        for list_size in 1..25 {
            for item in 0..list_size {
                let mut it = ViewportState::new(6);
                it.set_view_size(list_size);
                it.set_position(item);
                assert_eq2!(it.current_item(), item);
                assert_invariants(&it);
            }
        }
    }

    #[test]
    fn test_page_down_and_up() {
        let mut it = viewport(20, 5);

        assert_eq2!(it.page_down(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (4, 4, 0));
        assert_eq2!(it.page_down(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (8, 8, 0));
        assert_eq2!(it.page_down(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (12, 12, 0));

        // Not enough left for a whole page: snap to the end.
        assert_eq2!(it.page_down(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (15, 19, 4));
        assert_eq2!(it.page_down(), ScrollResult::Beep);

        assert_eq2!(it.page_up(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (11, 15, 4));
        assert_eq2!(it.page_up(), ScrollResult::Moved);
        assert_eq2!(it.page_up(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (3, 7, 4));

        // Not enough left for a whole page: snap to the top.
        assert_eq2!(it.page_up(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (0, 0, 0));
        assert_eq2!(it.page_up(), ScrollResult::Beep);
    }

    #[test]
    fn test_page_keys_beep_when_everything_fits() {
        let mut it = viewport(3, 8);
        assert_eq2!(it.page_down(), ScrollResult::Beep);
        assert_eq2!(it.page_up(), ScrollResult::Beep);
    }

    #[test]
    fn test_single_row_viewport_pages_by_one() {
        let mut it = viewport(5, 1);
        assert_eq2!(it.page_down(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (1, 1, 0));
        assert_invariants(&it);
    }

    #[test]
    fn test_home_and_end() {
        let mut it = viewport(20, 5);
        assert_eq2!(it.end(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (15, 19, 4));
        assert_eq2!(it.home(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (0, 0, 0));
    }

    #[test]
    fn test_pager_scrolls_whole_window() {
        let mut it = viewport(10, 4);
        assert_eq2!(it.scroll_line_up(), ScrollResult::Beep);

        for _ in 0..6 {
            assert_eq2!(it.scroll_line_down(), ScrollResult::Moved);
            assert_invariants(&it);
        }
        assert_eq2!(pos(&it), (6, 6, 0));
        assert_eq2!(it.scroll_line_down(), ScrollResult::Beep);

        assert_eq2!(it.scroll_line_up(), ScrollResult::Moved);
        assert_eq2!(pos(&it), (5, 5, 0));
    }

    #[test]
    fn test_set_top_clamps() {
        let mut it = viewport(10, 4);
        assert_eq2!(it.set_top(3), ScrollResult::Moved);
        assert_eq2!(pos(&it), (3, 3, 0));
        assert_eq2!(it.set_top(100), ScrollResult::Moved);
        assert_eq2!(pos(&it), (6, 6, 0));
        assert_invariants(&it);
        assert_eq2!(viewport(0, 4).set_top(2), ScrollResult::Beep);
    }

    #[test]
    fn test_horizontal_scrolling() {
        let mut it = viewport(4, 4);
        it.set_max_left_char(12, 10);
        assert_eq2!(it.max_left_char(), 2);

        assert_eq2!(it.scroll_left(), ScrollResult::Beep);
        assert_eq2!(it.scroll_right(), ScrollResult::Moved);
        assert_eq2!(it.scroll_right(), ScrollResult::Moved);
        assert_eq2!(it.scroll_right(), ScrollResult::Beep);
        assert_eq2!(it.left_char(), 2);

        assert_eq2!(it.scroll_to_left_edge(), ScrollResult::Moved);
        assert_eq2!(it.left_char(), 0);
        assert_eq2!(it.scroll_to_right_edge(), ScrollResult::Moved);
        assert_eq2!(it.left_char(), 2);

        // Shrinking the content clamps the offset.
        it.set_max_left_char(5, 10);
        assert_eq2!(it.left_char(), 0);
    }

    #[test]
    fn test_scrollbar_geometry() {
        let mut it = viewport(20, 5);
        assert!((it.step() - 0.25).abs() < f64::EPSILON);
        assert_eq2!(it.toggle_size(), 1);
        assert_eq2!(it.scrollbar_thumb_row(), 0);

        it.set_position(7);
        assert_eq2!(it.scrollbar_thumb_row(), 1);

        it.set_position(19);
        assert_eq2!(it.scrollbar_thumb_row(), 4);

        let it = viewport(0, 5);
        assert!((it.step() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_list_clamps_current_item() {
        let mut it = viewport(20, 5);
        it.set_position(18);

        it.resize_list(10);
        assert_eq2!(it.current_item(), 9);
        assert_invariants(&it);

        it.resize_list(0);
        assert_eq2!(pos(&it), (0, 0, 0));
        assert_invariants(&it);
    }

    #[test]
    fn test_set_max_rows_keeps_current_item() {
        let mut it = viewport(20, 10);
        it.set_position(8);

        it.set_max_rows(3);
        assert_eq2!(it.view_size(), 3);
        assert_eq2!(it.current_item(), 8);
        assert_invariants(&it);

        it.set_max_rows(0);
        assert_eq2!(it.view_size(), 1);
        assert_invariants(&it);
    }

    #[test]
    fn test_visible_range_and_row_of() {
        let mut it = viewport(20, 5);
        it.set_position(12);
        assert_eq2!(it.visible_range(), 8..13);
        assert_eq2!(it.row_of(8), Some(0));
        assert_eq2!(it.row_of(12), Some(4));
        assert_eq2!(it.row_of(13), None);
    }

    #[test]
    fn test_locate_cursor_in_viewport() {
        let mut it = viewport(20, 5);
        assert_eq2!(
            it.locate_cursor_in_viewport(),
            CaretVerticalViewportLocation::AtAbsoluteTop
        );
        it.set_position(2);
        assert_eq2!(
            it.locate_cursor_in_viewport(),
            CaretVerticalViewportLocation::InMiddleOfViewport
        );
        it.set_position(4);
        assert_eq2!(
            it.locate_cursor_in_viewport(),
            CaretVerticalViewportLocation::AtBottomOfViewport
        );
        it.set_position(12);
        for _ in 0..4 {
            let _ = it.move_up();
        }
        assert_eq2!(pos(&it), (8, 8, 0));
        assert_eq2!(
            it.locate_cursor_in_viewport(),
            CaretVerticalViewportLocation::AtTopOfViewport
        );
        let _ = it.end();
        assert_eq2!(
            it.locate_cursor_in_viewport(),
            CaretVerticalViewportLocation::AtAbsoluteBottom
        );
        assert_eq2!(
            viewport(0, 5).locate_cursor_in_viewport(),
            CaretVerticalViewportLocation::NotFound
        );
    }

    #[test]
    fn test_handle_navigation_key() {
        let mut it = viewport(20, 5);

        assert_eq2!(
            it.handle_navigation_key(
                keypress!(@special SpecialKey::Down),
                NavigationMode::Cursor
            ),
            Some(ScrollResult::Moved)
        );
        assert_eq2!(pos(&it), (0, 1, 1));

        assert_eq2!(
            it.handle_navigation_key(keypress!(@char 'G'), NavigationMode::Cursor),
            Some(ScrollResult::Moved)
        );
        assert_eq2!(it.current_item(), 19);

        assert_eq2!(
            it.handle_navigation_key(KeyPress::ctrl('b'), NavigationMode::Cursor),
            Some(ScrollResult::Moved)
        );
        assert_eq2!(
            it.handle_navigation_key(keypress!(@char '<'), NavigationMode::Cursor),
            Some(ScrollResult::Moved)
        );
        assert_eq2!(it.current_item(), 0);

        assert_eq2!(
            it.handle_navigation_key(
                keypress!(@special SpecialKey::Down),
                NavigationMode::Pager
            ),
            Some(ScrollResult::Moved)
        );
        assert_eq2!(pos(&it), (1, 1, 0));

        assert_eq2!(
            it.handle_navigation_key(keypress!(@char 'x'), NavigationMode::Cursor),
            None
        );
        assert_eq2!(
            it.handle_navigation_key(
                keypress!(@special SpecialKey::Enter),
                NavigationMode::Cursor
            ),
            None
        );
    }
}
