// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Key injection
//!
//! Every widget turns one input event into a state change, an optional side effect and
//! an [`ExitType`] in the same order:
//!
//! ```text
//! reset exit type to Unset
//!   │
//!   ├─ pre-process hook ── says Consumed ──────────────────────────┐
//!   │                                                              │
//!   ├─ binding table ── bound (not a remap) ── exit ─────────────┐ │
//!   │                                                            │ │
//!   ├─ engine.handle_key ── Exit ────────────────────────────────┤ │
//!   │                                                            │ │
//!   ├─ shared default keys ── Esc, Enter, Tab ───────────────────┤ │
//!   │                                                            │ │
//!   ├─ not complete: post-process hook, exit type back to Unset  │ │
//!   │                                                            ▼ ▼
//!   └───────────────────────────────────────────────────── repaint, return exit type
//! ```
//!
//! The pre-process hook can intercept a key before anything else sees it. The
//! post-process hook only observes keys that did not end the widget, and can't change
//! the outcome.

use std::{fmt::{Debug, Formatter},
          io};

use crate::{BindingTable, BoundAction, DEVELOPMENT_MODE, DisplaySurface, ExitType, Frame,
            InputEvent, KeyPress, REFRESH_KEY, Region, SpecialKey, ViewportState,
            WidgetKind};

/// What a widget's own key handling did with a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome<P> {
    /// State changed (or was left alone on purpose); keep going.
    Handled,
    /// The key means something here but can't be applied right now, eg: a boundary.
    Beep,
    /// Not a key this widget knows. The shared defaults get a go.
    NotHandled,
    /// The widget is done.
    Exit(ExitType<P>),
}

/// The widget specific half of a widget: its state, its keys and its painting. The
/// shared half (bindings, hooks, focus, exit type, frame) is [`Widget`].
pub trait WidgetEngine {
    type Payload: Clone + Debug;

    fn kind(&self) -> WidgetKind;

    /// Returned in [`ExitType::Normal`] when the widget is confirmed. `None` means there
    /// is nothing to confirm (eg: an empty list), and confirming beeps.
    fn current_payload(&self) -> Option<Self::Payload>;

    fn handle_key(&mut self, key: KeyPress) -> KeyOutcome<Self::Payload>;

    /// Paint the content area.
    ///
    /// # Errors
    ///
    /// When the surface fails.
    fn render(
        &self,
        surface: &mut dyn DisplaySurface,
        content: Region,
        has_focus: bool,
    ) -> io::Result<()>;

    /// The content area changed size.
    fn resize(&mut self, _content: Region) {}

    /// List like widgets expose their viewport.
    fn viewport(&self) -> Option<&ViewportState> { None }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreProcessResult {
    Continue,
    /// The hook dealt with the key; skip straight to repainting.
    Consumed,
}

/// Runs before bindings and built-in handling, and may change the engine.
pub type PreProcessHook<E> = Box<dyn FnMut(&mut E, KeyPress) -> PreProcessResult>;

/// Runs after built-in handling for keys that did not end the widget. Observer only.
pub type PostProcessHook<E> = Box<dyn FnMut(&E, KeyPress)>;

/// The interface an application needs to drive a widget.
pub trait Activatable {
    type Payload;

    /// Paint the whole widget. `boxed` decides whether the border is painted (space for
    /// it is always reserved when the widget was built with one).
    ///
    /// # Errors
    ///
    /// When the surface fails.
    fn draw(&mut self, surface: &mut dyn DisplaySurface, boxed: bool) -> io::Result<()>;

    /// Whether the last [`Activatable::draw`] painted the border. Starts out as the
    /// frame's own choice.
    fn is_boxed(&self) -> bool;

    /// # Errors
    ///
    /// When the surface fails.
    fn erase(&mut self, surface: &mut dyn DisplaySurface) -> io::Result<()>;

    /// Erase the widget and release its bindings and hooks. The widget should not be
    /// used afterwards.
    ///
    /// # Errors
    ///
    /// When the surface fails.
    fn destroy(&mut self, surface: &mut dyn DisplaySurface) -> io::Result<()>;

    fn focus(&mut self);

    fn unfocus(&mut self);

    fn inject(
        &mut self,
        event: InputEvent,
        surface: &mut dyn DisplaySurface,
    ) -> ExitType<Self::Payload>;

    fn exit_type(&self) -> &ExitType<Self::Payload>;

    fn set_exit_type(&mut self, exit_type: ExitType<Self::Payload>);
}

/// A widget: one [`WidgetEngine`] plus everything every widget shares.
pub struct Widget<E: WidgetEngine> {
    engine: E,
    bindings: BindingTable<E>,
    frame: Frame,
    pre_process: Option<PreProcessHook<E>>,
    post_process: Option<PostProcessHook<E>>,
    has_focus: bool,
    draw_box: bool,
    exit_type: ExitType<E::Payload>,
}

impl<E: WidgetEngine + Debug> Debug for Widget<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("engine", &self.engine)
            .field("bindings", &self.bindings)
            .field("frame", &self.frame)
            .field("pre_process", &self.pre_process.is_some())
            .field("post_process", &self.post_process.is_some())
            .field("has_focus", &self.has_focus)
            .field("exit_type", &self.exit_type)
            .finish_non_exhaustive()
    }
}

/// Whether handling a key finished the widget's turn (an exit type was decided).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Complete,
    NotComplete,
}

impl<E: WidgetEngine> Widget<E> {
    pub fn new(engine: E, frame: Frame) -> Self {
        let draw_box = frame.is_boxed();
        Self {
            engine,
            bindings: BindingTable::new(),
            frame,
            pre_process: None,
            post_process: None,
            has_focus: true,
            draw_box,
            exit_type: ExitType::Unset,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &E { &self.engine }

    pub fn engine_mut(&mut self) -> &mut E { &mut self.engine }

    #[must_use]
    pub fn frame(&self) -> &Frame { &self.frame }

    #[must_use]
    pub fn has_focus(&self) -> bool { self.has_focus }

    #[must_use]
    pub fn bindings(&self) -> &BindingTable<E> { &self.bindings }

    pub fn bindings_mut(&mut self) -> &mut BindingTable<E> { &mut self.bindings }

    /// Bind `key` for this widget's kind.
    pub fn bind(&mut self, key: KeyPress, action: BoundAction<E>) -> &mut Self {
        let kind = self.engine.kind();
        let _ = self.bindings.register(kind, key, action);
        self
    }

    pub fn unbind(&mut self, key: KeyPress) -> &mut Self {
        let kind = self.engine.kind();
        let _ = self.bindings.unregister(kind, key);
        self
    }

    pub fn set_pre_process(
        &mut self,
        hook: impl FnMut(&mut E, KeyPress) -> PreProcessResult + 'static,
    ) -> &mut Self {
        self.pre_process = Some(Box::new(hook));
        self
    }

    pub fn set_post_process(&mut self, hook: impl FnMut(&E, KeyPress) + 'static) -> &mut Self {
        self.post_process = Some(Box::new(hook));
        self
    }

    pub fn clear_hooks(&mut self) {
        self.pre_process = None;
        self.post_process = None;
    }

    /// Move the widget to a new frame, eg: after the terminal was resized.
    pub fn set_frame(&mut self, frame: Frame) {
        self.engine.resize(frame.content_region());
        self.frame = frame;
    }

    fn process_key(
        &mut self,
        key: KeyPress,
        surface: &mut dyn DisplaySurface,
        full_repaint: &mut bool,
    ) -> Completion {
        let kind = self.engine.kind();

        // Bound keys replace the built-in handling, except remaps which feed it.
        let key = match self.bindings.resolve_mut(kind, key) {
            None => key,
            Some(BoundAction::Remap(to)) => *to,
            Some(BoundAction::Confirm) => {
                match self.engine.current_payload() {
                    Some(payload) => self.exit_type = ExitType::Normal(payload),
                    None => log_if_err(surface.beep(), "beep"),
                }
                return Completion::Complete;
            }
            Some(BoundAction::Cancel) => {
                self.exit_type = ExitType::EscapeHit;
                return Completion::Complete;
            }
            Some(BoundAction::EarlyExit) => {
                self.exit_type = ExitType::EarlyExit;
                return Completion::Complete;
            }
            Some(BoundAction::Handler(handler)) => {
                self.exit_type = handler.handle_key(&mut self.engine, key);
                return Completion::Complete;
            }
        };

        match self.engine.handle_key(key) {
            KeyOutcome::Handled => Completion::NotComplete,
            KeyOutcome::Beep => {
                log_if_err(surface.beep(), "beep");
                Completion::NotComplete
            }
            KeyOutcome::Exit(exit_type) => {
                self.exit_type = exit_type;
                Completion::Complete
            }
            KeyOutcome::NotHandled => self.process_default_key(key, surface, full_repaint),
        }
    }

    /// Keys every widget understands the same way.
    fn process_default_key(
        &mut self,
        key: KeyPress,
        surface: &mut dyn DisplaySurface,
        full_repaint: &mut bool,
    ) -> Completion {
        if key.is_special(SpecialKey::Esc) {
            self.exit_type = ExitType::EscapeHit;
            return Completion::Complete;
        }

        if key.is_special(SpecialKey::Enter) || key.is_special(SpecialKey::Tab) {
            if let Some(payload) = self.engine.current_payload() {
                self.exit_type = ExitType::Normal(payload);
                return Completion::Complete;
            }
            log_if_err(surface.beep(), "beep");
            return Completion::NotComplete;
        }

        if key == REFRESH_KEY {
            log_if_err(surface.request_full_repaint(), "request_full_repaint");
            *full_repaint = true;
            return Completion::NotComplete;
        }

        log_if_err(surface.beep(), "beep");
        Completion::NotComplete
    }

    /// Repaint the content, or everything when `full` is set. Errors are logged, a
    /// broken display does not stop key handling.
    fn repaint(&mut self, surface: &mut dyn DisplaySurface, full: bool) {
        let result = if full {
            self.draw(surface, self.draw_box)
        } else {
            self.engine
                .render(surface, self.frame.content_region(), self.has_focus)
                .and_then(|()| surface.flush())
        };
        log_if_err(result, "repaint");
    }
}

fn log_if_err(result: io::Result<()>, operation: &'static str) {
    if let Err(error) = result {
        tracing::error!(message = "display surface failed", operation, ?error);
    }
}

impl<E: WidgetEngine> Activatable for Widget<E> {
    type Payload = E::Payload;

    fn draw(&mut self, surface: &mut dyn DisplaySurface, boxed: bool) -> io::Result<()> {
        self.draw_box = boxed;
        self.frame.paint(surface, boxed)?;
        self.engine
            .render(surface, self.frame.content_region(), self.has_focus)?;
        surface.flush()
    }

    fn is_boxed(&self) -> bool { self.draw_box }

    fn erase(&mut self, surface: &mut dyn DisplaySurface) -> io::Result<()> {
        surface.erase_region(self.frame.region())?;
        surface.flush()
    }

    fn destroy(&mut self, surface: &mut dyn DisplaySurface) -> io::Result<()> {
        self.bindings.clear();
        self.clear_hooks();
        self.erase(surface)
    }

    fn focus(&mut self) { self.has_focus = true; }

    fn unfocus(&mut self) { self.has_focus = false; }

    fn inject(
        &mut self,
        event: InputEvent,
        surface: &mut dyn DisplaySurface,
    ) -> ExitType<Self::Payload> {
        self.exit_type = ExitType::Unset;

        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(message = "inject", kind = %self.engine.kind(), ?event);
        });

        let key = match event {
            InputEvent::Keyboard(key) => key,
            InputEvent::ReadFailure => {
                self.exit_type = ExitType::EarlyExit;
                self.repaint(surface, false);
                return self.exit_type.clone();
            }
            InputEvent::Resize(size) => {
                surface.set_size(size);
                log_if_err(surface.request_full_repaint(), "request_full_repaint");
                self.repaint(surface, true);
                return self.exit_type.clone();
            }
        };

        let mut full_repaint = false;

        let consumed = match &mut self.pre_process {
            Some(hook) => hook(&mut self.engine, key) == PreProcessResult::Consumed,
            None => false,
        };

        if !consumed
            && self.process_key(key, surface, &mut full_repaint) == Completion::NotComplete
        {
            if let Some(hook) = &mut self.post_process {
                hook(&self.engine, key);
            }
            self.exit_type = ExitType::Unset;
        }

        self.repaint(surface, full_repaint);

        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(message = "inject done", exit_type = ?self.exit_type);
        });

        self.exit_type.clone()
    }

    fn exit_type(&self) -> &ExitType<Self::Payload> { &self.exit_type }

    fn set_exit_type(&mut self, exit_type: ExitType<Self::Payload>) {
        self.exit_type = exit_type;
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{ListOptions, ScrollList, ScrollListEngine, Size, TestSurface, assert_eq2,
                keypress};

    fn list(count: usize, surface: &TestSurface) -> ScrollList {
        let items = (1..=count).map(|it| format!("item {it}")).collect();
        ScrollList::try_new(
            Region::new(0, 0, 7, 20),
            surface.size(),
            items,
            &ListOptions::default().boxed(true),
        )
        .unwrap()
    }

    fn key(it: KeyPress) -> InputEvent { InputEvent::Keyboard(it) }

    #[test]
    fn test_navigation_keeps_running() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(10, &surface);

        let exit = widget.inject(key(keypress!(@special SpecialKey::Down)), &mut surface);
        assert_eq2!(exit, ExitType::Unset);
        assert_eq2!(widget.engine().current_item(), 1);
    }

    #[test]
    fn test_escape_and_enter() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(10, &surface);

        let _ = widget.inject(key(keypress!(@special SpecialKey::Down)), &mut surface);
        assert_eq2!(
            widget.inject(key(keypress!(@special SpecialKey::Enter)), &mut surface),
            ExitType::Normal(1)
        );
        assert_eq2!(
            widget.inject(key(keypress!(@special SpecialKey::Tab)), &mut surface),
            ExitType::Normal(1)
        );
        assert_eq2!(
            widget.inject(key(keypress!(@special SpecialKey::Esc)), &mut surface),
            ExitType::EscapeHit
        );
    }

    #[test]
    fn test_exit_type_is_reset_on_every_inject() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(10, &surface);

        let _ = widget.inject(key(keypress!(@special SpecialKey::Esc)), &mut surface);
        assert_eq2!(widget.exit_type(), &ExitType::EscapeHit);

        let _ = widget.inject(key(keypress!(@special SpecialKey::Down)), &mut surface);
        assert_eq2!(widget.exit_type(), &ExitType::Unset);
    }

    #[test]
    fn test_read_failure_is_early_exit() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(10, &surface);
        assert_eq2!(
            widget.inject(InputEvent::ReadFailure, &mut surface),
            ExitType::EarlyExit
        );
    }

    #[test]
    fn test_unknown_key_and_boundaries_beep() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(3, &surface);

        let _ = widget.inject(key(keypress!(@special SpecialKey::Up)), &mut surface);
        let _ = widget.inject(key(keypress!(@char 'z')), &mut surface);
        assert_eq2!(surface.beep_count, 2);
        assert_eq2!(widget.exit_type(), &ExitType::Unset);
    }

    #[test]
    fn test_enter_on_empty_list_beeps() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(0, &surface);
        assert_eq2!(
            widget.inject(key(keypress!(@special SpecialKey::Enter)), &mut surface),
            ExitType::Unset
        );
        assert_eq2!(surface.beep_count, 1);
    }

    #[test]
    fn test_refresh_requests_full_repaint() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(3, &surface);
        let _ = widget.inject(key(REFRESH_KEY), &mut surface);
        assert_eq2!(surface.full_repaint_count, 1);
        assert_eq2!(surface.beep_count, 0);
        assert!(surface.row_text(0).starts_with('┌'));
    }

    #[test]
    fn test_resize_repaints() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(3, &surface);
        let exit = widget.inject(InputEvent::Resize(Size::new(12, 30)), &mut surface);
        assert_eq2!(exit, ExitType::Unset);
        assert_eq2!(surface.size(), Size::new(12, 30));
        assert_eq2!(surface.full_repaint_count, 1);
        assert!(surface.contains_text("item 1"));
    }

    #[test]
    fn test_remap_feeds_builtin_handling() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(10, &surface);
        widget.bind(
            keypress!(@char 'j'),
            BoundAction::Remap(keypress!(@special SpecialKey::Down)),
        );

        let _ = widget.inject(key(keypress!(@char 'j')), &mut surface);
        let _ = widget.inject(key(keypress!(@char 'j')), &mut surface);
        assert_eq2!(widget.engine().current_item(), 2);
        assert_eq2!(surface.beep_count, 0);
    }

    #[test]
    fn test_bound_cancel_and_early_exit() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(10, &surface);
        widget
            .bind(keypress!(@char 'q'), BoundAction::Cancel)
            .bind(KeyPress::ctrl('c'), BoundAction::EarlyExit)
            .bind(KeyPress::ctrl('d'), BoundAction::Confirm);

        assert_eq2!(
            widget.inject(key(keypress!(@char 'q')), &mut surface),
            ExitType::EscapeHit
        );
        assert_eq2!(
            widget.inject(key(KeyPress::ctrl('c')), &mut surface),
            ExitType::EarlyExit
        );
        assert_eq2!(
            widget.inject(key(KeyPress::ctrl('d')), &mut surface),
            ExitType::Normal(0)
        );
    }

    #[test]
    fn test_bound_handler_short_circuits_builtin_keys() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(10, &surface);
        let calls = Rc::new(RefCell::new(0));

        let calls_clone = calls.clone();
        widget.bind(
            keypress!(@special SpecialKey::Down),
            BoundAction::handler(move |engine: &mut ScrollListEngine, _key: KeyPress| -> ExitType<usize> {
                *calls_clone.borrow_mut() += 1;
                engine.set_current_item(5);
                ExitType::Unset
            }),
        );

        let exit = widget.inject(key(keypress!(@special SpecialKey::Down)), &mut surface);
        assert_eq2!(exit, ExitType::Unset);
        assert_eq2!(*calls.borrow(), 1);
        // The built-in move down did not also run.
        assert_eq2!(widget.engine().current_item(), 5);
    }

    #[test]
    fn test_pre_process_hook_can_consume_keys() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(10, &surface);
        widget.set_pre_process(|engine, key| {
            if key == keypress!(@char 'x') {
                engine.set_current_item(9);
                PreProcessResult::Consumed
            } else {
                PreProcessResult::Continue
            }
        });

        let _ = widget.inject(key(keypress!(@char 'x')), &mut surface);
        assert_eq2!(widget.engine().current_item(), 9);
        // Consumed keys never reach the default "unknown key" beep.
        assert_eq2!(surface.beep_count, 0);

        let _ = widget.inject(key(keypress!(@special SpecialKey::Up)), &mut surface);
        assert_eq2!(widget.engine().current_item(), 8);
    }

    #[test]
    fn test_post_process_hook_only_sees_keys_that_keep_running() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(10, &surface);
        let seen = Rc::new(RefCell::new(vec![]));

        let seen_clone = seen.clone();
        widget.set_post_process(move |engine, key| {
            seen_clone.borrow_mut().push((key, engine.current_item()));
        });

        let down = keypress!(@special SpecialKey::Down);
        let _ = widget.inject(key(down), &mut surface);
        let _ = widget.inject(key(keypress!(@special SpecialKey::Enter)), &mut surface);

        assert_eq2!(*seen.borrow(), vec![(down, 1)]);
    }

    #[test]
    fn test_destroy_releases_bindings_and_hooks() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(3, &surface);
        widget
            .bind(keypress!(@char 'q'), BoundAction::Cancel)
            .set_post_process(|_, _| {});
        widget.draw(&mut surface, true).unwrap();
        assert!(surface.contains_text("item 1"));

        widget.destroy(&mut surface).unwrap();
        assert!(widget.bindings().is_empty());
        assert!(!surface.contains_text("item 1"));
    }

    #[test]
    fn test_focus_controls_highlight() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(3, &surface);

        widget.draw(&mut surface, true).unwrap();
        assert_eq2!(surface.highlighted_rows(), vec![1]);

        widget.unfocus();
        widget.draw(&mut surface, true).unwrap();
        assert!(surface.highlighted_rows().is_empty());
    }
}
