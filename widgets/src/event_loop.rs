// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use crate::{Activatable, CrosstermKeyPressReader, CrosstermSurface, DEVELOPMENT_MODE,
            DisplaySurface, ExitType, InputEvent, KeyPress, KeyPressReader, RawModeGuard};

/// Run a widget until it exits, and return its payload if it exited normally.
///
/// - With a non empty `actions` list the keys are injected in order, exactly as if they
///   were typed, and `reader` is not touched. If the keys run out before the widget
///   exits, the widget's exit type is set to [`ExitType::EarlyExit`].
/// - Otherwise keys are read from `reader` one at a time until the widget exits.
///
/// Only [`ExitType::Normal`] produces `Some`. Check [`Activatable::exit_type`] to tell
/// the other exits apart.
pub fn activate<W>(
    widget: &mut W,
    actions: Option<&[KeyPress]>,
    reader: &mut dyn KeyPressReader,
    surface: &mut dyn DisplaySurface,
) -> Option<W::Payload>
where
    W: Activatable + ?Sized,
{
    widget.set_exit_type(ExitType::Unset);
    widget.focus();

    let boxed = widget.is_boxed();
    if let Err(error) = widget.draw(surface, boxed) {
        tracing::error!(message = "activate: initial draw failed", ?error);
    }

    match actions {
        Some(actions) if !actions.is_empty() => {
            for key in actions {
                let exit_type = widget.inject(InputEvent::Keyboard(*key), surface);
                if exit_type.is_terminal() {
                    return finish(exit_type);
                }
            }

            DEVELOPMENT_MODE.then(|| {
                tracing::debug!(
                    message = "activate: replayed keys ran out",
                    count = actions.len()
                );
            });
            widget.set_exit_type(ExitType::EarlyExit);
            None
        }
        _ => loop {
            let event = reader.read_key_press();
            let exit_type = widget.inject(event, surface);
            if exit_type.is_terminal() {
                return finish(exit_type);
            }
        },
    }
}

fn finish<P>(exit_type: ExitType<P>) -> Option<P> {
    DEVELOPMENT_MODE.then(|| {
        tracing::debug!(
            message = "activate: exit",
            state = %exit_type.activation_state()
        );
    });
    exit_type.into_payload()
}

/// [`activate`] against the real terminal: raw mode and a hidden cursor for the
/// duration, keys from crossterm, painting to stdout. The widget is erased afterwards.
///
/// # Errors
///
/// If the terminal can't be put in raw mode, or its size can't be read.
pub fn activate_in_terminal<W>(
    widget: &mut W,
    actions: Option<&[KeyPress]>,
) -> io::Result<Option<W::Payload>>
where
    W: Activatable + ?Sized,
{
    let _raw_mode = RawModeGuard::try_new()?;
    let mut surface = CrosstermSurface::try_new_stdout()?;
    let mut reader = CrosstermKeyPressReader;

    let it = activate(widget, actions, &mut reader, &mut surface);

    widget.erase(&mut surface)?;
    Ok(it)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivationState, ListOptions, Region, ScrollList, Size, SpecialKey,
                TestSurface, TestVecKeyPressReader, assert_eq2, keypress};

    fn list(surface: &TestSurface) -> ScrollList {
        let items = (0..10).map(|it| format!("item {it}")).collect();
        ScrollList::try_new(
            Region::new(0, 0, 6, 20),
            surface.size(),
            items,
            &ListOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_replay_returns_payload() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(&surface);
        let mut reader = TestVecKeyPressReader::default();

        let keys = [
            keypress!(@special SpecialKey::Down),
            keypress!(@special SpecialKey::Down),
            keypress!(@special SpecialKey::Enter),
        ];
        let it = activate(&mut widget, Some(&keys), &mut reader, &mut surface);
        assert_eq2!(it, Some(2));
        assert_eq2!(
            widget.exit_type().activation_state(),
            ActivationState::NormalExit
        );
    }

    #[test]
    fn test_replay_stops_at_first_exit() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(&surface);
        let mut reader = TestVecKeyPressReader::default();

        let keys = [
            keypress!(@special SpecialKey::Esc),
            keypress!(@special SpecialKey::Down),
            keypress!(@special SpecialKey::Enter),
        ];
        let it = activate(&mut widget, Some(&keys), &mut reader, &mut surface);
        assert_eq2!(it, None);
        assert_eq2!(widget.exit_type(), &ExitType::EscapeHit);
        assert_eq2!(widget.engine().current_item(), 0);
    }

    #[test]
    fn test_replay_without_exit_is_early_exit() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(&surface);
        let mut reader = TestVecKeyPressReader::default();

        let keys = [keypress!(@special SpecialKey::Down)];
        let it = activate(&mut widget, Some(&keys), &mut reader, &mut surface);
        assert_eq2!(it, None);
        assert_eq2!(widget.exit_type(), &ExitType::EarlyExit);
    }

    #[test]
    fn test_reader_failure_ends_loop() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(&surface);
        let mut reader =
            TestVecKeyPressReader::from_keys(&[keypress!(@special SpecialKey::Down)]);

        let it = activate(&mut widget, None, &mut reader, &mut surface);
        assert_eq2!(it, None);
        assert_eq2!(widget.exit_type(), &ExitType::EarlyExit);
        assert_eq2!(widget.engine().current_item(), 1);
    }

    #[test]
    fn test_empty_actions_read_from_reader() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let mut widget = list(&surface);
        let mut reader = TestVecKeyPressReader::from_keys(&[
            keypress!(@special SpecialKey::End),
            keypress!(@special SpecialKey::Enter),
        ]);

        let it = activate(&mut widget, Some(&[]), &mut reader, &mut surface);
        assert_eq2!(it, Some(9));
        assert_eq2!(reader.consumed(), 2);
    }

    #[test]
    fn test_activate_keeps_border_choice() {
        let mut surface = TestSurface::new(Size::new(10, 20));
        let items = (0..10).map(|it| format!("item {it}")).collect();
        let mut widget = ScrollList::try_new(
            Region::new(0, 0, 6, 20),
            surface.size(),
            items,
            &ListOptions::default().boxed(true),
        )
        .unwrap();
        assert!(widget.is_boxed());

        widget.draw(&mut surface, false).unwrap();
        let keys = [keypress!(@special SpecialKey::Enter)];
        let mut reader = TestVecKeyPressReader::default();
        let it = activate(&mut widget, Some(&keys), &mut reader, &mut surface);

        assert_eq2!(it, Some(0));
        assert!(!widget.is_boxed());
        assert!(!surface.contains_text("┌"));
        assert_eq2!(surface.row_text(1).trim_end(), " item 0");
    }
}
