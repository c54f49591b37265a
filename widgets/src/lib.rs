// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_widgets
//!
//! Interactive terminal widgets that all behave the same way under the keyboard:
//! scroll lists, radio lists, selection lists, scroll-back windows, text viewers with
//! buttons, and single line entry fields.
//!
//! Three pieces are shared by every widget:
//!
//! 1. [`ViewportState`], the viewport engine. It keeps the window onto a long list
//!    (top item, current item, highlighted row, horizontal scroll, scrollbar geometry)
//!    consistent under every navigation and resize. Boundaries ring the bell
//!    ([`ScrollResult::Beep`]) and never change state.
//! 2. [`BindingTable`], which maps `(widget kind, key)` to a [`BoundAction`]. Bound keys
//!    are looked up before a widget's own key handling, so applications can remap keys,
//!    add accelerators, or take over a key entirely. Bindings can also be loaded from
//!    JSON, see [`KeyBindingsConfig`].
//! 3. The injection protocol ([`Activatable::inject`]), which turns one input event into
//!    at most one state change and an [`ExitType`]. [`activate`] drives a widget from a
//!    list of scripted keys or from a [`KeyPressReader`], and both paths go through
//!    `inject`, so a replayed session ends exactly like an interactive one.
//!
//! ## How to use it as a library?
//!
//! ```rust
//! use r3bl_widgets::*;
//!
//! let mut surface = TestSurface::new(Size::new(5, 30));
//! let items = (1..=10).map(|it| format!("item {it}")).collect();
//! let mut widget = ScrollList::try_new(
//!     Region::new(0, 0, 5, 30),
//!     surface.size(),
//!     items,
//!     &ListOptions::default().numbered(true),
//! )
//! .unwrap();
//!
//! // Scripted keys, no terminal needed.
//! let keys = parse_key_sequence("down,down,enter").unwrap();
//! let mut reader = TestVecKeyPressReader::new(vec![]);
//! let choice = activate(&mut widget, Some(keys.as_slice()), &mut reader, &mut surface);
//! assert_eq!(choice, Some(2));
//! ```
//!
//! To run a widget in the real terminal use [`activate_in_terminal`], which switches to
//! raw mode for the duration of the call.
//!
//! ## How to use it as a binary?
//!
//! The `rw` binary reads lines from stdin and lets you pick one of them:
//!
//! ```shell
//! ls -1 | rw --mode scroll --height 8 --title "Pick a file"
//! ls -1 | rw --mode radio --keys "down,space,enter"
//! ```

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(clippy::all)]
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]
#![warn(rust_2018_idioms)]

// Attach.
pub mod binding;
pub mod bindings_config;
pub mod clipboard;
pub mod constants;
pub mod error;
pub mod event_loop;
pub mod exit_type;
pub mod geometry;
pub mod injection;
pub mod keypress;
pub mod keypress_reader;
pub mod log;
pub mod scroll;
pub mod surface;
pub mod term;
pub mod test_fixtures;
pub mod widgets;

// Re-export.
pub use binding::*;
pub use bindings_config::*;
pub use clipboard::*;
pub use constants::*;
pub use error::*;
pub use event_loop::*;
pub use exit_type::*;
pub use geometry::*;
pub use injection::*;
pub use keypress::*;
pub use keypress_reader::*;
pub use log::*;
pub use scroll::*;
pub use surface::*;
pub use term::*;
pub use test_fixtures::*;
pub use widgets::*;

/// Enable debug logging of key handling and viewport boundaries. Use `tail -f log.txt`
/// to watch the logs.
pub const DEVELOPMENT_MODE: bool = true;

/// Wrapper for [`pretty_assertions::assert_eq!`] macro.
#[macro_export]
macro_rules! assert_eq2 {
    ($($params:tt)*) => {
        pretty_assertions::assert_eq!($($params)*)
    };
}
