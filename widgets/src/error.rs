// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use crate::{Region, Size};

/// Everything that can go wrong while building a widget, parsing key names, loading key
/// bindings, or saving / loading widget contents. Key handling itself never fails: a
/// key that has no meaning just rings the bell.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum WidgetError {
    #[error("Region of {region} does not fit on a screen of {screen}")]
    #[diagnostic(
        code(r3bl_widgets::cannot_allocate_region),
        help("Make the terminal bigger or ask for a smaller widget height")
    )]
    CannotAllocateRegion { region: Region, screen: Size },

    #[error("Region is too small to show any content rows after the border and title")]
    #[diagnostic(
        code(r3bl_widgets::empty_region),
        help("Increase the height, remove the border, or shorten the title")
    )]
    EmptyRegion,

    #[error("Unknown key name: {name:?}")]
    #[diagnostic(
        code(r3bl_widgets::invalid_key_name),
        help(
            "Use a single character, a name like up, down, pgup, pgdn, home, end, enter, esc, tab, space, f1..f12, optionally prefixed with ctrl+, alt+ or shift+"
        )
    )]
    InvalidKeyName { name: String },

    #[error("Could not load key bindings: {reason}")]
    #[diagnostic(code(r3bl_widgets::bindings_config))]
    BindingsConfig { reason: String },

    #[error("Could not access {path:?}")]
    #[diagnostic(code(r3bl_widgets::contents_io))]
    ContentsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(r3bl_widgets::terminal_io))]
    TerminalIo(#[from] std::io::Error),
}

pub type WidgetResult<T> = Result<T, WidgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_readable() {
        let it = WidgetError::InvalidKeyName {
            name: "upup".to_string(),
        };
        assert_eq!(it.to_string(), "Unknown key name: \"upup\"");

        let it = WidgetError::CannotAllocateRegion {
            region: Region::new(20, 0, 10, 80),
            screen: Size::new(24, 80),
        };
        assert!(it.to_string().contains("does not fit"));
    }

    #[test]
    fn test_io_error_converts() {
        let io_err = std::io::Error::other("boom");
        let it: WidgetError = io_err.into();
        assert!(matches!(it, WidgetError::TerminalIo(_)));
    }
}
