// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{cell::RefCell, error::Error, rc::Rc};

use copypasta_ext::{copypasta::ClipboardProvider, x11_fork::ClipboardContext};

use crate::DEVELOPMENT_MODE;

pub type ClipboardResult<T> = Result<T, Box<dyn Error + Send + Sync + 'static>>;

/// Cut, copy and paste go through this trait, which is passed into the widgets that need
/// it. There is no process wide paste buffer.
pub trait ClipboardService {
    /// # Errors
    ///
    /// When the backing clipboard can't be written.
    fn try_to_put_content_into_clipboard(&mut self, content: String)
    -> ClipboardResult<()>;

    /// # Errors
    ///
    /// When the backing clipboard can't be read, or holds nothing.
    fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String>;
}

/// A paste buffer that lives only as long as the value does.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InMemoryClipboard {
    pub content: Option<String>,
}

impl ClipboardService for InMemoryClipboard {
    fn try_to_put_content_into_clipboard(
        &mut self,
        content: String,
    ) -> ClipboardResult<()> {
        self.content = Some(content);
        Ok(())
    }

    fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String> {
        self.content
            .clone()
            .ok_or_else(|| "Clipboard is empty".into())
    }
}

/// One paste buffer shared (on purpose, and visibly) by several widgets.
pub type SharedClipboard = Rc<RefCell<InMemoryClipboard>>;

#[must_use]
pub fn new_shared_clipboard() -> SharedClipboard {
    Rc::new(RefCell::new(InMemoryClipboard::default()))
}

impl ClipboardService for SharedClipboard {
    fn try_to_put_content_into_clipboard(
        &mut self,
        content: String,
    ) -> ClipboardResult<()> {
        self.borrow_mut().try_to_put_content_into_clipboard(content)
    }

    fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String> {
        self.borrow_mut().try_to_get_content_from_clipboard()
    }
}

/// The operating system's clipboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardService for SystemClipboard {
    fn try_to_put_content_into_clipboard(
        &mut self,
        content: String,
    ) -> ClipboardResult<()> {
        let mut ctx = ClipboardContext::new()?;
        ctx.set_contents(content.clone())?;

        DEVELOPMENT_MODE.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📋 Text was copied to clipboard",
                copied = %content,
            );
        });

        Ok(())
    }

    fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String> {
        let mut ctx = ClipboardContext::new()?;
        let content = ctx.get_contents()?;

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_in_memory_clipboard() {
        let mut it = InMemoryClipboard::default();
        assert!(it.try_to_get_content_from_clipboard().is_err());

        it.try_to_put_content_into_clipboard("abc".to_string())
            .unwrap();
        assert_eq2!(it.try_to_get_content_from_clipboard().unwrap(), "abc");
    }

    #[test]
    fn test_shared_clipboard_is_shared() {
        let mut first = new_shared_clipboard();
        let mut second = first.clone();

        first
            .try_to_put_content_into_clipboard("shared".to_string())
            .unwrap();
        assert_eq2!(second.try_to_get_content_from_clipboard().unwrap(), "shared");
    }
}
