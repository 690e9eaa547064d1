//! System clipboard integration.

use codeask_core::error::{CodeaskError, Result};
use codeask_core::snippet::Clipboard;

/// [`Clipboard`] backed by the platform clipboard via arboard.
///
/// A handle is opened per copy; holding one for the process lifetime keeps
/// the clipboard owned on X11 and breaks other applications' pastes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|err| CodeaskError::clipboard(err.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|err| CodeaskError::clipboard(err.to_string()))
    }
}
