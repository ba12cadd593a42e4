//! Minimal wrapper around the system clipboard.
//!
//! Keeps the `arboard` surface in one place so callers never touch
//! platform-specific clipboard backends directly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard backend error: {0}")]
    Backend(#[from] arboard::Error),
}

/// Set the system clipboard to `text`.
pub fn set(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard
        .set_text(text.to_owned())
        .map_err(ClipboardError::from)
}

/// Try to create a clipboard instance to detect availability. Headless
/// sessions routinely have none.
pub fn available() -> bool {
    arboard::Clipboard::new().is_ok()
}
