//! Shared panel rendering context.
//!
//! `ComponentContext` carries the UI metadata panels need during rendering
//! and event handling, so the `Component` trait stays stable instead of
//! growing ad-hoc boolean parameters.

/// Context passed to `Component` trait methods.
///
/// - `focused`: whether the hosting window is frontmost.
/// - `clipboard`: whether a system clipboard backend is available.
#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    clipboard: bool,
}

impl ComponentContext {
    pub const fn new(focused: bool) -> Self {
        Self {
            focused,
            clipboard: false,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn clipboard(&self) -> bool {
        self.clipboard
    }

    pub const fn with_clipboard(mut self, clipboard: bool) -> Self {
        self.clipboard = clipboard;
        self
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false)
    }
}
