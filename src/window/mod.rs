pub mod decorator;
pub mod gesture;

mod manager;

use std::fmt;

use ratatui::prelude::Rect;

use crate::apps::AppId;

pub use manager::{GeometryUpdate, WindowManager};

/// Window identity. Assigned monotonically and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Signed window rectangle: the origin may be negative while a window hangs
/// off the left edge, the size stays unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl WinRect {
    pub fn right(&self) -> i32 {
        self.x + i32::from(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y + i32::from(self.height)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        let col = i32::from(column);
        let row = i32::from(row);
        col >= self.x && col < self.right() && row >= self.y && row < self.bottom()
    }

    /// The same rectangle in local coordinates, for offscreen rendering.
    pub fn local(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }
}

/// The central mutable entity owned by [`WindowManager`].
#[derive(Debug, Clone)]
pub struct Window {
    pub id: WindowId,
    pub app: AppId,
    pub title: String,
    pub rect: WinRect,
    /// Saved geometry while `maximized` is set; restored on un-maximize.
    pub prior_rect: Option<WinRect>,
    /// Strictly increasing focus counter; the maximum across all windows is
    /// the frontmost one.
    pub z: u64,
    pub minimized: bool,
    pub maximized: bool,
}

impl Window {
    pub(crate) fn new(id: WindowId, app: AppId, rect: WinRect, z: u64) -> Self {
        Self {
            id,
            app,
            title: app.descriptor().name.to_string(),
            rect,
            prior_rect: None,
            z,
            minimized: false,
            maximized: false,
        }
    }

    /// Whether the window participates in pointer interaction and painting.
    pub fn visible(&self) -> bool {
        !self.minimized
    }
}
