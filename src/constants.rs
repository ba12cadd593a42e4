//! Shared crate-wide constants.
//!
//! All geometry is measured in terminal cells. The drag-clamp margins are
//! cosmetic tuning: the sides may overflow slightly, the top edge is a hard
//! bound, and the bottom allows a little more overflow than the sides.

use std::time::Duration;

/// Rows reserved at the bottom of the terminal for the taskbar.
pub const TASKBAR_HEIGHT: u16 = 2;

/// Default size for a freshly opened window.
pub const DEFAULT_WINDOW_WIDTH: u16 = 72;
pub const DEFAULT_WINDOW_HEIGHT: u16 = 18;

/// Smallest size a window can be resized to.
pub const MIN_WINDOW_WIDTH: u16 = 24;
pub const MIN_WINDOW_HEIGHT: u16 = 8;

/// Gaps above/below the centered spawn band. The bottom gap includes the
/// taskbar reservation plus breathing room.
pub const SPAWN_TOP_GAP: u16 = 2;
pub const SPAWN_BOTTOM_GAP: u16 = 4;

/// Horizontal and vertical offset applied per already-open window so new
/// windows do not stack perfectly on top of each other.
pub const SPAWN_STAGGER: u16 = 2;

/// Columns a dragged window may hang off the left edge.
pub const DRAG_SIDE_OVERFLOW: u16 = 8;

/// Columns of the window that must stay visible on the right edge.
pub const DRAG_KEEP_VISIBLE_COLS: u16 = 12;

/// Rows of the window that must stay on screen near the bottom edge.
pub const DRAG_KEEP_VISIBLE_ROWS: u16 = 5;

/// Extra rows of bottom overflow allowed past the keep-visible band.
pub const DRAG_BOTTOM_ALLOWANCE: u16 = 2;

/// z-order counter baseline; the first window receives `Z_BASELINE + 1`.
pub const Z_BASELINE: u64 = 10;

/// Automatic weather refresh cadence.
pub const WEATHER_REFRESH: Duration = Duration::from_secs(600);

/// Two presses on the same desktop icon within this window count as a
/// double activation.
pub const ICON_DOUBLE_CLICK: Duration = Duration::from_millis(500);
