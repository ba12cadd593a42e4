//! Pure placement and clamping math over signed cell rectangles.
//!
//! Everything here is a total function of its inputs; the window manager and
//! the gesture controller call into this module so interactive behavior stays
//! testable without a terminal.

use ratatui::prelude::Rect;

use crate::constants::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, DRAG_BOTTOM_ALLOWANCE, DRAG_KEEP_VISIBLE_COLS,
    DRAG_KEEP_VISIBLE_ROWS, DRAG_SIDE_OVERFLOW, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
    SPAWN_BOTTOM_GAP, SPAWN_STAGGER, SPAWN_TOP_GAP, TASKBAR_HEIGHT,
};
use crate::window::WinRect;

/// Edges a window can be resized from. The chrome exposes exactly these
/// three affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Right,
    Bottom,
    BottomRight,
}

/// Initial rect for a newly opened window: default size, centered in the
/// band between the top and bottom gaps, shifted by a small stagger
/// proportional to the number of windows already open.
pub fn centered_spawn(viewport: Rect, open_windows: usize) -> WinRect {
    let width = DEFAULT_WINDOW_WIDTH.min(viewport.width.max(MIN_WINDOW_WIDTH));
    let band_top = SPAWN_TOP_GAP;
    let band_height = viewport
        .height
        .saturating_sub(SPAWN_TOP_GAP)
        .saturating_sub(SPAWN_BOTTOM_GAP);
    let height = DEFAULT_WINDOW_HEIGHT
        .min(band_height.max(MIN_WINDOW_HEIGHT))
        .max(MIN_WINDOW_HEIGHT);

    let center_x = (i32::from(viewport.width) - i32::from(width)) / 2;
    let center_y = i32::from(band_top) + (i32::from(band_height) - i32::from(height)).max(0) / 2;
    let offset = i32::from(SPAWN_STAGGER) * open_windows as i32;

    let (x, y) = clamp_drag(center_x + offset, center_y + offset, viewport);
    WinRect {
        x,
        y,
        width,
        height,
    }
}

/// Clamp a candidate window origin during a drag.
///
/// The sides tolerate a fixed overflow, the top is a hard bound, and the
/// bottom allows a little more overflow than the sides so a window can dip
/// behind the taskbar without being lost.
pub fn clamp_drag(x: i32, y: i32, viewport: Rect) -> (i32, i32) {
    let max_x = i32::from(viewport.width).saturating_sub(i32::from(DRAG_KEEP_VISIBLE_COLS));
    let min_x = -i32::from(DRAG_SIDE_OVERFLOW);
    let max_y = i32::from(viewport.height) - i32::from(DRAG_KEEP_VISIBLE_ROWS)
        + i32::from(DRAG_BOTTOM_ALLOWANCE);
    (x.clamp(min_x, max_x.max(min_x)), y.clamp(0, max_y.max(0)))
}

/// New dimensions for a resize gesture. Only the components named by `edge`
/// change; both are clamped to the minimum window size.
pub fn resize_dimensions(
    start_width: u16,
    start_height: u16,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
) -> (u16, u16) {
    let mut width = i32::from(start_width);
    let mut height = i32::from(start_height);
    if matches!(edge, ResizeEdge::Right | ResizeEdge::BottomRight) {
        width += dx;
    }
    if matches!(edge, ResizeEdge::Bottom | ResizeEdge::BottomRight) {
        height += dy;
    }
    let width = width.clamp(i32::from(MIN_WINDOW_WIDTH), i32::from(u16::MAX)) as u16;
    let height = height.clamp(i32::from(MIN_WINDOW_HEIGHT), i32::from(u16::MAX)) as u16;
    (width, height)
}

/// The rect a maximized window occupies: the full viewport minus the
/// taskbar reservation.
pub fn maximized_rect(viewport: Rect) -> WinRect {
    WinRect {
        x: i32::from(viewport.x),
        y: i32::from(viewport.y),
        width: viewport.width,
        height: viewport.height.saturating_sub(TASKBAR_HEIGHT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: 200,
            height: 50,
        }
    }

    #[test]
    fn centered_spawn_centers_first_window() {
        let rect = centered_spawn(viewport(), 0);
        assert_eq!(rect.width, DEFAULT_WINDOW_WIDTH);
        assert_eq!(rect.height, DEFAULT_WINDOW_HEIGHT);
        assert_eq!(rect.x, (200 - i32::from(DEFAULT_WINDOW_WIDTH)) / 2);
        assert!(rect.y >= i32::from(SPAWN_TOP_GAP));
    }

    #[test]
    fn centered_spawn_staggers_by_open_count() {
        let first = centered_spawn(viewport(), 0);
        let third = centered_spawn(viewport(), 2);
        assert_eq!(third.x - first.x, 2 * i32::from(SPAWN_STAGGER));
        assert_eq!(third.y - first.y, 2 * i32::from(SPAWN_STAGGER));
    }

    #[test]
    fn centered_spawn_fits_small_viewports() {
        let tiny = Rect {
            x: 0,
            y: 0,
            width: 30,
            height: 12,
        };
        let rect = centered_spawn(tiny, 0);
        assert!(rect.width <= 30);
        assert!(rect.height >= MIN_WINDOW_HEIGHT);
        assert!(rect.y >= 0);
    }

    #[test]
    fn clamp_drag_allows_slight_side_overflow_only() {
        let (x, _) = clamp_drag(-500, 0, viewport());
        assert_eq!(x, -i32::from(DRAG_SIDE_OVERFLOW));
        let (x, _) = clamp_drag(5000, 0, viewport());
        assert_eq!(x, 200 - i32::from(DRAG_KEEP_VISIBLE_COLS));
    }

    #[test]
    fn clamp_drag_top_is_hard_bottom_is_loose() {
        let (_, y) = clamp_drag(0, -40, viewport());
        assert_eq!(y, 0);
        let (_, y) = clamp_drag(0, 5000, viewport());
        assert_eq!(
            y,
            50 - i32::from(DRAG_KEEP_VISIBLE_ROWS) + i32::from(DRAG_BOTTOM_ALLOWANCE)
        );
        // the bottom bound really is looser than the vertical keep-visible band
        assert!(y > 50 - i32::from(DRAG_KEEP_VISIBLE_ROWS));
    }

    #[test]
    fn resize_never_shrinks_below_minimums() {
        let (w, h) = resize_dimensions(40, 20, ResizeEdge::BottomRight, -1000, -1000);
        assert_eq!(w, MIN_WINDOW_WIDTH);
        assert_eq!(h, MIN_WINDOW_HEIGHT);
    }

    #[test]
    fn resize_touches_only_named_components() {
        let (w, h) = resize_dimensions(40, 20, ResizeEdge::Right, 6, 99);
        assert_eq!((w, h), (46, 20));
        let (w, h) = resize_dimensions(40, 20, ResizeEdge::Bottom, 99, 4);
        assert_eq!((w, h), (40, 24));
        let (w, h) = resize_dimensions(40, 20, ResizeEdge::BottomRight, 6, 4);
        assert_eq!((w, h), (46, 24));
    }

    #[test]
    fn maximized_rect_reserves_taskbar_strip() {
        let rect = maximized_rect(viewport());
        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, 0);
        assert_eq!(rect.width, 200);
        assert_eq!(rect.height, 50 - TASKBAR_HEIGHT);
    }
}
