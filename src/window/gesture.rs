//! The drag/resize interaction controller.
//!
//! One controller serves the whole desktop, so at most one gesture is ever
//! active: `Idle → Dragging → Idle` or `Idle → Resizing(edge) → Idle`. A
//! drag is a live preview that commits once on release; a resize commits
//! live on every pointer move. Either way the window manager never observes
//! a half-applied update.

use super::manager::{GeometryUpdate, WindowManager};
use super::{WinRect, WindowId};
use crate::geometry::{self, ResizeEdge};

#[derive(Debug, Clone, Copy)]
struct DragState {
    id: WindowId,
    start: WinRect,
    press_col: u16,
    press_row: u16,
    last_col: u16,
    last_row: u16,
}

impl DragState {
    fn candidate(&self, column: u16, row: u16) -> (i32, i32) {
        let dx = i32::from(column) - i32::from(self.press_col);
        let dy = i32::from(row) - i32::from(self.press_row);
        (self.start.x + dx, self.start.y + dy)
    }
}

#[derive(Debug, Clone, Copy)]
struct ResizeState {
    id: WindowId,
    edge: ResizeEdge,
    start: WinRect,
    press_col: u16,
    press_row: u16,
}

#[derive(Debug, Clone, Copy)]
enum Gesture {
    Drag(DragState),
    Resize(ResizeState),
}

#[derive(Debug, Default)]
pub struct GestureController {
    active: Option<Gesture>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start dragging from the title region. Refused while another gesture
    /// is active (a second press must not start a concurrent gesture) and
    /// for maximized windows.
    pub fn begin_drag(
        &mut self,
        wm: &mut WindowManager,
        id: WindowId,
        column: u16,
        row: u16,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(window) = wm.window(id) else {
            return false;
        };
        if window.maximized {
            return false;
        }
        let start = window.rect;
        let _ = wm.focus(id);
        self.active = Some(Gesture::Drag(DragState {
            id,
            start,
            press_col: column,
            press_row: row,
            last_col: column,
            last_row: row,
        }));
        true
    }

    /// Start resizing from one of the edge affordances. Same refusal rules
    /// as [`Self::begin_drag`].
    pub fn begin_resize(
        &mut self,
        wm: &mut WindowManager,
        id: WindowId,
        edge: ResizeEdge,
        column: u16,
        row: u16,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(window) = wm.window(id) else {
            return false;
        };
        if window.maximized {
            return false;
        }
        let start = window.rect;
        let _ = wm.focus(id);
        self.active = Some(Gesture::Resize(ResizeState {
            id,
            edge,
            start,
            press_col: column,
            press_row: row,
        }));
        true
    }

    /// Pointer motion. Dragging only updates the preview; resizing commits
    /// the clamped dimensions immediately.
    pub fn pointer_moved(&mut self, wm: &mut WindowManager, column: u16, row: u16) -> bool {
        match self.active.as_mut() {
            Some(Gesture::Drag(drag)) => {
                drag.last_col = column;
                drag.last_row = row;
                true
            }
            Some(Gesture::Resize(resize)) => {
                let dx = i32::from(column) - i32::from(resize.press_col);
                let dy = i32::from(row) - i32::from(resize.press_row);
                let (width, height) = geometry::resize_dimensions(
                    resize.start.width,
                    resize.start.height,
                    resize.edge,
                    dx,
                    dy,
                );
                let _ = wm.update_geometry(resize.id, GeometryUpdate::size(width, height));
                true
            }
            None => false,
        }
    }

    /// Pointer release: end the gesture. The drag commit is derived from the
    /// release coordinates, never a stale snapshot.
    pub fn released(&mut self, wm: &mut WindowManager, column: u16, row: u16) -> bool {
        match self.active.take() {
            Some(Gesture::Drag(drag)) => {
                let (x, y) = drag.candidate(column, row);
                let (x, y) = geometry::clamp_drag(x, y, wm.viewport());
                let _ = wm.update_geometry(drag.id, GeometryUpdate::position(x, y));
                true
            }
            Some(Gesture::Resize(_)) => true,
            None => false,
        }
    }

    /// Fallback release path for a gesture whose release event is never
    /// delivered (terminal focus loss, pointer capture gone). The last live
    /// geometry becomes final and the controller returns to idle.
    pub fn interrupted(&mut self, wm: &mut WindowManager) {
        if let Some(Gesture::Drag(drag)) = self.active {
            let last_col = drag.last_col;
            let last_row = drag.last_row;
            self.released(wm, last_col, last_row);
        }
        self.active = None;
    }

    /// Live preview rect for the window being dragged, clamped the same way
    /// the final commit will be. `None` outside a drag.
    pub fn preview_rect(&self, wm: &WindowManager, id: WindowId) -> Option<WinRect> {
        match self.active {
            Some(Gesture::Drag(drag)) if drag.id == id => {
                let (x, y) = drag.candidate(drag.last_col, drag.last_row);
                let (x, y) = geometry::clamp_drag(x, y, wm.viewport());
                Some(WinRect {
                    x,
                    y,
                    width: drag.start.width,
                    height: drag.start.height,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::AppId;
    use crate::constants::{DRAG_SIDE_OVERFLOW, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
    use ratatui::prelude::Rect;

    fn setup() -> (WindowManager, GestureController, WindowId) {
        let mut wm = WindowManager::new(Rect {
            x: 0,
            y: 0,
            width: 200,
            height: 50,
        });
        let id = wm.open_application(AppId::About);
        (wm, GestureController::new(), id)
    }

    #[test]
    fn drag_previews_without_committing() {
        let (mut wm, mut gestures, id) = setup();
        let before = wm.rect_of(id).unwrap();
        assert!(gestures.begin_drag(&mut wm, id, 70, 3));
        assert!(gestures.pointer_moved(&mut wm, 80, 9));

        // manager state is untouched mid-gesture
        assert_eq!(wm.rect_of(id).unwrap(), before);
        // while the preview tracks the pointer delta
        let preview = gestures.preview_rect(&wm, id).unwrap();
        assert_eq!(preview.x, before.x + 10);
        assert_eq!(preview.y, before.y + 6);
    }

    #[test]
    fn drag_release_commits_clamped_delta() {
        let (mut wm, mut gestures, id) = setup();
        let before = wm.rect_of(id).unwrap();
        gestures.begin_drag(&mut wm, id, 70, 3);
        gestures.pointer_moved(&mut wm, 75, 4);
        assert!(gestures.released(&mut wm, 84, 10));

        let after = wm.rect_of(id).unwrap();
        assert_eq!(after.x, before.x + 14);
        assert_eq!(after.y, before.y + 7);
        assert!(!gestures.is_active());
    }

    #[test]
    fn drag_commit_respects_clamping_bounds() {
        let (mut wm, mut gestures, id) = setup();
        gestures.begin_drag(&mut wm, id, 199, 40);
        // release far up-left of the press: the window may only overflow the
        // left edge slightly and never cross the top
        gestures.released(&mut wm, 0, 0);
        let rect = wm.rect_of(id).unwrap();
        assert_eq!(rect.x, -i32::from(DRAG_SIDE_OVERFLOW));
        assert_eq!(rect.y, 0);
    }

    #[test]
    fn drag_focuses_on_entry() {
        let (mut wm, mut gestures, a) = setup();
        let b = wm.open_application(AppId::Projects);
        assert_eq!(wm.frontmost(), Some(b));
        gestures.begin_drag(&mut wm, a, 70, 3);
        assert_eq!(wm.frontmost(), Some(a));
    }

    #[test]
    fn second_press_cannot_start_a_concurrent_gesture() {
        let (mut wm, mut gestures, a) = setup();
        let b = wm.open_application(AppId::Projects);
        assert!(gestures.begin_drag(&mut wm, a, 70, 3));
        assert!(!gestures.begin_drag(&mut wm, b, 71, 4));
        assert!(!gestures.begin_resize(&mut wm, b, ResizeEdge::Right, 71, 4));
    }

    #[test]
    fn maximized_windows_refuse_gestures() {
        let (mut wm, mut gestures, id) = setup();
        wm.toggle_maximize(id).unwrap();
        assert!(!gestures.begin_drag(&mut wm, id, 10, 0));
        assert!(!gestures.begin_resize(&mut wm, id, ResizeEdge::BottomRight, 10, 10));
    }

    #[test]
    fn resize_commits_live_and_clamps_minimums() {
        let (mut wm, mut gestures, id) = setup();
        let start = wm.rect_of(id).unwrap();
        let corner_col = (start.right() - 1) as u16;
        let corner_row = (start.bottom() - 1) as u16;
        assert!(gestures.begin_resize(&mut wm, id, ResizeEdge::BottomRight, corner_col, corner_row));

        gestures.pointer_moved(&mut wm, corner_col + 8, corner_row + 3);
        let grown = wm.rect_of(id).unwrap();
        assert_eq!(grown.width, start.width + 8);
        assert_eq!(grown.height, start.height + 3);

        // dragging far past the top-left never shrinks below the minimums
        gestures.pointer_moved(&mut wm, 0, 0);
        let clamped = wm.rect_of(id).unwrap();
        assert_eq!(clamped.width, MIN_WINDOW_WIDTH);
        assert_eq!(clamped.height, MIN_WINDOW_HEIGHT);

        assert!(gestures.released(&mut wm, 0, 0));
        assert_eq!(wm.rect_of(id).unwrap(), clamped);
    }

    #[test]
    fn interruption_finishes_the_gesture_with_last_geometry() {
        let (mut wm, mut gestures, id) = setup();
        let before = wm.rect_of(id).unwrap();
        gestures.begin_drag(&mut wm, id, 70, 3);
        gestures.pointer_moved(&mut wm, 76, 8);
        gestures.interrupted(&mut wm);

        assert!(!gestures.is_active());
        let after = wm.rect_of(id).unwrap();
        assert_eq!(after.x, before.x + 6);
        assert_eq!(after.y, before.y + 5);

        // a fresh gesture can start afterwards
        assert!(gestures.begin_drag(&mut wm, id, 10, 10));
    }

    #[test]
    fn idle_controller_ignores_motion_and_release() {
        let (mut wm, mut gestures, _id) = setup();
        assert!(!gestures.pointer_moved(&mut wm, 5, 5));
        assert!(!gestures.released(&mut wm, 5, 5));
        gestures.interrupted(&mut wm);
    }
}
