use ratatui::prelude::Rect;

use super::{WinRect, Window, WindowId};
use crate::apps::AppId;
use crate::constants::Z_BASELINE;
use crate::error::DesktopError;
use crate::geometry;

/// Partial geometry change applied by [`WindowManager::update_geometry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryUpdate {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u16>,
    pub height: Option<u16>,
}

impl GeometryUpdate {
    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: u16, height: u16) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }
}

/// Owns the collection of open windows and every mutation over it.
///
/// All operations are synchronous state transitions; the collection is
/// consistent before control returns to the event loop. z values come from a
/// strictly increasing counter, so no two windows ever share one and the
/// maximum is always the frontmost window.
#[derive(Debug)]
pub struct WindowManager {
    windows: Vec<Window>,
    viewport: Rect,
    next_id: u32,
    next_z: u64,
}

impl WindowManager {
    pub fn new(viewport: Rect) -> Self {
        Self {
            windows: Vec::new(),
            viewport,
            next_id: 1,
            next_z: Z_BASELINE + 1,
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Viewport change (terminal resize). Maximized windows track the new
    /// derived rect so maximize persists across resizes.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        let maximized = geometry::maximized_rect(viewport);
        for window in &mut self.windows {
            if window.maximized {
                window.rect = maximized;
            }
        }
    }

    fn bump_z(&mut self) -> u64 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    fn lookup_mut(&mut self, id: WindowId) -> Result<&mut Window, DesktopError> {
        match self.windows.iter_mut().find(|window| window.id == id) {
            Some(window) => Ok(window),
            None => {
                tracing::warn!(window_id = %id, "ignoring operation on unknown window");
                Err(DesktopError::NotFound(id))
            }
        }
    }

    /// Open an application, or focus its existing window: at most one window
    /// per application exists at any time.
    pub fn open_application(&mut self, app: AppId) -> WindowId {
        if let Some(existing) = self.windows.iter().find(|window| window.app == app) {
            let id = existing.id;
            let _ = self.focus(id);
            return id;
        }
        let rect = geometry::centered_spawn(self.viewport, self.windows.len());
        let id = WindowId(self.next_id);
        self.next_id += 1;
        let z = self.bump_z();
        tracing::debug!(window_id = %id, app = app.key(), z, "opened window");
        self.windows.push(Window::new(id, app, rect, z));
        id
    }

    /// String-keyed open used by launchers; unknown keys are rejected with
    /// `InvalidApplication`.
    pub fn open_application_key(&mut self, key: &str) -> Result<WindowId, DesktopError> {
        let app = AppId::parse(key)?;
        Ok(self.open_application(app))
    }

    /// Remove a window permanently. Its id is never reused.
    pub fn close(&mut self, id: WindowId) -> Result<(), DesktopError> {
        self.lookup_mut(id)?;
        tracing::debug!(window_id = %id, "closing window");
        self.windows.retain(|window| window.id != id);
        Ok(())
    }

    /// Hide a window. Geometry and z are untouched; the taskbar is the only
    /// way back.
    pub fn minimize(&mut self, id: WindowId) -> Result<(), DesktopError> {
        self.lookup_mut(id)?.minimized = true;
        Ok(())
    }

    /// Un-minimize and raise: restoring always implies focusing.
    pub fn restore(&mut self, id: WindowId) -> Result<(), DesktopError> {
        self.lookup_mut(id)?.minimized = false;
        self.focus(id)
    }

    /// Raise a window to a fresh maximum z. Deliberately increments even when
    /// the window is already frontmost, keeping z values unambiguous.
    pub fn focus(&mut self, id: WindowId) -> Result<(), DesktopError> {
        self.lookup_mut(id)?;
        let z = self.bump_z();
        if let Some(window) = self.windows.iter_mut().find(|window| window.id == id) {
            window.z = z;
        }
        Ok(())
    }

    /// Toggle between maximized (viewport minus taskbar strip) and the saved
    /// prior geometry. Always focuses.
    pub fn toggle_maximize(&mut self, id: WindowId) -> Result<(), DesktopError> {
        let maximized_rect = geometry::maximized_rect(self.viewport);
        let window = self.lookup_mut(id)?;
        if window.maximized {
            if let Some(prior) = window.prior_rect.take() {
                window.rect = prior;
            }
            window.maximized = false;
        } else {
            window.prior_rect = Some(window.rect);
            window.rect = maximized_rect;
            window.maximized = true;
        }
        self.focus(id)
    }

    /// Commit a partial geometry change. Ignored while maximized: maximized
    /// geometry is derived, and gestures are disabled for such windows
    /// anyway.
    pub fn update_geometry(
        &mut self,
        id: WindowId,
        update: GeometryUpdate,
    ) -> Result<(), DesktopError> {
        let window = self.lookup_mut(id)?;
        if window.maximized {
            tracing::debug!(window_id = %id, "geometry update skipped for maximized window");
            return Ok(());
        }
        if let Some(x) = update.x {
            window.rect.x = x;
        }
        if let Some(y) = update.y {
            window.rect.y = y;
        }
        if let Some(width) = update.width {
            window.rect.width = width;
        }
        if let Some(height) = update.height {
            window.rect.height = height;
        }
        Ok(())
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|window| window.id == id)
    }

    /// All windows in creation order (taskbar listing).
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Paint order: visible windows sorted by ascending z.
    pub fn draw_order(&self) -> Vec<WindowId> {
        let mut visible: Vec<&Window> = self.windows.iter().filter(|w| w.visible()).collect();
        visible.sort_by_key(|window| window.z);
        visible.into_iter().map(|window| window.id).collect()
    }

    /// The window the user perceives as focused: maximum z among visible
    /// windows.
    pub fn frontmost(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|window| window.visible())
            .max_by_key(|window| window.z)
            .map(|window| window.id)
    }

    /// Topmost visible window under the pointer, by descending z.
    pub fn window_at(&self, column: u16, row: u16) -> Option<WindowId> {
        self.draw_order()
            .into_iter()
            .rev()
            .find(|id| {
                self.window(*id)
                    .is_some_and(|window| window.rect.contains(column, row))
            })
    }

    /// The rect a window currently occupies (callers pass ids from queries,
    /// so a missing id yields `None`).
    pub fn rect_of(&self, id: WindowId) -> Option<WinRect> {
        self.window(id).map(|window| window.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TASKBAR_HEIGHT;

    fn manager() -> WindowManager {
        WindowManager::new(Rect {
            x: 0,
            y: 0,
            width: 200,
            height: 50,
        })
    }

    #[test]
    fn first_open_assigns_id_one_and_baseline_z() {
        let mut wm = manager();
        let id = wm.open_application(AppId::About);
        assert_eq!(id, WindowId(1));
        let window = wm.window(id).unwrap();
        assert_eq!(window.z, Z_BASELINE + 1);
        assert_eq!(window.title, "About Me");
    }

    #[test]
    fn reopen_focuses_existing_instance() {
        let mut wm = manager();
        let first = wm.open_application(AppId::About);
        let second = wm.open_application(AppId::About);
        assert_eq!(first, second);
        assert_eq!(wm.windows().len(), 1);
        // z raised to the running maximum on the second call
        assert_eq!(wm.window(first).unwrap().z, Z_BASELINE + 2);
    }

    #[test]
    fn minimize_then_restore_scenario() {
        let mut wm = manager();
        let about = wm.open_application(AppId::About);
        let projects = wm.open_application(AppId::Projects);
        assert_eq!(projects, WindowId(2));
        assert_eq!(wm.window(projects).unwrap().z, Z_BASELINE + 2);

        wm.minimize(about).unwrap();
        let minimized = wm.window(about).unwrap();
        assert!(minimized.minimized);
        assert_eq!(minimized.z, Z_BASELINE + 1);

        wm.restore(about).unwrap();
        let restored = wm.window(about).unwrap();
        assert!(!restored.minimized);
        assert_eq!(restored.z, Z_BASELINE + 3);
        assert_eq!(wm.frontmost(), Some(about));
    }

    #[test]
    fn minimize_preserves_geometry() {
        let mut wm = manager();
        let id = wm.open_application(AppId::Skills);
        let before = wm.rect_of(id).unwrap();
        wm.minimize(id).unwrap();
        wm.restore(id).unwrap();
        assert_eq!(wm.rect_of(id).unwrap(), before);
    }

    #[test]
    fn focus_always_wins_over_every_other_window() {
        let mut wm = manager();
        let a = wm.open_application(AppId::About);
        let b = wm.open_application(AppId::Projects);
        let c = wm.open_application(AppId::Terminal);
        wm.focus(a).unwrap();
        let za = wm.window(a).unwrap().z;
        assert!(za > wm.window(b).unwrap().z);
        assert!(za > wm.window(c).unwrap().z);
        // refocusing the frontmost window still increments
        wm.focus(a).unwrap();
        assert!(wm.window(a).unwrap().z > za);
    }

    #[test]
    fn z_values_stay_distinct() {
        let mut wm = manager();
        let a = wm.open_application(AppId::About);
        let b = wm.open_application(AppId::Projects);
        let c = wm.open_application(AppId::Contact);
        for id in [a, b, c, a, b] {
            wm.focus(id).unwrap();
        }
        let mut zs: Vec<u64> = wm.windows().iter().map(|w| w.z).collect();
        zs.sort_unstable();
        zs.dedup();
        assert_eq!(zs.len(), 3);
    }

    #[test]
    fn maximize_toggle_restores_exact_prior_geometry() {
        let mut wm = manager();
        let id = wm.open_application(AppId::Projects);
        wm.update_geometry(id, GeometryUpdate::position(17, 5)).unwrap();
        let before = wm.rect_of(id).unwrap();

        wm.toggle_maximize(id).unwrap();
        let maximized = wm.window(id).unwrap();
        assert!(maximized.maximized);
        assert_eq!(maximized.rect.x, 0);
        assert_eq!(maximized.rect.y, 0);
        assert_eq!(maximized.rect.width, 200);
        assert_eq!(maximized.rect.height, 50 - TASKBAR_HEIGHT);
        assert_eq!(maximized.prior_rect, Some(before));

        wm.toggle_maximize(id).unwrap();
        let restored = wm.window(id).unwrap();
        assert!(!restored.maximized);
        assert_eq!(restored.rect, before);
        assert_eq!(restored.prior_rect, None);
    }

    #[test]
    fn geometry_updates_are_ignored_while_maximized() {
        let mut wm = manager();
        let id = wm.open_application(AppId::About);
        wm.toggle_maximize(id).unwrap();
        wm.update_geometry(id, GeometryUpdate::position(3, 3)).unwrap();
        let window = wm.window(id).unwrap();
        assert_eq!(window.rect.x, 0);
        assert_eq!(window.rect.y, 0);
    }

    #[test]
    fn maximized_window_tracks_viewport_resize() {
        let mut wm = manager();
        let id = wm.open_application(AppId::About);
        wm.toggle_maximize(id).unwrap();
        wm.set_viewport(Rect {
            x: 0,
            y: 0,
            width: 120,
            height: 40,
        });
        let rect = wm.rect_of(id).unwrap();
        assert_eq!(rect.width, 120);
        assert_eq!(rect.height, 40 - TASKBAR_HEIGHT);
    }

    #[test]
    fn close_removes_and_never_reuses_ids() {
        let mut wm = manager();
        let first = wm.open_application(AppId::About);
        wm.close(first).unwrap();
        assert!(wm.is_empty());
        let second = wm.open_application(AppId::About);
        assert_ne!(first, second);
    }

    #[test]
    fn operations_on_stale_ids_report_not_found() {
        let mut wm = manager();
        let id = wm.open_application(AppId::About);
        wm.close(id).unwrap();
        assert_eq!(wm.close(id), Err(DesktopError::NotFound(id)));
        assert_eq!(wm.minimize(id), Err(DesktopError::NotFound(id)));
        assert_eq!(wm.focus(id), Err(DesktopError::NotFound(id)));
        assert_eq!(
            wm.update_geometry(id, GeometryUpdate::position(0, 0)),
            Err(DesktopError::NotFound(id))
        );
    }

    #[test]
    fn open_key_rejects_unknown_applications() {
        let mut wm = manager();
        assert!(matches!(
            wm.open_application_key("solitaire"),
            Err(DesktopError::InvalidApplication(_))
        ));
        assert!(wm.is_empty());
        assert!(wm.open_application_key("terminal").is_ok());
    }

    #[test]
    fn draw_order_is_ascending_z_without_minimized() {
        let mut wm = manager();
        let a = wm.open_application(AppId::About);
        let b = wm.open_application(AppId::Projects);
        let c = wm.open_application(AppId::Contact);
        wm.focus(a).unwrap();
        wm.minimize(b).unwrap();
        assert_eq!(wm.draw_order(), vec![c, a]);
        assert_eq!(wm.frontmost(), Some(a));
    }

    #[test]
    fn window_at_prefers_topmost_overlap() {
        let mut wm = manager();
        let a = wm.open_application(AppId::About);
        let b = wm.open_application(AppId::Projects);
        // staggered spawns overlap heavily; a point inside both hits the
        // frontmost window
        let rect = wm.rect_of(b).unwrap();
        let col = (rect.x + 4) as u16;
        let row = (rect.y + 2) as u16;
        assert_eq!(wm.window_at(col, row), Some(b));
        wm.focus(a).unwrap();
        assert_eq!(wm.window_at(col, row), Some(a));
    }
}
