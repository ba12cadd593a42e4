//! The desktop shell: icons, window compositing, and event routing.
//!
//! Owns the window manager, the gesture controller, the taskbar, and one
//! content panel per open window. Events flow taskbar-first, then gestures,
//! then the window under the pointer; keyboard input goes to the frontmost
//! window's panel. Every mutation of window state funnels through the
//! manager's operations.

use std::collections::BTreeMap;
use std::time::Instant;

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::apps::{APPS, AppId};
use crate::component_context::ComponentContext;
use crate::constants::ICON_DOUBLE_CLICK;
use crate::panels::{self, Component};
use crate::state::SettingsState;
use crate::taskbar::{Taskbar, TaskbarEntry};
use crate::theme;
use crate::ui::{UiFrame, safe_set_string};
use crate::widgets::weather::WeatherService;
use crate::window::decorator::{self, HeaderAction};
use crate::window::gesture::GestureController;
use crate::window::{WinRect, WindowId, WindowManager};

pub struct Desktop {
    wm: WindowManager,
    gestures: GestureController,
    taskbar: Taskbar,
    panels: BTreeMap<WindowId, Box<dyn Component>>,
    weather: WeatherService,
    settings: SettingsState,
    clipboard_available: bool,
    icon_hits: Vec<(AppId, Rect)>,
    last_icon_press: Option<(AppId, Instant)>,
}

impl Desktop {
    pub fn new(viewport: Rect, offline: bool) -> Self {
        Self {
            wm: WindowManager::new(viewport),
            gestures: GestureController::new(),
            taskbar: Taskbar::new(),
            panels: BTreeMap::new(),
            weather: WeatherService::new(offline),
            settings: SettingsState::new(),
            clipboard_available: crate::clipboard::available(),
            icon_hits: Vec::new(),
            last_icon_press: None,
        }
    }

    pub fn windows(&self) -> &WindowManager {
        &self.wm
    }

    /// Open an application (or focus its existing window) and make sure a
    /// content panel exists for it.
    pub fn open_app(&mut self, app: AppId) -> WindowId {
        let id = self.wm.open_application(app);
        self.panels
            .entry(id)
            .or_insert_with(|| panels::for_key(app.key()));
        id
    }

    fn close_window(&mut self, id: WindowId) {
        if self.wm.close(id).is_ok() {
            self.panels.remove(&id);
        }
    }

    /// Background cadence: drains the weather channel and re-polls on its
    /// interval. Never blocks.
    pub fn tick(&mut self) {
        self.weather.tick();
    }

    fn panel_ctx(&self, id: WindowId) -> ComponentContext {
        ComponentContext::new(self.wm.frontmost() == Some(id))
            .with_clipboard(self.clipboard_available)
    }

    /// Dispatch an event to a window's panel, translating mouse coordinates
    /// into the panel's content space.
    fn forward_to_panel(&mut self, id: WindowId, event: &Event) -> bool {
        let ctx = self.panel_ctx(id);
        let localized = match (event, self.wm.rect_of(id)) {
            (Event::Mouse(mouse), Some(rect)) => {
                let content_x = rect.x + 1;
                let content_y = rect.y + 1;
                let column = (i32::from(mouse.column) - content_x).clamp(0, i32::from(u16::MAX));
                let row = (i32::from(mouse.row) - content_y).clamp(0, i32::from(u16::MAX));
                Event::Mouse(MouseEvent {
                    column: column as u16,
                    row: row as u16,
                    kind: mouse.kind,
                    modifiers: mouse.modifiers,
                })
            }
            _ => event.clone(),
        };
        match self.panels.get_mut(&id) {
            Some(panel) => panel.handle_event(&localized, &ctx),
            None => false,
        }
    }

    fn handle_icon_press(&mut self, app: AppId) {
        let now = Instant::now();
        let double = self
            .last_icon_press
            .is_some_and(|(last, at)| last == app && now.duration_since(at) <= ICON_DOUBLE_CLICK);
        if double {
            self.open_app(app);
            self.last_icon_press = None;
        } else {
            self.last_icon_press = Some((app, now));
        }
    }

    fn handle_taskbar_press(&mut self, column: u16, row: u16) {
        if let Some(app) = self.taskbar.hit_test_launcher(column, row) {
            self.open_app(app);
            return;
        }
        if let Some(id) = self.taskbar.hit_test_window(column, row) {
            // restoring also raises; for a window that was never minimized
            // this is just a focus
            let _ = self.wm.restore(id);
            return;
        }
        if self.taskbar.hit_test_weather(column, row) {
            self.weather.refresh();
            return;
        }
        if self.taskbar.hit_test_settings_toggle(column, row) {
            self.taskbar.toggle_settings();
        }
    }

    fn handle_window_press(&mut self, id: WindowId, mouse: &MouseEvent) {
        let Some(rect) = self.wm.rect_of(id) else {
            return;
        };
        match decorator::hit_test_header(rect, mouse.column, mouse.row) {
            Some(HeaderAction::Minimize) => {
                let _ = self.wm.minimize(id);
                return;
            }
            Some(HeaderAction::Maximize) => {
                let _ = self.wm.toggle_maximize(id);
                return;
            }
            Some(HeaderAction::Close) => {
                self.close_window(id);
                return;
            }
            Some(HeaderAction::Drag) => {
                if self
                    .gestures
                    .begin_drag(&mut self.wm, id, mouse.column, mouse.row)
                {
                    return;
                }
            }
            None => {}
        }
        if let Some(edge) = decorator::hit_test_resize(rect, mouse.column, mouse.row)
            && self
                .gestures
                .begin_resize(&mut self.wm, id, edge, mouse.column, mouse.row)
        {
            return;
        }
        let _ = self.wm.focus(id);
        self.forward_to_panel(id, &Event::Mouse(*mouse));
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.taskbar.settings_open() {
                    if self
                        .taskbar
                        .handle_settings_press(mouse.column, mouse.row, &mut self.settings)
                    {
                        return true;
                    }
                    if self.taskbar.hit_test_settings_toggle(mouse.column, mouse.row) {
                        self.taskbar.close_settings();
                        return true;
                    }
                    self.taskbar.close_settings();
                }
                if self.taskbar.contains(mouse.column, mouse.row) {
                    self.handle_taskbar_press(mouse.column, mouse.row);
                    return true;
                }
                if self.gestures.is_active() {
                    // a second press never starts a concurrent gesture
                    return true;
                }
                if let Some(id) = self.wm.window_at(mouse.column, mouse.row) {
                    self.handle_window_press(id, &mouse);
                    return true;
                }
                if let Some((app, _)) = self
                    .icon_hits
                    .iter()
                    .find(|(_, rect)| {
                        mouse.column >= rect.x
                            && mouse.column < rect.x + rect.width
                            && mouse.row >= rect.y
                            && mouse.row < rect.y + rect.height
                    })
                    .copied()
                {
                    self.handle_icon_press(app);
                    return true;
                }
                false
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.gestures
                    .pointer_moved(&mut self.wm, mouse.column, mouse.row)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.gestures
                    .released(&mut self.wm, mouse.column, mouse.row)
            }
            _ => false,
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Resize(width, height) => {
                self.wm.set_viewport(Rect {
                    x: 0,
                    y: 0,
                    width: *width,
                    height: *height,
                });
                true
            }
            // fallback release: a gesture must not stay stuck when the
            // terminal loses focus and the mouse-up never arrives
            Event::FocusLost => {
                self.gestures.interrupted(&mut self.wm);
                true
            }
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::Key(_) => match self.wm.frontmost() {
                Some(id) => self.forward_to_panel(id, event),
                None => false,
            },
            _ => false,
        }
    }

    fn render_desktop_icons(&mut self, ui: &mut UiFrame<'_>, desktop_area: Rect) {
        self.icon_hits.clear();
        let buffer = ui.buffer_mut();
        for descriptor in APPS {
            let x = desktop_area.x + descriptor.icon_col;
            let y = desktop_area.y + descriptor.icon_row;
            if y + 1 >= desktop_area.y + desktop_area.height {
                continue;
            }
            safe_set_string(
                buffer,
                desktop_area,
                x + 1,
                y,
                descriptor.icon,
                Style::default()
                    .fg(theme::accent())
                    .add_modifier(Modifier::BOLD),
            );
            safe_set_string(
                buffer,
                desktop_area,
                x.saturating_sub(2),
                y + 1,
                descriptor.name,
                Style::default().fg(theme::desktop_fg()),
            );
            let width = (descriptor.name.chars().count() as u16).max(3) + 2;
            self.icon_hits.push((
                descriptor.id,
                Rect {
                    x: x.saturating_sub(2),
                    y,
                    width,
                    height: 2,
                },
            ));
        }
    }

    fn compose_window(&mut self, ui: &mut UiFrame<'_>, id: WindowId) {
        let Some(window) = self.wm.window(id) else {
            return;
        };
        let title = window.title.clone();
        let maximized = window.maximized;
        let rect = self
            .gestures
            .preview_rect(&self.wm, id)
            .unwrap_or(window.rect);
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let focused = self.wm.frontmost() == Some(id);

        let local = rect.local();
        let mut scratch = Buffer::empty(local);
        for y in 0..local.height {
            for x in 0..local.width {
                if let Some(cell) = scratch.cell_mut((x, y)) {
                    cell.set_style(
                        Style::default()
                            .bg(theme::window_bg())
                            .fg(theme::window_fg()),
                    );
                }
            }
        }
        {
            let mut window_frame = UiFrame::from_parts(local, &mut scratch);
            decorator::render(&mut window_frame, rect, &title, focused, maximized);
            let content = decorator::content_area(rect);
            if content.width > 0
                && content.height > 0
                && let Some(panel) = self.panels.get_mut(&id)
            {
                let ctx =
                    ComponentContext::new(focused).with_clipboard(self.clipboard_available);
                panel.render(&mut window_frame, content, &ctx);
            }
        }
        ui.blit_from_signed(&scratch, rect);
    }

    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let mut ui = UiFrame::new(frame);
        let full = ui.area();
        if self.wm.viewport() != full {
            self.wm.set_viewport(full);
        }
        let (desktop_area, _bar) = self.taskbar.split_area(full);

        // wallpaper
        let buffer = ui.buffer_mut();
        for y in desktop_area.y..desktop_area.y + desktop_area.height {
            for x in desktop_area.x..desktop_area.x + desktop_area.width {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(
                        Style::default()
                            .bg(theme::desktop_bg())
                            .fg(theme::desktop_fg()),
                    );
                }
            }
        }
        self.render_desktop_icons(&mut ui, desktop_area);

        // painter's algorithm: ascending z, each window composed offscreen
        for id in self.wm.draw_order() {
            self.compose_window(&mut ui, id);
        }

        let frontmost = self.wm.frontmost();
        let entries: Vec<TaskbarEntry> = self
            .wm
            .windows()
            .iter()
            .map(|window| TaskbarEntry {
                id: window.id,
                icon: window.app.descriptor().icon,
                title: window.title.clone(),
                minimized: window.minimized,
                focused: frontmost == Some(window.id),
            })
            .collect();
        self.taskbar
            .render(&mut ui, &entries, self.weather.state(), &self.settings);

        if self.settings.dim_active() {
            let area = ui.area();
            let buffer = ui.buffer_mut();
            for y in area.y..area.y + area.height {
                for x in area.x..area.x + area.width {
                    if let Some(cell) = buffer.cell_mut((x, y)) {
                        let style = cell.style();
                        cell.set_style(style.add_modifier(Modifier::DIM));
                    }
                }
            }
        }
    }
}

/// Preview-aware rect lookup used by integration tests and the renderer.
impl Desktop {
    pub fn effective_rect(&self, id: WindowId) -> Option<WinRect> {
        self.gestures
            .preview_rect(&self.wm, id)
            .or_else(|| self.wm.rect_of(id))
    }
}
