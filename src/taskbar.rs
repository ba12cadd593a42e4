//! The taskbar: launchers, running windows, weather, clock, and the
//! settings popup.
//!
//! The taskbar owns no window-authoritative state. Every frame it re-renders
//! from read-only inputs and registers hit rects; the desktop routes presses
//! through the `hit_test_*` queries.

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear};

use crate::apps::{APPS, AppId};
use crate::constants::TASKBAR_HEIGHT;
use crate::state::{BRIGHTNESS_STEP, SettingsState};
use crate::theme;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};
use crate::widgets::clock;
use crate::widgets::weather::WeatherState;
use crate::window::WindowId;

/// One running-window entry, precomputed by the desktop from the manager's
/// creation-order listing.
#[derive(Debug, Clone)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub icon: &'static str,
    pub title: String,
    pub minimized: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, Copy)]
struct Hit<T> {
    value: T,
    rect: Rect,
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[derive(Debug, Default)]
struct SettingsPopup {
    open: bool,
    rect: Option<Rect>,
    brightness_down: Option<Rect>,
    brightness_up: Option<Rect>,
    hour_toggle: Option<Rect>,
}

impl SettingsPopup {
    fn begin_frame(&mut self) {
        self.rect = None;
        self.brightness_down = None;
        self.brightness_up = None;
        self.hour_toggle = None;
    }
}

#[derive(Debug)]
pub struct Taskbar {
    area: Rect,
    launcher_hits: Vec<Hit<AppId>>,
    window_hits: Vec<Hit<WindowId>>,
    weather_rect: Option<Rect>,
    settings_rect: Option<Rect>,
    popup: SettingsPopup,
    hostname: Option<String>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self {
            area: Rect::default(),
            launcher_hits: Vec::new(),
            window_hits: Vec::new(),
            weather_rect: None,
            settings_rect: None,
            popup: SettingsPopup::default(),
            hostname: None,
        }
    }

    /// Split the full terminal area into the desktop region and the
    /// taskbar strip at the bottom.
    pub fn split_area(&mut self, area: Rect) -> (Rect, Rect) {
        let bar_height = TASKBAR_HEIGHT.min(area.height);
        let bar = Rect {
            x: area.x,
            y: area.y + area.height - bar_height,
            width: area.width,
            height: bar_height,
        };
        let desktop = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height - bar_height,
        };
        self.area = bar;
        (desktop, bar)
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn settings_open(&self) -> bool {
        self.popup.open
    }

    pub fn toggle_settings(&mut self) {
        self.popup.open = !self.popup.open;
    }

    pub fn close_settings(&mut self) {
        self.popup.open = false;
    }

    /// Whether the point lands on taskbar chrome (the strip or the open
    /// settings popup).
    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
            || (self.popup.open
                && self
                    .popup
                    .rect
                    .is_some_and(|rect| rect_contains(rect, column, row)))
    }

    pub fn hit_test_launcher(&self, column: u16, row: u16) -> Option<AppId> {
        self.launcher_hits
            .iter()
            .find(|hit| rect_contains(hit.rect, column, row))
            .map(|hit| hit.value)
    }

    pub fn hit_test_window(&self, column: u16, row: u16) -> Option<WindowId> {
        self.window_hits
            .iter()
            .find(|hit| rect_contains(hit.rect, column, row))
            .map(|hit| hit.value)
    }

    pub fn hit_test_weather(&self, column: u16, row: u16) -> bool {
        self.weather_rect
            .is_some_and(|rect| rect_contains(rect, column, row))
    }

    pub fn hit_test_settings_toggle(&self, column: u16, row: u16) -> bool {
        self.settings_rect
            .is_some_and(|rect| rect_contains(rect, column, row))
    }

    /// Presses inside the open popup; mutates settings directly. Returns
    /// whether the press was consumed.
    pub fn handle_settings_press(
        &mut self,
        column: u16,
        row: u16,
        settings: &mut SettingsState,
    ) -> bool {
        if !self.popup.open {
            return false;
        }
        if self
            .popup
            .brightness_down
            .is_some_and(|rect| rect_contains(rect, column, row))
        {
            settings.adjust_brightness(-i16::from(BRIGHTNESS_STEP));
            return true;
        }
        if self
            .popup
            .brightness_up
            .is_some_and(|rect| rect_contains(rect, column, row))
        {
            settings.adjust_brightness(i16::from(BRIGHTNESS_STEP));
            return true;
        }
        if self
            .popup
            .hour_toggle
            .is_some_and(|rect| rect_contains(rect, column, row))
        {
            settings.toggle_hour_format();
            return true;
        }
        self.popup
            .rect
            .is_some_and(|rect| rect_contains(rect, column, row))
    }

    pub fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        entries: &[TaskbarEntry],
        weather: &WeatherState,
        settings: &SettingsState,
    ) {
        self.launcher_hits.clear();
        self.window_hits.clear();
        self.weather_rect = None;
        self.settings_rect = None;
        self.popup.begin_frame();

        let area = self.area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let frame_area = frame.area();
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(frame_area);
        for y in bounds.y..bounds.y + bounds.height {
            for x in bounds.x..bounds.x + bounds.width {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(
                        Style::default()
                            .bg(theme::taskbar_bg())
                            .fg(theme::taskbar_fg()),
                    );
                }
            }
        }

        self.render_launcher_row(frame, bounds, entries);
        if area.height > 1 {
            self.render_status_row(frame, bounds, weather, settings);
        }
        if self.popup.open {
            self.render_settings_popup(frame, settings);
        }
    }

    fn render_launcher_row(
        &mut self,
        frame: &mut UiFrame<'_>,
        bounds: Rect,
        entries: &[TaskbarEntry],
    ) {
        let buffer = frame.buffer_mut();
        let y = bounds.y;
        let mut x = bounds.x + 1;
        let max_x = bounds.x + bounds.width;

        for descriptor in APPS {
            let chunk = format!(" {} ", descriptor.icon);
            let width = chunk.chars().count() as u16;
            if x + width > max_x {
                break;
            }
            safe_set_string(
                buffer,
                bounds,
                x,
                y,
                &chunk,
                Style::default().fg(theme::accent()),
            );
            self.launcher_hits.push(Hit {
                value: descriptor.id,
                rect: Rect {
                    x,
                    y,
                    width,
                    height: 1,
                },
            });
            x += width;
        }

        if x + 2 <= max_x {
            safe_set_string(
                buffer,
                bounds,
                x,
                y,
                " │ ",
                Style::default().fg(theme::muted()),
            );
            x += 3;
        }

        for entry in entries {
            let mut title = entry.title.clone();
            let remaining = usize::from(max_x.saturating_sub(x).saturating_sub(4));
            if title.chars().count() > remaining {
                title = truncate_to_width(&title, remaining);
            }
            let chunk = format!(" {} {} ", entry.icon, title);
            let width = chunk.chars().count() as u16;
            if width == 0 || x + width > max_x {
                break;
            }
            let style = if entry.focused && !entry.minimized {
                Style::default()
                    .bg(theme::taskbar_highlight_bg())
                    .fg(theme::taskbar_highlight_fg())
                    .add_modifier(Modifier::BOLD)
            } else if entry.minimized {
                Style::default()
                    .fg(theme::taskbar_inactive_fg())
                    .add_modifier(Modifier::DIM)
            } else {
                Style::default().fg(theme::taskbar_fg())
            };
            safe_set_string(buffer, bounds, x, y, &chunk, style);
            self.window_hits.push(Hit {
                value: entry.id,
                rect: Rect {
                    x,
                    y,
                    width,
                    height: 1,
                },
            });
            x += width + 1;
        }
    }

    fn render_status_row(
        &mut self,
        frame: &mut UiFrame<'_>,
        bounds: Rect,
        weather: &WeatherState,
        settings: &SettingsState,
    ) {
        let buffer = frame.buffer_mut();
        let y = bounds.y + 1;
        let max_x = bounds.x + bounds.width;

        // weather summary, leftmost; clicking it refreshes
        let (weather_text, weather_style) = match weather {
            WeatherState::Loading => (
                "… fetching weather".to_string(),
                Style::default().fg(theme::muted()),
            ),
            WeatherState::Ready(report) => (
                format!(
                    "{} {}°C {} · {}  hum {}%  wind {}km/h",
                    report.glyph,
                    report.temp_c,
                    report.description,
                    report.location,
                    report.humidity,
                    report.wind_kmh
                ),
                Style::default().fg(theme::taskbar_fg()),
            ),
            WeatherState::Unavailable => (
                "⚠ weather unavailable".to_string(),
                Style::default().fg(theme::warning()),
            ),
        };
        let x = bounds.x + 1;
        let weather_width = (weather_text.chars().count() as u16).min(max_x.saturating_sub(x));
        safe_set_string(buffer, bounds, x, y, &weather_text, weather_style);
        if weather_width > 0 {
            self.weather_rect = Some(Rect {
                x,
                y,
                width: weather_width,
                height: 1,
            });
        }

        // right side: settings toggle, clock, host identity
        let now = Local::now().naive_local();
        let clock_text = format!(
            "{} · {}",
            clock::format_time(&now, settings.twenty_four_hour()),
            clock::format_date(&now)
        );
        let hostname = self.hostname.get_or_insert_with(|| {
            hostname::get()
                .ok()
                .and_then(|s| s.into_string().ok())
                .unwrap_or_else(|| "unknown-host".to_string())
        });
        let identity = format!("{hostname} · {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let settings_chunk = "[ settings ]";

        let total = settings_chunk.chars().count() as u16
            + 2
            + clock_text.chars().count() as u16
            + 3
            + identity.chars().count() as u16;
        let mut cursor = if total >= bounds.width {
            bounds.x + 1
        } else {
            max_x - total - 1
        };
        let settings_style = if self.popup.open {
            Style::default()
                .bg(theme::taskbar_highlight_bg())
                .fg(theme::taskbar_highlight_fg())
        } else {
            Style::default().fg(theme::accent())
        };
        safe_set_string(buffer, bounds, cursor, y, settings_chunk, settings_style);
        self.settings_rect = Some(Rect {
            x: cursor,
            y,
            width: settings_chunk.chars().count() as u16,
            height: 1,
        });
        cursor += settings_chunk.chars().count() as u16 + 2;
        safe_set_string(
            buffer,
            bounds,
            cursor,
            y,
            &clock_text,
            Style::default()
                .fg(theme::taskbar_fg())
                .add_modifier(Modifier::BOLD),
        );
        cursor += clock_text.chars().count() as u16 + 3;
        safe_set_string(
            buffer,
            bounds,
            cursor,
            y,
            &identity,
            Style::default().fg(theme::muted()),
        );
    }

    fn render_settings_popup(&mut self, frame: &mut UiFrame<'_>, settings: &SettingsState) {
        let frame_area = frame.area();
        let width = 30u16.min(frame_area.width);
        let height = 5u16.min(frame_area.height.saturating_sub(TASKBAR_HEIGHT));
        if width < 10 || height < 5 {
            return;
        }
        let popup = Rect {
            x: frame_area.x + frame_area.width.saturating_sub(width + 1),
            y: frame_area.y
                + frame_area
                    .height
                    .saturating_sub(TASKBAR_HEIGHT)
                    .saturating_sub(height),
            width,
            height,
        };
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Block::bordered().style(
                Style::default()
                    .bg(theme::taskbar_bg())
                    .fg(theme::taskbar_fg()),
            ),
            popup,
        );
        let buffer = frame.buffer_mut();
        let bounds = popup.intersection(frame_area);
        safe_set_string(
            buffer,
            bounds,
            popup.x + 2,
            popup.y + 1,
            "Settings",
            Style::default()
                .fg(theme::accent())
                .add_modifier(Modifier::BOLD),
        );

        let row = popup.y + 2;
        safe_set_string(
            buffer,
            bounds,
            popup.x + 2,
            row,
            "Brightness",
            Style::default(),
        );
        let down_x = popup.x + 14;
        safe_set_string(
            buffer,
            bounds,
            down_x,
            row,
            "[-]",
            Style::default().fg(theme::accent()),
        );
        safe_set_string(
            buffer,
            bounds,
            down_x + 4,
            row,
            &format!("{:>3}%", settings.brightness()),
            Style::default().add_modifier(Modifier::BOLD),
        );
        let up_x = down_x + 9;
        safe_set_string(
            buffer,
            bounds,
            up_x,
            row,
            "[+]",
            Style::default().fg(theme::accent()),
        );
        self.popup.brightness_down = Some(Rect {
            x: down_x,
            y: row,
            width: 3,
            height: 1,
        });
        self.popup.brightness_up = Some(Rect {
            x: up_x,
            y: row,
            width: 3,
            height: 1,
        });

        let row = popup.y + 3;
        safe_set_string(buffer, bounds, popup.x + 2, row, "24-hour", Style::default());
        let toggle = if settings.twenty_four_hour() {
            "[ on  ]"
        } else {
            "[ off ]"
        };
        let toggle_style = if settings.twenty_four_hour() {
            Style::default()
                .fg(theme::success())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::taskbar_inactive_fg())
        };
        safe_set_string(buffer, bounds, down_x, row, toggle, toggle_style);
        self.popup.hour_toggle = Some(Rect {
            x: down_x,
            y: row,
            width: toggle.chars().count() as u16,
            height: 1,
        });
        self.popup.rect = Some(popup);
    }
}

impl Default for Taskbar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn render_taskbar(taskbar: &mut Taskbar, entries: &[TaskbarEntry]) -> Buffer {
        let area = Rect {
            x: 0,
            y: 0,
            width: 120,
            height: 40,
        };
        let (_, _) = taskbar.split_area(area);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        taskbar.render(
            &mut frame,
            entries,
            &WeatherState::Unavailable,
            &SettingsState::new(),
        );
        buffer
    }

    #[test]
    fn split_reserves_bottom_rows() {
        let mut taskbar = Taskbar::new();
        let (desktop, bar) = taskbar.split_area(Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 30,
        });
        assert_eq!(desktop.height, 30 - TASKBAR_HEIGHT);
        assert_eq!(bar.height, TASKBAR_HEIGHT);
        assert_eq!(bar.y, 30 - TASKBAR_HEIGHT);
    }

    #[test]
    fn launchers_register_hits_for_every_app() {
        let mut taskbar = Taskbar::new();
        let _ = render_taskbar(&mut taskbar, &[]);
        assert_eq!(taskbar.launcher_hits.len(), APPS.len());
        for hit in &taskbar.launcher_hits {
            assert_eq!(
                taskbar.hit_test_launcher(hit.rect.x, hit.rect.y),
                Some(hit.value)
            );
        }
    }

    #[test]
    fn window_entries_are_hit_testable() {
        let mut taskbar = Taskbar::new();
        let entries = vec![
            TaskbarEntry {
                id: WindowId(1),
                icon: "◆",
                title: "About Me".into(),
                minimized: false,
                focused: true,
            },
            TaskbarEntry {
                id: WindowId(2),
                icon: "▤",
                title: "Projects".into(),
                minimized: true,
                focused: false,
            },
        ];
        let _ = render_taskbar(&mut taskbar, &entries);
        assert_eq!(taskbar.window_hits.len(), 2);
        let rect = taskbar.window_hits[1].rect;
        assert_eq!(taskbar.hit_test_window(rect.x, rect.y), Some(WindowId(2)));
        assert_eq!(taskbar.hit_test_window(rect.x, 0), None);
    }

    #[test]
    fn weather_and_settings_are_hit_testable() {
        let mut taskbar = Taskbar::new();
        let _ = render_taskbar(&mut taskbar, &[]);
        let weather = taskbar.weather_rect.unwrap();
        assert!(taskbar.hit_test_weather(weather.x, weather.y));
        let gear = taskbar.settings_rect.unwrap();
        assert!(taskbar.hit_test_settings_toggle(gear.x, gear.y));
        assert!(!taskbar.hit_test_weather(gear.x, gear.y));
    }

    #[test]
    fn settings_popup_adjusts_state() {
        let mut taskbar = Taskbar::new();
        taskbar.toggle_settings();
        let _ = render_taskbar(&mut taskbar, &[]);
        let mut settings = SettingsState::new();

        let down = taskbar.popup.brightness_down.unwrap();
        assert!(taskbar.handle_settings_press(down.x, down.y, &mut settings));
        assert_eq!(settings.brightness(), 90);

        let toggle = taskbar.popup.hour_toggle.unwrap();
        assert!(taskbar.handle_settings_press(toggle.x, toggle.y, &mut settings));
        assert!(settings.twenty_four_hour());

        // clicks inside the popup body are consumed without effect
        let body = taskbar.popup.rect.unwrap();
        assert!(taskbar.handle_settings_press(body.x + 1, body.y, &mut settings));
    }

    #[test]
    fn contains_covers_strip_and_open_popup() {
        let mut taskbar = Taskbar::new();
        let _ = render_taskbar(&mut taskbar, &[]);
        let bar = taskbar.area();
        assert!(taskbar.contains(bar.x, bar.y));
        assert!(!taskbar.contains(bar.x, 0));

        taskbar.toggle_settings();
        let _ = render_taskbar(&mut taskbar, &[]);
        let popup = taskbar.popup.rect.unwrap();
        assert!(taskbar.contains(popup.x + 1, popup.y + 1));
    }
}
