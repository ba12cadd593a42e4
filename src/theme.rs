use ratatui::style::Color;

// Centralized theme colors so chrome, taskbar, and panels stay consistent.

pub fn desktop_bg() -> Color {
    Color::Rgb(16, 28, 48)
}
pub fn desktop_fg() -> Color {
    Color::Gray
}

pub fn window_bg() -> Color {
    Color::Rgb(28, 30, 38)
}
pub fn window_fg() -> Color {
    Color::White
}

pub fn titlebar_focused_bg() -> Color {
    Color::Blue
}
pub fn titlebar_focused_fg() -> Color {
    Color::White
}
pub fn titlebar_bg() -> Color {
    Color::DarkGray
}
pub fn titlebar_fg() -> Color {
    Color::Gray
}

pub fn border() -> Color {
    Color::DarkGray
}
pub fn border_focused() -> Color {
    Color::Cyan
}

pub fn taskbar_bg() -> Color {
    Color::Rgb(12, 14, 20)
}
pub fn taskbar_fg() -> Color {
    Color::Gray
}
pub fn taskbar_highlight_bg() -> Color {
    Color::Blue
}
pub fn taskbar_highlight_fg() -> Color {
    Color::White
}
pub fn taskbar_inactive_fg() -> Color {
    Color::DarkGray
}

pub fn accent() -> Color {
    Color::Cyan
}
pub fn success() -> Color {
    Color::Green
}
pub fn warning() -> Color {
    Color::Yellow
}
pub fn error() -> Color {
    Color::Red
}
pub fn muted() -> Color {
    Color::DarkGray
}

pub fn gauge_filled() -> Color {
    Color::Cyan
}
pub fn gauge_empty() -> Color {
    Color::DarkGray
}
