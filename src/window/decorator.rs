//! Window chrome: borders, title bar, control buttons, resize affordances.
//!
//! Rendering happens in window-local coordinates (the window is composed
//! offscreen and blitted); hit-testing happens in screen coordinates against
//! the window's signed rect.

use ratatui::style::{Modifier, Style};

use super::WinRect;
use crate::geometry::ResizeEdge;
use crate::theme;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// What a press on the title row means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Drag,
    Minimize,
    Maximize,
    Close,
}

const MINIMIZE_GLYPH: &str = "−";
const MAXIMIZE_GLYPH: &str = "□";
const RESTORE_GLYPH: &str = "❐";
const CLOSE_GLYPH: &str = "×";

/// Offset of each control button from the window's right edge, on the title
/// row. Buttons are one cell wide with a one-cell gap.
const CLOSE_OFFSET: u16 = 2;
const MAXIMIZE_OFFSET: u16 = 4;
const MINIMIZE_OFFSET: u16 = 6;

/// Content area in window-local coordinates: inside the one-cell border.
pub fn content_area(rect: WinRect) -> ratatui::prelude::Rect {
    ratatui::prelude::Rect {
        x: 1,
        y: 1,
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

/// Classify a press on the title row. `None` when the point is outside it.
pub fn hit_test_header(rect: WinRect, column: u16, row: u16) -> Option<HeaderAction> {
    if !rect.contains(column, row) || i32::from(row) != rect.y {
        return None;
    }
    let col = i32::from(column);
    let from_right = rect.right() - 1 - col;
    if rect.width > MINIMIZE_OFFSET + 1 {
        match from_right {
            f if f == i32::from(CLOSE_OFFSET) => return Some(HeaderAction::Close),
            f if f == i32::from(MAXIMIZE_OFFSET) => return Some(HeaderAction::Maximize),
            f if f == i32::from(MINIMIZE_OFFSET) => return Some(HeaderAction::Minimize),
            _ => {}
        }
        // the cells between and right of the buttons are dead space, not a
        // drag grip
        if from_right <= i32::from(MINIMIZE_OFFSET) + 1 {
            return None;
        }
    }
    Some(HeaderAction::Drag)
}

/// Classify a press on a resize affordance: right edge, bottom edge, or the
/// bottom-right corner. Corners shared with the title row are excluded.
pub fn hit_test_resize(rect: WinRect, column: u16, row: u16) -> Option<ResizeEdge> {
    if !rect.contains(column, row) || rect.width < 2 || rect.height < 2 {
        return None;
    }
    let col = i32::from(column);
    let row = i32::from(row);
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;
    if col == right && row == bottom {
        return Some(ResizeEdge::BottomRight);
    }
    if col == right && row > rect.y && row < bottom {
        return Some(ResizeEdge::Right);
    }
    if row == bottom && col > rect.x && col < right {
        return Some(ResizeEdge::Bottom);
    }
    None
}

/// Paint the chrome into a window-local frame.
pub fn render(frame: &mut UiFrame<'_>, rect: WinRect, title: &str, focused: bool, maximized: bool) {
    let width = rect.width;
    let height = rect.height;
    if width < 2 || height < 2 {
        return;
    }
    let border_style = if focused {
        Style::default().fg(theme::border_focused())
    } else {
        Style::default().fg(theme::border())
    };
    let header_style = if focused {
        Style::default()
            .bg(theme::titlebar_focused_bg())
            .fg(theme::titlebar_focused_fg())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(theme::titlebar_bg())
            .fg(theme::titlebar_fg())
    };

    let bounds = rect.local();
    let buffer = frame.buffer_mut();
    let right = width - 1;
    let bottom = height - 1;

    // title row: corners stay border-styled, the strip between them carries
    // the header background
    safe_set_string(buffer, bounds, 0, 0, "┌", border_style);
    for x in 1..right {
        safe_set_string(buffer, bounds, x, 0, " ", header_style);
    }
    safe_set_string(buffer, bounds, right, 0, "┐", border_style);

    let button_span = MINIMIZE_OFFSET + 2;
    let title_max = usize::from(width.saturating_sub(button_span).saturating_sub(3));
    if title_max > 0 {
        let text = truncate_to_width(title, title_max);
        safe_set_string(buffer, bounds, 2, 0, &text, header_style);
    }
    if width > MINIMIZE_OFFSET + 1 {
        let maximize_glyph = if maximized {
            RESTORE_GLYPH
        } else {
            MAXIMIZE_GLYPH
        };
        safe_set_string(buffer, bounds, right - MINIMIZE_OFFSET, 0, MINIMIZE_GLYPH, header_style);
        safe_set_string(buffer, bounds, right - MAXIMIZE_OFFSET, 0, maximize_glyph, header_style);
        safe_set_string(buffer, bounds, right - CLOSE_OFFSET, 0, CLOSE_GLYPH, header_style);
    }

    // side borders
    for y in 1..bottom {
        safe_set_string(buffer, bounds, 0, y, "│", border_style);
        safe_set_string(buffer, bounds, right, y, "│", border_style);
    }

    // bottom border with the corner resize grip
    safe_set_string(buffer, bounds, 0, bottom, "└", border_style);
    for x in 1..right {
        safe_set_string(buffer, bounds, x, bottom, "─", border_style);
    }
    safe_set_string(buffer, bounds, right, bottom, "◢", border_style);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> WinRect {
        WinRect {
            x: 10,
            y: 5,
            width: 40,
            height: 12,
        }
    }

    #[test]
    fn header_hit_classifies_buttons_and_grip() {
        let r = rect();
        let title_row = 5;
        // right edge is column 49; buttons at 47 / 45 / 43
        assert_eq!(hit_test_header(r, 47, title_row), Some(HeaderAction::Close));
        assert_eq!(
            hit_test_header(r, 45, title_row),
            Some(HeaderAction::Maximize)
        );
        assert_eq!(
            hit_test_header(r, 43, title_row),
            Some(HeaderAction::Minimize)
        );
        assert_eq!(hit_test_header(r, 20, title_row), Some(HeaderAction::Drag));
        // between/next to buttons is dead space, not a drag grip
        assert_eq!(hit_test_header(r, 46, title_row), None);
        assert_eq!(hit_test_header(r, 48, title_row), None);
    }

    #[test]
    fn header_hit_misses_other_rows() {
        let r = rect();
        assert_eq!(hit_test_header(r, 20, 6), None);
        assert_eq!(hit_test_header(r, 20, 4), None);
        assert_eq!(hit_test_header(r, 9, 5), None);
    }

    #[test]
    fn resize_hit_covers_three_affordances() {
        let r = rect();
        // right edge col 49, bottom row 16
        assert_eq!(hit_test_resize(r, 49, 16), Some(ResizeEdge::BottomRight));
        assert_eq!(hit_test_resize(r, 49, 10), Some(ResizeEdge::Right));
        assert_eq!(hit_test_resize(r, 30, 16), Some(ResizeEdge::Bottom));
        // title-row corner and bottom-left corner are not affordances
        assert_eq!(hit_test_resize(r, 49, 5), None);
        assert_eq!(hit_test_resize(r, 10, 16), None);
        // interior is not an affordance
        assert_eq!(hit_test_resize(r, 30, 10), None);
    }

    #[test]
    fn header_hit_works_with_negative_origin() {
        let r = WinRect {
            x: -6,
            y: 0,
            width: 40,
            height: 12,
        };
        // visible part of the title row still drags
        assert_eq!(hit_test_header(r, 0, 0), Some(HeaderAction::Drag));
        // close button sits at right-2 = column 31
        assert_eq!(hit_test_header(r, 31, 0), Some(HeaderAction::Close));
    }

    #[test]
    fn content_area_is_inside_the_border() {
        let area = content_area(rect());
        assert_eq!(area.x, 1);
        assert_eq!(area.y, 1);
        assert_eq!(area.width, 38);
        assert_eq!(area.height, 10);
    }
}
