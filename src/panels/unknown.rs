use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{Component, ComponentContext};
use crate::theme;
use crate::ui::UiFrame;

/// Fallback for application keys no panel claims.
pub struct UnknownPanel {
    key: String,
}

impl UnknownPanel {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }
}

impl Component for UnknownPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Unknown application",
                Style::default().fg(theme::warning()),
            )),
            Line::from(Span::styled(
                format!("no content panel registered for {:?}", self.key),
                Style::default().fg(theme::muted()),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), area);
    }
}
