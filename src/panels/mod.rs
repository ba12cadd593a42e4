//! Content panels: the display units rendered inside windows.
//!
//! Panels are self-contained: they receive draw area and events, and never
//! reach into window-manager state. A panel that fails stays degraded inside
//! its own draw region. Unknown application keys fall back to a generic
//! panel instead of failing.

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::ui::UiFrame;

pub mod about;
pub mod contact;
pub mod experience;
pub mod projects;
pub mod resume;
pub mod skills;
pub mod terminal;
pub mod unknown;

pub use crate::component_context::ComponentContext;
pub use about::AboutPanel;
pub use contact::ContactPanel;
pub use experience::ExperiencePanel;
pub use projects::ProjectsPanel;
pub use resume::ResumePanel;
pub use skills::SkillsPanel;
pub use terminal::TerminalPanel;
pub use unknown::UnknownPanel;

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}

/// The content-panel contract: a renderable unit for an application key.
/// Unknown keys get the fallback panel rather than an error.
pub fn for_key(key: &str) -> Box<dyn Component> {
    match key {
        "about" => Box::new(AboutPanel::new()),
        "projects" => Box::new(ProjectsPanel::new()),
        "skills" => Box::new(SkillsPanel::new()),
        "contact" => Box::new(ContactPanel::new()),
        "resume" => Box::new(ResumePanel::new()),
        "experience" => Box::new(ExperiencePanel::new()),
        "terminal" => Box::new(TerminalPanel::new()),
        other => Box::new(UnknownPanel::new(other)),
    }
}

/// Scrollable static text shared by the simpler panels.
#[derive(Debug)]
pub(crate) struct ScrollText {
    lines: Vec<Line<'static>>,
    offset: u16,
}

impl ScrollText {
    pub(crate) fn new(lines: Vec<Line<'static>>) -> Self {
        Self { lines, offset: 0 }
    }

    fn max_offset(&self, view_rows: u16) -> u16 {
        (self.lines.len() as u16).saturating_sub(view_rows.max(1))
    }

    pub(crate) fn scroll(&mut self, delta: i16, view_rows: u16) {
        let next = i32::from(self.offset) + i32::from(delta);
        self.offset = next.clamp(0, i32::from(self.max_offset(view_rows))) as u16;
    }

    /// Standard scroll keys; returns whether the event was consumed.
    pub(crate) fn handle_key(&mut self, event: &Event, view_rows: u16) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Up => self.scroll(-1, view_rows),
            KeyCode::Down => self.scroll(1, view_rows),
            KeyCode::PageUp => self.scroll(-(view_rows.max(1) as i16), view_rows),
            KeyCode::PageDown => self.scroll(view_rows.max(1) as i16, view_rows),
            KeyCode::Home => self.offset = 0,
            KeyCode::End => self.offset = self.max_offset(view_rows),
            _ => return false,
        }
        true
    }

    pub(crate) fn render(&self, frame: &mut UiFrame<'_>, area: Rect) {
        let paragraph = Paragraph::new(self.lines.clone())
            .wrap(Wrap { trim: false })
            .scroll((self.offset, 0));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn scroll_text_clamps_at_both_ends() {
        let lines: Vec<Line<'static>> = (0..10).map(|i| Line::from(format!("line {i}"))).collect();
        let mut text = ScrollText::new(lines);
        assert!(text.handle_key(&key(KeyCode::Up), 4));
        assert_eq!(text.offset, 0);
        assert!(text.handle_key(&key(KeyCode::End), 4));
        assert_eq!(text.offset, 6);
        assert!(text.handle_key(&key(KeyCode::Down), 4));
        assert_eq!(text.offset, 6);
        assert!(text.handle_key(&key(KeyCode::Home), 4));
        assert_eq!(text.offset, 0);
    }

    #[test]
    fn factory_covers_every_descriptor_and_falls_back() {
        for descriptor in crate::apps::APPS {
            let _ = for_key(descriptor.key);
        }
        // unknown keys produce the fallback panel rather than failing
        let _ = for_key("not-an-app");
    }
}
