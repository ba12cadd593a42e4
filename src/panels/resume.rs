use crossterm::event::{Event, KeyCode, KeyEventKind};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::{Component, ComponentContext, ScrollText};
use crate::theme;
use crate::ui::UiFrame;

const RESUME_URL: &str = "https://example.com/resume.pdf";

const SUMMARY: &str = indoc! {"
    Education
      B.Tech, Computer Science — graduating 2026

    Highlights
      · Telemetry pipeline work: 7x throughput on the ingestion hot path
      · Course-registration backend serving ~12k students per term
      · Regular open-source contributor in the terminal-tooling space

    The full PDF has the details, references, and the obligatory
    two-column layout.
"};

/// Resume summary; the full document opens in the system browser.
pub struct ResumePanel {
    text: ScrollText,
    status: Option<String>,
}

impl ResumePanel {
    pub fn new() -> Self {
        let mut lines = vec![
            Line::from(Span::styled(
                "Resume",
                Style::default()
                    .fg(theme::accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "press o to open the PDF in your browser",
                Style::default().fg(theme::muted()),
            )),
            Line::from(""),
        ];
        lines.extend(SUMMARY.lines().map(|line| Line::from(line.to_string())));
        Self {
            text: ScrollText::new(lines),
            status: None,
        }
    }
}

impl Default for ResumePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ResumePanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        let body = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        self.text.render(frame, body);
        if let Some(status) = &self.status {
            let status_area = Rect {
                x: area.x,
                y: area.y + area.height.saturating_sub(1),
                width: area.width,
                height: 1.min(area.height),
            };
            frame.render_widget(
                ratatui::widgets::Paragraph::new(Line::from(Span::styled(
                    status.clone(),
                    Style::default().fg(theme::muted()),
                ))),
                status_area,
            );
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
            && key.code == KeyCode::Char('o')
        {
            self.status = Some(match webbrowser::open(RESUME_URL) {
                Ok(()) => format!("opened {RESUME_URL}"),
                Err(err) => {
                    tracing::warn!(%err, "failed to open resume link");
                    "could not open a browser here".to_string()
                }
            });
            return true;
        }
        self.text.handle_key(event, 12)
    }
}
