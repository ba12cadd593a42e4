use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::{Component, ComponentContext, ScrollText};
use crate::theme;
use crate::ui::UiFrame;

struct Entry {
    period: &'static str,
    role: &'static str,
    place: &'static str,
    summary: &'static str,
}

const TIMELINE: &[Entry] = &[
    Entry {
        period: "2025 — now",
        role: "Systems Engineer (Intern)",
        place: "Fieldline Labs",
        summary: "Telemetry ingestion for embedded fleets; took the hot path from 40k to 300k events/s.",
    },
    Entry {
        period: "2024",
        role: "Backend Developer",
        place: "Campus Software Group",
        summary: "Built and ran the course-registration backend used by ~12k students each term.",
    },
    Entry {
        period: "2023",
        role: "Research Assistant",
        place: "Signal Processing Lab",
        summary: "Prototyped FFT-based anomaly detection for sensor streams; two posters, one demo day.",
    },
    Entry {
        period: "2022",
        role: "Open Source Contributor",
        place: "various",
        summary: "Bug fixes and docs across the terminal-tooling ecosystem; first merged patch, first rejected one too.",
    },
];

pub struct ExperiencePanel {
    text: ScrollText,
}

impl ExperiencePanel {
    pub fn new() -> Self {
        let mut lines = vec![
            Line::from(Span::styled(
                "Experience",
                Style::default()
                    .fg(theme::accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for entry in TIMELINE {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<12}", entry.period),
                    Style::default().fg(theme::muted()),
                ),
                Span::styled(
                    entry.role,
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  ·  "),
                Span::styled(entry.place, Style::default().fg(theme::accent())),
            ]));
            lines.push(Line::from(format!("             {}", entry.summary)));
            lines.push(Line::from(""));
        }
        Self {
            text: ScrollText::new(lines),
        }
    }
}

impl Default for ExperiencePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ExperiencePanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        self.text.render(frame, area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        self.text.handle_key(event, 12)
    }
}
