use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::{Component, ComponentContext, ScrollText};
use crate::theme;
use crate::ui::UiFrame;

struct Skill {
    name: &'static str,
    /// 0..=10, rendered as a ten-cell gauge.
    level: u8,
}

struct Category {
    title: &'static str,
    skills: &'static [Skill],
}

const CATEGORIES: &[Category] = &[
    Category {
        title: "Languages",
        skills: &[
            Skill { name: "Rust", level: 9 },
            Skill { name: "Python", level: 8 },
            Skill { name: "C", level: 7 },
            Skill { name: "JavaScript", level: 6 },
        ],
    },
    Category {
        title: "Backend & Data",
        skills: &[
            Skill { name: "PostgreSQL", level: 8 },
            Skill { name: "Redis", level: 6 },
            Skill { name: "Kafka", level: 5 },
        ],
    },
    Category {
        title: "ML & Scientific",
        skills: &[
            Skill { name: "NumPy / SciPy", level: 7 },
            Skill { name: "PyTorch", level: 6 },
            Skill { name: "scikit-learn", level: 6 },
        ],
    },
    Category {
        title: "Tooling",
        skills: &[
            Skill { name: "Git", level: 9 },
            Skill { name: "Linux", level: 8 },
            Skill { name: "Docker", level: 7 },
        ],
    },
];

fn gauge(level: u8) -> String {
    let filled = usize::from(level.min(10));
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

pub struct SkillsPanel {
    text: ScrollText,
}

impl SkillsPanel {
    pub fn new() -> Self {
        let mut lines = vec![
            Line::from(Span::styled(
                "Skills",
                Style::default()
                    .fg(theme::accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for category in CATEGORIES {
            lines.push(Line::from(Span::styled(
                category.title,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for skill in category.skills {
                lines.push(Line::from(vec![
                    Span::raw(format!("  {:<16}", skill.name)),
                    Span::styled(gauge(skill.level), Style::default().fg(theme::gauge_filled())),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "Also comfortable with: data structures, operating systems, networks.",
            Style::default().fg(theme::muted()),
        )));
        Self {
            text: ScrollText::new(lines),
        }
    }
}

impl Default for SkillsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SkillsPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        self.text.render(frame, area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        self.text.handle_key(event, 12)
    }
}
