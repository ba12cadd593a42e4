use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{Component, ComponentContext};
use crate::theme;
use crate::ui::UiFrame;

struct Project {
    title: &'static str,
    summary: &'static str,
    stack: &'static [&'static str],
}

const PROJECTS: &[Project] = &[
    Project {
        title: "Signal Workbench",
        summary: "Time-series analysis toolkit: FFT decomposition, multi-sinusoidal curve \
                  fitting, and anomaly flagging behind a small web frontend.",
        stack: &["Rust", "Axum", "PostgreSQL", "React"],
    },
    Project {
        title: "Trial Finder",
        summary: "Recommender that matches study protocols against a graph of prior clinical \
                  trials using embedding search.",
        stack: &["Python", "Neo4j", "FAISS"],
    },
    Project {
        title: "Glyph Recognizer",
        summary: "Static-frontend tool that interprets handwritten binary symbols with an \
                  in-browser model.",
        stack: &["TensorFlow.js", "HTML", "CSS"],
    },
    Project {
        title: "Kart Chaos",
        summary: "A 3D racing toy: CPU opponents, fuel management, and lap timing, all \
                  rendered in WebGL.",
        stack: &["Three.js", "WebGL"],
    },
    Project {
        title: "This Desktop",
        summary: "The OS-style portfolio you are looking at right now.",
        stack: &["Rust", "ratatui", "crossterm"],
    },
];

/// Selectable project list with a detail pane underneath.
pub struct ProjectsPanel {
    selected: usize,
}

impl ProjectsPanel {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    fn move_selection(&mut self, delta: i32) {
        let len = PROJECTS.len() as i32;
        self.selected = (self.selected as i32 + delta).rem_euclid(len) as usize;
    }
}

impl Default for ProjectsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ProjectsPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Projects",
                Style::default()
                    .fg(theme::accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "↑/↓ to browse",
                Style::default().fg(theme::muted()),
            )),
            Line::from(""),
        ];
        for (idx, project) in PROJECTS.iter().enumerate() {
            let style = if idx == self.selected {
                Style::default()
                    .fg(theme::taskbar_highlight_fg())
                    .bg(theme::taskbar_highlight_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if idx == self.selected { "▸ " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{marker}{}", project.title),
                style,
            )));
        }
        lines.push(Line::from(""));

        let current = &PROJECTS[self.selected];
        lines.push(Line::from(Span::styled(
            current.title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(current.summary));
        lines.push(Line::from(Span::styled(
            format!("stack: {}", current.stack.join(" · ")),
            Style::default().fg(theme::accent()),
        )));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_both_directions() {
        let mut panel = ProjectsPanel::new();
        panel.move_selection(-1);
        assert_eq!(panel.selected, PROJECTS.len() - 1);
        panel.move_selection(1);
        assert_eq!(panel.selected, 0);
        panel.move_selection(PROJECTS.len() as i32 + 2);
        assert_eq!(panel.selected, 2);
    }
}
