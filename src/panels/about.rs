use crossterm::event::Event;
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::{Component, ComponentContext, ScrollText};
use crate::theme;
use crate::ui::UiFrame;

const BIO: &str = indoc! {"
    Welcome to the desktop. I'm a builder at heart: I like taking a rough
    idea, pushing it through the awkward middle part, and shipping something
    people can actually poke at.

    Most of my time goes into systems and tooling work, with detours into
    machine learning pipelines and the occasional game jam. I care about
    software that stays understandable a year after it was written.

    When the editor is closed you'll find me on a bicycle, in a library, or
    arguing about coffee brewing ratios.
"};

pub struct AboutPanel {
    text: ScrollText,
}

impl AboutPanel {
    pub fn new() -> Self {
        let mut lines = vec![
            Line::from(Span::styled(
                "About Me",
                Style::default()
                    .fg(theme::accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(BIO.lines().map(|line| Line::from(line.to_string())));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  ▪ 25+ projects shipped   ▪ 4 years tinkering   ▪ endless curiosity",
            Style::default().fg(theme::muted()),
        )));
        Self {
            text: ScrollText::new(lines),
        }
    }
}

impl Default for AboutPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AboutPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        self.text.render(frame, area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        self.text.handle_key(event, 12)
    }
}
