//! The simulated terminal panel.
//!
//! A canned command interpreter over a tiny in-memory file tree. It runs in
//! the same execution context as everything else; no shell or PTY is
//! involved.

use chrono::Local;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{Component, ComponentContext};
use crate::theme;
use crate::ui::UiFrame;

const USER: &str = "guest";
const HOST: &str = "term-desk";
const HOME: &str = "/home/guest";

enum Node {
    Dir(&'static [(&'static str, Node)]),
    File(&'static str),
}

static ROOT: Node = Node::Dir(&[
    (
        "home",
        Node::Dir(&[(
            "guest",
            Node::Dir(&[
                (
                    "readme.txt",
                    Node::File(
                        "Thanks for dropping by. Everything on this desktop is\n\
                         navigable from here too: try `ls projects`.",
                    ),
                ),
                (
                    "projects",
                    Node::Dir(&[
                        (
                            "signal-workbench.md",
                            Node::File("Time-series toolkit. FFT, curve fitting, anomaly flags."),
                        ),
                        (
                            "trial-finder.md",
                            Node::File("Graph-backed recommender for clinical study protocols."),
                        ),
                        (
                            "kart-chaos.md",
                            Node::File("WebGL racing toy. Watch the fuel gauge."),
                        ),
                    ]),
                ),
                (
                    "skills.txt",
                    Node::File("rust python c postgres redis git linux"),
                ),
                (
                    "contact.txt",
                    Node::File("Open the Contact window, or email hello@term-desk.dev"),
                ),
            ]),
        )]),
    ),
    ("etc", Node::Dir(&[("motd", Node::File("welcome to term-desk"))])),
]);

fn lookup(components: &[String]) -> Option<&'static Node> {
    let mut current = &ROOT;
    for part in components {
        let Node::Dir(entries) = current else {
            return None;
        };
        current = &entries.iter().find(|(name, _)| name == part)?.1;
    }
    Some(current)
}

const HELP: &[&str] = &[
    "Available commands:",
    "  ls [path]      - list a directory",
    "  cd [path]      - change directory",
    "  pwd            - print the working directory",
    "  cat <file>     - print a file",
    "  echo <text>    - print text",
    "  whoami / uname - identify things",
    "  date           - current date and time",
    "  clear          - wipe the screen",
    "  help           - this message",
];

pub struct TerminalPanel {
    cwd: Vec<String>,
    output: Vec<String>,
    input: String,
    history: Vec<String>,
    history_index: Option<usize>,
}

impl TerminalPanel {
    pub fn new() -> Self {
        Self {
            cwd: HOME.split('/').filter(|p| !p.is_empty()).map(String::from).collect(),
            output: vec![
                format!("{HOST} — type \"help\" for commands"),
                String::new(),
            ],
            input: String::new(),
            history: Vec::new(),
            history_index: None,
        }
    }

    fn cwd_display(&self) -> String {
        let absolute = format!("/{}", self.cwd.join("/"));
        match absolute.strip_prefix(HOME) {
            Some("") => "~".to_string(),
            Some(rest) => format!("~{rest}"),
            None => absolute,
        }
    }

    fn prompt(&self) -> String {
        format!("{USER}@{HOST}:{}$ ", self.cwd_display())
    }

    /// Resolve a path argument relative to the cwd into absolute components.
    /// `..` above the root stays at the root.
    fn resolve(&self, path: &str) -> Vec<String> {
        let mut components: Vec<String> = if path.starts_with('/') {
            Vec::new()
        } else {
            self.cwd.clone()
        };
        for part in path.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    components.pop();
                }
                other => components.push(other.to_string()),
            }
        }
        components
    }

    fn run(&mut self, line: &str) {
        let prompt = self.prompt();
        self.output.push(format!("{prompt}{line}"));
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        self.history.push(trimmed.to_string());
        self.history_index = None;

        let mut parts = trimmed.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();
        match command {
            "ls" => {
                let target = self.resolve(args.first().copied().unwrap_or("."));
                match lookup(&target) {
                    Some(Node::Dir(entries)) => {
                        let mut names: Vec<String> = entries
                            .iter()
                            .map(|(name, node)| match node {
                                Node::Dir(_) => format!("{name}/"),
                                Node::File(_) => name.to_string(),
                            })
                            .collect();
                        names.sort();
                        self.output.push(names.join("  "));
                    }
                    Some(Node::File(_)) => self.output.push(target.join("/")),
                    None => self.output.push(format!(
                        "ls: cannot access '{}': No such file or directory",
                        args.first().copied().unwrap_or(".")
                    )),
                }
            }
            "cd" => {
                let target = match args.first() {
                    Some(path) => self.resolve(path),
                    None => self.resolve(HOME),
                };
                match lookup(&target) {
                    Some(Node::Dir(_)) => self.cwd = target,
                    Some(Node::File(_)) => self
                        .output
                        .push(format!("cd: not a directory: {}", args[0])),
                    None => self.output.push(format!(
                        "cd: no such file or directory: {}",
                        args.first().copied().unwrap_or("")
                    )),
                }
            }
            "pwd" => self.output.push(format!("/{}", self.cwd.join("/"))),
            "whoami" => self.output.push(USER.to_string()),
            "date" => self
                .output
                .push(Local::now().format("%a %b %e %H:%M:%S %Y").to_string()),
            "cat" => match args.first() {
                Some(path) => match lookup(&self.resolve(path)) {
                    Some(Node::File(contents)) => {
                        self.output.extend(contents.lines().map(String::from));
                    }
                    Some(Node::Dir(_)) => {
                        self.output.push(format!("cat: {path}: Is a directory"));
                    }
                    None => self
                        .output
                        .push(format!("cat: {path}: No such file or directory")),
                },
                None => self.output.push("cat: missing operand".to_string()),
            },
            "echo" => self.output.push(args.join(" ")),
            "uname" => self
                .output
                .push(format!("{HOST} {} terminal", env!("CARGO_PKG_VERSION"))),
            "clear" => self.output.clear(),
            "help" => self.output.extend(HELP.iter().map(|s| s.to_string())),
            other => self
                .output
                .push(format!("{other}: command not found")),
        }
    }

    fn recall(&mut self, backwards: bool) {
        if self.history.is_empty() {
            return;
        }
        let next = match (self.history_index, backwards) {
            (None, true) => Some(self.history.len() - 1),
            (None, false) => None,
            (Some(i), true) => Some(i.saturating_sub(1)),
            (Some(i), false) => {
                if i + 1 >= self.history.len() {
                    None
                } else {
                    Some(i + 1)
                }
            }
        };
        self.history_index = next;
        self.input = match next {
            Some(i) => self.history[i].clone(),
            None => String::new(),
        };
    }
}

impl Default for TerminalPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TerminalPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        let rows = usize::from(area.height.max(1)) - 1;
        let start = self.output.len().saturating_sub(rows);
        let mut lines: Vec<Line> = self.output[start..]
            .iter()
            .map(|line| Line::from(line.clone()))
            .collect();
        let cursor = if ctx.focused() { "█" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(
                self.prompt(),
                Style::default()
                    .fg(theme::success())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.input.clone()),
            Span::styled(cursor, Style::default().fg(theme::accent())),
        ]));
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.input.push(c);
                true
            }
            KeyCode::Backspace => {
                self.input.pop();
                true
            }
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input);
                self.run(&line);
                true
            }
            KeyCode::Up => {
                self.recall(true);
                true
            }
            KeyCode::Down => {
                self.recall(false);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last(panel: &TerminalPanel) -> &str {
        panel.output.last().map(String::as_str).unwrap_or("")
    }

    #[test]
    fn ls_lists_home_directory() {
        let mut panel = TerminalPanel::new();
        panel.run("ls");
        assert_eq!(last(&panel), "contact.txt  projects/  readme.txt  skills.txt");
    }

    #[test]
    fn cd_and_pwd_track_the_tree() {
        let mut panel = TerminalPanel::new();
        panel.run("cd projects");
        panel.run("pwd");
        assert_eq!(last(&panel), "/home/guest/projects");
        panel.run("cd ..");
        panel.run("pwd");
        assert_eq!(last(&panel), "/home/guest");
        panel.run("cd /etc");
        panel.run("pwd");
        assert_eq!(last(&panel), "/etc");
    }

    #[test]
    fn cd_without_args_returns_home() {
        let mut panel = TerminalPanel::new();
        panel.run("cd /etc");
        panel.run("cd");
        panel.run("pwd");
        assert_eq!(last(&panel), "/home/guest");
    }

    #[test]
    fn cat_prints_files_and_rejects_directories() {
        let mut panel = TerminalPanel::new();
        panel.run("cat skills.txt");
        assert_eq!(last(&panel), "rust python c postgres redis git linux");
        panel.run("cat projects");
        assert_eq!(last(&panel), "cat: projects: Is a directory");
        panel.run("cat ghost.txt");
        assert_eq!(last(&panel), "cat: ghost.txt: No such file or directory");
    }

    #[test]
    fn unknown_commands_report_not_found() {
        let mut panel = TerminalPanel::new();
        panel.run("make me a sandwich");
        assert_eq!(last(&panel), "make: command not found");
    }

    #[test]
    fn clear_wipes_scrollback() {
        let mut panel = TerminalPanel::new();
        panel.run("help");
        panel.run("clear");
        assert!(panel.output.is_empty());
    }

    #[test]
    fn echo_joins_arguments() {
        let mut panel = TerminalPanel::new();
        panel.run("echo hello   desktop");
        assert_eq!(last(&panel), "hello desktop");
    }

    #[test]
    fn history_recall_walks_backwards_then_forwards() {
        let mut panel = TerminalPanel::new();
        panel.run("pwd");
        panel.run("whoami");
        panel.recall(true);
        assert_eq!(panel.input, "whoami");
        panel.recall(true);
        assert_eq!(panel.input, "pwd");
        panel.recall(false);
        assert_eq!(panel.input, "whoami");
        panel.recall(false);
        assert_eq!(panel.input, "");
    }

    #[test]
    fn prompt_abbreviates_home() {
        let mut panel = TerminalPanel::new();
        assert!(panel.prompt().contains(":~$"));
        panel.run("cd projects");
        assert!(panel.prompt().contains(":~/projects$"));
    }
}
