use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Rect;

use term_desk::desktop::Desktop;
use term_desk::event_loop::{ControlFlow, EventLoop};
use term_desk::tracing_sub;

#[derive(Debug, Parser)]
#[command(name = "term-desk", about = "A desktop environment simulation for terminal shells.")]
struct Cli {
    /// Write diagnostics to this file (the terminal itself is busy).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// UI poll interval in milliseconds.
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Disable network-backed widgets (weather stays "unavailable").
    #[arg(long)]
    offline: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    tracing_sub::init(cli.log_file.as_deref())?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let viewport = Rect {
        x: 0,
        y: 0,
        width: size.width,
        height: size.height,
    };
    let mut desktop = Desktop::new(viewport, cli.offline);

    let result = run(&mut terminal, &mut desktop, Duration::from_millis(cli.tick_ms));

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    desktop: &mut Desktop,
    poll_interval: Duration,
) -> io::Result<()> {
    let mut event_loop = EventLoop::new(poll_interval);
    event_loop.run(|event| {
        match event {
            Some(Event::Key(key))
                if key.kind == KeyEventKind::Press
                    && key.code == KeyCode::Char('q')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return Ok(ControlFlow::Quit);
            }
            Some(event) => {
                desktop.handle_event(&event);
            }
            None => desktop.tick(),
        }
        terminal.draw(|frame| desktop.render(frame))?;
        Ok(ControlFlow::Continue)
    })
}
