use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};

pub enum ControlFlow {
    Continue,
    Quit,
}

/// The centralized event loop driving the UI thread.
///
/// This is the only place that polls or reads terminal input. The handler
/// receives `Some(event)` for input and `None` when the poll interval lapses
/// (the tick used for redraws, the clock, and draining background channels).
/// Background work runs on worker threads and feeds state through channels;
/// it never touches the loop directly.
pub struct EventLoop {
    poll_interval: Duration,
}

impl EventLoop {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            let next = if event::poll(self.poll_interval)? {
                Some(event::read()?)
            } else {
                None
            };
            match handler(next)? {
                ControlFlow::Continue => {}
                ControlFlow::Quit => break,
            }
        }
        Ok(())
    }
}
