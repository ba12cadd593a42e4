//! Independent taskbar widgets: the clock and the weather poller. Each runs
//! on its own cadence with no shared state beyond what the taskbar reads to
//! render.

pub mod clock;
pub mod weather;
