//! Clients for third-party services consumed by content panels.
//!
//! Network calls run on worker threads and report back through channels;
//! failures become displayed status, never faults in the window manager.

pub mod email;
pub mod turnstile;
