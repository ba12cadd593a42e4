use thiserror::Error;

use crate::window::WindowId;

/// Errors produced by the window-manager core.
///
/// `InvalidApplication` rejects the call; `NotFound` is logged by the
/// manager and safe for callers to ignore.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DesktopError {
    #[error("unknown application: {0:?}")]
    InvalidApplication(String),
    #[error("no window with id {0}")]
    NotFound(WindowId),
}

/// Failures from external services (weather, email relay, verification).
///
/// These are always surfaced as a degraded widget or panel state; they never
/// propagate into the window manager.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("service rejected the request: {0}")]
    Rejected(String),
}
