//! Bot-verification widget and token verifier.
//!
//! Mirrors the challenge-widget lifecycle: a widget is mounted into the
//! contact panel, hands over an opaque token when the challenge completes,
//! and can be reset or removed at any time — both idempotent no-ops when no
//! widget is mounted. Tokens are proven against a verification endpoint that
//! answers `{ "success": bool }`.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Deserialize;

use crate::error::ServiceError;

const DEFAULT_VERIFY_URL: &str = "https://cf-turnstile-verify.rndas.workers.dev";
const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoint configuration. Verification is optional: with no site key in the
/// environment the widget is never mounted and the contact form skips the
/// challenge step.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    pub verify_url: String,
}

impl VerifyConfig {
    pub fn from_env() -> Option<Self> {
        std::env::var("TURNSTILE_SITEKEY").ok()?;
        Some(Self {
            verify_url: std::env::var("TURNSTILE_VERIFY_URL")
                .unwrap_or_else(|_| DEFAULT_VERIFY_URL.to_string()),
        })
    }
}

/// Client-side widget state machine.
#[derive(Debug, Default)]
pub struct ChallengeWidget {
    widget_id: Option<u32>,
    next_id: u32,
    token: Option<String>,
}

impl ChallengeWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted(&self) -> bool {
        self.widget_id.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Mount the widget; returns its id. Re-mounting an already mounted
    /// widget keeps the existing instance.
    pub fn mount(&mut self) -> u32 {
        if let Some(id) = self.widget_id {
            return id;
        }
        self.next_id += 1;
        let id = self.next_id;
        self.widget_id = Some(id);
        self.token = None;
        id
    }

    /// Completion callback: the challenge produced a token.
    pub fn complete(&mut self, token: String) {
        if self.mounted() {
            self.token = Some(token);
        }
    }

    /// Clear the widget back to its unsolved state. No-op when nothing is
    /// mounted.
    pub fn reset(&mut self) {
        if self.mounted() {
            self.token = None;
        }
    }

    /// Tear the widget down. No-op when nothing is mounted.
    pub fn remove(&mut self) {
        self.widget_id = None;
        self.token = None;
    }
}

/// An opaque challenge token. The terminal has no real third-party widget to
/// host, so completion mints a nonce locally; the proof still round-trips
/// through the verification endpoint.
pub fn mint_token() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("tok-{nanos:x}")
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyStatus {
    Verified,
    Denied,
    Failed(String),
}

/// Background verifier; same worker-thread/channel shape as the email
/// sender.
pub struct Verifier {
    tx: Sender<VerifyStatus>,
    rx: Receiver<VerifyStatus>,
    in_flight: bool,
}

impl Verifier {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            in_flight: false,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn submit(&mut self, config: &VerifyConfig, token: String) {
        if self.in_flight {
            return;
        }
        self.in_flight = true;
        let tx = self.tx.clone();
        let url = config.verify_url.clone();
        thread::spawn(move || {
            let status = match verify_token(&url, &token) {
                Ok(true) => VerifyStatus::Verified,
                Ok(false) => VerifyStatus::Denied,
                Err(err) => {
                    tracing::warn!(%err, "token verification failed");
                    VerifyStatus::Failed(err.to_string())
                }
            };
            let _ = tx.send(status);
        });
    }

    pub fn poll(&mut self) -> Option<VerifyStatus> {
        let status = self.rx.try_recv().ok()?;
        self.in_flight = false;
        Some(status)
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}

fn verify_token(url: &str, token: &str) -> Result<bool, ServiceError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(VERIFY_TIMEOUT)
        .build()?;
    let response = client
        .post(url)
        .json(&serde_json::json!({ "response": token }))
        .send()?;
    if !response.status().is_success() {
        return Err(ServiceError::Rejected(format!(
            "verifier returned {}",
            response.status()
        )));
    }
    let decoded: VerifyResponse = response
        .json()
        .map_err(|err| ServiceError::Decode(err.to_string()))?;
    Ok(decoded.success)
}
