//! Outbound message relay for the contact form.
//!
//! Speaks the EmailJS wire format: a single JSON POST carrying the service,
//! template, and public-key identifiers plus the form fields as template
//! params. There is no retry policy; failures surface to the user and the
//! only recourse is manual resubmission.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::Duration;

use serde_json::json;

use crate::error::ServiceError;

const SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Relay credentials, sourced from the environment.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl EmailConfig {
    /// `None` when the relay is not configured; the contact panel then
    /// reports that sending is unavailable instead of failing.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            service_id: std::env::var("EMAILJS_SERVICE_ID").ok()?,
            template_id: std::env::var("EMAILJS_TEMPLATE_ID").ok()?,
            public_key: std::env::var("EMAILJS_PUBLIC_KEY").ok()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailStatus {
    Sending,
    Sent,
    Failed(String),
}

/// Fire-and-forget sender; the UI drains status updates on its tick.
pub struct EmailSender {
    tx: Sender<EmailStatus>,
    rx: Receiver<EmailStatus>,
    in_flight: bool,
}

impl EmailSender {
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

    /// Spawn the relay call. Ignored while a send is already in flight
    /// (resubmission is manual, after the outcome is known).
    pub fn send(&mut self, config: &EmailConfig, message: OutboundMessage) {
        if self.in_flight {
            return;
        }
        self.in_flight = true;
        let tx = self.tx.clone();
        let config = config.clone();
        thread::spawn(move || {
            let status = match relay(&config, &message) {
                Ok(()) => EmailStatus::Sent,
                Err(err) => {
                    tracing::warn!(%err, "email relay failed");
                    EmailStatus::Failed(err.to_string())
                }
            };
            let _ = tx.send(status);
        });
    }

    /// Latest status update, if the worker delivered one.
    pub fn poll(&mut self) -> Option<EmailStatus> {
        let status = self.rx.try_recv().ok()?;
        if !matches!(status, EmailStatus::Sending) {
            self.in_flight = false;
        }
        Some(status)
    }
}

impl Default for EmailSender {
    fn default() -> Self {
        Self::new()
    }
}

fn relay(config: &EmailConfig, message: &OutboundMessage) -> Result<(), ServiceError> {
    let payload = json!({
        "service_id": config.service_id,
        "template_id": config.template_id,
        "user_id": config.public_key,
        "template_params": {
            "from_name": message.name,
            "reply_to": message.email,
            "subject": message.subject,
            "message": message.body,
        },
    });
    let client = reqwest::blocking::Client::builder()
        .timeout(SEND_TIMEOUT)
        .build()?;
    let response = client.post(SEND_URL).json(&payload).send()?;
    if response.status().is_success() {
        Ok(())
    } else {
        Err(ServiceError::Rejected(format!(
            "relay returned {}",
            response.status()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_starts_idle() {
        let mut sender = EmailSender::new();
        assert!(!sender.in_flight());
        assert_eq!(sender.poll(), None);
    }

    #[test]
    fn terminal_status_clears_in_flight() {
        let mut sender = EmailSender::new();
        sender.in_flight = true;
        sender.tx.send(EmailStatus::Sent).unwrap();
        assert_eq!(sender.poll(), Some(EmailStatus::Sent));
        assert!(!sender.in_flight());
    }

    #[test]
    fn failure_status_carries_the_reason() {
        let mut sender = EmailSender::new();
        sender.in_flight = true;
        sender
            .tx
            .send(EmailStatus::Failed("relay returned 400".into()))
            .unwrap();
        match sender.poll() {
            Some(EmailStatus::Failed(reason)) => assert!(reason.contains("400")),
            other => panic!("unexpected status: {other:?}"),
        }
        assert!(!sender.in_flight());
    }
}
