//! Contact form: name/email/subject/message, an optional verification
//! challenge, and submission through the email relay. Success and failure
//! are surfaced inline; resubmission is manual.

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{Component, ComponentContext};
use crate::clipboard;
use crate::services::email::{EmailConfig, EmailSender, EmailStatus, OutboundMessage};
use crate::services::turnstile::{
    ChallengeWidget, Verifier, VerifyConfig, VerifyStatus, mint_token,
};
use crate::theme;
use crate::ui::UiFrame;

const CONTACT_ADDRESS: &str = "hello@term-desk.dev";

const FIELD_LABELS: [&str; 4] = ["Name", "Email", "Subject", "Message"];

/// Form slots in traversal order: the four fields, then the two buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Field(usize),
    Verify,
    Send,
}

const SLOTS: [Slot; 6] = [
    Slot::Field(0),
    Slot::Field(1),
    Slot::Field(2),
    Slot::Field(3),
    Slot::Verify,
    Slot::Send,
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Verification {
    /// No site key configured; the challenge step is skipped entirely.
    NotRequired,
    Unverified,
    Pending,
    Verified,
    Failed(String),
}

pub struct ContactPanel {
    fields: [String; 4],
    slot: usize,
    status: Option<(String, bool)>,
    email_config: Option<EmailConfig>,
    sender: EmailSender,
    verify_config: Option<VerifyConfig>,
    widget: ChallengeWidget,
    verifier: Verifier,
    verification: Verification,
}

impl ContactPanel {
    pub fn new() -> Self {
        Self::with_configs(EmailConfig::from_env(), VerifyConfig::from_env())
    }

    fn with_configs(
        email_config: Option<EmailConfig>,
        verify_config: Option<VerifyConfig>,
    ) -> Self {
        let mut widget = ChallengeWidget::new();
        let verification = if verify_config.is_some() {
            widget.mount();
            Verification::Unverified
        } else {
            Verification::NotRequired
        };
        Self {
            fields: Default::default(),
            slot: 0,
            status: None,
            email_config,
            sender: EmailSender::new(),
            verify_config,
            widget,
            verifier: Verifier::new(),
            verification,
        }
    }

    fn move_slot(&mut self, delta: i32) {
        let len = SLOTS.len() as i32;
        self.slot = (self.slot as i32 + delta).rem_euclid(len) as usize;
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some((text.into(), is_error));
    }

    fn start_verification(&mut self) {
        let Some(config) = self.verify_config.clone() else {
            self.set_status("verification not required", false);
            return;
        };
        if self.verification == Verification::Verified {
            self.set_status("already verified", false);
            return;
        }
        self.widget.mount();
        let token = mint_token();
        self.widget.complete(token.clone());
        self.verifier.submit(&config, token);
        self.verification = Verification::Pending;
        self.set_status("verifying…", false);
    }

    fn validate(&self) -> Result<OutboundMessage, String> {
        for (field, label) in self.fields.iter().zip(FIELD_LABELS) {
            if field.trim().is_empty() {
                return Err(format!("{label} is required"));
            }
        }
        if !self.fields[1].contains('@') {
            return Err("that email address does not look right".to_string());
        }
        Ok(OutboundMessage {
            name: self.fields[0].trim().to_string(),
            email: self.fields[1].trim().to_string(),
            subject: self.fields[2].trim().to_string(),
            body: self.fields[3].trim().to_string(),
        })
    }

    fn submit(&mut self) {
        let Some(config) = self.email_config.clone() else {
            self.set_status("email relay not configured (EMAILJS_* env vars)", true);
            return;
        };
        if matches!(
            self.verification,
            Verification::Unverified | Verification::Pending | Verification::Failed(_)
        ) {
            self.set_status("complete the verification step first", true);
            return;
        }
        if self.sender.in_flight() {
            return;
        }
        match self.validate() {
            Ok(message) => {
                self.sender.send(&config, message);
                self.set_status("sending…", false);
            }
            Err(reason) => self.set_status(reason, true),
        }
    }

    fn drain_service_updates(&mut self) {
        if let Some(status) = self.verifier.poll() {
            self.verification = match status {
                VerifyStatus::Verified => {
                    self.set_status("verification passed", false);
                    Verification::Verified
                }
                VerifyStatus::Denied => {
                    self.widget.reset();
                    self.set_status("verification denied", true);
                    Verification::Failed("denied".to_string())
                }
                VerifyStatus::Failed(reason) => {
                    self.widget.reset();
                    self.set_status(format!("verification failed: {reason}"), true);
                    Verification::Failed(reason)
                }
            };
        }
        if let Some(status) = self.sender.poll() {
            match status {
                EmailStatus::Sending => {}
                EmailStatus::Sent => {
                    self.fields = Default::default();
                    self.widget.reset();
                    if self.verify_config.is_some() {
                        self.verification = Verification::Unverified;
                    }
                    self.set_status("message sent — thank you!", false);
                }
                EmailStatus::Failed(reason) => {
                    self.set_status(format!("send failed: {reason}"), true);
                }
            }
        }
    }

    fn verify_label(&self) -> String {
        match &self.verification {
            Verification::NotRequired => "[ verify: n/a ]".to_string(),
            Verification::Unverified => "[ verify ]".to_string(),
            Verification::Pending => "[ verifying… ]".to_string(),
            Verification::Verified => "[ verified ✓ ]".to_string(),
            Verification::Failed(_) => "[ verify: retry ]".to_string(),
        }
    }
}

impl Default for ContactPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ContactPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.drain_service_updates();

        let active = SLOTS[self.slot];
        let field_style = Style::default();
        let active_style = Style::default()
            .fg(theme::taskbar_highlight_fg())
            .bg(theme::taskbar_highlight_bg());

        let mut lines = vec![
            Line::from(Span::styled(
                "Contact",
                Style::default()
                    .fg(theme::accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("tab to move · enter to activate · y copies {CONTACT_ADDRESS}"),
                Style::default().fg(theme::muted()),
            )),
            Line::from(""),
        ];
        for (idx, label) in FIELD_LABELS.iter().enumerate() {
            let style = if active == Slot::Field(idx) && ctx.focused() {
                active_style
            } else {
                field_style
            };
            let cursor = if active == Slot::Field(idx) && ctx.focused() {
                "█"
            } else {
                ""
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{label:>8}: "), Style::default().fg(theme::muted())),
                Span::styled(format!("{}{cursor}", self.fields[idx]), style),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                self.verify_label(),
                if active == Slot::Verify {
                    active_style
                } else {
                    Style::default().fg(theme::accent())
                },
            ),
            Span::raw("   "),
            Span::styled(
                "[ send ]",
                if active == Slot::Send {
                    active_style
                } else {
                    Style::default().fg(theme::accent())
                },
            ),
        ]));
        if let Some((status, is_error)) = &self.status {
            let color = if *is_error {
                theme::error()
            } else {
                theme::success()
            };
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                status.clone(),
                Style::default().fg(color),
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.move_slot(1);
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_slot(-1);
                true
            }
            KeyCode::Enter => {
                match SLOTS[self.slot] {
                    Slot::Field(_) => self.move_slot(1),
                    Slot::Verify => self.start_verification(),
                    Slot::Send => self.submit(),
                }
                true
            }
            KeyCode::Backspace => {
                if let Slot::Field(idx) = SLOTS[self.slot] {
                    self.fields[idx].pop();
                    return true;
                }
                false
            }
            KeyCode::Char('y') if !matches!(SLOTS[self.slot], Slot::Field(_)) => {
                if ctx.clipboard() {
                    match clipboard::set(CONTACT_ADDRESS) {
                        Ok(()) => self.set_status(format!("{CONTACT_ADDRESS} copied"), false),
                        Err(err) => self.set_status(format!("clipboard error: {err}"), true),
                    }
                } else {
                    self.set_status("no clipboard available here", true);
                }
                true
            }
            KeyCode::Char(c) => {
                if let Slot::Field(idx) = SLOTS[self.slot] {
                    self.fields[idx].push(c);
                    return true;
                }
                false
            }
            _ => false,
        }
    }
}
