//! Submit state machine shared by the editor and the command line.

use std::time::{Duration, Instant};

use shared::{form::FormState, protocol::OutboundPayload};
use tracing::{info, warn};

use crate::{
    error::{SubmitError, TransportError},
    transport::Transport,
};

pub const SENT_MESSAGE: &str = "Message sent";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send the message. Check the webhook URL.";
pub const MISSING_ENDPOINT_MESSAGE: &str = "Enter a webhook URL first.";

const SUCCESS_NOTICE_TTL: Duration = Duration::from_secs(3);
const ERROR_NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient status message. Expires on its own; nothing needs to dismiss it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
    posted_at: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, message: &'static str, posted_at: Instant) -> Self {
        Self {
            kind,
            message,
            posted_at,
        }
    }

    pub fn ttl(&self) -> Duration {
        match self.kind {
            NoticeKind::Success => SUCCESS_NOTICE_TTL,
            NoticeKind::Error => ERROR_NOTICE_TTL,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.posted_at) >= self.ttl()
    }

    /// Time left before the notice expires.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.ttl()
            .saturating_sub(now.saturating_duration_since(self.posted_at))
    }
}

/// Everything a worker needs to perform one send, detached from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub endpoint_url: String,
    pub payload: OutboundPayload,
}

#[derive(Debug, Default)]
pub struct SubmitSession {
    in_flight: bool,
    notice: Option<Notice>,
}

impl SubmitSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Builds the payload from the form as it is right now and marks a send as pending.
    pub fn begin(&mut self, form: &FormState, now: Instant) -> Result<SubmitTicket, SubmitError> {
        if self.in_flight {
            return Err(SubmitError::AlreadyInFlight);
        }
        if !form.identity().has_endpoint() {
            self.notice = Some(Notice::new(NoticeKind::Error, MISSING_ENDPOINT_MESSAGE, now));
            return Err(SubmitError::MissingEndpoint);
        }

        let snapshot = form.snapshot();
        self.in_flight = true;
        self.notice = None;
        Ok(SubmitTicket {
            endpoint_url: snapshot.identity().endpoint_url.trim().to_string(),
            payload: composer::build_form_payload(&snapshot),
        })
    }

    /// Records the outcome of the pending send and posts its notice.
    pub fn finish(&mut self, result: Result<(), TransportError>, now: Instant) -> &Notice {
        self.in_flight = false;
        let notice = match result {
            Ok(()) => {
                info!("message delivered");
                Notice::new(NoticeKind::Success, SENT_MESSAGE, now)
            }
            Err(err) => {
                warn!(error = %err, "message delivery failed");
                Notice::new(NoticeKind::Error, SEND_FAILED_MESSAGE, now)
            }
        };
        self.notice.insert(notice)
    }

    /// Gives up on a pending send that never reached a transport, posting the
    /// same generic failure notice.
    pub fn abandon(&mut self, now: Instant) -> &Notice {
        self.in_flight = false;
        warn!("pending send abandoned before delivery");
        self.notice
            .insert(Notice::new(NoticeKind::Error, SEND_FAILED_MESSAGE, now))
    }

    /// Drops the current notice once it has expired. Returns true if one was dropped.
    pub fn clear_expired(&mut self, now: Instant) -> bool {
        match &self.notice {
            Some(notice) if notice.is_expired(now) => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    /// Runs a whole submit against `transport`: begin, one send, finish.
    pub async fn submit(
        &mut self,
        form: &FormState,
        transport: &dyn Transport,
    ) -> Result<&Notice, SubmitError> {
        let ticket = self.begin(form, Instant::now())?;
        let result = transport.send(&ticket.endpoint_url, &ticket.payload).await;
        Ok(self.finish(result, Instant::now()))
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
