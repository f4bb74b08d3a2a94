use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use shared::domain::{EmbedCard, WebhookIdentity};

use super::*;

struct ScriptedTransport {
    status: Option<StatusCode>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, _endpoint_url: &str, _payload: &OutboundPayload) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.status {
            None => Ok(()),
            Some(status) => Err(TransportError::Rejected(status)),
        }
    }
}

fn form_with_endpoint(endpoint: &str) -> FormState {
    let mut form = FormState::default();
    form.set_identity(WebhookIdentity {
        endpoint_url: endpoint.into(),
        display_name: "Release bot".into(),
        avatar_url: String::new(),
    });
    form.set_content("v1.2.0 is out");
    form.set_embed(EmbedCard::blank());
    form
}

#[test]
fn missing_endpoint_blocks_submit_and_reports() {
    let mut session = SubmitSession::new();
    let now = Instant::now();
    let err = session
        .begin(&form_with_endpoint("   "), now)
        .expect_err("no endpoint");
    assert_eq!(err, SubmitError::MissingEndpoint);
    assert!(!session.is_in_flight());
    let notice = session.notice().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, MISSING_ENDPOINT_MESSAGE);
}

#[test]
fn second_begin_is_refused_while_in_flight() {
    let mut session = SubmitSession::new();
    let form = form_with_endpoint("https://example.com/hook");
    let ticket = session.begin(&form, Instant::now()).expect("ticket");
    assert_eq!(ticket.endpoint_url, "https://example.com/hook");
    assert_eq!(ticket.payload.content.as_deref(), Some("v1.2.0 is out"));
    assert_eq!(ticket.payload.username.as_deref(), Some("Release bot"));
    assert!(session.is_in_flight());

    assert_eq!(
        session.begin(&form, Instant::now()),
        Err(SubmitError::AlreadyInFlight)
    );

    session.finish(Ok(()), Instant::now());
    assert!(!session.is_in_flight());
    assert!(session.begin(&form, Instant::now()).is_ok());
}

#[test]
fn abandoned_send_returns_to_ready_with_failure_notice() {
    let mut session = SubmitSession::new();
    let form = form_with_endpoint("https://example.com/hook");
    session.begin(&form, Instant::now()).expect("ticket");
    let notice = session.abandon(Instant::now());
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, SEND_FAILED_MESSAGE);
    assert!(!session.is_in_flight());
}

#[test]
fn ticket_reflects_the_form_at_submit_time() {
    let mut session = SubmitSession::new();
    let mut form = form_with_endpoint("https://example.com/hook");
    let ticket = session.begin(&form, Instant::now()).expect("ticket");
    form.set_content("edited while sending");
    assert_eq!(ticket.payload.content.as_deref(), Some("v1.2.0 is out"));
}

#[test]
fn notices_expire_after_their_delay() {
    let mut session = SubmitSession::new();
    let form = form_with_endpoint("https://example.com/hook");
    let start = Instant::now();

    session.begin(&form, start).expect("ticket");
    let notice = session.finish(Ok(()), start).clone();
    assert_eq!(notice.message, SENT_MESSAGE);
    assert_eq!(notice.remaining(start), Duration::from_secs(3));
    assert!(!session.clear_expired(start + Duration::from_millis(2_999)));
    assert!(session.clear_expired(start + Duration::from_secs(3)));
    assert!(session.notice().is_none());

    session.begin(&form, start).expect("ticket");
    session.finish(Err(TransportError::Rejected(StatusCode::NOT_FOUND)), start);
    assert!(!session.clear_expired(start + Duration::from_secs(4)));
    assert!(session.clear_expired(start + Duration::from_secs(5)));
}

#[tokio::test]
async fn failed_send_leaves_form_untouched_with_one_error_notice() {
    let calls = Arc::new(AtomicUsize::new(0));
    let transport = ScriptedTransport {
        status: Some(StatusCode::INTERNAL_SERVER_ERROR),
        calls: calls.clone(),
    };
    let form = form_with_endpoint("https://example.com/hook");
    let before = form.clone();

    let mut session = SubmitSession::new();
    let notice = session.submit(&form, &transport).await.expect("submitted").clone();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(form, before);
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, SEND_FAILED_MESSAGE);
    assert!(!notice.message.contains("500"));
    assert!(!session.is_in_flight());
    assert!(session.clear_expired(Instant::now() + Duration::from_secs(6)));
    assert!(session.notice().is_none());
}

#[tokio::test]
async fn successful_send_posts_success_notice() {
    let calls = Arc::new(AtomicUsize::new(0));
    let transport = ScriptedTransport {
        status: None,
        calls: calls.clone(),
    };
    let mut session = SubmitSession::new();
    let notice = session
        .submit(&form_with_endpoint("https://example.com/hook"), &transport)
        .await
        .expect("submitted");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_endpoint_never_reaches_transport() {
    let calls = Arc::new(AtomicUsize::new(0));
    let transport = ScriptedTransport {
        status: None,
        calls: calls.clone(),
    };
    let mut session = SubmitSession::new();
    let result = session.submit(&form_with_endpoint(""), &transport).await;
    assert_eq!(result.err(), Some(SubmitError::MissingEndpoint));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
