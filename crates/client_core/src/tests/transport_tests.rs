use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use tokio::{net::TcpListener, sync::Mutex};

use super::*;

#[derive(Clone)]
struct HookState {
    status: StatusCode,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn handle_webhook(State(state): State<HookState>, Json(body): Json<Value>) -> StatusCode {
    state.received.lock().await.push(body);
    state.status
}

async fn spawn_webhook(status: StatusCode) -> anyhow::Result<(String, Arc<Mutex<Vec<Value>>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = HookState {
        status,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/api/webhooks/1/token", post(handle_webhook))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/api/webhooks/1/token"), received))
}

fn payload() -> OutboundPayload {
    OutboundPayload {
        content: Some("deploy finished".into()),
        username: Some("CI".into()),
        ..OutboundPayload::default()
    }
}

#[tokio::test]
async fn posts_json_payload_and_accepts_no_content() {
    let (url, received) = spawn_webhook(StatusCode::NO_CONTENT).await.expect("server");
    HttpTransport::new()
        .send(&url, &payload())
        .await
        .expect("delivered");

    let bodies = received.lock().await;
    assert_eq!(
        bodies.as_slice(),
        &[serde_json::json!({"content": "deploy finished", "username": "CI"})]
    );
}

#[tokio::test]
async fn non_success_status_is_rejected() {
    let (url, received) = spawn_webhook(StatusCode::BAD_REQUEST).await.expect("server");
    let err = HttpTransport::new()
        .send(&url, &payload())
        .await
        .expect_err("rejected");
    assert!(matches!(err, TransportError::Rejected(status) if status == StatusCode::BAD_REQUEST));
    assert_eq!(received.lock().await.len(), 1);
}

#[tokio::test]
async fn malformed_url_fails_before_any_request() {
    let transport = HttpTransport::new();
    let err = transport
        .send("not a url", &payload())
        .await
        .expect_err("invalid");
    assert!(matches!(err, TransportError::InvalidUrl { .. }));

    let err = transport
        .send("ftp://example.com/hook", &payload())
        .await
        .expect_err("scheme");
    assert!(matches!(err, TransportError::UnsupportedScheme(ref scheme) if scheme == "ftp"));
}

#[tokio::test]
async fn unreachable_host_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = HttpTransport::new()
        .send(&format!("http://{addr}/hook"), &payload())
        .await
        .expect_err("refused");
    assert!(matches!(err, TransportError::Request(_)));
}
