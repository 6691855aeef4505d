//! Inbound Messenger webhook gateway.
//!
//! Routes: `GET /webhook` (subscription verification handshake),
//! `POST /webhook` (page messaging events → command dispatch),
//! `GET /health`.

use crate::command;
use crate::config::GatewayConfig;
use crate::error::GagstockError;
use crate::notify::Notifier;
use crate::tracker::Tracker;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

#[derive(Clone)]
struct GatewayState {
    tracker: Arc<Tracker>,
    notifier: Arc<dyn Notifier>,
    verify_token: String,
}

#[derive(serde::Deserialize)]
struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
}

/// Build the gateway router.
#[must_use]
pub fn router(tracker: Arc<Tracker>, notifier: Arc<dyn Notifier>, verify_token: String) -> Router {
    let state = GatewayState {
        tracker,
        notifier,
        verify_token,
    };
    Router::new()
        .route("/health", get(health))
        .route("/webhook", get(verify_webhook))
        .route("/webhook", post(inbound_webhook))
        .with_state(state)
}

/// Bind and serve the gateway until the process exits.
pub async fn run_gateway(
    config: GatewayConfig,
    tracker: Arc<Tracker>,
    notifier: Arc<dyn Notifier>,
    verify_token: String,
) -> crate::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GagstockError::Gateway(format!("bind {addr} failed: {e}")))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| GagstockError::Gateway(e.to_string()))?;
    tracing::info!("gagstock gateway listening on http://{local_addr}");
    axum::serve(listener, router(tracker, notifier, verify_token))
        .await
        .map_err(|e| GagstockError::Gateway(e.to_string()))?;
    Ok(())
}

async fn health(State(state): State<GatewayState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "active_sessions": state.tracker.active_sessions()
    }))
}

/// Echo the challenge iff the handshake mode and token match.
fn verification_reply(expected_token: &str, query: &VerifyQuery) -> Option<String> {
    if expected_token.is_empty() {
        return None;
    }
    if query.mode.as_deref() != Some("subscribe") {
        return None;
    }
    if query.verify_token.as_deref() != Some(expected_token) {
        return None;
    }
    Some(query.challenge.clone().unwrap_or_default())
}

async fn verify_webhook(
    State(state): State<GatewayState>,
    Query(query): Query<VerifyQuery>,
) -> impl IntoResponse {
    match verification_reply(&state.verify_token, &query) {
        Some(challenge) => (StatusCode::OK, challenge),
        None => (StatusCode::FORBIDDEN, "verification failed".to_owned()),
    }
}

/// Parse a Messenger webhook payload into `(sender_id, text)` pairs.
#[must_use]
pub fn parse_webhook_payload(payload: &serde_json::Value) -> Vec<(String, String)> {
    let mut inbound = Vec::new();
    let Some(entries) = payload.get("entry").and_then(serde_json::Value::as_array) else {
        return inbound;
    };

    for entry in entries {
        let Some(events) = entry.get("messaging").and_then(serde_json::Value::as_array) else {
            continue;
        };

        for event in events {
            let sender = event
                .get("sender")
                .and_then(|s| s.get("id"))
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default();
            if sender.is_empty() {
                continue;
            }

            let text = event
                .get("message")
                .and_then(|m| m.get("text"))
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_owned();
            if text.is_empty() {
                continue;
            }

            inbound.push((sender.to_owned(), text));
        }
    }

    inbound
}

async fn inbound_webhook(
    State(state): State<GatewayState>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    let mut handled: usize = 0;
    for (sender, text) in parse_webhook_payload(&payload) {
        let args = command::tokenize(&text);
        let reply = command::handle_command(&state.tracker, &sender, &args).await;
        if let Err(err) = state.notifier.notify(&sender, &reply).await {
            tracing::warn!(subscriber = %sender, "failed to send command reply: {err}");
        }
        handled = handled.saturating_add(1);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "received": true,
            "handled": handled
        })),
    )
}
