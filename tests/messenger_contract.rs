//! HTTP contract tests for the Messenger Send API notifier.

use gagstock::config::MessengerConfig;
use gagstock::error::GagstockError;
use gagstock::notify::{MessengerNotifier, Notifier};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn messenger_for(server: &MockServer, token: &str) -> MessengerConfig {
    MessengerConfig {
        page_access_token: token.to_owned(),
        verify_token: "verify".to_owned(),
        api_base: server.uri(),
    }
}

#[tokio::test]
async fn send_posts_recipient_and_text_with_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v18.0/me/messages"))
        .and(query_param("access_token", "page-token"))
        .and(body_partial_json(json!({
            "recipient": { "id": "777" },
            "message": { "text": "🛑 Gagstock tracking stopped." }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message_id": "m1" })))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = MessengerNotifier::new(&messenger_for(&server, "page-token"));
    let result = notifier.notify("777", "🛑 Gagstock tracking stopped.").await;
    assert!(result.is_ok(), "send should succeed: {result:?}");
}

#[tokio::test]
async fn non_success_status_is_a_delivery_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v18.0/me/messages"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid recipient" })),
        )
        .mount(&server)
        .await;

    let notifier = MessengerNotifier::new(&messenger_for(&server, "page-token"));
    let err = notifier
        .notify("777", "hello")
        .await
        .expect_err("4xx must fail the send");
    assert!(matches!(err, GagstockError::Delivery(_)), "got: {err:?}");
    assert!(err.to_string().contains("messenger send failed"));
}

#[tokio::test]
async fn empty_access_token_fails_without_a_request() {
    let server = MockServer::start().await;
    // No mock mounted: a request would 404 and still prove the point,
    // but the notifier must bail before the network.

    let notifier = MessengerNotifier::new(&messenger_for(&server, ""));
    let err = notifier.notify("777", "hello").await.expect_err("must fail");
    assert!(matches!(err, GagstockError::Delivery(_)), "got: {err:?}");
    assert!(err.to_string().contains("access token is empty"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
