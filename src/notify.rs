//! Outbound notification transport.
//!
//! The tracker only sees the [`Notifier`] seam. The production
//! implementation posts to the Facebook Messenger Send API; tests swap in
//! counting/stub notifiers.

use crate::config::MessengerConfig;
use crate::error::GagstockError;
use async_trait::async_trait;

/// Transport contract for delivering a notification to one subscriber.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to the subscriber. Failures are non-fatal to the
    /// caller's schedule; the tracker logs and moves on.
    async fn notify(&self, recipient_id: &str, text: &str) -> crate::Result<()>;
}

/// Facebook Messenger Send API notifier.
#[derive(Clone)]
pub struct MessengerNotifier {
    page_access_token: String,
    api_base: String,
    client: reqwest::Client,
}

impl MessengerNotifier {
    #[must_use]
    pub fn new(config: &MessengerConfig) -> Self {
        Self {
            page_access_token: config.page_access_token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_owned(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for MessengerNotifier {
    async fn notify(&self, recipient_id: &str, text: &str) -> crate::Result<()> {
        if self.page_access_token.trim().is_empty() {
            return Err(GagstockError::Delivery(
                "messenger page access token is empty".to_owned(),
            ));
        }

        let url = format!(
            "{}/v18.0/me/messages?access_token={}",
            self.api_base, self.page_access_token
        );
        let body = serde_json::json!({
            "recipient": { "id": recipient_id },
            "message": { "text": text }
        });
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GagstockError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GagstockError::Delivery(format!(
                "messenger send failed ({status}): {body}"
            )));
        }

        Ok(())
    }
}
