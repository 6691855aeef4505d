//! Per-subscriber session state and the poll cycle.

use crate::digest;
use crate::fingerprint::{Fingerprint, fingerprint};
use crate::notify::Notifier;
use crate::sources::SnapshotSource;
use std::sync::Arc;
use tracing::{debug, warn};

/// What one poll cycle did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CycleOutcome {
    /// State changed and the digest was delivered.
    Notified,
    /// Fingerprint matched the previous snapshot; nothing to say.
    Unchanged,
    /// Fingerprint differed but the rendered text did not; send suppressed.
    DuplicateText,
    /// Digest was accepted but the transport failed; not retried.
    DeliveryFailed,
}

/// Live tracking state for one subscriber.
///
/// Owned exclusively by the session's polling task; never shared.
pub(crate) struct Session {
    subscriber_id: String,
    last_fingerprint: Option<Fingerprint>,
    last_message: Option<String>,
    source: Arc<dyn SnapshotSource>,
    notifier: Arc<dyn Notifier>,
}

impl Session {
    pub(crate) fn new(
        subscriber_id: String,
        source: Arc<dyn SnapshotSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            subscriber_id,
            last_fingerprint: None,
            last_message: None,
            source,
            notifier,
        }
    }

    /// Run one fetch → detect → render → notify cycle.
    ///
    /// Never fails the caller: a failed cycle is logged and leaves the
    /// session state untouched, so the next scheduled tick is the retry.
    pub(crate) async fn run_cycle(&mut self) {
        match self.try_cycle().await {
            Ok(outcome) => {
                debug!(subscriber = %self.subscriber_id, ?outcome, "poll cycle finished");
            }
            Err(e) => {
                warn!(subscriber = %self.subscriber_id, "poll cycle skipped: {e}");
            }
        }
    }

    async fn try_cycle(&mut self) -> crate::Result<CycleOutcome> {
        let snapshot = self.source.fetch().await?;

        let current = fingerprint(&snapshot);
        if self.last_fingerprint == Some(current) {
            return Ok(CycleOutcome::Unchanged);
        }
        self.last_fingerprint = Some(current);

        let text = digest::render(&snapshot, chrono::Utc::now());
        if self.last_message.as_deref() == Some(text.as_str()) {
            return Ok(CycleOutcome::DuplicateText);
        }
        self.last_message = Some(text.clone());

        // The message is recorded before the send, so a failed delivery is
        // never retried; the next *change* produces the next attempt.
        if let Err(e) = self.notifier.notify(&self.subscriber_id, &text).await {
            warn!(subscriber = %self.subscriber_id, "notification delivery failed: {e}");
            return Ok(CycleOutcome::DeliveryFailed);
        }

        Ok(CycleOutcome::Notified)
    }
}
