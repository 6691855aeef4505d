//! Session registry and polling scheduler.
//!
//! One [`Tracker`] owns the process-wide map of active sessions. Each
//! session runs in its own tokio task on a fixed cadence; the registry
//! entry holds the cancellation token that is the session's "timer
//! handle" — cancelled exactly once, on stop.

mod session;

use crate::notify::Notifier;
use crate::sources::SnapshotSource;
use session::Session;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Result of a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new session was created and its schedule armed.
    Started,
    /// The subscriber already has an active session; no side effect.
    AlreadyActive,
}

/// Result of a stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The session was cancelled and removed.
    Stopped,
    /// No active session existed for the subscriber.
    NotActive,
}

/// Registry entry: ownership of one session's recurring-poll resources.
struct SessionHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Tracking service: session registry + per-session polling schedules.
pub struct Tracker {
    source: Arc<dyn SnapshotSource>,
    notifier: Arc<dyn Notifier>,
    poll_interval: Duration,
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl Tracker {
    /// Create a tracker over the given source and transport.
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        notifier: Arc<dyn Notifier>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            poll_interval,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, SessionHandle>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start tracking for a subscriber.
    ///
    /// Creates and registers a session iff none exists for the id; the
    /// check and insert happen under one lock, so concurrent starts for
    /// the same id produce exactly one session. The session's initial
    /// poll cycle runs to completion before this returns, so the caller
    /// sees the first digest attempt as part of the start request.
    pub async fn start(&self, subscriber_id: &str) -> StartOutcome {
        let (first_cycle_tx, first_cycle_rx) = oneshot::channel();
        {
            let mut sessions = self.sessions();
            if sessions.contains_key(subscriber_id) {
                return StartOutcome::AlreadyActive;
            }

            let cancel = CancellationToken::new();
            let session = Session::new(
                subscriber_id.to_owned(),
                Arc::clone(&self.source),
                Arc::clone(&self.notifier),
            );
            let task = tokio::spawn(run_session(
                session,
                self.poll_interval,
                cancel.clone(),
                first_cycle_tx,
            ));
            sessions.insert(subscriber_id.to_owned(), SessionHandle { cancel, task });
        }

        let _ = first_cycle_rx.await;
        info!(subscriber = %subscriber_id, "tracking session started");
        StartOutcome::Started
    }

    /// Stop tracking for a subscriber.
    ///
    /// Cancels the session's schedule and removes the registry entry. An
    /// in-flight cycle is allowed to finish (it may send one final stray
    /// notification) but no further tick will fire after this returns.
    pub fn stop(&self, subscriber_id: &str) -> StopOutcome {
        let handle = self.sessions().remove(subscriber_id);
        match handle {
            Some(handle) => {
                handle.cancel.cancel();
                info!(subscriber = %subscriber_id, "tracking session stopped");
                StopOutcome::Stopped
            }
            None => StopOutcome::NotActive,
        }
    }

    /// Whether the subscriber currently has an active session.
    #[must_use]
    pub fn is_active(&self, subscriber_id: &str) -> bool {
        self.sessions().contains_key(subscriber_id)
    }

    /// Number of active sessions.
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.sessions().len()
    }

    /// Cancel every session and wait for the polling tasks to wind down.
    pub async fn shutdown(&self) {
        let handles: Vec<SessionHandle> = {
            let mut sessions = self.sessions();
            sessions.drain().map(|(_, handle)| handle).collect()
        };
        for handle in &handles {
            handle.cancel.cancel();
        }
        for handle in handles {
            let _ = handle.task.await;
        }
        info!("tracker shut down");
    }
}

/// Per-session polling loop.
///
/// The initial cycle runs before anything else and is reported through
/// `first_cycle_done` so [`Tracker::start`] can await it. Ticks within
/// one session are serialized because the loop awaits each cycle before
/// selecting again. A cycle failure never ends the loop.
async fn run_session(
    mut session: Session,
    period: Duration,
    cancel: CancellationToken,
    first_cycle_done: oneshot::Sender<()>,
) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await;
    session.run_cycle().await;
    let _ = first_cycle_done.send(());

    loop {
        tokio::select! {
            // Cancellation must beat an already-overdue tick, otherwise a
            // fresh cycle could begin after stop() has returned.
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => session.run_cycle().await,
        }
    }
    debug!("session polling loop exited");
}
