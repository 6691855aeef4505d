//! The `gagstock on | gagstock off` command surface.
//!
//! The dispatcher (webhook gateway, or any other front end) hands the
//! tokenized arguments here and delivers the returned reply text.

use crate::tracker::{StartOutcome, StopOutcome, Tracker};

/// Usage text for anything other than `on` / `off`.
pub const USAGE: &str =
    "📌 Usage:\n• `gagstock on` to start tracking\n• `gagstock off` to stop tracking";

const STARTED: &str =
    "✅ Gagstock tracking started! You'll be notified when stock or weather changes.";
const ALREADY_ACTIVE: &str = "📡 You're already tracking Gagstock. Use `gagstock off` to stop.";
const STOPPED: &str = "🛑 Gagstock tracking stopped.";
const NOT_ACTIVE: &str = "⚠️ You don't have an active gagstock session.";

/// Handle one command for a subscriber and return the reply text.
///
/// A `start` runs the session's initial poll cycle before the reply is
/// produced, so the started confirmation follows the first digest.
pub async fn handle_command(tracker: &Tracker, sender_id: &str, args: &[&str]) -> String {
    let action = args.first().map(|a| a.to_ascii_lowercase());
    match action.as_deref() {
        Some("on") => match tracker.start(sender_id).await {
            StartOutcome::Started => STARTED.to_owned(),
            StartOutcome::AlreadyActive => ALREADY_ACTIVE.to_owned(),
        },
        Some("off") => match tracker.stop(sender_id) {
            StopOutcome::Stopped => STOPPED.to_owned(),
            StopOutcome::NotActive => NOT_ACTIVE.to_owned(),
        },
        _ => USAGE.to_owned(),
    }
}

/// Tokenize an inbound message into command arguments.
///
/// Drops a leading `gagstock` keyword so both `gagstock on` and a bare
/// `on` reach [`handle_command`] the same way.
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens
        .first()
        .is_some_and(|t| t.eq_ignore_ascii_case("gagstock"))
    {
        tokens.remove(0);
    }
    tokens
}
