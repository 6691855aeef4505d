//! gagstock: Grow A Garden stock & weather tracker.
//!
//! Tracks four upstream game-economy feeds (gear/seed stock, egg stock,
//! weather, honey stock) on behalf of many independent subscribers and
//! pushes a formatted digest to a subscriber only when the observed
//! state actually changes.
//!
//! # Architecture
//!
//! Each subscriber gets an independent polling session:
//! Fetch → Fingerprint → Render → Notify, on a fixed cadence:
//! - **Sources**: four concurrent HTTP fetches joined all-or-nothing
//! - **Fingerprint**: blake3 over canonical JSON, the primary change gate
//! - **Digest**: pure render of the notification text, the secondary gate
//! - **Tracker**: session registry + per-session cancellable poll loops
//! - **Notify/Gateway**: Messenger transport out, webhook commands in

pub mod command;
pub mod config;
pub mod digest;
pub mod error;
pub mod fingerprint;
pub mod gateway;
pub mod notify;
pub mod sources;
pub mod tracker;

pub use config::GagstockConfig;
pub use error::{GagstockError, Result};
pub use tracker::{StartOutcome, StopOutcome, Tracker};
