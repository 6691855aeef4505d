//! Upstream stock/weather feeds.
//!
//! Design goal: the tracker only sees the [`SnapshotSource`] seam. The
//! production [`StockClient`] fans out to all four feeds concurrently and
//! fails the whole snapshot on the first per-source failure — a digest
//! built from a stale mix of sources is worse than no digest.

mod client;
mod types;

pub use client::StockClient;
pub use types::{EggStock, GearSeedStock, HoneyItem, HoneyStock, StockSnapshot, WeatherReport};

use async_trait::async_trait;

/// Read-only snapshot provider contract.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch a fresh point-in-time snapshot of all configured sources.
    ///
    /// All-or-nothing: any unreachable source, non-success status, or
    /// malformed payload fails the aggregate.
    async fn fetch(&self) -> crate::Result<StockSnapshot>;
}
