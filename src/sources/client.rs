//! HTTP client for the upstream stock feeds.

use crate::config::SourcesConfig;
use crate::error::{GagstockError, Result};
use crate::sources::types::{EggStock, GearSeedStock, HoneyStock, StockSnapshot, WeatherReport};
use crate::sources::SnapshotSource;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Production snapshot fetcher backed by `reqwest`.
#[derive(Clone)]
pub struct StockClient {
    http: reqwest::Client,
    sources: SourcesConfig,
}

impl StockClient {
    /// Build a client with the configured per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(sources: SourcesConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(sources.request_timeout_secs))
            .build()
            .map_err(|e| GagstockError::Fetch(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { http, sources })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GagstockError::Fetch(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GagstockError::Fetch(format!("{url} returned {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GagstockError::Fetch(format!("{url}: malformed payload: {e}")))
    }
}

#[async_trait]
impl SnapshotSource for StockClient {
    async fn fetch(&self) -> Result<StockSnapshot> {
        // Fan out to all four feeds; first failure short-circuits the join
        // and the whole snapshot is discarded.
        let (gear_seed, egg, weather, honey) = tokio::try_join!(
            self.get_json::<GearSeedStock>(&self.sources.gear_seed_url),
            self.get_json::<EggStock>(&self.sources.egg_url),
            self.get_json::<WeatherReport>(&self.sources.weather_url),
            self.get_json::<HoneyStock>(&self.sources.honey_url),
        )?;

        Ok(StockSnapshot {
            gear_seed,
            egg,
            weather,
            honey,
        })
    }
}
