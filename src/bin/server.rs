//! Long-running gagstock server binary.
//!
//! Wires the stock client, Messenger notifier, tracker service, and the
//! inbound webhook gateway together, then serves until ctrl-c.

use gagstock::config::GagstockConfig;
use gagstock::gateway::run_gateway;
use gagstock::notify::MessengerNotifier;
use gagstock::sources::StockClient;
use gagstock::tracker::Tracker;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(GagstockConfig::default_config_path);
    let config = if config_path.is_file() {
        tracing::info!("loading config from {}", config_path.display());
        GagstockConfig::from_file(&config_path)?
    } else {
        tracing::info!("no config file at {}, using defaults", config_path.display());
        GagstockConfig::default()
    };

    if config.messenger.page_access_token.trim().is_empty() {
        tracing::warn!("messenger page access token is empty; deliveries will fail");
    }

    let source = Arc::new(StockClient::new(config.sources.clone())?);
    let notifier = Arc::new(MessengerNotifier::new(&config.messenger));
    let tracker = Arc::new(Tracker::new(
        source,
        notifier.clone(),
        Duration::from_secs(config.tracker.poll_interval_secs.max(1)),
    ));

    tracing::info!(
        "gagstock server starting (poll interval {}s)",
        config.tracker.poll_interval_secs
    );

    tokio::select! {
        result = run_gateway(
            config.gateway.clone(),
            Arc::clone(&tracker),
            notifier,
            config.messenger.verify_token.clone(),
        ) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("ctrl-c received, shutting down");
            tracker.shutdown().await;
        }
    }

    tracing::info!("gagstock server stopped");
    Ok(())
}
