//! Configuration types for the gagstock tracker.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for the tracker service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GagstockConfig {
    /// Session polling settings.
    pub tracker: TrackerConfig,
    /// Upstream stock/weather feed endpoints.
    pub sources: SourcesConfig,
    /// Messenger Send API settings.
    pub messenger: MessengerConfig,
    /// Inbound webhook gateway settings.
    pub gateway: GatewayConfig,
}

/// Polling cadence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Seconds between poll cycles for each session.
    ///
    /// One driver covers all four sources; the first cycle runs
    /// immediately when a session starts.
    pub poll_interval_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
        }
    }
}

/// Upstream feed endpoints.
///
/// Full URLs rather than base + path so tests can point individual
/// sources at a mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Gear + seed stock endpoint.
    pub gear_seed_url: String,
    /// Egg stock endpoint.
    pub egg_url: String,
    /// Current weather endpoint.
    pub weather_url: String,
    /// Honey stock endpoint (secondary feed).
    pub honey_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            gear_seed_url: "https://growagardenstock.com/api/stock?type=gear-seeds".to_owned(),
            egg_url: "https://growagardenstock.com/api/stock?type=egg".to_owned(),
            weather_url: "https://growagardenstock.com/api/stock/weather".to_owned(),
            honey_url: "http://65.108.103.151:22377/api/stocks?type=honeyStock".to_owned(),
            request_timeout_secs: 10,
        }
    }
}

/// Messenger Send API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessengerConfig {
    /// Page access token used for both sends and webhook verification.
    pub page_access_token: String,
    /// Webhook subscription verify token.
    pub verify_token: String,
    /// Graph API base URL (overridable for tests).
    pub api_base: String,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            page_access_token: String::new(),
            verify_token: String::new(),
            api_base: "https://graph.facebook.com".to_owned(),
        }
    }
}

/// Webhook gateway bind configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 4090,
        }
    }
}

impl GagstockConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::GagstockError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::GagstockError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/gagstock/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("gagstock").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("gagstock")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/gagstock-config/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GagstockConfig::default();
        assert!(config.tracker.poll_interval_secs > 0);
        assert!(config.sources.gear_seed_url.starts_with("https://"));
        assert!(config.sources.request_timeout_secs > 0);
        assert!(!config.messenger.api_base.is_empty());
        assert!(config.gateway.port > 0);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = GagstockConfig::default();
        config.tracker.poll_interval_secs = 45;
        config.messenger.page_access_token = "token".to_owned();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let loaded: GagstockConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(loaded.tracker.poll_interval_secs, 45);
        assert_eq!(loaded.messenger.page_access_token, "token");
        assert_eq!(loaded.sources.egg_url, config.sources.egg_url);
    }

    #[test]
    fn partial_config_fills_missing_sections_with_defaults() {
        let toml_str = r#"
            [tracker]
            poll_interval_secs = 10
        "#;
        let config: GagstockConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tracker.poll_interval_secs, 10);
        assert_eq!(config.gateway.port, GatewayConfig::default().port);
    }

    #[test]
    fn save_and_reload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = GagstockConfig::default();
        config.gateway.port = 5151;
        config.save_to_file(&path).unwrap();

        let loaded = GagstockConfig::from_file(&path).unwrap();
        assert_eq!(loaded.gateway.port, 5151);
    }

    #[test]
    fn default_config_path_ends_with_config_toml() {
        let path = GagstockConfig::default_config_path();
        assert!(path.ends_with("config.toml"));
    }
}
