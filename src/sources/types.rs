//! Typed payloads for the upstream feeds.
//!
//! Field names mirror the upstream JSON (`updatedAt` is epoch
//! milliseconds on every feed). Listings default to empty so a feed that
//! omits a section still deserializes.

use serde::{Deserialize, Serialize};

/// Gear + seed stock feed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearSeedStock {
    /// Gear listings, one display line per item.
    #[serde(default)]
    pub gear: Vec<String>,
    /// Seed listings, one display line per item.
    #[serde(default)]
    pub seeds: Vec<String>,
    /// Last feed refresh, epoch milliseconds.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

/// Egg stock feed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EggStock {
    /// Egg listings.
    #[serde(default, rename = "egg")]
    pub eggs: Vec<String>,
    /// Last feed refresh, epoch milliseconds.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

/// Current weather feed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Weather descriptor, e.g. "Rain".
    #[serde(default, rename = "currentWeather")]
    pub current_weather: Option<String>,
    /// Weather icon (emoji).
    #[serde(default)]
    pub icon: Option<String>,
    /// Crop bonus text granted by the current weather.
    #[serde(default, rename = "cropBonuses")]
    pub crop_bonuses: Option<String>,
    /// Last feed refresh, epoch milliseconds.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

/// One honey stock entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoneyItem {
    /// Item name.
    pub name: String,
    /// Stock value; the feed sends either a number or a string.
    #[serde(default)]
    pub value: serde_json::Value,
}

impl HoneyItem {
    /// Display form of the value without JSON string quoting.
    #[must_use]
    pub fn value_text(&self) -> String {
        match self.value.as_str() {
            Some(s) => s.to_owned(),
            None => self.value.to_string(),
        }
    }
}

/// Honey stock feed payload (secondary feed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoneyStock {
    /// Honey listings as name/value pairs.
    #[serde(default, rename = "honeyStock")]
    pub items: Vec<HoneyItem>,
    /// Last feed refresh, epoch milliseconds.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

/// Aggregate point-in-time result of querying all upstream sources once.
///
/// Ephemeral: produced fresh each poll cycle and discarded after the
/// fingerprint and digest are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    /// Gear + seed stock.
    pub gear_seed: GearSeedStock,
    /// Egg stock.
    pub egg: EggStock,
    /// Current weather.
    pub weather: WeatherReport,
    /// Honey stock.
    pub honey: HoneyStock,
}
