//! Snapshot change detection.
//!
//! A fingerprint is a blake3 hash over a canonical JSON form of the
//! snapshot's meaningful fields: the stock listings plus the weather and
//! honey refresh stamps. Payloads are deserialized into typed structs
//! before hashing, so incidental field ordering in the upstream JSON
//! cannot affect the result.

use crate::sources::StockSnapshot;

/// Deterministic summary value used to detect meaningful change
/// between snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint(blake3::Hash);

impl Fingerprint {
    /// Hex form, for logging.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_hex().to_string()
    }
}

/// Compute the fingerprint of a snapshot.
#[must_use]
pub fn fingerprint(snapshot: &StockSnapshot) -> Fingerprint {
    let canonical = serde_json::json!({
        "gear": snapshot.gear_seed.gear,
        "seeds": snapshot.gear_seed.seeds,
        "eggs": snapshot.egg.eggs,
        "weather_updated_at": snapshot.weather.updated_at,
        "honey_updated_at": snapshot.honey.updated_at,
        "honey": snapshot.honey.items,
    });
    Fingerprint(blake3::hash(canonical.to_string().as_bytes()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::sources::{EggStock, GearSeedStock, HoneyStock, WeatherReport};

    fn snapshot_from_json(gear_seed: &str, egg: &str, weather: &str, honey: &str) -> StockSnapshot {
        StockSnapshot {
            gear_seed: serde_json::from_str::<GearSeedStock>(gear_seed).unwrap(),
            egg: serde_json::from_str::<EggStock>(egg).unwrap(),
            weather: serde_json::from_str::<WeatherReport>(weather).unwrap(),
            honey: serde_json::from_str::<HoneyStock>(honey).unwrap(),
        }
    }

    fn base_snapshot() -> StockSnapshot {
        snapshot_from_json(
            r#"{"gear":["Trowel x1"],"seeds":["Carrot x5"],"updatedAt":1000}"#,
            r#"{"egg":["Common Egg x3"],"updatedAt":2000}"#,
            r#"{"currentWeather":"Rain","icon":"🌧️","cropBonuses":"+10%","updatedAt":3000}"#,
            r#"{"honeyStock":[{"name":"Honey Comb","value":2}],"updatedAt":4000}"#,
        )
    }

    #[test]
    fn identical_content_with_reordered_fields_yields_same_fingerprint() {
        let a = base_snapshot();
        let b = snapshot_from_json(
            r#"{"updatedAt":1000,"seeds":["Carrot x5"],"gear":["Trowel x1"]}"#,
            r#"{"updatedAt":2000,"egg":["Common Egg x3"]}"#,
            r#"{"updatedAt":3000,"cropBonuses":"+10%","icon":"🌧️","currentWeather":"Rain"}"#,
            r#"{"updatedAt":4000,"honeyStock":[{"value":2,"name":"Honey Comb"}]}"#,
        );
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn changed_listing_changes_fingerprint() {
        let a = base_snapshot();
        let mut b = base_snapshot();
        b.gear_seed.seeds = vec!["Carrot x5".to_owned(), "Tomato x2".to_owned()];
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn changed_honey_refresh_stamp_changes_fingerprint() {
        let a = base_snapshot();
        let mut b = base_snapshot();
        b.honey.updated_at = 9000;
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn weather_text_alone_does_not_affect_fingerprint() {
        // Only the weather refresh stamp participates; descriptor changes
        // without a stamp change are treated as noise (the rendered-text
        // dedup still catches genuine display differences).
        let a = base_snapshot();
        let mut b = base_snapshot();
        b.weather.current_weather = Some("Thunderstorm".to_owned());
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn hex_form_is_stable() {
        let a = base_snapshot();
        assert_eq!(fingerprint(&a).to_hex(), fingerprint(&a).to_hex());
    }
}
