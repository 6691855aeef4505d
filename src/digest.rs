//! Notification digest rendering.
//!
//! Pure functions from a snapshot (plus "now") to the human-readable
//! message text. The render is deterministic; the tracker compares the
//! output against the previously sent text as a second dedup gate.

use crate::sources::StockSnapshot;
use chrono::{DateTime, FixedOffset, Utc};

/// Gear/seed stock refresh period in seconds.
pub const GEAR_SEED_REFRESH_SECS: i64 = 300;

/// Egg stock refresh period in seconds.
pub const EGG_REFRESH_SECS: i64 = 600;

/// Display timezone offset (Asia/Manila, UTC+8, no DST).
const MANILA_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Seconds remaining until a source's next scheduled refresh, floored at zero.
#[must_use]
pub fn reset_remaining_secs(now_ms: i64, updated_at_ms: i64, refresh_period_secs: i64) -> i64 {
    let elapsed_secs = now_ms.saturating_sub(updated_at_ms) / 1000;
    (refresh_period_secs - elapsed_secs).max(0)
}

/// Format a countdown as minutes + seconds, e.g. `3m 30s`.
#[must_use]
pub fn countdown_text(remaining_secs: i64) -> String {
    format!("{}m {}s", remaining_secs / 60, remaining_secs % 60)
}

/// Manila-local display form of an epoch-milliseconds timestamp.
fn manila_time(epoch_ms: i64) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp_millis(epoch_ms) else {
        return "unknown".to_owned();
    };
    let Some(offset) = FixedOffset::east_opt(MANILA_UTC_OFFSET_SECS) else {
        return utc.format("%a %I:%M:%S %p").to_string();
    };
    utc.with_timezone(&offset)
        .format("%a %I:%M:%S %p")
        .to_string()
}

fn listing_text(lines: &[String], empty_fallback: &str) -> String {
    if lines.is_empty() {
        empty_fallback.to_owned()
    } else {
        lines.join("\n")
    }
}

/// Weather fields fall back on both missing and empty upstream values.
fn text_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

/// Render the full stock + weather digest for one snapshot.
#[must_use]
pub fn render(snapshot: &StockSnapshot, now: DateTime<Utc>) -> String {
    let now_ms = now.timestamp_millis();

    let gear_text = listing_text(&snapshot.gear_seed.gear, "No gear.");
    let seed_text = listing_text(&snapshot.gear_seed.seeds, "No seeds.");
    let egg_text = listing_text(&snapshot.egg.eggs, "No eggs.");

    let gear_time = manila_time(snapshot.gear_seed.updated_at);
    let gear_reset = countdown_text(reset_remaining_secs(
        now_ms,
        snapshot.gear_seed.updated_at,
        GEAR_SEED_REFRESH_SECS,
    ));

    let egg_time = manila_time(snapshot.egg.updated_at);
    let egg_reset = countdown_text(reset_remaining_secs(
        now_ms,
        snapshot.egg.updated_at,
        EGG_REFRESH_SECS,
    ));

    let weather_icon = text_or(snapshot.weather.icon.as_deref(), "🌦️");
    let weather_desc = text_or(snapshot.weather.current_weather.as_deref(), "Unknown");
    let weather_bonus = text_or(snapshot.weather.crop_bonuses.as_deref(), "N/A");

    let honey_text = if snapshot.honey.items.is_empty() {
        "No honey stock available.".to_owned()
    } else {
        snapshot
            .honey
            .items
            .iter()
            .map(|item| format!("🍯 {}: {}", item.name, item.value_text()))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "🌾 𝗚𝗿𝗼𝘄 𝗔 𝗚𝗮𝗿𝗱𝗲𝗻 — 𝗡𝗲𝘄 𝗦𝘁𝗼𝗰𝗸 & 𝗪𝗲𝗮𝘁𝗵𝗲𝗿\n\n\
         🛠️ 𝗚𝗲𝗮𝗿:\n{gear_text}\n\n\
         🌱 𝗦𝗲𝗲𝗱𝘀:\n{seed_text}\n\n\
         🥚 𝗘𝗴𝗴𝘀:\n{egg_text}\n\n\
         🌤️ 𝗪𝗲𝗮𝘁𝗵𝗲𝗿: {weather_icon} {weather_desc}\n\
         🪴 𝗕𝗼𝗻𝘂𝘀: {weather_bonus}\n\n\
         📅 𝗚𝗲𝗮𝗿/𝗦𝗲𝗲𝗱 𝗨𝗽𝗱𝗮𝘁𝗲𝗱: {gear_time}\n\
         🔁 𝗥𝗲𝘀𝗲𝘁 𝗶𝗻: {gear_reset}\n\n\
         📅 𝗘𝗴𝗴 𝗨𝗽𝗱𝗮𝘁𝗲𝗱: {egg_time}\n\
         🔁 𝗥𝗲𝘀𝗲𝘁 𝗶𝗻: {egg_reset}\n\n\
         📦 𝗛𝗼𝗻𝗲𝘆 𝗦𝘁𝗼𝗰𝗸:\n{honey_text}"
    )
}
