//! Human-readable formatting for check durations and timestamps.
//!
//! Durations arrive from Gatus as integer nanoseconds; timestamps as
//! ISO-8601 strings. Both are rendered for display here. Microseconds use
//! the ASCII `us` suffix everywhere.

use std::fmt::Display;
use std::time::Duration;

use anyhow::{bail, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Placeholder for timestamps that cannot be parsed.
pub const UNKNOWN: &str = "Unknown";

/// Shown for very recent and for future timestamps.
pub const JUST_NOW: &str = "just now";

/// Suffix to nanoseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
];

/// Parse duration strings like "30s", "500ms", "1.5m".
///
/// Used for refresh and timeout settings.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.parse()?;
            if !val.is_finite() || val < 0.0 {
                bail!("Duration must be non-negative: {}", s);
            }
            return Ok(Duration::from_nanos((val * multiplier) as u64));
        }
    }

    bail!("Unknown duration format: {}", s)
}

/// Format a check duration given in nanoseconds.
///
/// Bands: under 1ms as whole microseconds, under 1s as whole milliseconds,
/// under 60s as seconds with one decimal, anything above as minutes with
/// one decimal. Negative values land in the microsecond band.
pub fn format_duration(nanoseconds: i64) -> String {
    let nanos = nanoseconds as f64;
    let ms = nanos / 1_000_000.0;

    if ms < 1.0 {
        return format!("{}us", round_whole(nanos / 1_000.0));
    }
    if ms < 1_000.0 {
        return format!("{}ms", round_whole(ms));
    }

    let seconds = ms / 1_000.0;
    if seconds < 60.0 {
        return format!("{}s", one_decimal(seconds));
    }

    format!("{}m", one_decimal(seconds / 60.0))
}

// `f64::round` is half-away-from-zero; the cast folds -0.0 into 0.
fn round_whole(value: f64) -> i64 {
    value.round() as i64
}

fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with any offset, a naive date-time (taken as UTC) and a
/// bare date (UTC midnight).
pub fn parse_timestamp(iso: &str) -> Option<DateTime<Utc>> {
    let iso = iso.trim();
    if iso.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a timestamp relative to `now`.
///
/// Returns `Unknown` for unparseable input, an absolute date once the
/// timestamp is a day or more old, `just now` for future timestamps and the
/// first five seconds, and otherwise `Ns ago`, `Nm ago` or `Nh ago`.
pub fn format_timestamp_at(iso: &str, now: DateTime<Utc>) -> String {
    match parse_timestamp(iso) {
        Some(date) => format_relative(date, now),
        None => UNKNOWN.to_string(),
    }
}

/// Format an already parsed timestamp relative to `now`.
pub fn format_relative(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = now.signed_duration_since(date).num_milliseconds();
    let diff_seconds = diff_ms.div_euclid(1_000);
    let diff_minutes = diff_seconds.div_euclid(60);
    let diff_hours = diff_minutes.div_euclid(60);

    if diff_hours >= 24 {
        return format_date(date.with_timezone(&Local));
    }
    if diff_ms < 0 {
        return JUST_NOW.to_string();
    }
    if diff_seconds < 60 {
        return if diff_seconds <= 5 {
            JUST_NOW.to_string()
        } else {
            format!("{}s ago", diff_seconds)
        };
    }
    if diff_minutes < 60 {
        return format!("{}m ago", diff_minutes);
    }

    format!("{}h ago", diff_hours)
}

/// Format a timestamp relative to the wall clock.
pub fn format_timestamp(iso: &str) -> String {
    format_timestamp_at(iso, Utc::now())
}

/// Absolute date as "Mon D, YYYY".
fn format_date<Tz>(date: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%b %-d, %Y").to_string()
}
