//! Timestamp parsing for run boundaries.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Try common date-only format
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid timestamp '{s}' (expected RFC 3339 or YYYY-MM-DD)"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .with_context(|| format!("Invalid date: {s}"))
}
