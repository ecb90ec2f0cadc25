//! Duration parsing utilities.

use anyhow::Context;
use chrono::Duration;

/// Parse a duration string like "1d", "12h", "30m", "300s", "300".
/// Supports:
/// - Plain numbers (interpreted as seconds): "300"
/// - Seconds suffix: "300s"
/// - Minutes suffix: "30m"
/// - Hours suffix: "1h"
/// - Days suffix: "1d"
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    let (num_str, unit_secs) = if let Some(num_str) = s.strip_suffix('d') {
        (num_str, 86_400)
    } else if let Some(num_str) = s.strip_suffix('h') {
        (num_str, 3_600)
    } else if let Some(num_str) = s.strip_suffix('m') {
        (num_str, 60)
    } else if let Some(num_str) = s.strip_suffix('s') {
        (num_str, 1)
    } else {
        (s, 1)
    };

    let value: i64 = num_str
        .trim()
        .parse()
        .with_context(|| format!("Invalid duration value: {s}"))?;
    if value <= 0 {
        anyhow::bail!("Duration must be positive: {s}");
    }

    let secs = value
        .checked_mul(unit_secs)
        .with_context(|| format!("Duration too large: {s}"))?;
    Duration::try_seconds(secs).with_context(|| format!("Duration out of range: {s}"))
}
