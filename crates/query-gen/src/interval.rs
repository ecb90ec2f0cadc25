//! Time ranges and random windows inside them.

use crate::error::GeneratorError;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;

/// A closed time range `[start, end]` with `start <= end`.
///
/// One full-range interval is held by each generator; windows drawn from it
/// are short-lived values created per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    /// Create an interval, rejecting `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, GeneratorError> {
        if start > end {
            return Err(GeneratorError::InvalidInterval {
                start: format_timestamp(start),
                end: format_timestamp(end),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length of the interval.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Start instant as an RFC 3339 UTC string, e.g. `2024-01-01T00:00:00Z`.
    pub fn start_string(&self) -> String {
        format_timestamp(self.start)
    }

    /// End instant as an RFC 3339 UTC string.
    pub fn end_string(&self) -> String {
        format_timestamp(self.end)
    }

    /// Draw a window of exactly `window` length that lies inside this interval.
    ///
    /// The start offset is uniform over whole seconds in
    /// `[start, end - window]`. One RNG draw is consumed per call, so a fixed
    /// seed and call order reproduce the same windows.
    ///
    /// # Panics
    ///
    /// Panics if `window` is negative or longer than the interval. Generators
    /// validate their windows at construction, so this only fires on direct
    /// misuse.
    pub fn rand_window<R: Rng>(&self, window: Duration, rng: &mut R) -> TimeInterval {
        let span = self.duration();
        assert!(
            window >= Duration::zero() && window <= span,
            "logic error: window {} does not fit in time range {}",
            format_duration(window),
            format_duration(span)
        );

        let slack = (span - window).num_seconds();
        let offset = rng.random_range(0..=slack);
        let start = self.start + Duration::seconds(offset);

        TimeInterval {
            start,
            end: start + window,
        }
    }
}

/// Render a timestamp the way both dialects expect inside their literals.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Format a duration compactly for labels: `12h0m0s`, `5m0s`, `30s`, `250ms`.
pub fn format_duration(d: Duration) -> String {
    if d < Duration::zero() {
        return format!("-{}", format_duration(-d));
    }

    let total_secs = d.num_seconds();
    let subsec_nanos = (d - Duration::seconds(total_secs))
        .num_nanoseconds()
        .unwrap_or(0);

    if total_secs == 0 {
        return match subsec_nanos {
            0 => "0s".to_string(),
            n if n % 1_000_000 == 0 => format!("{}ms", n / 1_000_000),
            n if n % 1_000 == 0 => format!("{}µs", n / 1_000),
            n => format!("{n}ns"),
        };
    }

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let mut seconds = (total_secs % 60).to_string();
    if subsec_nanos > 0 {
        let frac = format!("{subsec_nanos:09}");
        seconds.push('.');
        seconds.push_str(frac.trim_end_matches('0'));
    }

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
