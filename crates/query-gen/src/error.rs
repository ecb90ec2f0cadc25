//! Error types for query generator construction.

use chrono::Duration;
use thiserror::Error;

/// Errors raised while building a [`crate::QueryGenerator`].
///
/// Every variant is a construction-time condition. Once a generator is built,
/// its query operations do not fail.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The database configuration has no `database-name` entry.
    #[error("Database config is missing the required '{0}' key")]
    MissingDatabaseName(&'static str),

    /// Interval start is after its end.
    #[error("Invalid time interval: start {start} is after end {end}")]
    InvalidInterval { start: String, end: String },

    /// Scale must be a positive entity count.
    #[error("Invalid scale: {0} (must be at least 1)")]
    InvalidScale(usize),

    /// A query window does not fit in the full time range.
    #[error("Query window {window} exceeds the full time range {range}")]
    WindowExceedsRange { window: String, range: String },

    /// A query samples more entities than the scale provides.
    #[error("Cannot sample {requested} entities from a universe of {scale}")]
    SampleExceedsScale { requested: usize, scale: usize },

    /// Dispatch tables need at least one kind.
    #[error("Dispatch table has no query kinds")]
    EmptyDispatchTable,

    /// Query type name not found in the catalog.
    #[error("Unknown query type: {0}")]
    UnknownQueryType(String),

    /// Dialect name not recognized.
    #[error("Unknown dialect: {0} (expected 'influxql' or 'flux')")]
    UnknownDialect(String),
}

impl GeneratorError {
    pub(crate) fn window_exceeds_range(window: Duration, range: Duration) -> Self {
        GeneratorError::WindowExceedsRange {
            window: crate::interval::format_duration(window),
            range: crate::interval::format_duration(range),
        }
    }
}
