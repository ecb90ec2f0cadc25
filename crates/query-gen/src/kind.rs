//! Query kinds and their parameters.

use crate::error::GeneratorError;
use crate::interval::format_duration;
use chrono::Duration;

/// Aggregate function, named identically in InfluxQL and Flux.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Count,
    First,
    Last,
    Max,
    Mean,
    Min,
    Sum,
}

impl Aggregate {
    pub const ALL: [Aggregate; 7] = [
        Aggregate::Count,
        Aggregate::First,
        Aggregate::Last,
        Aggregate::Max,
        Aggregate::Mean,
        Aggregate::Min,
        Aggregate::Sum,
    ];

    /// Function name as it appears in query text.
    pub fn function_name(self) -> &'static str {
        match self {
            Aggregate::Count => "count",
            Aggregate::First => "first",
            Aggregate::Last => "last",
            Aggregate::Max => "max",
            Aggregate::Mean => "mean",
            Aggregate::Min => "min",
            Aggregate::Sum => "sum",
        }
    }
}

impl std::fmt::Display for Aggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.function_name())
    }
}

/// Dataset a grouped window query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Standard IoT dataset.
    Low,
    /// High cardinality metaquery dataset.
    High,
}

impl Cardinality {
    pub fn measurement(self) -> &'static str {
        match self {
            Cardinality::Low => "air_condition_room",
            Cardinality::High => "example_measurement",
        }
    }

    pub fn field(self) -> &'static str {
        match self {
            Cardinality::Low => "temperature",
            Cardinality::High => "val",
        }
    }

    /// Tag the series are grouped by.
    pub fn group_tag(self) -> &'static str {
        match self {
            Cardinality::Low => "room_id",
            Cardinality::High => "example_tag",
        }
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cardinality::Low => write!(f, "low cardinality"),
            Cardinality::High => write!(f, "high cardinality"),
        }
    }
}

/// A fixed-template category of benchmark query, with the parameters its
/// random draws depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Ungrouped aggregate over the whole time range.
    BareAggregate { aggregate: Aggregate },
    /// Hourly windowed aggregate per series, transposed back to rows.
    GroupWindowTranspose {
        aggregate: Aggregate,
        cardinality: Cardinality,
        window: Duration,
    },
    /// Hourly mean temperature across randomly sampled homes.
    MeanTemperature { homes: usize, window: Duration },
    /// 5 minute CO2 mean keeping only time and value columns.
    AggregateKeep { window: Duration },
    /// 5 minute CO2 mean dropping tag columns.
    AggregateDrop { window: Duration },
    /// Raw light level readings over 8 hours.
    StandaloneFilter,
    /// Air quality rows pivoted on field name.
    SortedPivot { window: Duration },
}

impl QueryKind {
    pub const STANDALONE_FILTER_HOURS: i64 = 8;

    /// Window length drawn per query, `None` when the kind spans the full range.
    pub fn window(&self) -> Option<Duration> {
        match self {
            QueryKind::BareAggregate { .. } => None,
            QueryKind::GroupWindowTranspose { window, .. }
            | QueryKind::MeanTemperature { window, .. }
            | QueryKind::AggregateKeep { window }
            | QueryKind::AggregateDrop { window }
            | QueryKind::SortedPivot { window } => Some(*window),
            QueryKind::StandaloneFilter => Some(Duration::hours(Self::STANDALONE_FILTER_HOURS)),
        }
    }

    /// Number of entities sampled per query.
    pub fn sampled_entities(&self) -> usize {
        match self {
            QueryKind::MeanTemperature { homes, .. } => *homes,
            _ => 0,
        }
    }

    /// Check the kind's draws fit a generator's range and scale.
    pub fn validate(&self, range: Duration, scale: usize) -> Result<(), GeneratorError> {
        if let Some(window) = self.window() {
            if window < Duration::zero() || window > range {
                return Err(GeneratorError::window_exceeds_range(window, range));
            }
        }
        let requested = self.sampled_entities();
        if requested > scale {
            return Err(GeneratorError::SampleExceedsScale { requested, scale });
        }
        Ok(())
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKind::BareAggregate { aggregate } => write!(f, "bare aggregate {aggregate}"),
            QueryKind::GroupWindowTranspose {
                aggregate,
                cardinality,
                window,
            } => write!(
                f,
                "group window transpose {aggregate} ({cardinality}, {})",
                format_duration(*window)
            ),
            QueryKind::MeanTemperature { homes, window } => write!(
                f,
                "mean temperature ({homes} homes, {})",
                format_duration(*window)
            ),
            QueryKind::AggregateKeep { window } => {
                write!(f, "aggregate keep ({})", format_duration(*window))
            }
            QueryKind::AggregateDrop { window } => {
                write!(f, "aggregate drop ({})", format_duration(*window))
            }
            QueryKind::StandaloneFilter => write!(f, "standalone filter (8h0m0s)"),
            QueryKind::SortedPivot { window } => {
                write!(f, "sorted pivot ({})", format_duration(*window))
            }
        }
    }
}
