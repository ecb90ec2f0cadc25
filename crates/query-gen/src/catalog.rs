//! Named query types a benchmark run can select.
//!
//! A query type is a dispatch table with a name. Most tables hold one kind;
//! `iot-all` mixes the IoT kinds. Where a kind draws a random window, the
//! run's configured query interval replaces the type's default length.

use crate::dispatch::DispatchTable;
use crate::error::GeneratorError;
use crate::kind::{Aggregate, Cardinality, QueryKind};
use chrono::Duration;

/// A selectable query type.
#[derive(Debug, Clone, Copy)]
pub struct QueryType {
    pub name: &'static str,
    pub description: &'static str,
    build: fn(Option<Duration>) -> Vec<QueryKind>,
}

impl QueryType {
    /// Look up a query type by name.
    pub fn find(name: &str) -> Result<&'static QueryType, GeneratorError> {
        QUERY_TYPES
            .iter()
            .find(|query_type| query_type.name == name)
            .ok_or_else(|| GeneratorError::UnknownQueryType(name.to_string()))
    }

    /// Build the dispatch table, with `query_interval` overriding default windows.
    pub fn dispatch_table(
        &self,
        query_interval: Option<Duration>,
    ) -> Result<DispatchTable, GeneratorError> {
        DispatchTable::new((self.build)(query_interval))
    }
}

fn or_hours(query_interval: Option<Duration>, hours: i64) -> Duration {
    query_interval.unwrap_or_else(|| Duration::hours(hours))
}

fn bare(aggregate: Aggregate) -> Vec<QueryKind> {
    vec![QueryKind::BareAggregate { aggregate }]
}

fn group_window(cardinality: Cardinality, query_interval: Option<Duration>) -> Vec<QueryKind> {
    vec![QueryKind::GroupWindowTranspose {
        aggregate: Aggregate::Min,
        cardinality,
        window: or_hours(query_interval, 1),
    }]
}

fn mean_temperature(homes: usize, query_interval: Option<Duration>) -> Vec<QueryKind> {
    vec![QueryKind::MeanTemperature {
        homes,
        window: or_hours(query_interval, 12),
    }]
}

fn iot_all(query_interval: Option<Duration>) -> Vec<QueryKind> {
    vec![
        QueryKind::MeanTemperature {
            homes: 1,
            window: Duration::hours(12),
        },
        QueryKind::AggregateKeep {
            window: or_hours(query_interval, 1),
        },
        QueryKind::AggregateDrop {
            window: or_hours(query_interval, 1),
        },
        QueryKind::StandaloneFilter,
        QueryKind::SortedPivot {
            window: Duration::hours(24),
        },
    ]
}

/// All query types, in listing order.
pub static QUERY_TYPES: &[QueryType] = &[
    QueryType {
        name: "bare-aggregate-count",
        description: "count of temperature over the full range",
        build: |_| bare(Aggregate::Count),
    },
    QueryType {
        name: "bare-aggregate-first",
        description: "first temperature over the full range",
        build: |_| bare(Aggregate::First),
    },
    QueryType {
        name: "bare-aggregate-last",
        description: "last temperature over the full range",
        build: |_| bare(Aggregate::Last),
    },
    QueryType {
        name: "bare-aggregate-max",
        description: "max temperature over the full range",
        build: |_| bare(Aggregate::Max),
    },
    QueryType {
        name: "bare-aggregate-mean",
        description: "mean temperature over the full range",
        build: |_| bare(Aggregate::Mean),
    },
    QueryType {
        name: "bare-aggregate-min",
        description: "min temperature over the full range",
        build: |_| bare(Aggregate::Min),
    },
    QueryType {
        name: "bare-aggregate-sum",
        description: "sum of temperature over the full range",
        build: |_| bare(Aggregate::Sum),
    },
    QueryType {
        name: "group-window-transpose-min",
        description: "hourly min per room on the standard IoT dataset (default window 1h)",
        build: |interval| group_window(Cardinality::Low, interval),
    },
    QueryType {
        name: "group-window-transpose-min-cardinality",
        description: "hourly min per series on the high cardinality dataset (default window 1h)",
        build: |interval| group_window(Cardinality::High, interval),
    },
    QueryType {
        name: "1-home-12-hours",
        description: "hourly mean temperature of 1 random home (default window 12h)",
        build: |interval| mean_temperature(1, interval),
    },
    QueryType {
        name: "8-homes-12-hours",
        description: "hourly mean temperature of 8 random homes (default window 12h)",
        build: |interval| mean_temperature(8, interval),
    },
    QueryType {
        name: "aggregate-keep",
        description: "5m CO2 mean keeping time and value columns (default window 1h)",
        build: |interval| {
            vec![QueryKind::AggregateKeep {
                window: or_hours(interval, 1),
            }]
        },
    },
    QueryType {
        name: "aggregate-drop",
        description: "5m CO2 mean dropping tag columns (default window 1h)",
        build: |interval| {
            vec![QueryKind::AggregateDrop {
                window: or_hours(interval, 1),
            }]
        },
    },
    QueryType {
        name: "light-level-8-hr",
        description: "raw room light level over 8 hours",
        build: |_| vec![QueryKind::StandaloneFilter],
    },
    QueryType {
        name: "sorted-pivot",
        description: "air quality rows pivoted by field (default window 24h)",
        build: |interval| {
            vec![QueryKind::SortedPivot {
                window: or_hours(interval, 24),
            }]
        },
    },
    QueryType {
        name: "iot-all",
        description: "cycle through the IoT query kinds",
        build: iot_all,
    },
];
