//! Query generator: per-run state plus the query kind operations.

use crate::catalog::QueryType;
use crate::config::{DatabaseConfig, DATABASE_NAME};
use crate::dialect::Dialect;
use crate::dispatch::DispatchTable;
use crate::error::GeneratorError;
use crate::interval::{format_duration, TimeInterval};
use crate::kind::{Aggregate, Cardinality, QueryKind};
use crate::query::{Query, QueryPool, NOT_TIME_BUCKETED};
use crate::render::{RenderContext, TemplateRenderer};
use crate::sampler::{sample_entities, EntityFormatter, PatternFormatter};
use chrono::Duration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, trace};

/// Query type used when the builder is given neither a table nor a name.
pub const DEFAULT_QUERY_TYPE: &str = "iot-all";

/// Tag that identifies homes in the IoT dataset.
const HOME_TAG: &str = "home_id";

/// Generates benchmark queries in one dialect over one time range.
///
/// All random draws go through the generator's own seeded RNG, so the same
/// configuration, seed and call sequence produce byte-identical queries.
/// Concurrent workers each use their own generator (see
/// [`QueryGenerator::for_worker`]).
pub struct QueryGenerator {
    renderer: Box<dyn TemplateRenderer>,
    database_name: String,
    scale: usize,
    full_range: TimeInterval,
    query_interval: Option<Duration>,
    table: DispatchTable,
    formatter: Arc<dyn EntityFormatter>,
    pool: Arc<QueryPool>,
    seed: u64,
    rng: StdRng,
}

impl QueryGenerator {
    /// Start building a generator. `scale` is the number of entities (homes)
    /// in the dataset.
    pub fn builder(
        db_config: DatabaseConfig,
        full_range: TimeInterval,
        scale: usize,
        dialect: Dialect,
    ) -> QueryGeneratorBuilder {
        QueryGeneratorBuilder {
            db_config,
            full_range,
            scale,
            dialect,
            query_interval: None,
            table: None,
            query_type: None,
            seed: 0,
            formatter: None,
            pool: None,
        }
    }

    /// Generator for worker `worker_id` of a multi-worker run.
    ///
    /// Same configuration, pool and formatter, with the RNG seeded at
    /// `seed + worker_id` so workers draw independent streams.
    pub fn for_worker(&self, worker_id: u64) -> QueryGenerator {
        let seed = self.seed.wrapping_add(worker_id);
        QueryGenerator {
            renderer: self.dialect().renderer(),
            database_name: self.database_name.clone(),
            scale: self.scale,
            full_range: self.full_range,
            query_interval: self.query_interval,
            table: self.table.clone(),
            formatter: Arc::clone(&self.formatter),
            pool: Arc::clone(&self.pool),
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.renderer.dialect()
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn full_range(&self) -> &TimeInterval {
        &self.full_range
    }

    pub fn query_interval(&self) -> Option<Duration> {
        self.query_interval
    }

    pub fn dispatch_table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn pool(&self) -> &Arc<QueryPool> {
        &self.pool
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate the query for request `index`.
    ///
    /// Checks a buffer out of the pool, fills it with the kind the dispatch
    /// table maps `index` to, and hands it to the caller.
    pub fn dispatch(&mut self, index: usize) -> Query {
        let mut query = self.pool.checkout();
        let kind = self.table.kind_for(index);
        trace!("Dispatch {} -> {}", index, kind);
        self.generate(kind, &mut query);
        query
    }

    /// Fill `query` with one query of `kind`.
    pub fn generate(&mut self, kind: QueryKind, query: &mut Query) {
        match kind {
            QueryKind::BareAggregate { aggregate } => self.bare_aggregate(query, aggregate),
            QueryKind::GroupWindowTranspose {
                aggregate,
                cardinality,
                window,
            } => self.group_window_transpose(query, aggregate, cardinality, window),
            QueryKind::MeanTemperature { homes, window } => {
                self.mean_temperature_n_homes(query, homes, window)
            }
            QueryKind::AggregateKeep { window } => self.aggregate_keep(query, window),
            QueryKind::AggregateDrop { window } => self.aggregate_drop(query, window),
            QueryKind::StandaloneFilter => self.standalone_filter(query),
            QueryKind::SortedPivot { window } => self.sorted_pivot(query, window),
        }
    }

    /// Aggregate over the full range with no grouping.
    pub fn bare_aggregate(&mut self, query: &mut Query, aggregate: Aggregate) {
        let interval = self.full_range;
        let body = self
            .renderer
            .bare_aggregate(RenderContext::new(&self.database_name, &interval), aggregate);

        let label = format!(
            "InfluxDB ({}) bare aggregate {}, full range",
            self.dialect(),
            aggregate
        );
        query.populate(&label, &interval.start_string(), &body);
    }

    /// Hourly `aggregate` per series over a random window.
    pub fn group_window_transpose(
        &mut self,
        query: &mut Query,
        aggregate: Aggregate,
        cardinality: Cardinality,
        window: Duration,
    ) {
        let interval = self.full_range.rand_window(window, &mut self.rng);
        let body = self.renderer.group_window_transpose(
            RenderContext::new(&self.database_name, &interval),
            aggregate,
            cardinality,
        );

        let label = format!(
            "InfluxDB ({}) {} per {}, rand {} by 1h, {}",
            self.dialect(),
            aggregate,
            cardinality.group_tag(),
            format_duration(window),
            cardinality
        );
        query.populate(&label, &interval.start_string(), &body);
    }

    /// Hourly mean temperature of one random home over 12 hours.
    pub fn mean_temperature_one_home(&mut self, query: &mut Query) {
        self.mean_temperature_n_homes(query, 1, Duration::hours(12));
    }

    /// Hourly mean temperature of `homes` distinct random homes over a random
    /// window.
    pub fn mean_temperature_n_homes(&mut self, query: &mut Query, homes: usize, window: Duration) {
        let interval = self.full_range.rand_window(window, &mut self.rng);
        let home_ids: Vec<String> = sample_entities(&mut self.rng, self.scale, homes)
            .into_iter()
            .map(|index| self.formatter.format(index))
            .collect();

        let predicate = self.renderer.any_of(HOME_TAG, &home_ids);
        let body = self
            .renderer
            .mean_temperature(RenderContext::new(&self.database_name, &interval), &predicate);

        let label = format!(
            "InfluxDB ({}) mean temperature, rand {:4} homes, rand {} by 1h",
            self.dialect(),
            homes,
            format_duration(window)
        );
        query.populate(&label, &interval.start_string(), &body);
    }

    /// Windowed CO2 mean keeping only time and value columns.
    pub fn aggregate_keep(&mut self, query: &mut Query, window: Duration) {
        let interval = self.full_range.rand_window(window, &mut self.rng);
        let body = self
            .renderer
            .aggregate_keep(RenderContext::new(&self.database_name, &interval));

        let label = format!("InfluxDB ({}) aggregate/keep", self.dialect());
        query.populate(&label, &interval.start_string(), &body);
    }

    /// Windowed CO2 mean dropping tag columns.
    pub fn aggregate_drop(&mut self, query: &mut Query, window: Duration) {
        let interval = self.full_range.rand_window(window, &mut self.rng);
        let body = self
            .renderer
            .aggregate_drop(RenderContext::new(&self.database_name, &interval));

        let label = format!("InfluxDB ({}) aggregate/drop", self.dialect());
        query.populate(&label, &interval.start_string(), &body);
    }

    /// Raw light level readings over a random 8 hour window.
    ///
    /// Not time-bucketed: the start label is [`NOT_TIME_BUCKETED`].
    pub fn standalone_filter(&mut self, query: &mut Query) {
        let window = Duration::hours(QueryKind::STANDALONE_FILTER_HOURS);
        let interval = self.full_range.rand_window(window, &mut self.rng);
        let body = self
            .renderer
            .standalone_filter(RenderContext::new(&self.database_name, &interval));

        let label = format!(
            "InfluxDB ({}) 8 hrs Room Light Level (Raw Data)",
            self.dialect()
        );
        query.populate(&label, NOT_TIME_BUCKETED, &body);
    }

    /// Air quality rows over a random window, pivoted by field.
    pub fn sorted_pivot(&mut self, query: &mut Query, window: Duration) {
        let interval = self.full_range.rand_window(window, &mut self.rng);
        let body = self
            .renderer
            .sorted_pivot(RenderContext::new(&self.database_name, &interval));

        let label = format!("InfluxDB ({}) Sorted Pivot", self.dialect());
        query.populate(&label, &interval.start_string(), &body);
    }
}

/// Builder for [`QueryGenerator`]. Validation happens in [`Self::build`].
pub struct QueryGeneratorBuilder {
    db_config: DatabaseConfig,
    full_range: TimeInterval,
    scale: usize,
    dialect: Dialect,
    query_interval: Option<Duration>,
    table: Option<DispatchTable>,
    query_type: Option<String>,
    seed: u64,
    formatter: Option<Arc<dyn EntityFormatter>>,
    pool: Option<Arc<QueryPool>>,
}

impl QueryGeneratorBuilder {
    /// Window length for kinds that draw a random window; replaces their default.
    pub fn query_interval(mut self, query_interval: Duration) -> Self {
        self.query_interval = Some(query_interval);
        self
    }

    /// Use an explicit dispatch table. Takes precedence over [`Self::query_type`].
    pub fn dispatch_table(mut self, table: DispatchTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Use a named query type from the catalog.
    pub fn query_type(mut self, name: impl Into<String>) -> Self {
        self.query_type = Some(name.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Entity identifier formatter. Defaults to [`PatternFormatter::default`].
    pub fn entity_formatter(mut self, formatter: Arc<dyn EntityFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Share a buffer pool, e.g. with a writer that releases queries.
    pub fn pool(mut self, pool: Arc<QueryPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn build(self) -> Result<QueryGenerator, GeneratorError> {
        let database_name = self
            .db_config
            .database_name()
            .ok_or(GeneratorError::MissingDatabaseName(DATABASE_NAME))?
            .to_string();

        if self.scale == 0 {
            return Err(GeneratorError::InvalidScale(self.scale));
        }

        let table = match (self.table, self.query_type) {
            (Some(table), _) => table,
            (None, Some(name)) => QueryType::find(&name)?.dispatch_table(self.query_interval)?,
            (None, None) => {
                QueryType::find(DEFAULT_QUERY_TYPE)?.dispatch_table(self.query_interval)?
            }
        };

        let range = self.full_range.duration();
        for kind in table.kinds() {
            kind.validate(range, self.scale)?;
        }

        debug!(
            "Built {} query generator: database '{}', scale {}, range {} .. {}, {} kind(s), seed {}",
            self.dialect,
            database_name,
            self.scale,
            self.full_range.start_string(),
            self.full_range.end_string(),
            table.len(),
            self.seed
        );

        Ok(QueryGenerator {
            renderer: self.dialect.renderer(),
            database_name,
            scale: self.scale,
            full_range: self.full_range,
            query_interval: self.query_interval,
            table,
            formatter: self
                .formatter
                .unwrap_or_else(|| Arc::new(PatternFormatter::default())),
            pool: self.pool.unwrap_or_default(),
            seed: self.seed,
            rng: StdRng::seed_from_u64(self.seed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn week() -> TimeInterval {
        TimeInterval::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn generator(dialect: Dialect, query_type: &str) -> QueryGenerator {
        QueryGenerator::builder(
            DatabaseConfig::with_database_name("benchmark_db"),
            week(),
            10,
            dialect,
        )
        .query_type(query_type)
        .seed(42)
        .build()
        .unwrap()
    }

    /// Pull the two quoted InfluxQL timestamps out of a query body.
    fn quoted_timestamps(body: &str) -> Vec<DateTime<Utc>> {
        body.split('\'')
            .filter_map(|part| DateTime::parse_from_rfc3339(part).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .collect()
    }

    #[test]
    fn test_missing_database_name() {
        let result =
            QueryGenerator::builder(DatabaseConfig::new(), week(), 10, Dialect::Flux).build();
        assert!(matches!(
            result,
            Err(GeneratorError::MissingDatabaseName("database-name"))
        ));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let result = QueryGenerator::builder(
            DatabaseConfig::with_database_name("db"),
            week(),
            0,
            Dialect::Flux,
        )
        .build();
        assert!(matches!(result, Err(GeneratorError::InvalidScale(0))));
    }

    #[test]
    fn test_window_longer_than_range_rejected() {
        let result = QueryGenerator::builder(
            DatabaseConfig::with_database_name("db"),
            week(),
            10,
            Dialect::InfluxQl,
        )
        .query_type("sorted-pivot")
        .query_interval(Duration::days(8))
        .build();
        assert!(matches!(
            result,
            Err(GeneratorError::WindowExceedsRange { .. })
        ));
    }

    #[test]
    fn test_homes_beyond_scale_rejected() {
        let result = QueryGenerator::builder(
            DatabaseConfig::with_database_name("db"),
            week(),
            4,
            Dialect::InfluxQl,
        )
        .query_type("8-homes-12-hours")
        .build();
        assert!(matches!(
            result,
            Err(GeneratorError::SampleExceedsScale {
                requested: 8,
                scale: 4
            })
        ));
    }

    #[test]
    fn test_unknown_query_type() {
        let result = QueryGenerator::builder(
            DatabaseConfig::with_database_name("db"),
            week(),
            10,
            Dialect::InfluxQl,
        )
        .query_type("cpu-max-all-8")
        .build();
        assert!(matches!(result, Err(GeneratorError::UnknownQueryType(_))));
    }

    #[test]
    fn test_light_level_influxql() {
        let mut generator = generator(Dialect::InfluxQl, "light-level-8-hr");
        let full = week();

        for i in 0..20 {
            let query = generator.dispatch(i);
            assert!(query
                .body
                .starts_with("SELECT level FROM light_level_room WHERE time > '"));
            assert_eq!(query.start_label, NOT_TIME_BUCKETED);
            assert!(!query.is_time_bucketed());
            assert_eq!(
                query.human_label,
                "InfluxDB (InfluxQL) 8 hrs Room Light Level (Raw Data)"
            );

            let bounds = quoted_timestamps(&query.body);
            assert_eq!(bounds.len(), 2);
            assert_eq!(bounds[1] - bounds[0], Duration::hours(8));
            assert!(bounds[0] >= full.start() && bounds[1] <= full.end());
        }
    }

    #[test]
    fn test_sorted_pivot_flux_spans_one_day() {
        let mut generator = generator(Dialect::Flux, "sorted-pivot");
        let query = generator.dispatch(0);

        assert!(query
            .body
            .contains(r#"pivot(rowKey:["_time"], columnKey:["_field"], valueColumn:"_value")"#));

        let range = query
            .body
            .split("range(start: ")
            .nth(1)
            .and_then(|rest| rest.split(')').next())
            .unwrap();
        let (start, stop) = range.split_once(", stop: ").unwrap();
        let start = DateTime::parse_from_rfc3339(start).unwrap();
        let stop = DateTime::parse_from_rfc3339(stop).unwrap();

        assert_eq!(stop - start, Duration::hours(24));
        assert!(start.with_timezone(&Utc) >= week().start());
        assert!(stop.with_timezone(&Utc) <= week().end());
        assert_eq!(
            query.start_label,
            start
                .with_timezone(&Utc)
                .to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
        );
    }

    #[test]
    fn test_mean_temperature_clause_counts() {
        for dialect in Dialect::ALL {
            let mut generator = generator(dialect, "iot-all");

            let mut one = Query::default();
            generator.mean_temperature_n_homes(&mut one, 1, Duration::hours(12));
            assert!(!one.body.contains(" or "));
            assert_eq!(one.body.matches("home_").count(), 2, "{}", one.body);

            let mut many = Query::default();
            generator.mean_temperature_n_homes(&mut many, 5, Duration::hours(12));
            assert_eq!(many.body.matches(" or ").count(), 4);

            let ids: std::collections::HashSet<_> = many
                .body
                .match_indices("home_id")
                .filter_map(|(pos, _)| {
                    many.body[pos..]
                        .split(['\'', '"'])
                        .nth(1)
                        .map(str::to_string)
                })
                .collect();
            assert_eq!(ids.len(), 5, "{}", many.body);
        }
    }

    #[test]
    fn test_mean_temperature_label() {
        let mut generator = generator(Dialect::Flux, "1-home-12-hours");
        let query = generator.dispatch(0);
        assert_eq!(
            query.human_label,
            "InfluxDB (Flux) mean temperature, rand    1 homes, rand 12h0m0s by 1h"
        );
        assert!(query.human_description.starts_with(&query.human_label));
    }

    #[test]
    fn test_bare_aggregate_uses_full_range() {
        let mut generator = generator(Dialect::InfluxQl, "bare-aggregate-first");
        let query = generator.dispatch(3);
        assert_eq!(
            query.body,
            "SELECT first(temperature) FROM air_condition_room WHERE time >= '2024-01-01T00:00:00Z' AND time < '2024-01-08T00:00:00Z'"
        );
        assert_eq!(query.start_label, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_same_seed_same_queries() {
        for dialect in Dialect::ALL {
            let mut gen1 = generator(dialect, "iot-all");
            let mut gen2 = generator(dialect, "iot-all");

            for i in 0..50 {
                assert_eq!(gen1.dispatch(i), gen2.dispatch(i));
            }
        }
    }

    #[test]
    fn test_for_worker_uses_offset_seed() {
        let base = generator(Dialect::Flux, "sorted-pivot");
        let mut worker0 = base.for_worker(0);
        let mut worker1 = base.for_worker(1);
        let mut direct = generator(Dialect::Flux, "sorted-pivot");

        assert_eq!(worker1.seed(), 43);
        assert!(Arc::ptr_eq(worker0.pool(), base.pool()));
        assert_eq!(worker0.dispatch(0), direct.dispatch(0));

        let w0: Vec<_> = (0..10).map(|i| worker0.dispatch(i).body).collect();
        let w1: Vec<_> = (0..10).map(|i| worker1.dispatch(i).body).collect();
        assert_ne!(w0, w1);
    }

    #[test]
    fn test_dispatch_runs_registered_kind() {
        let table = DispatchTable::new(vec![
            QueryKind::StandaloneFilter,
            QueryKind::AggregateKeep {
                window: Duration::hours(1),
            },
            QueryKind::BareAggregate {
                aggregate: Aggregate::Max,
            },
        ])
        .unwrap();
        let mut generator = QueryGenerator::builder(
            DatabaseConfig::with_database_name("db"),
            week(),
            10,
            Dialect::Flux,
        )
        .dispatch_table(table)
        .build()
        .unwrap();

        assert!(generator.dispatch(0).human_label.contains("Light Level"));
        assert_eq!(
            generator.dispatch(1).human_label,
            "InfluxDB (Flux) aggregate/keep"
        );
        assert!(generator.dispatch(2).body.contains("|> max() "));
        assert!(generator.dispatch(3).human_label.contains("Light Level"));
    }

    #[test]
    fn test_dispatch_reuses_released_buffers_without_leakage() {
        let mut generator = generator(Dialect::InfluxQl, "iot-all");
        let pool = Arc::clone(generator.pool());

        let first = generator.dispatch(3);
        assert_eq!(first.start_label, NOT_TIME_BUCKETED);
        pool.release(first);

        let second = generator.dispatch(4);
        assert_eq!(pool.reused(), 1);
        assert_eq!(second.human_label, "InfluxDB (InfluxQL) Sorted Pivot");
        assert_ne!(second.start_label, NOT_TIME_BUCKETED);
        assert!(second.body.starts_with("SELECT * FROM air_quality_room"));
    }

    #[test]
    fn test_custom_entity_formatter() {
        let mut generator = QueryGenerator::builder(
            DatabaseConfig::with_database_name("db"),
            week(),
            3,
            Dialect::InfluxQl,
        )
        .query_type("1-home-12-hours")
        .entity_formatter(Arc::new(|i: usize| format!("sh-{i:03}")))
        .build()
        .unwrap();

        let query = generator.dispatch(0);
        assert!(
            ["home_id = 'sh-000'", "home_id = 'sh-001'", "home_id = 'sh-002'"]
                .iter()
                .any(|clause| query.body.contains(clause)),
            "{}",
            query.body
        );
    }
}
