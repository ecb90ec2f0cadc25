//! End-to-end checks of every query type in both dialects.

use chrono::{DateTime, Duration, TimeZone, Utc};
use query_gen::{
    DatabaseConfig, Dialect, Query, QueryGenerator, QueryPool, TimeInterval, NOT_TIME_BUCKETED,
    QUERY_TYPES,
};
use std::sync::Arc;

fn week() -> TimeInterval {
    TimeInterval::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

fn build(dialect: Dialect, query_type: &str, seed: u64) -> QueryGenerator {
    QueryGenerator::builder(
        DatabaseConfig::with_database_name("benchmark_db"),
        week(),
        10,
        dialect,
    )
    .query_type(query_type)
    .seed(seed)
    .build()
    .unwrap()
}

#[test]
fn test_dialects_never_mix() {
    for query_type in QUERY_TYPES {
        let mut influxql = build(Dialect::InfluxQl, query_type.name, 1);
        let mut flux = build(Dialect::Flux, query_type.name, 1);

        for i in 0..10 {
            let q = influxql.dispatch(i);
            assert!(!q.body.contains("|>"), "{}: {}", query_type.name, q.body);
            assert!(q.human_label.starts_with("InfluxDB (InfluxQL) "));

            let q = flux.dispatch(i);
            assert!(q.body.contains("|>"), "{}: {}", query_type.name, q.body);
            assert!(q.body.contains(r#""benchmark_db""#));
            assert!(q.human_label.starts_with("InfluxDB (Flux) "));
        }
    }
}

#[test]
fn test_fixed_seed_is_byte_identical() {
    for dialect in Dialect::ALL {
        for query_type in QUERY_TYPES {
            let run = |seed| {
                let mut generator = build(dialect, query_type.name, seed);
                (0..25)
                    .map(|i| serde_json::to_string(&generator.dispatch(i)).unwrap())
                    .collect::<Vec<_>>()
            };
            assert_eq!(run(7), run(7), "{}", query_type.name);
        }
    }
}

#[test]
fn test_windows_stay_inside_full_range() {
    let full = week();
    let mut generator = build(Dialect::InfluxQl, "iot-all", 99);

    for i in 0..500 {
        let query = generator.dispatch(i);
        let bounds: Vec<DateTime<Utc>> = query
            .body
            .split('\'')
            .filter_map(|part| DateTime::parse_from_rfc3339(part).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .collect();

        assert_eq!(bounds.len(), 2, "{}", query.body);
        assert!(bounds[0] >= full.start());
        assert!(bounds[1] <= full.end());
        assert!(bounds[0] < bounds[1]);
    }
}

#[test]
fn test_light_level_example() {
    let mut generator = build(Dialect::InfluxQl, "light-level-8-hr", 2024);
    let query = generator.dispatch(0);

    let rest = query
        .body
        .strip_prefix("SELECT level FROM light_level_room WHERE time > '")
        .unwrap();
    let (start, rest) = rest.split_once("' AND time < '").unwrap();
    let end = rest.strip_suffix('\'').unwrap();

    let start = DateTime::parse_from_rfc3339(start).unwrap();
    let end = DateTime::parse_from_rfc3339(end).unwrap();
    assert_eq!(end - start, Duration::hours(8));
    assert_eq!(query.start_label, NOT_TIME_BUCKETED);
    assert_eq!(
        query.human_description,
        "InfluxDB (InfluxQL) 8 hrs Room Light Level (Raw Data): n/a"
    );
}

#[test]
fn test_mean_temperature_one_home_has_single_clause() {
    let mut generator = build(Dialect::InfluxQl, "1-home-12-hours", 5);
    let mut query = Query::default();
    generator.mean_temperature_one_home(&mut query);

    assert_eq!(query.body.matches("home_id = '").count(), 1);
    assert!(query
        .body
        .starts_with("SELECT mean(temperature) from air_condition_room where (home_id = 'home_"));
    assert!(query.body.ends_with(" group by time(1h)"));
}

#[test]
fn test_eight_homes_flux() {
    let mut generator = build(Dialect::Flux, "8-homes-12-hours", 5);
    let query = generator.dispatch(0);

    assert_eq!(query.body.matches("r.home_id == \"").count(), 8);
    assert_eq!(query.body.matches(" or ").count(), 7);
    assert!(query
        .body
        .ends_with(") |> aggregateWindow(every:1h, fn:mean) |> yield()"));
}

#[test]
fn test_keep_drop_asymmetry() {
    let mut keep = build(Dialect::InfluxQl, "aggregate-keep", 11);
    let mut drop = build(Dialect::InfluxQl, "aggregate-drop", 11);
    assert_eq!(keep.dispatch(0).body, drop.dispatch(0).body);

    let mut keep = build(Dialect::Flux, "aggregate-keep", 11);
    let mut drop = build(Dialect::Flux, "aggregate-drop", 11);
    let keep_body = keep.dispatch(0).body;
    let drop_body = drop.dispatch(0).body;
    assert!(keep_body.contains("|> keep(columns:"));
    assert!(drop_body.contains("|> drop(columns:"));
    assert_ne!(keep_body, drop_body);
}

#[test]
fn test_workers_share_pool() {
    let pool = Arc::new(QueryPool::with_max_idle(4));
    let base = QueryGenerator::builder(
        DatabaseConfig::with_database_name("benchmark_db"),
        week(),
        10,
        Dialect::Flux,
    )
    .query_type("iot-all")
    .pool(Arc::clone(&pool))
    .seed(42)
    .build()
    .unwrap();

    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            let mut generator = base.for_worker(worker);
            std::thread::spawn(move || {
                for i in 0..50 {
                    let query = generator.dispatch(i);
                    assert!(!query.body.is_empty());
                    generator.pool().release(query);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(pool.allocated() + pool.reused(), 200);
    assert!(pool.allocated() <= 4 + 4);
}
