//! Integration tests for the generate driver.

use bulk_query_gen::{generate_into, run_generate, GenerateArgs, OutputFormat, RunSettings};
use query_gen::Dialect;
use std::io::Write;

fn args(query_type: &str, dialect: Dialect) -> GenerateArgs {
    GenerateArgs {
        db: Some("benchmark_db".to_string()),
        query_type: Some(query_type.to_string()),
        dialect: Some(dialect),
        scale: Some(10),
        queries: Some(20),
        ..Default::default()
    }
}

async fn generate_lines(args: &GenerateArgs) -> Vec<String> {
    let settings = RunSettings::from_args(args).unwrap();
    let mut out = Vec::new();
    generate_into(settings, &mut out).await.unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_single_worker_output_is_deterministic() {
    let args = args("iot-all", Dialect::Flux);

    let first = generate_lines(&args).await;
    let second = generate_lines(&args).await;

    assert_eq!(first.len(), 20);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_jsonl_records() {
    let lines = generate_lines(&args("light-level-8-hr", Dialect::InfluxQl)).await;

    for line in lines {
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["start_label"], "n/a");
        assert!(value["body"]
            .as_str()
            .unwrap()
            .starts_with("SELECT level FROM light_level_room WHERE time > '"));
    }
}

#[tokio::test]
async fn test_multiple_workers_produce_every_query() {
    let mut args = args("sorted-pivot", Dialect::Flux);
    args.workers = Some(3);
    args.format = OutputFormat::Text;

    let lines = generate_lines(&args).await;
    assert_eq!(lines.len(), 20);
    assert!(lines.iter().all(|line| line.contains("|> pivot(")));
}

#[tokio::test]
async fn test_missing_database_name_fails() {
    let mut args = args("sorted-pivot", Dialect::Flux);
    args.db = None;

    let settings = RunSettings::from_args(&args).unwrap();
    let err = generate_into(settings, Vec::new()).await.unwrap_err();
    assert!(format!("{err:#}").contains("database-name"));
}

#[tokio::test]
async fn test_config_file_and_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("run.yaml");
    let output_path = dir.path().join("queries.txt");

    let mut config = std::fs::File::create(&config_path).unwrap();
    writeln!(
        config,
        "database:\n  database-name: iot\ndialect: influxql\nquery_type: aggregate-keep\nqueries: 5\nquery_interval: 30m"
    )
    .unwrap();
    drop(config);

    let args = GenerateArgs {
        config: Some(config_path),
        output: Some(output_path.clone()),
        format: OutputFormat::Text,
        ..Default::default()
    };
    let metrics = run_generate(RunSettings::from_args(&args).unwrap())
        .await
        .unwrap();
    assert_eq!(metrics.queries_written, 5);

    let content = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(content.lines().count(), 5);
    assert!(content
        .lines()
        .all(|line| line.starts_with(r#"SELECT mean("co2_level") as "mean_value""#)));
}
