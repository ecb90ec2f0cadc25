//! Run configuration: YAML file plus command-line overrides.

pub mod duration;
pub mod timestamp;

use crate::args::{GenerateArgs, OutputFormat};
use anyhow::Context;
use chrono::Duration;
use query_gen::{DatabaseConfig, Dialect, QueryGenerator, QueryGeneratorBuilder, TimeInterval};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use duration::parse_duration;
pub use timestamp::parse_timestamp;

pub const DEFAULT_SCALE: usize = 100;
pub const DEFAULT_START: &str = "2024-01-01T00:00:00Z";
pub const DEFAULT_END: &str = "2024-01-08T00:00:00Z";
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_QUERIES: u64 = 1000;

/// Run config as written in YAML. Every field is optional.
///
/// ```yaml
/// database:
///   database-name: benchmark_db
/// dialect: flux
/// query_type: iot-all
/// scale: 100
/// start: 2024-01-01T00:00:00Z
/// end: 2024-01-08T00:00:00Z
/// query_interval: 1h
/// seed: 42
/// queries: 1000
/// workers: 4
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    pub dialect: Option<Dialect>,
    pub query_type: Option<String>,
    pub scale: Option<usize>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub query_interval: Option<String>,
    pub seed: Option<u64>,
    pub queries: Option<u64>,
    pub workers: Option<usize>,
}

impl RunConfig {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse run config YAML")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read run config: {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid run config: {}", path.display()))
    }
}

/// Fully resolved settings for one generation run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub db_config: DatabaseConfig,
    pub dialect: Dialect,
    pub query_type: Option<String>,
    pub scale: usize,
    pub range: TimeInterval,
    pub query_interval: Option<Duration>,
    pub seed: u64,
    pub queries: u64,
    pub workers: usize,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
}

impl RunSettings {
    /// Resolve CLI arguments, loading the YAML config they point at.
    pub fn from_args(args: &GenerateArgs) -> anyhow::Result<Self> {
        let file = match &args.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };
        Self::resolve(file, args)
    }

    /// Overlay `args` on `file` and fill defaults.
    pub fn resolve(file: RunConfig, args: &GenerateArgs) -> anyhow::Result<Self> {
        let mut db_config = file.database;
        db_config.merge(
            DatabaseConfig::from_pairs(&args.db_config)
                .map_err(anyhow::Error::msg)
                .context("Invalid --db-config entry")?,
        );
        if let Some(db) = &args.db {
            db_config.merge(DatabaseConfig::with_database_name(db.as_str()));
        }

        let start = args
            .start
            .as_deref()
            .or(file.start.as_deref())
            .unwrap_or(DEFAULT_START);
        let end = args
            .end
            .as_deref()
            .or(file.end.as_deref())
            .unwrap_or(DEFAULT_END);
        let range = TimeInterval::new(parse_timestamp(start)?, parse_timestamp(end)?)
            .context("Invalid time range")?;

        let query_interval = args
            .query_interval
            .as_deref()
            .or(file.query_interval.as_deref())
            .map(parse_duration)
            .transpose()
            .context("Invalid query interval")?;

        let workers = args.workers.or(file.workers).unwrap_or(1);
        if workers == 0 {
            anyhow::bail!("Worker count must be at least 1");
        }

        Ok(Self {
            db_config,
            dialect: args.dialect.or(file.dialect).unwrap_or(Dialect::InfluxQl),
            query_type: args.query_type.clone().or(file.query_type),
            scale: args.scale.or(file.scale).unwrap_or(DEFAULT_SCALE),
            range,
            query_interval,
            seed: args.seed.or(file.seed).unwrap_or(DEFAULT_SEED),
            queries: args.queries.or(file.queries).unwrap_or(DEFAULT_QUERIES),
            workers,
            output: args.output.clone(),
            format: args.format,
        })
    }

    /// Generator builder carrying these settings.
    pub fn generator_builder(&self) -> QueryGeneratorBuilder {
        let mut builder = QueryGenerator::builder(
            self.db_config.clone(),
            self.range,
            self.scale,
            self.dialect,
        )
        .seed(self.seed);
        if let Some(query_type) = &self.query_type {
            builder = builder.query_type(query_type.as_str());
        }
        if let Some(query_interval) = self.query_interval {
            builder = builder.query_interval(query_interval);
        }
        builder
    }
}
