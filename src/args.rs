//! CLI argument definitions.

use clap::{Args, ValueEnum};
use query_gen::Dialect;
use std::path::PathBuf;

/// How generated queries are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per query (label, description, start, body)
    #[default]
    #[value(name = "jsonl")]
    Jsonl,
    /// Query bodies only, one per line
    #[value(name = "text")]
    Text,
}

/// Arguments for `bulk-query-gen generate`.
///
/// Every value can also come from the YAML run config; flags win.
#[derive(Args, Clone, Debug, Default)]
pub struct GenerateArgs {
    /// Path to a YAML run config
    #[arg(long, short = 'c', env = "BULK_QUERY_GEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Query dialect: influxql or flux
    #[arg(long, env = "BULK_QUERY_GEN_DIALECT")]
    pub dialect: Option<Dialect>,

    /// Query type to generate (see `bulk-query-gen list`)
    #[arg(long)]
    pub query_type: Option<String>,

    /// Database (InfluxQL db / Flux bucket) name
    #[arg(long, env = "BULK_QUERY_GEN_DB")]
    pub db: Option<String>,

    /// Extra database config entries (repeatable)
    #[arg(long = "db-config", value_name = "KEY=VALUE")]
    pub db_config: Vec<String>,

    /// Number of entities (homes) in the dataset
    #[arg(long)]
    pub scale: Option<usize>,

    /// Start of the valid time range (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End of the valid time range (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Window length for windowed query kinds, e.g. "1h", "30m", "1d"
    #[arg(long)]
    pub query_interval: Option<String>,

    /// Number of queries to generate
    #[arg(long)]
    pub queries: Option<u64>,

    /// Random seed for deterministic generation (same seed = same queries)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of generator workers, each with its own RNG stream
    #[arg(long)]
    pub workers: Option<usize>,

    /// Output file (stdout when omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Jsonl)]
    pub format: OutputFormat,
}
