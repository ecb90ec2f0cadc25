//! bulk-query-gen
//!
//! Driver for the `query_gen` benchmark query generator: resolves run
//! configuration, runs generator workers and writes the queries for a load
//! tester to replay against InfluxQL or Flux endpoints.
//!
//! # CLI Usage
//!
//! ```bash
//! # 1000 Flux sorted-pivot queries as JSON Lines
//! bulk-query-gen generate --dialect flux --db benchmark_db \
//!   --query-type sorted-pivot --queries 1000 --output pivot.jsonl
//!
//! # InfluxQL mix of IoT queries from a YAML run config, 4 workers
//! bulk-query-gen generate --config run.yaml --workers 4
//!
//! # Show available query types
//! bulk-query-gen list
//! ```

pub mod args;
pub mod config;
pub mod driver;
pub mod writer;

pub use args::{GenerateArgs, OutputFormat};
pub use config::{RunConfig, RunSettings};
pub use driver::{generate_into, run_generate};
pub use writer::{QueryWriter, WriteMetrics};
