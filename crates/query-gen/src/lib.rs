//! Benchmark query generator for time-series database load testing.
//!
//! This crate produces InfluxQL or Flux query text for a fixed set of query
//! kinds over pseudo-randomly chosen windows of a known time range. The same
//! logical parameters render to equivalent text in either dialect, so a load
//! driver can issue comparable workloads against both systems.
//!
//! # Architecture
//!
//! ```text
//! DatabaseConfig + TimeInterval + scale + Dialect
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │    QueryGenerator    │
//! │                      │
//! │  - renderer (dyn)    │
//! │  - rng (StdRng)      │
//! │  - dispatch table    │
//! │  - pool (Arc)        │
//! └──────────┬───────────┘
//!            │ dispatch(i)
//!            ▼
//!    Query { human_label, human_description, start_label, body }
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use query_gen::{DatabaseConfig, Dialect, QueryGenerator, TimeInterval};
//!
//! let config = DatabaseConfig::with_database_name("benchmark_db");
//! let range = TimeInterval::new(
//!     Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap(),
//! )
//! .unwrap();
//!
//! let mut generator = QueryGenerator::builder(config, range, 10, Dialect::Flux)
//!     .query_type("sorted-pivot")
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let query = generator.dispatch(0);
//! assert!(query.body.contains("pivot("));
//! ```
//!
//! # Query kinds
//!
//! - bare aggregate over the full range
//! - grouped window aggregate on low or high cardinality data
//! - mean temperature over N randomly sampled homes
//! - windowed mean with column keep / column drop
//! - standalone light level filter (raw data, 8 hours)
//! - sorted pivot

pub mod catalog;
pub mod config;
pub mod dialect;
pub mod dispatch;
pub mod error;
pub mod generator;
pub mod interval;
pub mod kind;
pub mod query;
pub mod render;
pub mod sampler;

// Re-exports for convenience
pub use catalog::{QueryType, QUERY_TYPES};
pub use config::{DatabaseConfig, DATABASE_NAME};
pub use dialect::Dialect;
pub use dispatch::DispatchTable;
pub use error::GeneratorError;
pub use generator::{QueryGenerator, QueryGeneratorBuilder};
pub use interval::{format_duration, TimeInterval};
pub use kind::{Aggregate, Cardinality, QueryKind};
pub use query::{Query, QueryPool, NOT_TIME_BUCKETED};
pub use render::{FluxRenderer, InfluxQlRenderer, TemplateRenderer};
pub use sampler::{sample_entities, EntityFormatter, PatternFormatter};
