//! Query dialect selection.

use crate::error::GeneratorError;
use crate::render::{FluxRenderer, InfluxQlRenderer, TemplateRenderer};
use serde::{Deserialize, Serialize};

/// Target query language. Fixed for the lifetime of a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// SQL-like declarative language.
    InfluxQl,
    /// Functional pipeline language.
    Flux,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::InfluxQl, Dialect::Flux];

    /// The template renderer for this dialect.
    pub fn renderer(self) -> Box<dyn TemplateRenderer> {
        match self {
            Dialect::InfluxQl => Box::new(InfluxQlRenderer),
            Dialect::Flux => Box::new(FluxRenderer),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::InfluxQl => write!(f, "InfluxQL"),
            Dialect::Flux => write!(f, "Flux"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "influxql" | "influx-ql" | "sql" => Ok(Dialect::InfluxQl),
            "flux" => Ok(Dialect::Flux),
            _ => Err(GeneratorError::UnknownDialect(s.to_string())),
        }
    }
}
