//! Dialect-specific query templates.
//!
//! Each query kind has one template per dialect. The generator picks a
//! [`TemplateRenderer`] once, from its [`Dialect`], and every kind renders
//! through it; no kind branches on the dialect itself.
//!
//! Template text is consumed verbatim by the systems under test, so the
//! renderers reproduce it character for character, including the spacing
//! quirks of some Flux pipelines.

mod flux;
mod influxql;

pub use flux::FluxRenderer;
pub use influxql::InfluxQlRenderer;

use crate::dialect::Dialect;
use crate::interval::TimeInterval;
use crate::kind::{Aggregate, Cardinality};

/// Values every template interpolates.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Target database (Flux bucket).
    pub database: &'a str,
    /// Time window the query covers.
    pub interval: &'a TimeInterval,
}

impl<'a> RenderContext<'a> {
    pub fn new(database: &'a str, interval: &'a TimeInterval) -> Self {
        Self { database, interval }
    }
}

/// Renders query text in one dialect.
pub trait TemplateRenderer: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Timestamp literal in this dialect's syntax, from an RFC 3339 string.
    fn timestamp_literal(&self, rfc3339: &str) -> String;

    /// `tag = value` predicate on a tag.
    fn equality_clause(&self, tag: &str, value: &str) -> String;

    /// Logical OR token, with surrounding whitespace.
    fn or_token(&self) -> &'static str {
        " or "
    }

    /// Join equality clauses into one disjunction (without parentheses).
    fn any_of(&self, tag: &str, values: &[String]) -> String {
        values
            .iter()
            .map(|value| self.equality_clause(tag, value))
            .collect::<Vec<_>>()
            .join(self.or_token())
    }

    fn bare_aggregate(&self, ctx: RenderContext<'_>, aggregate: Aggregate) -> String;

    fn group_window_transpose(
        &self,
        ctx: RenderContext<'_>,
        aggregate: Aggregate,
        cardinality: Cardinality,
    ) -> String;

    /// Hourly mean temperature; `homes_predicate` comes from [`Self::any_of`].
    fn mean_temperature(&self, ctx: RenderContext<'_>, homes_predicate: &str) -> String;

    fn aggregate_keep(&self, ctx: RenderContext<'_>) -> String;

    fn aggregate_drop(&self, ctx: RenderContext<'_>) -> String;

    fn standalone_filter(&self, ctx: RenderContext<'_>) -> String;

    fn sorted_pivot(&self, ctx: RenderContext<'_>) -> String;
}
