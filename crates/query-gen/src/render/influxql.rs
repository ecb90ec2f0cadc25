use super::{RenderContext, TemplateRenderer};
use crate::dialect::Dialect;
use crate::kind::{Aggregate, Cardinality};

/// InfluxQL templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfluxQlRenderer;

impl InfluxQlRenderer {
    fn bounds(&self, ctx: RenderContext<'_>) -> (String, String) {
        (
            self.timestamp_literal(&ctx.interval.start_string()),
            self.timestamp_literal(&ctx.interval.end_string()),
        )
    }

    // InfluxQL has no column selection; keep and drop share this query.
    fn co2_mean(&self, ctx: RenderContext<'_>) -> String {
        let (start, end) = self.bounds(ctx);
        format!(
            r#"SELECT mean("co2_level") as "mean_value" FROM "air_quality_room" WHERE time > {start} AND time < {end} AND "room_id"='4' GROUP BY time(5m) FILL(null)"#
        )
    }
}

impl TemplateRenderer for InfluxQlRenderer {
    fn dialect(&self) -> Dialect {
        Dialect::InfluxQl
    }

    fn timestamp_literal(&self, rfc3339: &str) -> String {
        format!("'{rfc3339}'")
    }

    fn equality_clause(&self, tag: &str, value: &str) -> String {
        format!("{tag} = '{value}'")
    }

    fn bare_aggregate(&self, ctx: RenderContext<'_>, aggregate: Aggregate) -> String {
        let (start, end) = self.bounds(ctx);
        format!("SELECT {aggregate}(temperature) FROM air_condition_room WHERE time >= {start} AND time < {end}")
    }

    fn group_window_transpose(
        &self,
        ctx: RenderContext<'_>,
        aggregate: Aggregate,
        cardinality: Cardinality,
    ) -> String {
        let (start, end) = self.bounds(ctx);
        format!(
            "SELECT {aggregate}({field}) FROM {measurement} WHERE time >= {start} AND time < {end} GROUP BY time(1h), {tag}",
            field = cardinality.field(),
            measurement = cardinality.measurement(),
            tag = cardinality.group_tag(),
        )
    }

    fn mean_temperature(&self, ctx: RenderContext<'_>, homes_predicate: &str) -> String {
        let (start, end) = self.bounds(ctx);
        format!("SELECT mean(temperature) from air_condition_room where ({homes_predicate}) and time >= {start} and time < {end} group by time(1h)")
    }

    fn aggregate_keep(&self, ctx: RenderContext<'_>) -> String {
        self.co2_mean(ctx)
    }

    fn aggregate_drop(&self, ctx: RenderContext<'_>) -> String {
        self.co2_mean(ctx)
    }

    fn standalone_filter(&self, ctx: RenderContext<'_>) -> String {
        let (start, end) = self.bounds(ctx);
        format!("SELECT level FROM light_level_room WHERE time > {start} AND time < {end}")
    }

    fn sorted_pivot(&self, ctx: RenderContext<'_>) -> String {
        let (start, end) = self.bounds(ctx);
        format!("SELECT * FROM air_quality_room WHERE time > {start} AND time < {end}")
    }
}
