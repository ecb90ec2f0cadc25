use super::{RenderContext, TemplateRenderer};
use crate::dialect::Dialect;
use crate::kind::{Aggregate, Cardinality};

/// Flux templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct FluxRenderer;

impl FluxRenderer {
    fn bounds(&self, ctx: RenderContext<'_>) -> (String, String) {
        (
            self.timestamp_literal(&ctx.interval.start_string()),
            self.timestamp_literal(&ctx.interval.end_string()),
        )
    }

    /// Shared source and filters of the CO2 keep/drop pipelines, followed by
    /// the column selection stage.
    fn co2_mean(&self, ctx: RenderContext<'_>, columns_stage: &str) -> String {
        let (start, end) = self.bounds(ctx);
        format!(
            concat!(
                r#"from(bucket: "{db}") "#,
                r#"|> range(start: {start}, stop: {end}) "#,
                r#"|> filter(fn: (r) => r._measurement == "air_quality_room" and r._field == "co2_level")"#,
                r#"|> filter(fn: (r) => r.room_id == "4")"#,
                r#"{columns}"#,
                r#"|> aggregateWindow(every: 5m, fn: mean)"#,
            ),
            db = ctx.database,
            start = start,
            end = end,
            columns = columns_stage,
        )
    }
}

impl TemplateRenderer for FluxRenderer {
    fn dialect(&self) -> Dialect {
        Dialect::Flux
    }

    fn timestamp_literal(&self, rfc3339: &str) -> String {
        rfc3339.to_string()
    }

    fn equality_clause(&self, tag: &str, value: &str) -> String {
        format!(r#"r.{tag} == "{value}""#)
    }

    fn bare_aggregate(&self, ctx: RenderContext<'_>, aggregate: Aggregate) -> String {
        let (start, end) = self.bounds(ctx);
        format!(
            concat!(
                r#"from(bucket:"{db}") "#,
                r#"|> range(start:{start}, stop:{end}) "#,
                r#"|> filter(fn:(r) => r._measurement == "air_condition_room" and r._field == "temperature") "#,
                r#"|> group() "#,
                r#"|> {aggregate}() "#,
                r#"|> yield()"#,
            ),
            db = ctx.database,
            start = start,
            end = end,
            aggregate = aggregate,
        )
    }

    fn group_window_transpose(
        &self,
        ctx: RenderContext<'_>,
        aggregate: Aggregate,
        cardinality: Cardinality,
    ) -> String {
        let (start, end) = self.bounds(ctx);
        format!(
            concat!(
                r#"from(bucket:"{db}") "#,
                r#"|> range(start:{start}, stop:{end}) "#,
                r#"|> filter(fn:(r) => r._measurement == "{measurement}" and r._field == "{field}") "#,
                r#"|> group(columns:["{tag}"]) "#,
                r#"|> window(every:1h) "#,
                r#"|> {aggregate}() "#,
                r#"|> duplicate(column:"_stop", as:"_time") "#,
                r#"|> window(every:inf) "#,
                r#"|> yield()"#,
            ),
            db = ctx.database,
            start = start,
            end = end,
            measurement = cardinality.measurement(),
            field = cardinality.field(),
            tag = cardinality.group_tag(),
            aggregate = aggregate,
        )
    }

    fn mean_temperature(&self, ctx: RenderContext<'_>, homes_predicate: &str) -> String {
        let (start, end) = self.bounds(ctx);
        format!(
            concat!(
                r#"from(bucket:"{db}") "#,
                r#"|> range(start:{start}, stop:{end}) "#,
                r#"|> filter(fn:(r) => r._measurement == "air_condition_room" and r._field == "temperature" and ({homes})) "#,
                r#"|> aggregateWindow(every:1h, fn:mean) "#,
                r#"|> yield()"#,
            ),
            db = ctx.database,
            start = start,
            end = end,
            homes = homes_predicate,
        )
    }

    fn aggregate_keep(&self, ctx: RenderContext<'_>) -> String {
        self.co2_mean(ctx, r#"|> keep(columns: ["_time", "_value"])"#)
    }

    fn aggregate_drop(&self, ctx: RenderContext<'_>) -> String {
        self.co2_mean(
            ctx,
            r#"|> drop(columns: ["_start", "_stop", "_measurement", "_field", "home_id", "room_id", "sensor_id"])"#,
        )
    }

    fn standalone_filter(&self, ctx: RenderContext<'_>) -> String {
        let (start, end) = self.bounds(ctx);
        format!(
            concat!(
                r#"from(bucket: "{db}") "#,
                r#"|> range(start: {start}, stop: {end}) "#,
                r#"|> filter(fn: (r) => r["_measurement"] == "light_level_room" and r["_field"] == "level") "#,
                r#"|> yield()"#,
            ),
            db = ctx.database,
            start = start,
            end = end,
        )
    }

    fn sorted_pivot(&self, ctx: RenderContext<'_>) -> String {
        let (start, end) = self.bounds(ctx);
        format!(
            concat!(
                r#"from(bucket: "{db}") "#,
                r#"|> range(start: {start}, stop: {end}) "#,
                r#"|> filter(fn: (r) => r._measurement == "air_quality_room") "#,
                r#"|> pivot(rowKey:["_time"], columnKey:["_field"], valueColumn:"_value")"#,
            ),
            db = ctx.database,
            start = start,
            end = end,
        )
    }
}
