use diesel::prelude::*;

use crate::shared::models::{InsertMetric, Metric, MetricSource};
use crate::shared::schema::metrics;

/// Tenant's metrics, newest first, optionally restricted to one source.
pub fn get_metrics(
    conn: &mut PgConnection,
    client_id: &str,
    source: Option<MetricSource>,
) -> QueryResult<Vec<Metric>> {
    let mut query = metrics::table
        .filter(metrics::client_id.eq(client_id))
        .into_boxed();

    if let Some(source) = source {
        query = query.filter(metrics::source.eq(source.as_str()));
    }

    query.order(metrics::date.desc()).load(conn)
}

pub fn insert_metric(conn: &mut PgConnection, data: &InsertMetric) -> QueryResult<Metric> {
    diesel::insert_into(metrics::table)
        .values(data)
        .get_result(conn)
}

/// Batch insert for sync jobs. One multi-row INSERT: either the whole
/// batch lands or none of it does.
pub fn insert_metrics(conn: &mut PgConnection, data: &[InsertMetric]) -> QueryResult<Vec<Metric>> {
    diesel::insert_into(metrics::table)
        .values(data)
        .get_results(conn)
}
