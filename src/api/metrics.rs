use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::{error::PortalError, with_conn};
use crate::auth::TenantContext;
use crate::shared::models::{Metric, MetricSource};
use crate::shared::state::AppState;
use crate::storage;

/// GET /api/metrics — all of the tenant's metric rows, newest first.
pub async fn list_metrics(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
) -> Result<Json<Vec<Metric>>, PortalError> {
    fetch_metrics(state, ctx, None).await
}

/// GET /api/metrics/:source — restricted to one ingestion source; an
/// unknown source tag is a validation error, not an empty list.
pub async fn list_metrics_by_source(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Path(source): Path<String>,
) -> Result<Json<Vec<Metric>>, PortalError> {
    let source: MetricSource = source
        .parse()
        .map_err(|_| PortalError::Validation(format!("Unknown metric source: {source}")))?;
    fetch_metrics(state, ctx, Some(source)).await
}

async fn fetch_metrics(
    state: Arc<AppState>,
    ctx: TenantContext,
    source: Option<MetricSource>,
) -> Result<Json<Vec<Metric>>, PortalError> {
    let client_id = ctx.client_id.clone();
    let metrics = with_conn(state.conn.clone(), move |conn| {
        storage::get_metrics(conn, &client_id, source).map_err(PortalError::from)
    })
    .await
    .map_err(|e| {
        tracing::error!("Error fetching metrics: {e}");
        e
    })?;

    Ok(Json(metrics))
}
