use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::api::{error::PortalError, with_conn};
use crate::auth::TenantContext;
use crate::shared::models::{ActionItem, Activity, CallAgent, Client, Comment, File, Metric};
use crate::shared::state::AppState;
use crate::storage;

/// Number of activity rows shown on the dashboard feed.
const DASHBOARD_ACTIVITY_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub client: Option<Client>,
    pub metrics: Vec<Metric>,
    pub call_agents: Vec<CallAgent>,
    pub files: Vec<File>,
    pub comments: Vec<Comment>,
    pub action_items: Vec<ActionItem>,
    pub activities: Vec<Activity>,
}

/// GET /api/dashboard — the consolidated tenant view. The six list
/// reads run concurrently; the tenant record itself is best-effort
/// (absent record serializes as null), but any failed list read fails
/// the whole aggregate.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
) -> Result<Json<DashboardResponse>, PortalError> {
    let pool = state.conn.clone();
    let client_id = ctx.client_id.clone();

    let client = {
        let pool = pool.clone();
        let id = client_id.clone();
        with_conn(pool, move |conn| {
            storage::get_client(conn, &id).map_err(PortalError::from)
        })
    };
    let metrics = {
        let pool = pool.clone();
        let id = client_id.clone();
        with_conn(pool, move |conn| {
            storage::get_metrics(conn, &id, None).map_err(PortalError::from)
        })
    };
    let call_agents = {
        let pool = pool.clone();
        let id = client_id.clone();
        with_conn(pool, move |conn| {
            storage::get_call_agents(conn, &id).map_err(PortalError::from)
        })
    };
    let files = {
        let pool = pool.clone();
        let id = client_id.clone();
        with_conn(pool, move |conn| {
            storage::get_files(conn, &id).map_err(PortalError::from)
        })
    };
    let comments = {
        let pool = pool.clone();
        let id = client_id.clone();
        with_conn(pool, move |conn| {
            storage::get_comments(conn, &id).map_err(PortalError::from)
        })
    };
    let action_items = {
        let pool = pool.clone();
        let id = client_id.clone();
        with_conn(pool, move |conn| {
            storage::get_action_items(conn, &id).map_err(PortalError::from)
        })
    };
    let activities = {
        let id = client_id;
        with_conn(pool, move |conn| {
            storage::get_activities(conn, &id, Some(DASHBOARD_ACTIVITY_LIMIT))
                .map_err(PortalError::from)
        })
    };

    let (client, metrics, call_agents, files, comments, action_items, activities) = tokio::try_join!(
        client,
        metrics,
        call_agents,
        files,
        comments,
        action_items,
        activities
    )
    .map_err(|e| {
        tracing::error!("Error fetching dashboard data: {e}");
        e
    })?;

    Ok(Json(DashboardResponse {
        client,
        metrics,
        call_agents,
        files,
        comments,
        action_items,
        activities,
    }))
}
