use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::{error::PortalError, with_conn};
use crate::auth::TenantContext;
use crate::shared::models::{ActionItem, InsertActionItem};
use crate::shared::state::AppState;
use crate::storage;

#[derive(Debug, Deserialize)]
pub struct CreateActionItemRequest {
    pub title: String,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// POST /api/action-items
pub async fn create_action_item(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Json(req): Json<CreateActionItemRequest>,
) -> Result<Json<ActionItem>, PortalError> {
    let title = req.title.trim().to_string();
    if title.is_empty() {
        return Err(PortalError::Validation("Title is required".to_string()));
    }

    let insert = InsertActionItem {
        client_id: ctx.client_id.clone(),
        title,
        completed: req.completed,
        created_by: ctx.user_id().to_string(),
    };

    let pool = state.conn.clone();
    let item = with_conn(pool, move |conn| {
        storage::insert_action_item(conn, &insert).map_err(PortalError::from)
    })
    .await
    .map_err(|e| {
        tracing::error!("Error creating action item: {e}");
        e
    })?;

    Ok(Json(item))
}

/// PATCH /api/action-items/:id/toggle — atomic flip, see the storage
/// layer for the single-statement guarantee.
pub async fn toggle_action_item(
    State(state): State<Arc<AppState>>,
    _ctx: TenantContext,
    Path(id): Path<i32>,
) -> Result<Json<ActionItem>, PortalError> {
    let pool = state.conn.clone();
    let item = with_conn(pool, move |conn| {
        storage::toggle_action_item(conn, id).map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PortalError::NotFound("Action item not found".to_string())
            }
            other => PortalError::Database(other.to_string()),
        })
    })
    .await
    .map_err(|e| {
        tracing::error!("Error toggling action item: {e}");
        e
    })?;

    Ok(Json(item))
}
