use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::{error::PortalError, with_conn};
use crate::auth::TenantContext;
use crate::shared::models::{Comment, CommentWithUser, InsertComment};
use crate::shared::state::AppState;
use crate::storage;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// POST /api/comments — persists the comment, then pushes it to every
/// open realtime channel belonging to the same tenant.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<Comment>, PortalError> {
    let content = req.content.trim().to_string();
    if content.is_empty() {
        return Err(PortalError::Validation(
            "Comment content is required".to_string(),
        ));
    }

    let insert = InsertComment {
        client_id: ctx.client_id.clone(),
        user_id: ctx.user_id().to_string(),
        content,
    };

    let pool = state.conn.clone();
    let comment = with_conn(pool, move |conn| {
        storage::insert_comment(conn, &insert).map_err(PortalError::from)
    })
    .await
    .map_err(|e| {
        tracing::error!("Error creating comment: {e}");
        e
    })?;

    state.comment_hub.broadcast_comment(CommentWithUser {
        comment: comment.clone(),
        user: ctx.user.clone(),
    });

    Ok(Json(comment))
}
