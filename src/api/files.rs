use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::api::{error::PortalError, with_conn};
use crate::auth::TenantContext;
use crate::shared::models::{File, InsertActivity, InsertFile};
use crate::shared::state::AppState;
use crate::storage;

/// POST /api/files/upload — multipart with a single "file" field.
/// The size gate runs before anything touches the database, so an
/// oversized upload never persists a row.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    mut multipart: Multipart,
) -> Result<Json<File>, PortalError> {
    let mut original_name = String::new();
    let mut mime_type = String::new();
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PortalError::Validation(e.to_string()))?
    {
        if field.name() == Some("file") {
            original_name = field.file_name().unwrap_or("unnamed").to_string();
            mime_type = field
                .content_type()
                .map(|m| m.to_string())
                .unwrap_or_else(|| {
                    mime_guess::from_path(&original_name)
                        .first()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "application/octet-stream".to_string())
                });
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| PortalError::Validation(e.to_string()))?
                    .to_vec(),
            );
        }
    }

    let file_data =
        file_data.ok_or_else(|| PortalError::Validation("No file uploaded".to_string()))?;

    let max = state.config.uploads.max_upload_bytes;
    if file_data.len() > max {
        return Err(PortalError::Validation(format!(
            "File exceeds the upload limit of {max} bytes"
        )));
    }

    let stored_name = Uuid::new_v4().to_string();
    let storage_dir = PathBuf::from(&state.config.uploads.storage_path);
    let storage_path = storage_dir.join(&stored_name);

    tokio::fs::create_dir_all(&storage_dir)
        .await
        .map_err(|e| PortalError::Internal(e.to_string()))?;
    tokio::fs::write(&storage_path, &file_data)
        .await
        .map_err(|e| PortalError::Internal(e.to_string()))?;

    tracing::info!(
        "Uploading file {} ({} bytes) for tenant {}",
        original_name,
        file_data.len(),
        ctx.client_id
    );

    let insert = InsertFile {
        client_id: ctx.client_id.clone(),
        uploaded_by: ctx.user_id().to_string(),
        filename: stored_name,
        original_name: original_name.clone(),
        mime_type,
        size: file_data.len() as i32,
        path: storage_path.to_string_lossy().into_owned(),
    };

    let pool = state.conn.clone();
    let file = with_conn(pool, move |conn| {
        storage::insert_file(conn, &insert).map_err(PortalError::from)
    })
    .await
    .map_err(|e| {
        tracing::error!("Error uploading file: {e}");
        e
    })?;

    // Separate write from the file row; no cross-entity transaction.
    let activity = InsertActivity {
        client_id: ctx.client_id.clone(),
        activity_type: "file_upload".to_string(),
        description: format!("{} uploaded {}", ctx.user.display_name(), original_name),
        metadata: Some(serde_json::json!({ "fileId": file.id })),
    };
    let pool = state.conn.clone();
    with_conn(pool, move |conn| {
        storage::insert_activity(conn, &activity).map_err(PortalError::from)
    })
    .await
    .map_err(|e| {
        tracing::error!("Error recording upload activity: {e}");
        e
    })?;

    Ok(Json(file))
}

/// GET /api/files/:id/download — downloads are keyed by row id, never
/// by storage path; the tenant check runs before a single byte leaves.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Path(id): Path<i32>,
) -> Result<Response, PortalError> {
    let file = fetch_owned_file(&state, &ctx, id).await?;

    let handle = tokio::fs::File::open(&file.path).await.map_err(|e| {
        tracing::error!("Error downloading file {}: {e}", file.id);
        PortalError::Internal("Stored file unavailable".to_string())
    })?;

    let stream = ReaderStream::new(handle);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.original_name.replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, file.mime_type.clone()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

/// DELETE /api/files/:id — removes the row first, then best-effort
/// removes the bytes on disk.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, PortalError> {
    let file = fetch_owned_file(&state, &ctx, id).await?;

    let pool = state.conn.clone();
    with_conn(pool, move |conn| {
        storage::delete_file(conn, id).map_err(PortalError::from)
    })
    .await?;

    if let Err(e) = tokio::fs::remove_file(&file.path).await {
        tracing::warn!("Error removing stored file {}: {e}", file.path);
    }

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Loads a file row and enforces the tenant boundary: 404 for a
/// missing row, 403 when it belongs to another tenant.
async fn fetch_owned_file(
    state: &Arc<AppState>,
    ctx: &TenantContext,
    id: i32,
) -> Result<File, PortalError> {
    let pool = state.conn.clone();
    let file = with_conn(pool, move |conn| {
        storage::get_file(conn, id).map_err(PortalError::from)
    })
    .await?;

    let file = file.ok_or_else(|| PortalError::NotFound("File not found".to_string()))?;
    if file.client_id != ctx.client_id {
        return Err(PortalError::AccessDenied("Access denied".to_string()));
    }
    Ok(file)
}
