//! Central route table. Each module contributes its handlers; this is
//! the only place the full HTTP surface is spelled out.

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::api;
use crate::auth;
use crate::realtime;
use crate::shared::config::AppConfig;
use crate::shared::state::AppState;

/// Multipart framing overhead allowed on top of the file size limit;
/// the exact per-file limit is enforced inside the upload handler.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn configure_api_routes(config: &AppConfig) -> Router<Arc<AppState>> {
    Router::new()
        // ===== Identity =====
        .merge(auth::routes::routes())
        // ===== Dashboard aggregate =====
        .route("/api/dashboard", get(api::dashboard::get_dashboard))
        // ===== Metrics =====
        .route("/api/metrics", get(api::metrics::list_metrics))
        .route(
            "/api/metrics/:source",
            get(api::metrics::list_metrics_by_source),
        )
        // ===== File sharing =====
        .route(
            "/api/files/upload",
            post(api::files::upload_file).layer(DefaultBodyLimit::max(
                config.uploads.max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        .route("/api/files/:id/download", get(api::files::download_file))
        .route("/api/files/:id", delete(api::files::delete_file))
        // ===== Comments =====
        .route("/api/comments", post(api::comments::create_comment))
        // ===== Action items =====
        .route(
            "/api/action-items",
            post(api::action_items::create_action_item),
        )
        .route(
            "/api/action-items/:id/toggle",
            patch(api::action_items::toggle_action_item),
        )
        // ===== External data syncs (admin) =====
        .route(
            "/api/sync/google-analytics",
            post(api::sync::sync_google_analytics),
        )
        .route("/api/sync/linkedin", post(api::sync::sync_linkedin))
        .route(
            "/api/sync/google-sheets",
            post(api::sync::sync_google_sheets),
        )
        // ===== Realtime =====
        .route("/ws", get(realtime::websocket_handler))
        // ===== Liveness =====
        .route("/health", get(api::health_check))
}
