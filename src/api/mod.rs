use axum::http::StatusCode;
use axum::Json;
use diesel::PgConnection;

use crate::api::error::PortalError;
use crate::shared::utils::DbPool;

pub mod action_items;
pub mod comments;
pub mod dashboard;
pub mod error;
pub mod files;
pub mod metrics;
pub mod sync;

/// Runs a blocking diesel closure on the blocking pool with a pooled
/// connection. Every handler goes through here so storage stays
/// synchronous and the runtime stays unblocked.
pub(crate) async fn with_conn<T, F>(pool: DbPool, f: F) -> Result<T, PortalError>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> Result<T, PortalError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(PortalError::from)?;
        f(&mut conn)
    })
    .await
    .map_err(PortalError::from)?
}

pub async fn health_check() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "service": "portalserver",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
