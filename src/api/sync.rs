//! Admin-only triggers for the external metric syncs. Real ingestion
//! is not wired up; each endpoint acknowledges the request so the
//! admin UI can show the action was accepted.

use axum::Json;

use crate::api::error::PortalError;
use crate::auth::TenantContext;

/// POST /api/sync/google-analytics
pub async fn sync_google_analytics(
    ctx: TenantContext,
) -> Result<Json<serde_json::Value>, PortalError> {
    ctx.require_admin()?;
    // TODO: wire up the Analytics Data API once property credentials land.
    Ok(Json(serde_json::json!({
        "message": "Google Analytics sync initiated"
    })))
}

/// POST /api/sync/linkedin
pub async fn sync_linkedin(ctx: TenantContext) -> Result<Json<serde_json::Value>, PortalError> {
    ctx.require_admin()?;
    Ok(Json(serde_json::json!({
        "message": "LinkedIn sync initiated"
    })))
}

/// POST /api/sync/google-sheets
pub async fn sync_google_sheets(
    ctx: TenantContext,
) -> Result<Json<serde_json::Value>, PortalError> {
    ctx.require_admin()?;
    Ok(Json(serde_json::json!({
        "message": "Google Sheets sync initiated"
    })))
}
