use std::sync::Arc;

use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use portalserver::api_router::configure_api_routes;
use portalserver::realtime::CommentHub;
use portalserver::shared::config::AppConfig;
use portalserver::shared::state::AppState;
use portalserver::shared::utils::{create_conn, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pool = create_conn(&config.database.url, config.database.max_connections)?;
    run_migrations(&pool)?;

    tokio::fs::create_dir_all(&config.uploads.storage_path).await?;

    let state = Arc::new(AppState {
        conn: pool,
        config: config.clone(),
        comment_hub: CommentHub::new(),
    });

    let app = configure_api_routes(&config)
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("portalserver listening on {addr}");

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
