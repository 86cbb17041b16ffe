//! Crosslist HTTP server.
//!
//! Thin request/response glue over the sync engine: no business logic
//! lives here.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crosslist_server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_path =
        std::env::var("CROSSLIST_DB_PATH").unwrap_or_else(|_| "crosslist.db".to_string());
    let gateway_url = std::env::var("CROSSLIST_GATEWAY_URL")
        .unwrap_or_else(|_| "http://localhost:8799".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let state = Arc::new(AppState::initialize(&db_path, &gateway_url)?);
    let app = router(state);

    let addr = format!("0.0.0.0:{port}");
    info!("crosslist server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
