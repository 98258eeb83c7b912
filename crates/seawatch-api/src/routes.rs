//! Router assembly and server startup for the REST front end.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the REST router with CORS, tracing, and body-limit layers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/mcp", post(handlers::mcp_query))
        .route("/api/collection/{slug}", get(handlers::get_collection))
        .route("/api/search", post(handlers::search))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve the REST front end until the process exits.
pub async fn start_server(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST front end listening on {}", addr);
    axum::serve(listener, create_router(state)).await
}
