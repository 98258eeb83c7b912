//! HTTP transport for the chat agent.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::ChatAgent;
use crate::envelope::{ChatAcknowledgement, ChatMessage};

const MAX_BODY_BYTES: usize = 1024 * 1024;

async fn health(State(agent): State<Arc<ChatAgent>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "agent_id": agent.agent_id(),
    }))
}

/// `POST /messages` - envelope in, reply envelope out.
async fn messages(
    State(agent): State<Arc<ChatAgent>>,
    Json(msg): Json<ChatMessage>,
) -> Json<ChatMessage> {
    Json(agent.handle_message(&msg).await)
}

/// `POST /acks` - acknowledgements are logged, never answered.
async fn acks(Json(ack): Json<ChatAcknowledgement>) -> axum::http::StatusCode {
    info!(msg_id = %ack.acknowledged_msg_id, "Received acknowledgement");
    axum::http::StatusCode::NO_CONTENT
}

/// Build the chat-agent router.
pub fn create_router(agent: Arc<ChatAgent>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/messages", post(messages))
        .route("/acks", post(acks))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(agent)
}

/// Bind and serve the chat-agent front end until the process exits.
pub async fn start_server(agent: Arc<ChatAgent>, host: &str, port: u16) -> std::io::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Chat-agent front end listening on {}", addr);
    axum::serve(listener, create_router(agent)).await
}
