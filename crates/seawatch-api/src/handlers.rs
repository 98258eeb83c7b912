//! REST route handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use seawatch_chat::{format, ClassifyError, Intent};
use seawatch_market::SearchQuery;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /` - liveness probe.
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "seawatch",
        "status": "ok",
    }))
}

/// `GET /health` - health report with version, uptime, and agent id.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.uptime_secs(),
        "agent_id": state.agent_id,
    }))
}

#[derive(Debug, Deserialize)]
pub struct McpQueryRequest {
    pub query: String,
    /// Free-form tag supplied by some clients; logged, never interpreted.
    #[serde(rename = "type")]
    pub query_type: Option<String>,
}

/// `POST /api/mcp` - classify a natural-language query and proxy it.
///
/// A query missing a required parameter is not an error at the HTTP level:
/// the prompting message comes back as a 200 so conversational clients can
/// relay it directly.
pub async fn mcp_query(
    State(state): State<AppState>,
    Json(req): Json<McpQueryRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.query.trim().is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    info!(
        query = %req.query,
        query_type = req.query_type.as_deref().unwrap_or("none"),
        "MCP query received"
    );

    let intent = match state.policy.classify(&req.query) {
        Ok(intent) => intent,
        Err(ClassifyError::MissingParameter { prompt }) => {
            return Ok(Json(json!({
                "query": req.query,
                "message": prompt,
            })));
        }
    };

    if intent == Intent::Unknown {
        return Ok(Json(json!({
            "query": req.query,
            "message": format::help_message(),
        })));
    }

    let data = state.client.fetch(&intent).await?;
    Ok(Json(json!({
        "query": req.query,
        "intent": intent,
        "data": data,
    })))
}

/// `GET /api/collection/{slug}` - raw collection stats passthrough.
pub async fn get_collection(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let data = state.client.collection_info(&slug).await?;
    Ok(Json(data))
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub collection_slug: Option<String>,
    pub chain: Option<String>,
    pub limit: Option<u32>,
}

/// `POST /api/search` - structured asset search passthrough.
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.query.trim().is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let mut query = SearchQuery::new(
        req.query,
        req.chain
            .unwrap_or_else(|| seawatch_chat::types::DEFAULT_CHAIN.to_string()),
        req.limit.unwrap_or(seawatch_chat::types::DEFAULT_SEARCH_LIMIT),
    );
    query.collection_slug = req.collection_slug;

    let data = state.client.search(&query).await?;
    Ok(Json(data))
}
