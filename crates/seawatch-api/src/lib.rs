//! Seawatch REST front end - axum HTTP server and route handlers.
//!
//! Exposes the classifier + marketplace client pipeline as structured JSON
//! endpoints. Unlike the chat-agent front end, responses here are the
//! upstream payloads, not rendered prose.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
