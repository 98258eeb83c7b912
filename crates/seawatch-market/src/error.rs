//! Error types for marketplace calls.

use thiserror::Error;

/// Errors from the marketplace client.
///
/// Neither variant is retried; both are caught at the front-end boundary
/// and converted to a generic user-facing error.
#[derive(Debug, Error)]
pub enum MarketError {
    /// Non-2xx response from the marketplace API.
    #[error("marketplace returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Network failure or request timeout.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
