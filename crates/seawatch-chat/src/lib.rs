//! Conversational core for Seawatch.
//!
//! Provides keyword/regex intent classification, per-intent response
//! formatting over marketplace JSON payloads, and the session store used
//! by the chat front end.

pub mod classify;
pub mod error;
pub mod format;
pub mod session;
pub mod types;

pub use classify::{ChatPolicy, IntentPolicy, RestPolicy};
pub use error::ClassifyError;
pub use format::{format_response, help_message};
pub use session::{Clock, SessionStore, SystemClock};
pub use types::Intent;
