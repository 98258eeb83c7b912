//! Seawatch chat-agent front end.
//!
//! Speaks a message-envelope protocol: inbound chat messages are classified,
//! proxied to the marketplace, and answered with rendered display text in a
//! reply envelope. Delivery and acknowledgement semantics belong to the
//! transport; this crate models only the envelope and the handler.

pub mod agent;
pub mod envelope;
pub mod routes;

pub use agent::ChatAgent;
pub use envelope::{ChatAcknowledgement, ChatMessage};
pub use routes::{create_router, start_server};
