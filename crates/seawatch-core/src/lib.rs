//! Seawatch core crate - configuration and shared error types.
//!
//! Seawatch is a conversational proxy over an NFT marketplace API:
//! free-text queries are classified into intents, forwarded upstream,
//! and rendered back as human-readable text.

pub mod config;
pub mod error;

pub use config::SeawatchConfig;
pub use error::{Result, SeawatchError};
