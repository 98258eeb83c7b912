//! Marketplace API client for Seawatch.
//!
//! One operation per intent, each returning the upstream JSON payload or an
//! error. Two interchangeable backend profiles exist (legacy key-based API
//! and token-based MCP endpoint); each front end selects its own.

pub mod client;
pub mod error;
pub mod profile;

pub use client::{MarketClient, SearchQuery};
pub use error::MarketError;
pub use profile::{AuthScheme, MarketProfile};
