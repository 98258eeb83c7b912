//! Shared application state for the REST front end.

use std::sync::Arc;
use std::time::Instant;

use seawatch_chat::{IntentPolicy, RestPolicy};
use seawatch_market::MarketClient;

/// State shared across all REST handlers.
///
/// Cheap to clone; the marketplace client and policy live behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<MarketClient>,
    pub policy: Arc<dyn IntentPolicy>,
    pub agent_id: String,
    pub start_time: Instant,
}

impl AppState {
    /// Build the REST state around a marketplace client. The classification
    /// policy is fixed to [`RestPolicy`].
    pub fn new(client: MarketClient, agent_id: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            policy: Arc::new(RestPolicy),
            agent_id: agent_id.into(),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
