//! Seawatch application binary - composition root.
//!
//! Ties the Seawatch crates into a single executable:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Validate the credential required by the selected front end
//! 3. Build the marketplace client over the matching backend profile
//! 4. Serve either the REST API or the chat agent until shutdown

use std::sync::Arc;

use clap::Parser;

use seawatch_agent::ChatAgent;
use seawatch_api::AppState;
use seawatch_chat::SessionStore;
use seawatch_core::config::SeawatchConfig;
use seawatch_core::SeawatchError;
use seawatch_market::{MarketClient, MarketProfile};

mod cli;

use cli::{CliArgs, Mode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first: the log level may come from the file.
    let config_file = args.resolve_config_path();
    let config = SeawatchConfig::load_or_default(&config_file);

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Seawatch v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let host = args.resolve_host(&config.general.host);
    let port = args.resolve_port(config.general.port);
    let agent_id = format!("seawatch-{}", uuid::Uuid::new_v4());

    match args.mode {
        Mode::Rest => {
            // The REST front end talks to the legacy key-based API.
            let Some(api_key) = config.market.api_key.clone() else {
                tracing::error!(
                    "No marketplace API key configured. Set SEAWATCH_API_KEY or [market] api_key."
                );
                return Err(SeawatchError::Config("missing marketplace API key".to_string()).into());
            };

            let profile = MarketProfile::legacy(&config.market.api_base, &api_key);
            let client = MarketClient::new(profile, config.market.timeout_secs)?;
            let state = AppState::new(client, agent_id);

            seawatch_api::start_server(state, &host, port).await?;
        }
        Mode::Agent => {
            // The chat agent talks to the token-based MCP endpoint.
            let Some(token) = config.market.access_token.clone() else {
                tracing::error!(
                    "No access token configured. Set SEAWATCH_ACCESS_TOKEN or [market] access_token."
                );
                return Err(SeawatchError::Config("missing access token".to_string()).into());
            };

            let profile = MarketProfile::mcp(&config.market.mcp_base, &token);
            let client = MarketClient::new(profile, config.market.timeout_secs)?;
            let sessions = SessionStore::new(config.chat.session_timeout_secs);
            let agent = ChatAgent::new(client, sessions, agent_id);

            if config.chat.startup_self_test {
                agent.self_test();
            }

            seawatch_agent::start_server(Arc::new(agent), &host, port).await?;
        }
    }

    Ok(())
}
