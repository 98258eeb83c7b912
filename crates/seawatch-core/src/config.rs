use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SeawatchError};

/// Top-level configuration for the Seawatch application.
///
/// Loaded from `~/.seawatch/config.toml` by default. Each section corresponds
/// to one component or cross-cutting concern. Secrets may also arrive through
/// environment variables, which take priority over the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeawatchConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl Default for SeawatchConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            market: MarketConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl SeawatchConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SeawatchConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed. Environment overrides are
    /// applied in both cases.
    pub fn load_or_default(path: &Path) -> Self {
        let mut config = match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        };
        config.apply_env_overrides();
        config
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SeawatchError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Overlay secrets and port from the environment.
    ///
    /// `SEAWATCH_API_KEY`, `SEAWATCH_ACCESS_TOKEN`, and `SEAWATCH_PORT` win
    /// over file values when set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("SEAWATCH_API_KEY") {
            if !key.trim().is_empty() {
                self.market.api_key = Some(key.trim().to_string());
            }
        }
        if let Ok(token) = std::env::var("SEAWATCH_ACCESS_TOKEN") {
            if !token.trim().is_empty() {
                self.market.access_token = Some(token.trim().to_string());
            }
        }
        if let Ok(port) = std::env::var("SEAWATCH_PORT") {
            if let Ok(p) = port.parse::<u16>() {
                self.general.port = p;
            }
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Bind address for the HTTP front end.
    pub host: String,
    /// Bind port for the HTTP front end.
    pub port: u16,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8008,
            log_level: "info".to_string(),
        }
    }
}

/// Marketplace API settings.
///
/// Two backend profiles exist: the legacy key-based REST API and the
/// token-based MCP endpoint. Which one is used depends on the front end;
/// both are configured here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Legacy API key (sent as `X-API-KEY`). Required for the REST front end.
    pub api_key: Option<String>,
    /// MCP access token (sent as `Authorization: Bearer`). Required for the
    /// chat-agent front end.
    pub access_token: Option<String>,
    /// Base URL for the legacy key-based API.
    pub api_base: String,
    /// Base URL template for the MCP endpoint. `{token}` is replaced with
    /// the access token.
    pub mcp_base: String,
    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            api_base: "https://api.opensea.io/api/v1".to_string(),
            mcp_base: "https://mcp.opensea.io/{token}/mcp".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Chat front-end settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Session inactivity timeout in seconds.
    pub session_timeout_secs: u64,
    /// Run the classification self-test on agent startup.
    pub startup_self_test: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            session_timeout_secs: 30 * 60,
            startup_self_test: true,
        }
    }
}
