//! # API Configuration
//!
//! Configuration for the REST client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ZARLETTE_API_URL=https://pos.example.com/api                       │
//! │     ZARLETTE_API_TIMEOUT_SECS=10                                       │
//! │     ZARLETTE_API_TOKEN=eyJhbGciOi...                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/zarlette-pos/api.toml (Linux)                            │
//! │     ~/Library/Application Support/com.zarlette.pos/api.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8000/api, 30s timeout, no token                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # api.toml
//! base_url = "http://localhost:8000/api"
//! timeout_secs = 30
//! # bearer_token = "..."   # optional
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Default collaborator base URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// REST client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the collaborator, including the `/api` prefix.
    /// A trailing slash is tolerated and trimmed.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional bearer token, attached as `Authorization: Bearer {token}`.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            bearer_token: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (api.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading API config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if the load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load API config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        std::fs::write(&path, contents)
            .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "API config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.base_url)?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "Base URL must be http or https, got: {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ZARLETTE_API_URL") {
            debug!(url = %url, "Overriding API base URL from environment");
            self.base_url = url;
        }

        if let Ok(timeout) = std::env::var("ZARLETTE_API_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                self.timeout_secs = secs;
            }
        }

        if let Ok(token) = std::env::var("ZARLETTE_API_TOKEN") {
            if !token.is_empty() {
                self.bearer_token = Some(token);
            }
        }
    }

    /// Returns the base URL with any trailing slash trimmed.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "zarlette", "pos")
            .map(|dirs| dirs.config_dir().join("api.toml"))
    }
}
