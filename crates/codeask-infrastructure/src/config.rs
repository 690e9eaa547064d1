//! Client configuration.

use serde::{Deserialize, Serialize};

use codeask_core::error::Result;

use crate::paths::CodeaskPaths;

/// Default backend base URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Client-side timeout applied to every backend call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "CODEASK_API_URL";

/// Connection settings for the Q&A backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Loads configuration: `config.toml` when present, defaults otherwise,
    /// with `CODEASK_API_URL` taking precedence over both.
    pub fn load() -> Result<Self> {
        let path = CodeaskPaths::config_file()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            Self::default()
        };
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        Ok(config)
    }
}
