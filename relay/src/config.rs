//! Relay configuration from the environment
//!
//! `PORT` and `GEMINI_API_KEY` are read as-is; everything else uses the
//! `LAYERS_RELAY_` prefix (e.g. `LAYERS_RELAY_MODEL`).

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prefix for relay-specific environment variables
pub const ENV_PREFIX: &str = "LAYERS_RELAY_";

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_UPSTREAM_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub port: u16,
    /// Upstream credential; never leaves this process
    #[serde(skip_serializing)]
    pub gemini_api_key: Option<String>,
    pub model: String,
    pub upstream_base: String,
    /// Comma-separated CORS origins
    pub allowed_origins: String,
    pub timeout_seconds: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            gemini_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            upstream_base: DEFAULT_UPSTREAM_BASE.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
            timeout_seconds: 60,
        }
    }
}

impl RelayConfig {
    /// Load from defaults and the process environment
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::figment().extract().map_err(Box::new)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::raw().only(&["port", "gemini_api_key"]))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// The credential, if set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect()
    }

    /// `{base}/models/{model}:generateContent`
    pub fn upstream_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.upstream_base.trim_end_matches('/'),
            self.model
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }
}
