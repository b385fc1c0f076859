//! Relay client configuration from TOML (`[relay]` section)

use serde::{Deserialize, Serialize};

/// Relay used during local development
pub const DEFAULT_RELAY_ENDPOINT: &str = "http://localhost:3001";

/// Raw relay client configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRelayConfig {
    /// Base URL of the relay; requests go to `<endpoint>/api/gemini`
    pub endpoint: String,
    /// Timeout in seconds for one relay request
    pub timeout_seconds: Option<u64>,
}

impl Default for FileRelayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            timeout_seconds: Some(60),
        }
    }
}
