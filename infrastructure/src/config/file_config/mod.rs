//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; every section has defaults.

mod behavior;
mod logging;
mod relay;
mod repl;
mod storage;

pub use behavior::FileBehaviorConfig;
pub use logging::FileLoggingConfig;
pub use relay::{DEFAULT_RELAY_ENDPOINT, FileRelayConfig};
pub use repl::FileReplConfig;
pub use storage::{FileStorageConfig, expand_home};

use layers_application::BehaviorConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("relay.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("storage.capacity cannot be 0")]
    InvalidCapacity,

    #[error("relay.endpoint cannot be empty")]
    EmptyEndpoint,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Relay client settings
    pub relay: FileRelayConfig,
    /// Thread storage settings
    pub storage: FileStorageConfig,
    /// Journal behavior settings
    pub behavior: FileBehaviorConfig,
    /// Logging settings
    pub logging: FileLoggingConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.relay.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.relay.endpoint.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEndpoint);
        }
        if self.storage.capacity == 0 {
            return Err(ConfigValidationError::InvalidCapacity);
        }
        Ok(())
    }

    /// Application behavior derived from this file
    pub fn behavior_config(&self) -> BehaviorConfig {
        BehaviorConfig::default()
            .with_min_brain_dump_chars(self.behavior.min_brain_dump_chars)
            .with_session_capacity(self.storage.capacity)
    }

    pub fn relay_timeout(&self) -> Option<Duration> {
        self.relay.timeout_seconds.map(Duration::from_secs)
    }
}
