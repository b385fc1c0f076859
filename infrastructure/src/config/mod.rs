//! Configuration file loading for layers
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LAYERS_*` environment variables (`__` separates section and key)
//! 2. `--config <path>` specified file
//! 3. Project root: `./layers.toml` or `./.layers.toml`
//! 4. Global: `<config_dir>/layers/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_RELAY_ENDPOINT, FileBehaviorConfig, FileConfig,
    FileLoggingConfig, FileRelayConfig, FileReplConfig, FileStorageConfig, expand_home,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
