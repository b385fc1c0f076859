//! Infrastructure layer for layers
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod relay;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBehaviorConfig, FileConfig, FileLoggingConfig,
    FileRelayConfig, FileReplConfig, FileStorageConfig,
};
pub use logging::JsonlConversationLogger;
pub use relay::HttpRelayGateway;
pub use storage::FileSessionBackend;
