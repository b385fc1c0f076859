//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write the conversation transcript as JSONL
    pub conversation_log: bool,
    /// Directory for transcripts; defaults to `<data_dir>/layers/logs`
    pub directory: Option<String>,
}

impl FileLoggingConfig {
    pub fn resolved_directory(&self) -> Option<PathBuf> {
        match &self.directory {
            Some(dir) => Some(super::storage::expand_home(dir)),
            None => dirs::data_dir().map(|d| d.join("layers").join("logs")),
        }
    }
}
