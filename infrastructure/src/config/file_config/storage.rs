//! Thread storage configuration from TOML (`[storage]` section)

use layers_domain::SESSION_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Threads file; defaults to `<data_dir>/layers/sessions.json`
    pub path: Option<String>,
    /// Maximum number of stored threads
    pub capacity: usize,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            capacity: SESSION_CAPACITY,
        }
    }
}

impl FileStorageConfig {
    /// Effective threads file path, with a leading `~` expanded
    pub fn resolved_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(path) => Some(expand_home(path)),
            None => dirs::data_dir().map(|d| d.join("layers").join("sessions.json")),
        }
    }
}

/// Expand a leading `~/` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
