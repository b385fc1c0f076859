//! Presentation-level configuration
//!
//! Configuration for REPL behavior.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show a spinner while the model is thinking
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
    /// Title a thread when it is finished
    pub enrich_titles: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            enrich_titles: true,
        }
    }
}

impl ReplConfig {
    /// History file to use; `<data_dir>/layers/history.txt` unless configured
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) => match path.strip_prefix("~/") {
                Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
                None => Some(PathBuf::from(path)),
            },
            None => dirs::data_dir().map(|p| p.join("layers").join("history.txt")),
        }
    }
}
