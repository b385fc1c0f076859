//! Journal behavior configuration from TOML (`[behavior]` section)

use layers_domain::MIN_BRAIN_DUMP_CHARS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Minimum brain dump length in characters
    pub min_brain_dump_chars: usize,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            min_brain_dump_chars: MIN_BRAIN_DUMP_CHARS,
        }
    }
}
