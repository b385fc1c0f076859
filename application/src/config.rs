//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as input thresholds and store capacity.

use layers_domain::{MIN_BRAIN_DUMP_CHARS, SESSION_CAPACITY};

/// Application behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorConfig {
    /// Minimum trimmed length of a brain dump, in characters.
    pub min_brain_dump_chars: usize,
    /// Maximum number of threads kept by the session store.
    pub session_capacity: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            min_brain_dump_chars: MIN_BRAIN_DUMP_CHARS,
            session_capacity: SESSION_CAPACITY,
        }
    }
}

impl BehaviorConfig {
    pub fn with_min_brain_dump_chars(mut self, chars: usize) -> Self {
        self.min_brain_dump_chars = chars;
        self
    }

    /// Capacity below one is raised to one.
    pub fn with_session_capacity(mut self, capacity: usize) -> Self {
        self.session_capacity = capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BehaviorConfig::default();
        assert_eq!(config.min_brain_dump_chars, 10);
        assert_eq!(config.session_capacity, 50);
    }

    #[test]
    fn test_builders() {
        let config = BehaviorConfig::default()
            .with_min_brain_dump_chars(3)
            .with_session_capacity(0);
        assert_eq!(config.min_brain_dump_chars, 3);
        assert_eq!(config.session_capacity, 1);
    }
}
