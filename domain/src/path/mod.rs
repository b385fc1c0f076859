//! Thread topic paths.
//!
//! A [`Path`] is a small tag describing what a thread is about. New threads
//! use [`Path::exploration`]; [`detection::detect_paths`] offers keyword
//! based suggestions for display.

pub mod detection;

use serde::{Deserialize, Serialize};

/// Topic tag attached to a thread (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub id: String,
    pub label: String,
    pub description: String,
}

impl Path {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
        }
    }

    /// The path every new thread starts with
    pub fn exploration() -> Self {
        Self::new(
            "exploration",
            "Exploration",
            "A thoughtful exploration of what's on your mind",
        )
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::exploration()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}
