//! Question value object

use serde::{Deserialize, Serialize};

/// A question presented to the user (Value Object)
///
/// Carries the id the answer will be recorded under and the layer it
/// belongs to. Generated follow-ups use `q_<millis>` ids; suggested layer
/// questions use `ai-<layer>-<n>` or `fallback-<layer>-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: String,
    text: String,
    layer: u32,
}

impl Question {
    /// Create a new question
    ///
    /// # Panics
    /// Panics if the text is empty or only whitespace
    pub fn new(id: impl Into<String>, text: impl Into<String>, layer: u32) -> Self {
        let text = text.into();
        assert!(!text.trim().is_empty(), "Question cannot be empty");
        Self {
            id: id.into(),
            text,
            layer: layer.max(1),
        }
    }

    /// Try to create a new question, returning None if the text is blank
    pub fn try_new(id: impl Into<String>, text: impl Into<String>, layer: u32) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self {
                id: id.into(),
                text,
                layer: layer.max(1),
            })
        }
    }

    /// Id of a generated follow-up question asked at `millis`
    pub fn follow_up_id(millis: i64) -> String {
        format!("q_{}", millis)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn layer(&self) -> u32 {
        self.layer
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
