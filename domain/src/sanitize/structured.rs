//! Structured responses: insights and layer questions.

use super::json::extract_json;
use crate::core::question::Question;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FALLBACK_SUMMARY: &str = "You're exploring some of the layers of what you've been feeling and what might be underneath it all.";

pub const FALLBACK_ROOT_CONCERN: &str =
    "There seems to be a deeper wish to understand and trust your own feelings.";

const FALLBACK_LAYER_QUESTIONS: [&str; 2] = [
    "What feels most alive for you in this moment of the situation?",
    "What part of this feels like it matters the most underneath?",
];

/// Structured reflection on a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub summary: String,
    pub root_concern: String,
}

impl Default for Insight {
    fn default() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            root_concern: FALLBACK_ROOT_CONCERN.to_string(),
        }
    }
}

fn non_empty_str<'a>(json: &'a Value, key: &str) -> Option<&'a str> {
    json.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Parse an insight, filling any missing field with its fallback.
pub fn parse_insights(raw: &str) -> Insight {
    let fallback = Insight::default();
    let Some(json) = extract_json(raw) else {
        return fallback;
    };

    Insight {
        summary: non_empty_str(&json, "summary")
            .map(String::from)
            .unwrap_or(fallback.summary),
        root_concern: non_empty_str(&json, "rootConcern")
            .or_else(|| non_empty_str(&json, "root_concern"))
            .map(String::from)
            .unwrap_or(fallback.root_concern),
    }
}

/// The two questions offered when the model gives nothing usable
pub fn fallback_layer_questions(layer: u32) -> Vec<Question> {
    FALLBACK_LAYER_QUESTIONS
        .iter()
        .enumerate()
        .map(|(idx, text)| Question::new(format!("fallback-{}-{}", layer, idx + 1), *text, layer))
        .collect()
}

/// Parse a JSON array of `{text, layer?, id?}` into questions.
///
/// Entries without a string `text` are skipped. Ids default to
/// `ai-<layer>-<n>` and layers to the requested one.
pub fn parse_layer_questions(raw: &str, layer: u32) -> Vec<Question> {
    let Some(items) = extract_json(raw).and_then(|json| match json {
        Value::Array(items) => Some(items),
        _ => None,
    }) else {
        return fallback_layer_questions(layer);
    };

    let questions: Vec<Question> = items
        .iter()
        .filter(|item| item.get("text").is_some_and(Value::is_string))
        .enumerate()
        .filter_map(|(idx, item)| {
            let text = item.get("text").and_then(Value::as_str)?.trim();
            let id = item
                .get("id")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .unwrap_or_else(|| format!("ai-{}-{}", layer, idx + 1));
            let item_layer = item
                .get("layer")
                .and_then(Value::as_u64)
                .and_then(|l| u32::try_from(l).ok())
                .filter(|l| *l > 0)
                .unwrap_or(layer);
            Question::try_new(id, text, item_layer)
        })
        .collect();

    if questions.is_empty() {
        fallback_layer_questions(layer)
    } else {
        questions
    }
}
