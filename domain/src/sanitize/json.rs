//! JSON extraction from free-form model text.

use serde_json::Value;

/// Interior of the first fence opened by `opener`, up to the next closing fence.
fn fenced<'a>(text: &'a str, opener: &str) -> Option<&'a str> {
    let (_, rest) = text.split_once(opener)?;
    Some(rest.split("```").next().unwrap_or(rest))
}

/// Extract a JSON value from model output.
///
/// A ` ```json ` fence wins over any other fence; with no fence the whole
/// trimmed text is parsed. Returns `None` when nothing parses.
pub fn extract_json(raw: &str) -> Option<Value> {
    let text = raw.trim();
    let candidate = fenced(text, "```json")
        .or_else(|| fenced(text, "```"))
        .unwrap_or(text)
        .trim();

    serde_json::from_str(candidate).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        assert_eq!(extract_json(r#" {"a": 1} "#), Some(json!({"a": 1})));
    }

    #[test]
    fn test_json_fence() {
        let raw = "Here you go:\n```json\n{\"summary\": \"s\"}\n```\nThanks";
        assert_eq!(extract_json(raw), Some(json!({"summary": "s"})));
    }

    #[test]
    fn test_bare_fence() {
        let raw = "```\n[1, 2]\n```";
        assert_eq!(extract_json(raw), Some(json!([1, 2])));
    }

    #[test]
    fn test_json_fence_preferred() {
        let raw = "```\nnot json\n```\n```json\n{\"ok\": true}\n```";
        assert_eq!(extract_json(raw), Some(json!({"ok": true})));
    }

    #[test]
    fn test_unclosed_fence() {
        assert_eq!(extract_json("```json\n{\"a\": 2}"), Some(json!({"a": 2})));
    }

    #[test]
    fn test_garbage_is_none() {
        for raw in ["", "   ", "```", "```json", "{\"a\":", "hello", "``` ```", "\u{0}"] {
            assert_eq!(extract_json(raw), None, "{raw:?}");
        }
    }
}
