//! Single-sentence shaping for model text.

use crate::prompt::TITLE_SENTINEL;
use regex::Regex;
use std::sync::LazyLock;

/// Question shown when the model returns nothing usable
pub const FALLBACK_QUESTION: &str = "What would you like to explore deeper?";

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static ASIDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.+?\)").expect("aside pattern is valid"));

static WHEN_YOU_SAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^when you say[, ]*").expect("filler pattern is valid"));

static FIRST_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.?!]+[.?!]?").expect("sentence pattern is valid"));

// `Q:`, `Q1.`, `Question 2:`, `1.`, `3)` at the very start
static QUESTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:question\s*\d*\s*[:\-.]|q\d*\s*[:\-.]|\d+\s*[.\-):])\s*")
        .expect("label pattern is valid")
});

static NEW_CHAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^new chat\.?$").expect("sentinel pattern is valid"));

fn collapse(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Strip one leading and one trailing double quote (straight or curly)
fn strip_wrapping_quotes(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix('"')
        .or_else(|| text.strip_prefix('\u{201C}'))
        .unwrap_or(text);
    text.strip_suffix('"')
        .or_else(|| text.strip_suffix('\u{201D}'))
        .unwrap_or(text)
        .trim()
}

/// Reduce model text to its first sentence.
///
/// Whitespace is collapsed, parenthetical asides and a leading
/// "when you say" filler are removed. Text without terminal punctuation is
/// returned whole.
pub fn to_single_sentence(raw: &str) -> String {
    let collapsed = collapse(raw);
    if collapsed.is_empty() {
        return String::new();
    }

    let without_asides = collapse(&ASIDE.replace_all(&collapsed, ""));
    let without_filler = WHEN_YOU_SAY.replace(&without_asides, "");

    match FIRST_SENTENCE.find(&without_filler) {
        Some(m) => m.as_str().trim().to_string(),
        None => without_filler.trim().to_string(),
    }
}

/// Remove a leading question label such as `Q:` or `1.`
pub fn clean_question_label(raw: &str) -> String {
    QUESTION_LABEL.replace(raw.trim(), "").into_owned()
}

/// Turn raw model output into exactly one question ending in `?`.
pub fn normalize_question(raw: &str) -> String {
    let unlabelled = clean_question_label(raw);
    let sentence = to_single_sentence(strip_wrapping_quotes(&unlabelled));

    // Only punctuation left once asides and filler are gone
    if !sentence.chars().any(char::is_alphanumeric) {
        return FALLBACK_QUESTION.to_string();
    }
    if sentence.ends_with('?') || sentence.ends_with('？') {
        sentence
    } else {
        format!("{}?", sentence)
    }
}

/// Turn raw model output into a thread title, or the `New chat.` sentinel.
pub fn normalize_title(raw: &str) -> String {
    let title = strip_wrapping_quotes(raw);
    if title.is_empty() || NEW_CHAT.is_match(title) {
        return TITLE_SENTINEL.to_string();
    }

    let sentence = to_single_sentence(title);
    if sentence.is_empty() {
        TITLE_SENTINEL.to_string()
    } else {
        sentence
    }
}
