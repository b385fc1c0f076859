//! Response sanitizer
//!
//! Every piece of model output passes through here before it reaches a user.
//! All functions are total: malformed input degrades to a fixed fallback.

mod json;
mod sentence;
mod structured;

pub use json::extract_json;
pub use sentence::{
    FALLBACK_QUESTION, clean_question_label, normalize_question, normalize_title,
    to_single_sentence,
};
pub use structured::{
    FALLBACK_ROOT_CONCERN, FALLBACK_SUMMARY, Insight, fallback_layer_questions, parse_insights,
    parse_layer_questions,
};
