//! Compliment bypass.
//!
//! When the brain dump or any answer contains the trigger phrase, the
//! exploration stops asking questions and answers every turn with a line
//! from [`COMPLIMENTS`] instead. The line is chosen by answer count so the
//! sequence is deterministic. No prompt is built and the model is never
//! called on this branch.

use crate::session::entities::Answer;
use regex::Regex;
use std::sync::LazyLock;

static TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)i\s+am\s+olivia").expect("trigger pattern is valid"));

/// Fixed set of replies, cycled by turn count
pub const COMPLIMENTS: &[&str] = &[
    "you are so smart :)",
    "so so fashionable!",
    "i hope you are having a good day today!",
    "oliver says hi",
    "good luck today! you're gonna do great >;)",
    "i miss uuu",
    "your pikmin miss you...",
    "meowww",
    "knock knock!",
    "you are so talented!!!",
    "i love your art",
    "moo0OooOooo0oooo",
];

/// Whether `text` contains the trigger phrase
pub fn matches_trigger(text: &str) -> bool {
    TRIGGER.is_match(text)
}

/// Whether the thread so far has switched into the compliment branch
pub fn is_triggered(brain_dump: &str, answers: &[Answer]) -> bool {
    matches_trigger(brain_dump) || answers.iter().any(|a| matches_trigger(&a.answer))
}

/// Compliment for the given number of accepted answers
pub fn compliment_for(turn_count: usize) -> &'static str {
    COMPLIMENTS[turn_count % COMPLIMENTS.len()]
}
