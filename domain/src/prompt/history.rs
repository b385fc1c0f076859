//! Conversation history rendering for prompts.

use crate::session::entities::Answer;

/// Text used when a thread has no answers yet
pub const EMPTY_HISTORY: &str = "None yet.";

/// Render every question/answer pair, oldest first.
///
/// Each pair is `Q<n>: <question>\nA<n>: <answer>` with 1-based numbering;
/// pairs are joined by `separator`. Returns [`EMPTY_HISTORY`] for no answers.
pub fn format_history(answers: &[Answer], separator: &str) -> String {
    if answers.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    answers
        .iter()
        .enumerate()
        .map(|(idx, a)| {
            format!(
                "Q{n}: {q}\nA{n}: {a}",
                n = idx + 1,
                q = a.question_text,
                a = a.answer
            )
        })
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        assert_eq!(format_history(&[], "\n\n"), "None yet.");
    }

    #[test]
    fn test_history_golden() {
        let answers = vec![
            Answer::new("q_1", "What happened at work?", "My manager moved the deadline", 1),
            Answer::new("q_2", "How did that land?", "Like I'm never enough", 1),
        ];
        assert_eq!(
            format_history(&answers, "\n\n"),
            "Q1: What happened at work?\nA1: My manager moved the deadline\n\n\
             Q2: How did that land?\nA2: Like I'm never enough"
        );
        assert_eq!(
            format_history(&answers, "\n"),
            "Q1: What happened at work?\nA1: My manager moved the deadline\n\
             Q2: How did that land?\nA2: Like I'm never enough"
        );
    }
}
