//! Console output formatter for journal threads

use chrono::{DateTime, Local, TimeZone, Timelike};
use colored::Colorize;
use layers_application::ThreadSummary;
use layers_domain::{ConversationMode, Insight, Path, Question, Session};

/// Formats threads, questions and insights for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Numbered thread list, most recent first
    pub fn format_thread_list(threads: &[ThreadSummary]) -> String {
        if threads.is_empty() {
            return format!("{}\n", "No threads yet. Write a brain dump to start one.".dimmed());
        }

        let mut output = Self::header("Threads");
        output.push('\n');
        for (i, thread) in threads.iter().enumerate() {
            let heading = thread.title.as_deref().unwrap_or(&thread.preview);
            output.push_str(&format!(
                "{:>3}. {}\n     {} {}\n",
                i + 1,
                heading.bold(),
                Self::format_timestamp(thread.timestamp).dimmed(),
                Self::answer_count(thread.answer_count).dimmed(),
            ));
        }
        output
    }

    /// Full thread: brain dump, then answers grouped by layer
    pub fn format_thread(session: &Session) -> String {
        let mut output = Self::header(session.summary().unwrap_or("Untitled thread"));
        output.push_str(&format!(
            "{} {}\n\n",
            Self::format_timestamp(session.timestamp()).dimmed(),
            format!("[{}]", session.selected_path()).dimmed()
        ));

        output.push_str(&format!("{}\n", "Brain dump:".cyan().bold()));
        output.push_str(&Self::indent(session.brain_dump(), 2));
        output.push('\n');

        for (layer, answers) in session.answers_by_layer() {
            output.push_str(&Self::section_header(&format!("Layer {}", layer)));
            for answer in answers {
                output.push_str(&format!("\n  {}\n", answer.question_text.yellow()));
                output.push_str(&Self::indent(&answer.answer, 4));
            }
        }

        if let Some(root) = session.root_concern() {
            output.push_str(&Self::section_header("Underneath"));
            output.push_str(&format!("\n{}", Self::indent(root, 2)));
        }

        output.push_str(&Self::footer());
        output
    }

    /// A question as shown before the answer prompt
    pub fn format_question(question: &Question, mode: ConversationMode) -> String {
        format!(
            "\n{} {}\n{}\n",
            format!("Layer {}", question.layer()).magenta().bold(),
            format!("({})", mode.short_description()).dimmed(),
            question.text().bold()
        )
    }

    pub fn format_insight(insight: &Insight) -> String {
        let mut output = Self::section_header("What this is about");
        output.push_str(&format!("\n{}", Self::indent(&insight.summary, 2)));
        output.push_str(&format!("\n{}\n", "What might be underneath:".cyan().bold()));
        output.push_str(&Self::indent(&insight.root_concern, 2));
        output
    }

    pub fn format_layer_questions(layer: u32, questions: &[Question]) -> String {
        let mut output = Self::section_header(&format!("Questions for layer {}", layer));
        output.push('\n');
        for question in questions {
            output.push_str(&format!("  * {}\n", question.text()));
        }
        output
    }

    /// Themes detected in a brain dump
    pub fn format_paths(paths: &[Path]) -> String {
        let mut output = Self::section_header("Possible paths");
        output.push('\n');
        for path in paths {
            output.push_str(&format!(
                "  {} {}\n",
                path.label.green().bold(),
                format!("- {}", path.description).dimmed()
            ));
        }
        output
    }

    pub fn format_mode(mode: ConversationMode) -> String {
        format!(
            "{} {} {}\n",
            "Mode:".cyan().bold(),
            mode,
            format!("({})", mode.short_description()).dimmed()
        )
    }

    /// Generic banner for a failed model call; details go to the log
    pub fn format_gateway_failure() -> String {
        format!(
            "{}\n",
            "Couldn't reach the question service. Try again in a moment.".red()
        )
    }

    /// "Mar 5th 3pm" in local time
    pub fn format_timestamp(millis: i64) -> String {
        match Local.timestamp_millis_opt(millis).single() {
            Some(dt) => Self::format_datetime(&dt),
            None => String::from("unknown date"),
        }
    }

    fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let day = dt.format("%-d").to_string();
        let suffix = match day.parse::<u32>().unwrap_or(0) {
            11..=13 => "th",
            d if d % 10 == 1 => "st",
            d if d % 10 == 2 => "nd",
            d if d % 10 == 3 => "rd",
            _ => "th",
        };
        let (pm, hour) = dt.hour12();
        format!(
            "{} {}{} {}{}",
            dt.format("%b"),
            day,
            suffix,
            hour,
            if pm { "pm" } else { "am" }
        )
    }

    fn answer_count(count: usize) -> String {
        match count {
            0 => "no answers".to_string(),
            1 => "1 answer".to_string(),
            n => format!("{} answers", n),
        }
    }

    fn header(title: &str) -> String {
        let line = "═".repeat(60);
        format!("\n{}\n  {}\n{}\n", line.cyan(), title.cyan().bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("── {} ──", title).blue().bold())
    }

    fn footer() -> String {
        format!("\n{}\n", "─".repeat(60).cyan())
    }

    fn indent(text: &str, spaces: usize) -> String {
        let pad = " ".repeat(spaces);
        text.lines()
            .map(|line| format!("{}{}\n", pad, line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_ordinal_dates() {
        let at = |d, h| Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap();
        assert_eq!(ConsoleFormatter::format_datetime(&at(5, 15)), "Mar 5th 3pm");
        assert_eq!(ConsoleFormatter::format_datetime(&at(1, 9)), "Mar 1st 9am");
        assert_eq!(ConsoleFormatter::format_datetime(&at(22, 0)), "Mar 22nd 12am");
        assert_eq!(ConsoleFormatter::format_datetime(&at(13, 12)), "Mar 13th 12pm");
        assert_eq!(ConsoleFormatter::format_datetime(&at(23, 23)), "Mar 23rd 11pm");
    }

    #[test]
    fn test_empty_thread_list() {
        plain();
        assert!(ConsoleFormatter::format_thread_list(&[]).contains("No threads yet"));
    }

    #[test]
    fn test_thread_list_prefers_title() {
        plain();
        let threads = vec![
            ThreadSummary {
                id: "a".into(),
                timestamp: 0,
                title: Some("Work keeps piling up.".into()),
                preview: "work has been a lot".into(),
                answer_count: 1,
            },
            ThreadSummary {
                id: "b".into(),
                timestamp: 0,
                title: None,
                preview: "my sister and I argued".into(),
                answer_count: 0,
            },
        ];
        let out = ConsoleFormatter::format_thread_list(&threads);
        assert!(out.contains("1. Work keeps piling up."));
        assert!(out.contains("2. my sister and I argued"));
        assert!(out.contains("1 answer"));
        assert!(out.contains("no answers"));
    }

    #[test]
    fn test_thread_groups_layers() {
        plain();
        let mut session = Session::start("Everything is too much right now", 1_000);
        for i in 0..4 {
            session.record_answer(format!("q_{i}"), format!("Question {i}?"), format!("answer {i}"), 1_000 + i);
        }
        let out = ConsoleFormatter::format_thread(&session);
        let first = out.find("Layer 1").unwrap();
        let second = out.find("Layer 2").unwrap();
        assert!(first < second);
        assert!(out.find("Question 3?").unwrap() > second);
        assert!(out.contains("Untitled thread"));
    }

    #[test]
    fn test_question_shows_layer_and_mode() {
        plain();
        let q = Question::new("q_1", "What happened first?", 2);
        let out = ConsoleFormatter::format_question(&q, ConversationMode::Depth);
        assert!(out.contains("Layer 2"));
        assert!(out.contains("digging deeper"));
        assert!(out.contains("What happened first?"));
    }
}
