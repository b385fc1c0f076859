//! Thread entities
//!
//! A [`Session`] is one brain dump plus its accumulated question/answer
//! history. Answers are append-only; their order is the conversation order
//! fed back into every prompt.

use crate::core::string::truncate;
use crate::path::Path;
use serde::{Deserialize, Serialize};

/// Number of answers grouped into one display layer
pub const ANSWERS_PER_LAYER: usize = 3;

/// One accepted answer (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub question_text: String,
    pub answer: String,
    pub layer: u32,
}

impl Answer {
    pub fn new(
        question_id: impl Into<String>,
        question_text: impl Into<String>,
        answer: impl Into<String>,
        layer: u32,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            question_text: question_text.into(),
            answer: answer.into(),
            layer: layer.max(1),
        }
    }
}

/// A persisted thread (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: String,
    timestamp: i64,
    brain_dump: String,
    #[serde(default)]
    selected_path: Path,
    #[serde(default)]
    answers: Vec<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    root_concern: Option<String>,
}

impl Session {
    /// Build a session from its parts
    pub fn new(
        id: impl Into<String>,
        timestamp: i64,
        brain_dump: impl Into<String>,
        selected_path: Path,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            brain_dump: brain_dump.into(),
            selected_path,
            answers: Vec::new(),
            summary: None,
            root_concern: None,
        }
    }

    /// Start a new thread at `now` (epoch millis) with a fresh id
    pub fn start(brain_dump: impl Into<String>, now: i64) -> Self {
        Self::new(Self::generate_id(now), now, brain_dump, Path::exploration())
    }

    /// `session_<millis>_<9 random chars>`
    pub fn generate_id(now: i64) -> String {
        let random = uuid::Uuid::new_v4().simple().to_string();
        format!("session_{}_{}", now, &random[..9])
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn brain_dump(&self) -> &str {
        &self.brain_dump
    }

    pub fn selected_path(&self) -> &Path {
        &self.selected_path
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Number of accepted answers so far
    pub fn turn_count(&self) -> usize {
        self.answers.len()
    }

    /// The thread title, if one has been generated
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn root_concern(&self) -> Option<&str> {
        self.root_concern.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn has_summary(&self) -> bool {
        self.summary().is_some()
    }

    /// Layer the next answer will be recorded in
    pub fn next_layer(&self) -> u32 {
        (self.answers.len() / ANSWERS_PER_LAYER) as u32 + 1
    }

    /// Short preview of the brain dump for thread listings
    pub fn preview(&self, max_chars: usize) -> String {
        truncate(&self.brain_dump, max_chars)
    }

    /// Append an accepted answer at the next layer and refresh the timestamp
    pub fn record_answer(
        &mut self,
        question_id: impl Into<String>,
        question_text: impl Into<String>,
        answer: impl Into<String>,
        now: i64,
    ) -> &Answer {
        let layer = self.next_layer();
        self.answers
            .push(Answer::new(question_id, question_text, answer, layer));
        self.touch(now);
        // Just pushed, so the slice is non-empty
        &self.answers[self.answers.len() - 1]
    }

    pub fn set_summary(&mut self, summary: impl Into<String>, now: i64) {
        self.summary = Some(summary.into());
        self.touch(now);
    }

    pub fn set_root_concern(&mut self, root_concern: impl Into<String>, now: i64) {
        self.root_concern = Some(root_concern.into());
        self.touch(now);
    }

    /// Refresh the last-touched timestamp
    pub fn touch(&mut self, now: i64) {
        self.timestamp = now;
    }

    /// Answers grouped by layer, lowest layer first
    pub fn answers_by_layer(&self) -> Vec<(u32, Vec<&Answer>)> {
        let mut groups: Vec<(u32, Vec<&Answer>)> = Vec::new();
        for answer in &self.answers {
            match groups.iter_mut().find(|(layer, _)| *layer == answer.layer) {
                Some((_, group)) => group.push(answer),
                None => groups.push((answer.layer, vec![answer])),
            }
        }
        groups.sort_by_key(|(layer, _)| *layer);
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new("session_1_abc", 1_000, "work has been rough lately", Path::exploration())
    }

    #[test]
    fn test_start_generates_id() {
        let s = Session::start("I can't keep up with anything", 1_700_000_000_000);
        assert!(s.id().starts_with("session_1700000000000_"));
        assert_eq!(s.id().len(), "session_1700000000000_".len() + 9);
        assert_eq!(s.timestamp(), 1_700_000_000_000);
        assert!(s.answers().is_empty());
        assert_eq!(s.selected_path().id, "exploration");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Session::generate_id(5);
        let b = Session::generate_id(5);
        assert_ne!(a, b);
    }

    #[test]
    fn test_record_answer_layers() {
        let mut s = session();
        for i in 0..7 {
            s.record_answer(format!("q_{i}"), "Why?", "Because", 2_000 + i);
        }
        let layers: Vec<u32> = s.answers().iter().map(|a| a.layer).collect();
        assert_eq!(layers, [1, 1, 1, 2, 2, 2, 3]);
        assert_eq!(s.timestamp(), 2_006);
        assert_eq!(s.turn_count(), 7);
    }

    #[test]
    fn test_empty_summary_is_absent() {
        let mut s = session();
        assert!(!s.has_summary());
        s.set_summary("", 2_000);
        assert!(!s.has_summary());
        s.set_summary("Feeling stretched thin at work.", 3_000);
        assert_eq!(s.summary(), Some("Feeling stretched thin at work."));
        assert_eq!(s.timestamp(), 3_000);
    }

    #[test]
    fn test_serde_camel_case() {
        let mut s = session();
        s.record_answer("q_1", "What happened?", "My boss yelled", 2_000);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["brainDump"], "work has been rough lately");
        assert_eq!(json["selectedPath"]["id"], "exploration");
        assert_eq!(json["answers"][0]["questionText"], "What happened?");
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn test_deserialize_legacy_blob() {
        let blob = r#"{
            "id": "session_1_x",
            "timestamp": 5,
            "brainDump": "everything is loud",
            "selectedPath": {"id": "exploration", "label": "Exploration", "description": "d"},
            "answers": [],
            "summary": "",
            "rootConcern": ""
        }"#;
        let s: Session = serde_json::from_str(blob).unwrap();
        assert_eq!(s.id(), "session_1_x");
        assert!(s.summary().is_none());
        assert!(s.root_concern().is_none());
    }

    #[test]
    fn test_answers_by_layer() {
        let mut s = session();
        for i in 0..4 {
            s.record_answer(format!("q_{i}"), "Q", "A", 10);
        }
        let groups = s.answers_by_layer();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 1);
        assert_eq!(groups[0].1.len(), 3);
        assert_eq!(groups[1].1[0].question_id, "q_3");
    }

    #[test]
    fn test_preview() {
        let s = Session::new("id", 0, "I feel like everything is falling apart at once", Path::default());
        assert_eq!(s.preview(30), "I feel like everything is fall...");
    }
}
