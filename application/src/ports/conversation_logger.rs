//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording journal events
//! (prompts sent, model responses, accepted answers, new threads, titles)
//! to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! conversation transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// Event type names written by the journal
pub mod event_types {
    pub const THREAD_STARTED: &str = "thread_started";
    pub const PROMPT_SENT: &str = "prompt_sent";
    pub const MODEL_RESPONSE: &str = "model_response";
    pub const ANSWER_RECORDED: &str = "answer_recorded";
    pub const TITLE_ENRICHED: &str = "title_enriched";
}

/// A structured conversation event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The logger adds the timestamp.
pub struct ConversationEvent {
    /// Event type identifier (see [`event_types`]).
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// `log` is synchronous and non-fallible; logging failures never interrupt
/// the journal.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
