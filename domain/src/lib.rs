//! Domain layer for layers
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Threads
//!
//! A thread ([`Session`]) starts from a free-form brain dump and grows one
//! accepted [`Answer`] at a time. Every third answer opens a new layer.
//!
//! ## Conversation modes
//!
//! Each turn is planned by [`plan_turn`]:
//!
//! - **Understanding**: the first three turns gather the facts
//! - **Depth**: later turns move toward the feelings underneath
//! - **Root challenge**: the user says they hit a root; the belief is tested
//!
//! A secret trigger phrase short-circuits all of this with a compliment.
//!
//! ## Sanitizing
//!
//! The model is an untrusted text oracle. Everything it returns passes
//! through [`sanitize`] and degrades to a fixed fallback when malformed.

pub mod conversation;
pub mod core;
pub mod path;
pub mod prompt;
pub mod sanitize;
pub mod session;

// Re-export commonly used types
pub use conversation::{
    bypass::{COMPLIMENTS, compliment_for, is_triggered},
    mode::{ConversationMode, ExplorationState, next_mode},
    turn::{MODE_PROBE_ANSWER, TurnPlan, plan_turn},
};
pub use core::{
    error::DomainError,
    question::Question,
    string::truncate,
    validation::{MIN_BRAIN_DUMP_CHARS, validate_answer, validate_brain_dump},
};
pub use path::{Path, detection::detect_paths};
pub use prompt::{PromptTemplate, TITLE_SENTINEL, format_history};
pub use sanitize::{
    FALLBACK_QUESTION, Insight, extract_json, normalize_question, normalize_title,
    parse_insights, parse_layer_questions, to_single_sentence,
};
pub use session::{
    SESSION_CAPACITY,
    entities::{ANSWERS_PER_LAYER, Answer, Session},
};
