//! Conversation mode controller.
//!
//! - [`mode::ConversationMode`] and [`mode::next_mode`]: the mode transition table
//! - [`mode::ExplorationState`]: the sticky "I've hit a root" signal
//! - [`bypass`]: the compliment branch that skips the model entirely
//! - [`turn::plan_turn`]: decides each turn before any prompt is built

pub mod bypass;
pub mod mode;
pub mod turn;
