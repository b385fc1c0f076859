//! Turn planning.
//!
//! [`plan_turn`] is evaluated once per requested question and decides what
//! kind of turn it is before any prompt exists. Order matters:
//!
//! 1. Compliment bypass (trigger phrase anywhere in the thread)
//! 2. Mode probe (the latest answer is just `q`)
//! 3. Ask the model in the mode chosen by [`ExplorationState`]

use super::bypass;
use super::mode::{ConversationMode, ExplorationState};
use crate::session::entities::Answer;

/// Answer text that asks for the current mode instead of a question
pub const MODE_PROBE_ANSWER: &str = "q";

/// What the next turn does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPlan {
    /// Reply with a fixed compliment; nothing is sent to the model
    Compliment(&'static str),
    /// Report the current mode; nothing is sent to the model
    ModeProbe(ConversationMode),
    /// Build a prompt in this mode and ask the model
    Ask(ConversationMode),
}

impl TurnPlan {
    /// Mode the turn was planned in, if any
    pub fn mode(&self) -> Option<ConversationMode> {
        match self {
            TurnPlan::Compliment(_) => None,
            TurnPlan::ModeProbe(mode) | TurnPlan::Ask(mode) => Some(*mode),
        }
    }

    /// Text shown for turns that bypass the model
    pub fn local_reply(&self) -> Option<String> {
        match self {
            TurnPlan::Compliment(text) => Some((*text).to_string()),
            TurnPlan::ModeProbe(mode) => Some(format!("MODE: {}", mode.prompt_label())),
            TurnPlan::Ask(_) => None,
        }
    }
}

/// Decide what the next turn of a thread does.
pub fn plan_turn(brain_dump: &str, answers: &[Answer], state: &ExplorationState) -> TurnPlan {
    if bypass::is_triggered(brain_dump, answers) {
        return TurnPlan::Compliment(bypass::compliment_for(answers.len()));
    }

    let mode = state.mode_for(answers.len());

    let probe = answers
        .last()
        .is_some_and(|a| a.answer.trim().eq_ignore_ascii_case(MODE_PROBE_ANSWER));
    if probe {
        return TurnPlan::ModeProbe(mode);
    }

    TurnPlan::Ask(mode)
}
