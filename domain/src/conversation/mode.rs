//! Conversation mode definitions.
//!
//! Defines [`ConversationMode`], the single axis that decides how the next
//! follow-up question is framed:
//! - Understanding: gather the facts of the situation
//! - Depth: move toward the feelings and beliefs underneath
//! - RootChallenge: gently test a core belief the user says they have reached

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of answered turns spent in [`ConversationMode::Understanding`]
pub const UNDERSTANDING_TURNS: usize = 3;

/// How the next question should be framed.
///
/// Never persisted; derived each turn from the answer count and the
/// user's explicit root signal by [`next_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConversationMode {
    /// Early turns: map the situation, people and pressures
    #[default]
    Understanding,
    /// Later turns: at least as deep as the previous question, never shallower
    Depth,
    /// After "I've hit a root": challenge the belief, paired with reassurance
    RootChallenge,
}

impl ConversationMode {
    /// Label used inside model prompts and the mode probe
    pub fn prompt_label(&self) -> &'static str {
        match self {
            ConversationMode::Understanding => "UNDERSTANDING_MODE",
            ConversationMode::Depth => "DEPTH_MODE",
            ConversationMode::RootChallenge => "ROOT_CHALLENGE_MODE",
        }
    }

    /// Get a short description for display
    pub fn short_description(&self) -> &'static str {
        match self {
            ConversationMode::Understanding => "getting the picture",
            ConversationMode::Depth => "digging deeper",
            ConversationMode::RootChallenge => "challenging the root",
        }
    }
}

impl fmt::Display for ConversationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversationMode::Understanding => write!(f, "understanding"),
            ConversationMode::Depth => write!(f, "depth"),
            ConversationMode::RootChallenge => write!(f, "root-challenge"),
        }
    }
}

impl std::str::FromStr for ConversationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "understanding" | "understanding_mode" | "u" => Ok(ConversationMode::Understanding),
            "depth" | "depth_mode" | "d" => Ok(ConversationMode::Depth),
            "root-challenge" | "root_challenge" | "root_challenge_mode" | "root" | "r" => {
                Ok(ConversationMode::RootChallenge)
            }
            _ => Err(format!("Invalid ConversationMode: {}", s)),
        }
    }
}

/// Compute the mode for the next question.
///
/// Total over its inputs: an explicit root request always wins, otherwise
/// the first [`UNDERSTANDING_TURNS`] turns are understanding and the rest depth.
pub fn next_mode(turn_count: usize, root_hit_requested: bool) -> ConversationMode {
    if root_hit_requested {
        ConversationMode::RootChallenge
    } else if turn_count < UNDERSTANDING_TURNS {
        ConversationMode::Understanding
    } else {
        ConversationMode::Depth
    }
}

/// Per-thread exploration state holding the sticky root signal.
///
/// Once the user says they have hit a root the flag stays set across turns
/// until they explicitly ask to explore something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExplorationState {
    root_hit: bool,
}

impl ExplorationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user signalled "I've hit a root"
    pub fn request_root(&mut self) {
        self.root_hit = true;
    }

    /// The user asked to explore something else
    pub fn exit_root(&mut self) {
        self.root_hit = false;
    }

    pub fn root_hit(&self) -> bool {
        self.root_hit
    }

    /// Mode for the next question given the current turn count
    pub fn mode_for(&self, turn_count: usize) -> ConversationMode {
        next_mode(turn_count, self.root_hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_table() {
        for t in 0..20 {
            let expected = if t < 3 {
                ConversationMode::Understanding
            } else {
                ConversationMode::Depth
            };
            assert_eq!(next_mode(t, false), expected, "turn {t}");
            assert_eq!(next_mode(t, true), ConversationMode::RootChallenge, "turn {t}");
        }
    }

    #[test]
    fn test_boundary() {
        assert_eq!(next_mode(2, false), ConversationMode::Understanding);
        assert_eq!(next_mode(3, false), ConversationMode::Depth);
        assert_eq!(next_mode(usize::MAX, false), ConversationMode::Depth);
    }

    #[test]
    fn test_root_flag_sticks_until_exit() {
        let mut state = ExplorationState::new();
        assert_eq!(state.mode_for(1), ConversationMode::Understanding);

        state.request_root();
        assert_eq!(state.mode_for(1), ConversationMode::RootChallenge);
        assert_eq!(state.mode_for(2), ConversationMode::RootChallenge);
        assert_eq!(state.mode_for(9), ConversationMode::RootChallenge);

        state.exit_root();
        assert_eq!(state.mode_for(1), ConversationMode::Understanding);
        assert_eq!(state.mode_for(9), ConversationMode::Depth);
    }

    #[test]
    fn test_display_and_parse() {
        for mode in [
            ConversationMode::Understanding,
            ConversationMode::Depth,
            ConversationMode::RootChallenge,
        ] {
            assert_eq!(mode.to_string().parse::<ConversationMode>().unwrap(), mode);
        }
        assert_eq!(
            "ROOT_CHALLENGE_MODE".parse::<ConversationMode>().unwrap(),
            ConversationMode::RootChallenge
        );
        assert!("shallow".parse::<ConversationMode>().is_err());
    }

    #[test]
    fn test_prompt_labels() {
        assert_eq!(ConversationMode::Depth.prompt_label(), "DEPTH_MODE");
        assert_eq!(
            ConversationMode::RootChallenge.prompt_label(),
            "ROOT_CHALLENGE_MODE"
        );
    }
}
