//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are validation failures on user input. They are reported inline and
/// never leave any state mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Brain dump is too short ({actual} of {min} characters) - tell me more")]
    BrainDumpTooShort { min: usize, actual: usize },

    #[error("Answer cannot be empty")]
    EmptyAnswer,
}
