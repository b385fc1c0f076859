//! Input preconditions for brain dumps and answers.

use super::error::DomainError;

/// Minimum number of characters a brain dump needs before exploring starts.
pub const MIN_BRAIN_DUMP_CHARS: usize = 10;

/// Validate a brain dump and return it trimmed.
///
/// Length is counted in characters after trimming.
pub fn validate_brain_dump(text: &str, min_chars: usize) -> Result<String, DomainError> {
    let trimmed = text.trim();
    let actual = trimmed.chars().count();
    if actual < min_chars {
        return Err(DomainError::BrainDumpTooShort {
            min: min_chars,
            actual,
        });
    }
    Ok(trimmed.to_string())
}

/// Validate an answer and return it trimmed.
pub fn validate_answer(text: &str) -> Result<String, DomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyAnswer);
    }
    Ok(trimmed.to_string())
}
