//! Prompt domain
//!
//! Pure string construction for every request sent to the model. Identical
//! inputs always produce identical prompts.

mod history;
mod template;

pub use history::{EMPTY_HISTORY, format_history};
pub use template::{PromptTemplate, TITLE_SENTINEL};
