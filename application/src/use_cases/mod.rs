//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod enrich_thread;
pub mod journal;
pub mod next_question;
pub(crate) mod shared;
