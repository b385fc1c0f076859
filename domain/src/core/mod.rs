//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a question presented to the user
//! - [`error::DomainError`]: input validation errors
//! - [`validation`]: brain dump and answer preconditions

pub mod error;
pub mod question;
pub mod string;
pub mod validation;
