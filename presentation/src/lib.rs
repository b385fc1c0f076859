//! Presentation layer for layers
//!
//! This crate contains CLI definitions, console formatting,
//! progress reporting, and the interactive journaling REPL.

pub mod cli;
pub mod config;
pub mod journal;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use config::ReplConfig;
pub use journal::{JournalRepl, ReplCommand, resolve_thread};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
