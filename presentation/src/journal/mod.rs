//! Interactive journaling module
//!
//! Provides a readline-based loop: brain dump, then one question at a time.

mod repl;

pub use repl::{JournalRepl, ReplCommand, resolve_thread};
