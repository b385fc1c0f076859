//! Progress notification port
//!
//! Defines the interface for reporting that the journal is waiting on the model.

/// Callback for progress updates around model calls
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, status line, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called right before a model call starts
    fn on_thinking_start(&self, label: &str);

    /// Called when the model call finished, successfully or not
    fn on_thinking_end(&self, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_thinking_start(&self, _label: &str) {}
    fn on_thinking_end(&self, _success: bool) {}
}
