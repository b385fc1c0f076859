//! Progress reporting while the model is thinking

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use layers_application::ports::progress::ProgressNotifier;
use std::sync::Mutex;
use std::time::Duration;

/// Shows a spinner for the duration of each model call
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Message shown for a kind of model call
    pub fn thinking_message(label: &str) -> &'static str {
        match label {
            "question" => "Thinking of the next question...",
            "title" => "Naming this thread...",
            "insights" => "Looking underneath...",
            "layer_questions" => "Gathering questions...",
            _ => "Thinking...",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_thinking_start(&self, label: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(Self::thinking_message(label).dimmed().to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_thinking_end(&self, _success: bool) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }
}
