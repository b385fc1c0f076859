//! Shared utilities for use cases.
//!
//! Contains the model call helper used by every use case that talks to the
//! gateway (next question, title, insights, layer questions).

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, event_types};
use crate::ports::model_gateway::{GatewayError, ModelGateway};
use crate::ports::progress::ProgressNotifier;
use layers_domain::truncate;
use serde_json::json;
use tracing::{debug, warn};

/// Current time as epoch milliseconds
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Everything needed to make one model call
pub(crate) struct ModelCall<'a> {
    pub gateway: &'a dyn ModelGateway,
    pub logger: &'a dyn ConversationLogger,
    pub progress: &'a dyn ProgressNotifier,
}

impl ModelCall<'_> {
    /// Send a prompt, reporting progress and recording the transcript.
    ///
    /// `kind` names the prompt (`question`, `title`, ...) in logs and events.
    pub(crate) async fn send(
        &self,
        thread_id: &str,
        kind: &'static str,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        debug!(
            "Sending {} prompt for {} ({} chars)",
            kind,
            thread_id,
            prompt.chars().count()
        );
        self.logger.log(ConversationEvent::new(
            event_types::PROMPT_SENT,
            json!({ "thread_id": thread_id, "kind": kind, "prompt": prompt }),
        ));

        self.progress.on_thinking_start(kind);
        let result = self.gateway.call(prompt).await;
        self.progress.on_thinking_end(result.is_ok());

        match &result {
            Ok(text) => {
                debug!("Model {} response: {}", kind, truncate(text, 120));
                self.logger.log(ConversationEvent::new(
                    event_types::MODEL_RESPONSE,
                    json!({ "thread_id": thread_id, "kind": kind, "text": text }),
                ));
            }
            Err(e) => warn!("Model call for {} failed: {}", kind, e),
        }

        result
    }
}
