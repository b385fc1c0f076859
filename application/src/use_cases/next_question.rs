//! Next question use case.
//!
//! Plans the turn for a thread and produces the next follow-up question:
//!
//! 1. [`plan_turn`] decides between compliment, mode probe, or a model call
//! 2. For a model call, [`PromptTemplate::next_question`] renders the prompt
//! 3. The raw reply goes through [`normalize_question`]
//!
//! This use case never mutates the thread; the answer is recorded separately.

use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::model_gateway::{GatewayError, ModelGateway};
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::shared::{ModelCall, now_millis};
use layers_domain::{
    ExplorationState, PromptTemplate, Question, Session, TurnPlan, normalize_question, plan_turn,
};
use std::sync::Arc;
use tracing::info;

/// Use case for generating the next question of a thread.
#[derive(Clone)]
pub struct NextQuestionUseCase {
    gateway: Arc<dyn ModelGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl NextQuestionUseCase {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Produce the next question for `session` under `state`.
    pub async fn execute(
        &self,
        session: &Session,
        state: &ExplorationState,
        progress: &dyn ProgressNotifier,
    ) -> Result<Question, GatewayError> {
        let plan = plan_turn(session.brain_dump(), session.answers(), state);
        let id = Question::follow_up_id(now_millis());
        let layer = session.next_layer();

        let mode = match plan {
            TurnPlan::Ask(mode) => mode,
            TurnPlan::Compliment(_) | TurnPlan::ModeProbe(_) => {
                info!("Turn {} of {} answered locally", session.turn_count(), session.id());
                let text = plan.local_reply().unwrap_or_default();
                return Ok(Question::new(id, text, layer));
            }
        };

        info!(
            "Requesting question {} for {} in {}",
            session.turn_count() + 1,
            session.id(),
            mode.prompt_label()
        );

        let prompt = PromptTemplate::next_question(session.brain_dump(), session.answers(), mode);
        let raw = ModelCall {
            gateway: self.gateway.as_ref(),
            logger: self.conversation_logger.as_ref(),
            progress,
        }
        .send(session.id(), "question", &prompt)
        .await?;

        Ok(Question::new(id, normalize_question(&raw), layer))
    }
}
