//! Enrich thread use case.
//!
//! Model calls that describe a thread rather than continue it: the
//! one-sentence title, the summary / root concern insight, and a batch of
//! questions for a given layer. Every reply is sanitized before it leaves.

use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::model_gateway::{GatewayError, ModelGateway};
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::shared::ModelCall;
use layers_domain::{
    Insight, PromptTemplate, Question, Session, normalize_title, parse_insights,
    parse_layer_questions,
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct EnrichThreadUseCase {
    gateway: Arc<dyn ModelGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl EnrichThreadUseCase {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    fn model<'a>(&'a self, progress: &'a dyn ProgressNotifier) -> ModelCall<'a> {
        ModelCall {
            gateway: self.gateway.as_ref(),
            logger: self.conversation_logger.as_ref(),
            progress,
        }
    }

    /// One-sentence title, or the `New chat.` sentinel.
    pub async fn title(
        &self,
        session: &Session,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, GatewayError> {
        let prompt = PromptTemplate::chat_title(
            session.brain_dump(),
            session.selected_path(),
            session.answers(),
        );
        let raw = self.model(progress).send(session.id(), "title", &prompt).await?;
        Ok(normalize_title(&raw))
    }

    /// Summary and root concern; missing fields fall back.
    pub async fn insights(
        &self,
        session: &Session,
        progress: &dyn ProgressNotifier,
    ) -> Result<Insight, GatewayError> {
        info!("Requesting insights for {}", session.id());
        let prompt = PromptTemplate::insights(
            session.brain_dump(),
            session.selected_path(),
            session.answers(),
        );
        let raw = self
            .model(progress)
            .send(session.id(), "insights", &prompt)
            .await?;
        Ok(parse_insights(&raw))
    }

    /// Two or three questions for `layer`; never empty.
    pub async fn layer_questions(
        &self,
        session: &Session,
        layer: u32,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Question>, GatewayError> {
        let layer = layer.max(1);
        info!("Requesting layer {} questions for {}", layer, session.id());
        let prompt = PromptTemplate::layer_questions(
            session.brain_dump(),
            session.selected_path(),
            layer,
            session.answers(),
        );
        let raw = self
            .model(progress)
            .send(session.id(), "layer_questions", &prompt)
            .await?;
        Ok(parse_layer_questions(&raw, layer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;

    struct FixedGateway(&'static str);

    #[async_trait]
    impl ModelGateway for FixedGateway {
        async fn call(&self, _prompt: &str) -> Result<String, GatewayError> {
            Ok(self.0.to_string())
        }
    }

    fn session() -> Session {
        Session::start("I keep saying yes to everything at work", 1)
    }

    #[tokio::test]
    async fn test_title_normalized() {
        let use_case = EnrichThreadUseCase::new(Arc::new(FixedGateway(
            "\"Struggling to say no without feeling like a failure. Extra.\"",
        )));
        let title = use_case.title(&session(), &NoProgress).await.unwrap();
        assert_eq!(title, "Struggling to say no without feeling like a failure.");
    }

    #[tokio::test]
    async fn test_title_sentinel() {
        let use_case = EnrichThreadUseCase::new(Arc::new(FixedGateway("new chat")));
        let title = use_case.title(&session(), &NoProgress).await.unwrap();
        assert_eq!(title, "New chat.");
    }

    #[tokio::test]
    async fn test_insights_parsed() {
        let use_case = EnrichThreadUseCase::new(Arc::new(FixedGateway(
            "```json\n{\"summary\": \"You carry a lot.\", \"root_concern\": \"A fear of disappointing others.\"}\n```",
        )));
        let insight = use_case.insights(&session(), &NoProgress).await.unwrap();
        assert_eq!(insight.summary, "You carry a lot.");
        assert_eq!(insight.root_concern, "A fear of disappointing others.");
    }

    #[tokio::test]
    async fn test_layer_questions_fallback_on_prose() {
        let use_case = EnrichThreadUseCase::new(Arc::new(FixedGateway("Sure! Here are some ideas.")));
        let questions = use_case
            .layer_questions(&session(), 0, &NoProgress)
            .await
            .unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id(), "fallback-1-1");
    }
}
