//! Journal Controller
//!
//! The operations a journal front end drives: start a thread from a brain
//! dump, ask for the next question, record answers, toggle root mode, and
//! browse or enrich stored threads.
//!
//! The controller owns the per-thread root flags (held in memory only) and
//! routes every persisted change through the [`SessionStore`].

use crate::config::BehaviorConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event_types,
};
use crate::ports::model_gateway::{GatewayError, ModelGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::session_backend::PersistenceError;
use crate::session_store::SessionStore;
use crate::use_cases::enrich_thread::EnrichThreadUseCase;
use crate::use_cases::next_question::NextQuestionUseCase;
use crate::use_cases::shared::now_millis;
use layers_domain::{
    ConversationMode, DomainError, ExplorationState, Insight, Question, Session, TITLE_SENTINEL,
    validate_answer, validate_brain_dump,
};
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Characters of the brain dump shown in thread listings
pub const PREVIEW_CHARS: usize = 60;

/// Errors surfaced to the journal front end
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("{0}")]
    Validation(#[from] DomainError),

    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Failed to save threads: {0}")]
    Persistence(#[from] PersistenceError),
}

/// One row of the thread list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSummary {
    pub id: String,
    pub timestamp: i64,
    pub title: Option<String>,
    pub preview: String,
    pub answer_count: usize,
}

impl From<&Session> for ThreadSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            timestamp: session.timestamp(),
            title: session.summary().map(String::from),
            preview: session.preview(PREVIEW_CHARS),
            answer_count: session.turn_count(),
        }
    }
}

/// Journal controller managing threads for a front end
pub struct JournalController {
    store: Arc<SessionStore>,
    next_question: NextQuestionUseCase,
    enrich: EnrichThreadUseCase,
    config: BehaviorConfig,
    progress: Arc<dyn ProgressNotifier>,
    conversation_logger: Arc<dyn ConversationLogger>,
    /// Threads whose user said they hit a root
    root_threads: Mutex<HashSet<String>>,
}

impl JournalController {
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        store: Arc<SessionStore>,
        config: BehaviorConfig,
    ) -> Self {
        Self {
            store,
            next_question: NextQuestionUseCase::new(gateway.clone()),
            enrich: EnrichThreadUseCase::new(gateway),
            config,
            progress: Arc::new(NoProgress),
            conversation_logger: Arc::new(NoConversationLogger),
            root_threads: Mutex::new(HashSet::new()),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.next_question = self
            .next_question
            .with_conversation_logger(logger.clone());
        self.enrich = self.enrich.with_conversation_logger(logger.clone());
        self.conversation_logger = logger;
        self
    }

    /// Create with a progress notifier shown around model calls.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    fn load(&self, thread_id: &str) -> Result<Session, JournalError> {
        self.store
            .get(thread_id)
            .ok_or_else(|| JournalError::ThreadNotFound(thread_id.to_string()))
    }

    fn exploration_state(&self, thread_id: &str) -> ExplorationState {
        let mut state = ExplorationState::new();
        let root = self
            .root_threads
            .lock()
            .map(|threads| threads.contains(thread_id))
            .unwrap_or(false);
        if root {
            state.request_root();
        }
        state
    }

    fn set_root(&self, thread_id: &str, root: bool) {
        if let Ok(mut threads) = self.root_threads.lock() {
            if root {
                threads.insert(thread_id.to_string());
            } else {
                threads.remove(thread_id);
            }
        }
    }

    // ==================== Thread lifecycle ====================

    /// Start a thread from a brain dump.
    ///
    /// The text is trimmed and must reach the configured minimum length;
    /// nothing is stored otherwise.
    pub fn submit_brain_dump(&self, text: &str) -> Result<Session, JournalError> {
        let brain_dump = validate_brain_dump(text, self.config.min_brain_dump_chars)?;
        let session = Session::start(brain_dump, now_millis());
        self.store.upsert(session.clone())?;

        info!("Started thread {}", session.id());
        self.conversation_logger.log(ConversationEvent::new(
            event_types::THREAD_STARTED,
            json!({ "thread_id": session.id(), "brain_dump": session.brain_dump() }),
        ));
        Ok(session)
    }

    /// Next question for a thread. Never changes the stored thread.
    pub async fn request_next_question(&self, thread_id: &str) -> Result<Question, JournalError> {
        let session = self.load(thread_id)?;
        let state = self.exploration_state(thread_id);
        let question = self
            .next_question
            .execute(&session, &state, self.progress.as_ref())
            .await?;
        Ok(question)
    }

    /// Record an answer to `question_text` and persist the thread.
    pub fn submit_answer(
        &self,
        thread_id: &str,
        question_id: &str,
        question_text: &str,
        answer: &str,
    ) -> Result<Session, JournalError> {
        let answer = validate_answer(answer)?;
        let mut session = self.load(thread_id)?;

        let layer = session
            .record_answer(question_id, question_text, answer.as_str(), now_millis())
            .layer;
        self.store.upsert(session.clone())?;

        debug!(
            "Recorded answer {} on {} (layer {})",
            session.turn_count(),
            thread_id,
            layer
        );
        self.conversation_logger.log(ConversationEvent::new(
            event_types::ANSWER_RECORDED,
            json!({
                "thread_id": thread_id,
                "question_id": question_id,
                "question": question_text,
                "answer": answer,
                "layer": layer,
            }),
        ));
        Ok(session)
    }

    /// The user says they hit a root: challenge it from now on.
    pub async fn request_root_mode(&self, thread_id: &str) -> Result<Question, JournalError> {
        self.load(thread_id)?;
        info!("Root mode requested for {}", thread_id);
        self.set_root(thread_id, true);
        self.request_next_question(thread_id).await
    }

    /// Back to normal exploration.
    pub async fn exit_root_mode(&self, thread_id: &str) -> Result<Question, JournalError> {
        self.load(thread_id)?;
        info!("Root mode cleared for {}", thread_id);
        self.set_root(thread_id, false);
        self.request_next_question(thread_id).await
    }

    /// Mode the next question would be asked in
    pub fn current_mode(&self, thread_id: &str) -> Result<ConversationMode, JournalError> {
        let session = self.load(thread_id)?;
        Ok(self
            .exploration_state(thread_id)
            .mode_for(session.turn_count()))
    }

    // ==================== Browsing ====================

    /// Stored threads, most recently touched first
    pub fn list_threads(&self) -> Vec<ThreadSummary> {
        self.store.list().iter().map(ThreadSummary::from).collect()
    }

    /// Thread list for display, titling untitled threads first.
    ///
    /// A thread that cannot be titled is listed with its preview; the
    /// failure is logged and the remaining threads are still tried.
    pub async fn list_threads_titled(&self) -> Vec<ThreadSummary> {
        for thread in self.list_threads() {
            if thread.title.is_some() {
                continue;
            }
            if let Err(e) = self.enrich_title(&thread.id).await {
                warn!("Could not title {}: {}", thread.id, e);
            }
        }
        self.list_threads()
    }

    pub fn get_thread(&self, thread_id: &str) -> Result<Session, JournalError> {
        self.load(thread_id)
    }

    pub fn delete_thread(&self, thread_id: &str) -> Result<(), JournalError> {
        if !self.store.delete(thread_id)? {
            return Err(JournalError::ThreadNotFound(thread_id.to_string()));
        }
        self.set_root(thread_id, false);
        info!("Deleted thread {}", thread_id);
        Ok(())
    }

    // ==================== Enrichment ====================

    /// Give a thread a one-sentence title.
    ///
    /// Threads that already have one are returned untouched without a model
    /// call. A `New chat.` reply is returned as-is and not stored.
    pub async fn enrich_title(&self, thread_id: &str) -> Result<Session, JournalError> {
        let mut session = self.load(thread_id)?;
        if session.has_summary() {
            return Ok(session);
        }

        let title = self.enrich.title(&session, self.progress.as_ref()).await?;
        if title == TITLE_SENTINEL {
            debug!("Not enough context to title {}", thread_id);
            return Ok(session);
        }

        session.set_summary(title.as_str(), now_millis());
        self.store.upsert(session.clone())?;

        info!("Titled {}: {}", thread_id, title);
        self.conversation_logger.log(ConversationEvent::new(
            event_types::TITLE_ENRICHED,
            json!({ "thread_id": thread_id, "title": title }),
        ));
        Ok(session)
    }

    /// Summary and root concern for a thread; the root concern is stored.
    pub async fn reveal_insights(&self, thread_id: &str) -> Result<Insight, JournalError> {
        let mut session = self.load(thread_id)?;
        let insight = self.enrich.insights(&session, self.progress.as_ref()).await?;

        session.set_root_concern(insight.root_concern.as_str(), now_millis());
        self.store.upsert(session)?;
        Ok(insight)
    }

    /// A few questions to explore a given layer of the thread.
    pub async fn suggest_layer_questions(
        &self,
        thread_id: &str,
        layer: u32,
    ) -> Result<Vec<Question>, JournalError> {
        let session = self.load(thread_id)?;
        let questions = self
            .enrich
            .layer_questions(&session, layer, self.progress.as_ref())
            .await?;
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::session_backend::InMemorySessionBackend;
    use async_trait::async_trait;
    use layers_domain::{COMPLIMENTS, SESSION_CAPACITY};
    use std::collections::VecDeque;

    const BRAIN_DUMP: &str = "I feel like everything is falling apart at once and I can't keep up";

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct ScriptedGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn with_replies(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelGateway for ScriptedGateway {
        async fn call(&self, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("What else is on your mind?".to_string()))
        }
    }

    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    struct Harness {
        gateway: Arc<ScriptedGateway>,
        backend: Arc<InMemorySessionBackend>,
        journal: JournalController,
    }

    fn harness(replies: Vec<Result<String, GatewayError>>) -> Harness {
        let gateway = Arc::new(ScriptedGateway::with_replies(replies));
        let backend = Arc::new(InMemorySessionBackend::new());
        let store = Arc::new(SessionStore::new(backend.clone(), SESSION_CAPACITY));
        let journal = JournalController::new(gateway.clone(), store, BehaviorConfig::default());
        Harness {
            gateway,
            backend,
            journal,
        }
    }

    fn answer_n(journal: &JournalController, thread_id: &str, n: usize) {
        for i in 0..n {
            journal
                .submit_answer(thread_id, &format!("q_{i}"), "What happened?", "It was a lot")
                .unwrap();
        }
    }

    // ==================== Brain dump ====================

    #[tokio::test]
    async fn test_first_question_in_understanding_mode() {
        let h = harness(vec![Ok("What started to fall apart first?".to_string())]);
        let session = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();
        assert!(session.answers().is_empty());
        assert_eq!(h.journal.list_threads().len(), 1);

        let question = h.journal.request_next_question(session.id()).await.unwrap();
        assert_eq!(question.text(), "What started to fall apart first?");

        let prompts = h.gateway.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("CURRENT MODE: UNDERSTANDING_MODE"));
        assert!(prompts[0].contains(BRAIN_DUMP));
    }

    #[tokio::test]
    async fn test_short_brain_dump_rejected() {
        let h = harness(vec![]);
        let err = h.journal.submit_brain_dump("   too   ").unwrap_err();
        assert!(matches!(
            err,
            JournalError::Validation(DomainError::BrainDumpTooShort { .. })
        ));
        assert!(h.backend.snapshot().is_none());
    }

    // ==================== Modes ====================

    #[tokio::test]
    async fn test_depth_then_root_challenge() {
        let h = harness(vec![]);
        let session = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();
        answer_n(&h.journal, session.id(), 3);

        h.journal.request_next_question(session.id()).await.unwrap();
        h.journal.request_root_mode(session.id()).await.unwrap();
        assert_eq!(
            h.journal.current_mode(session.id()).unwrap(),
            ConversationMode::RootChallenge
        );

        let prompts = h.gateway.prompts();
        assert!(prompts[0].contains("CURRENT MODE: DEPTH_MODE"));
        assert!(prompts[1].contains("CURRENT MODE: ROOT_CHALLENGE_MODE"));
    }

    #[tokio::test]
    async fn test_root_mode_regardless_of_turn_count() {
        let h = harness(vec![]);
        let session = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();

        h.journal.request_root_mode(session.id()).await.unwrap();
        h.journal.exit_root_mode(session.id()).await.unwrap();

        let prompts = h.gateway.prompts();
        assert!(prompts[0].contains("CURRENT MODE: ROOT_CHALLENGE_MODE"));
        assert!(prompts[1].contains("CURRENT MODE: UNDERSTANDING_MODE"));
    }

    #[tokio::test]
    async fn test_root_flag_is_per_thread() {
        let h = harness(vec![]);
        let a = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();
        let b = h.journal.submit_brain_dump("another long enough brain dump").unwrap();

        h.journal.request_root_mode(a.id()).await.unwrap();
        assert_eq!(
            h.journal.current_mode(b.id()).unwrap(),
            ConversationMode::Understanding
        );
    }

    #[tokio::test]
    async fn test_trigger_phrase_never_calls_gateway() {
        let h = harness(vec![]);
        let session = h
            .journal
            .submit_brain_dump("Hi there, I am Olivia and I had a long week")
            .unwrap();

        for n in 0..4 {
            let question = h.journal.request_next_question(session.id()).await.unwrap();
            assert_eq!(question.text(), COMPLIMENTS[n % COMPLIMENTS.len()]);
            h.journal
                .submit_answer(session.id(), question.id(), question.text(), "thanks")
                .unwrap();
        }
        assert!(h.gateway.prompts().is_empty());
    }

    // ==================== Failures ====================

    #[tokio::test]
    async fn test_gateway_error_leaves_store_untouched() {
        let h = harness(vec![Err(GatewayError::status(500, "upstream exploded"))]);
        let session = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();
        let before = h.backend.snapshot();

        let err = h.journal.request_next_question(session.id()).await.unwrap_err();
        assert!(matches!(
            err,
            JournalError::Gateway(GatewayError::Status { status: 500, .. })
        ));
        assert_eq!(h.backend.snapshot(), before);
    }

    #[tokio::test]
    async fn test_unknown_thread() {
        let h = harness(vec![]);
        let err = h.journal.request_next_question("session_0_missing").await.unwrap_err();
        assert!(matches!(err, JournalError::ThreadNotFound(_)));
        assert!(h.journal.request_root_mode("session_0_missing").await.is_err());
        assert!(h.gateway.prompts().is_empty());
    }

    // ==================== Answers ====================

    #[tokio::test]
    async fn test_answers_persist_with_layers() {
        let h = harness(vec![]);
        let session = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();
        answer_n(&h.journal, session.id(), 4);

        let stored = h.journal.get_thread(session.id()).unwrap();
        let layers: Vec<u32> = stored.answers().iter().map(|a| a.layer).collect();
        assert_eq!(layers, vec![1, 1, 1, 2]);
        assert!(stored.timestamp() >= session.timestamp());
    }

    #[tokio::test]
    async fn test_empty_answer_rejected() {
        let h = harness(vec![]);
        let session = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();
        let err = h
            .journal
            .submit_answer(session.id(), "q_1", "What happened?", "   ")
            .unwrap_err();
        assert!(matches!(err, JournalError::Validation(DomainError::EmptyAnswer)));
        assert!(h.journal.get_thread(session.id()).unwrap().answers().is_empty());
    }

    // ==================== Enrichment ====================

    #[tokio::test]
    async fn test_enrich_title_once() {
        let h = harness(vec![Ok("Feeling stretched too thin to hold it all together.".to_string())]);
        let session = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();

        let titled = h.journal.enrich_title(session.id()).await.unwrap();
        assert_eq!(
            titled.summary(),
            Some("Feeling stretched too thin to hold it all together.")
        );

        let before = h.backend.snapshot();
        let again = h.journal.enrich_title(session.id()).await.unwrap();
        let again_twice = h.journal.enrich_title(session.id()).await.unwrap();
        assert_eq!(again.timestamp(), titled.timestamp());
        assert_eq!(again_twice, again);
        assert_eq!(h.backend.snapshot(), before);
        assert_eq!(h.gateway.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_enrich_title_sentinel_not_stored() {
        let h = harness(vec![Ok("New chat.".to_string())]);
        let session = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();

        let result = h.journal.enrich_title(session.id()).await.unwrap();
        assert!(result.summary().is_none());
        assert!(!h.journal.get_thread(session.id()).unwrap().has_summary());
    }

    #[tokio::test]
    async fn test_listing_titles_untitled_threads_once() {
        let h = harness(vec![
            Ok("Arguing with my sister again.".to_string()),
            Ok("Work keeps piling up faster than I can handle.".to_string()),
        ]);
        let untitled = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();
        let titled = h.journal.submit_brain_dump("my sister and I argued again").unwrap();
        h.journal.enrich_title(titled.id()).await.unwrap();
        let calls_before = h.gateway.prompts().len();

        let threads = h.journal.list_threads_titled().await;
        assert_eq!(h.gateway.prompts().len(), calls_before + 1);
        let listed = threads.iter().find(|t| t.id == untitled.id()).unwrap();
        assert_eq!(
            listed.title.as_deref(),
            Some("Work keeps piling up faster than I can handle.")
        );

        // Everything is titled now, so a second listing makes no calls
        h.journal.list_threads_titled().await;
        assert_eq!(h.gateway.prompts().len(), calls_before + 1);
    }

    #[tokio::test]
    async fn test_listing_survives_gateway_failure() {
        let h = harness(vec![Err(GatewayError::status(503, "busy"))]);
        let session = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();

        let threads = h.journal.list_threads_titled().await;
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].id, session.id());
        assert!(threads[0].title.is_none());
    }

    #[tokio::test]
    async fn test_reveal_insights_stores_root_concern() {
        let h = harness(vec![Ok(
            r#"{"summary": "You hold a lot.", "rootConcern": "A fear of being too much."}"#.to_string(),
        )]);
        let session = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();

        let insight = h.journal.reveal_insights(session.id()).await.unwrap();
        assert_eq!(insight.summary, "You hold a lot.");
        assert_eq!(
            h.journal.get_thread(session.id()).unwrap().root_concern(),
            Some("A fear of being too much.")
        );
    }

    #[tokio::test]
    async fn test_suggest_layer_questions() {
        let h = harness(vec![Ok(r#"[{"text": "What are you guarding?"}]"#.to_string())]);
        let session = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();

        let questions = h
            .journal
            .suggest_layer_questions(session.id(), 2)
            .await
            .unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id(), "ai-2-1");
        assert!(h.gateway.prompts()[0].contains("Current layer (1 = gentle surface, 2 = deeper, 3 = core): 2"));
    }

    // ==================== Browsing ====================

    #[tokio::test]
    async fn test_list_and_delete() {
        let h = harness(vec![]);
        let first = h.journal.submit_brain_dump(BRAIN_DUMP).unwrap();
        let second = h.journal.submit_brain_dump("second thread with enough text").unwrap();

        let threads = h.journal.list_threads();
        assert_eq!(threads[0].id, second.id());
        assert_eq!(threads[1].preview, "I feel like everything is falling apart at once and I can't ...");
        assert_eq!(threads[1].title, None);

        // answering moves a thread back to the top
        answer_n(&h.journal, first.id(), 1);
        assert_eq!(h.journal.list_threads()[0].answer_count, 1);

        h.journal.delete_thread(first.id()).unwrap();
        assert!(matches!(
            h.journal.delete_thread(first.id()),
            Err(JournalError::ThreadNotFound(_))
        ));
        assert_eq!(h.journal.list_threads().len(), 1);
    }

    #[tokio::test]
    async fn test_conversation_events_logged() {
        let logger = Arc::new(RecordingLogger {
            events: Mutex::new(Vec::new()),
        });
        let h = harness(vec![]);
        let journal = h.journal.with_conversation_logger(logger.clone());

        let session = journal.submit_brain_dump(BRAIN_DUMP).unwrap();
        let question = journal.request_next_question(session.id()).await.unwrap();
        journal
            .submit_answer(session.id(), question.id(), question.text(), "My job")
            .unwrap();

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec![
                event_types::THREAD_STARTED,
                event_types::PROMPT_SENT,
                event_types::MODEL_RESPONSE,
                event_types::ANSWER_RECORDED,
            ]
        );
    }
}
