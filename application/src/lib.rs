//! Application layer for layers
//!
//! This crate contains use cases, the session store, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod session_store;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    model_gateway::{GatewayError, ModelGateway},
    progress::{NoProgress, ProgressNotifier},
    session_backend::{InMemorySessionBackend, PersistenceError, SessionBackend},
};
pub use session_store::SessionStore;
pub use use_cases::enrich_thread::EnrichThreadUseCase;
pub use use_cases::journal::{JournalController, JournalError, ThreadSummary};
pub use use_cases::next_question::NextQuestionUseCase;
