//! Model gateway port
//!
//! Defines the interface for sending one prompt to the language model
//! through the relay. The client never holds a credential.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a gateway call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Network failure, timeout, or an unreadable response body
    #[error("Transport error: {0}")]
    Transport(String),

    /// The relay answered with a non-2xx status
    #[error("Gateway returned {status}: {body}")]
    Status { status: u16, body: String },
}

impl GatewayError {
    /// Body text used when a failed response has none
    pub const NO_BODY: &'static str = "<no body>";

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::Status {
            status,
            body: if body.is_empty() {
                Self::NO_BODY.to_string()
            } else {
                body
            },
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Gateway for model communication
///
/// This port defines how the application layer talks to the model.
/// Implementations (adapters) live in the infrastructure layer.
///
/// One call is one request; there are no retries. A successful call may
/// return an empty string, which the sanitizer turns into a fallback.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send a prompt and return the raw model text
    async fn call(&self, prompt: &str) -> Result<String, GatewayError>;
}
