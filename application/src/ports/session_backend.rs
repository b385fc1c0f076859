//! Session backend port
//!
//! A key/value slot holding the serialized thread list. The
//! [`SessionStore`](crate::session_store::SessionStore) owns the format;
//! backends only move the blob.

use std::sync::Mutex;
use thiserror::Error;

/// Errors raised by a session backend
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Storage for the serialized thread list
pub trait SessionBackend: Send + Sync {
    /// Read the stored blob, `None` when nothing has been stored yet
    fn load(&self) -> Result<Option<String>, PersistenceError>;

    /// Replace the stored blob
    fn save(&self, blob: &str) -> Result<(), PersistenceError>;
}

/// In-memory backend for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct InMemorySessionBackend {
    blob: Mutex<Option<String>>,
}

impl InMemorySessionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    /// Current blob contents
    pub fn snapshot(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|guard| guard.clone())
    }
}

impl SessionBackend for InMemorySessionBackend {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        self.blob
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))
    }

    fn save(&self, blob: &str) -> Result<(), PersistenceError> {
        let mut guard = self
            .blob
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        *guard = Some(blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_round_trip() {
        let backend = InMemorySessionBackend::new();
        assert!(backend.load().unwrap().is_none());

        backend.save("[]").unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some("[]"));
        assert_eq!(backend.snapshot().as_deref(), Some("[]"));
    }
}
