//! Session store
//!
//! Keeps the list of threads behind a [`SessionBackend`]. The whole list is
//! serialized as one JSON array, most recently upserted first, and rewritten
//! on every mutation.

use crate::ports::session_backend::{PersistenceError, SessionBackend};
use layers_domain::Session;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// Capacity-bounded thread list over an injected backend
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
    capacity: usize,
    // serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn SessionBackend>, capacity: usize) -> Self {
        Self {
            backend,
            capacity: capacity.max(1),
            write_lock: Mutex::new(()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Read the stored list; unreadable or corrupt data counts as empty.
    fn load(&self) -> Vec<Session> {
        let blob = match self.backend.load() {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read stored threads, starting empty: {}", e);
                return Vec::new();
            }
        };

        if blob.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<Session>>(&blob) {
            Ok(sessions) => sessions,
            Err(e) => {
                warn!("Stored threads are not valid, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    fn persist(&self, sessions: &[Session]) -> Result<(), PersistenceError> {
        let blob = serde_json::to_string(sessions)?;
        self.backend.save(&blob)
    }

    /// All threads, most recently upserted first
    pub fn list(&self) -> Vec<Session> {
        let _guard = self.guard();
        self.load()
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        let _guard = self.guard();
        self.load().into_iter().find(|s| s.id() == id)
    }

    /// Insert or replace a thread and move it to the front.
    ///
    /// The list is truncated to capacity, evicting the oldest entries, and
    /// persisted immediately.
    pub fn upsert(&self, session: Session) -> Result<(), PersistenceError> {
        let _guard = self.guard();
        let mut sessions = self.load();
        sessions.retain(|s| s.id() != session.id());
        sessions.insert(0, session);

        if sessions.len() > self.capacity {
            let evicted = sessions.len() - self.capacity;
            sessions.truncate(self.capacity);
            debug!("Evicted {} oldest thread(s)", evicted);
        }

        self.persist(&sessions)
    }

    /// Remove a thread. Returns whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool, PersistenceError> {
        let _guard = self.guard();
        let mut sessions = self.load();
        let before = sessions.len();
        sessions.retain(|s| s.id() != id);

        if sessions.len() == before {
            return Ok(false);
        }
        self.persist(&sessions)?;
        Ok(true)
    }
}
