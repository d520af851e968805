//! Registry of live explorer sessions.
//!
//! Session state (access level, trigger markers, discoveries) is ephemeral:
//! it lives here and disappears when the session ends, when it sits idle
//! past the expiry window, or when the process exits.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use lifeindex_core::error::DomainError;
use uuid::Uuid;

use crate::domain::session::ExplorerSession;

#[derive(Debug)]
struct Entry {
    session: ExplorerSession,
    last_seen: Instant,
}

impl Entry {
    fn touch(&mut self) -> &mut ExplorerSession {
        self.last_seen = Instant::now();
        &mut self.session
    }
}

/// Live sessions keyed by session id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, Entry>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new session for `nickname` and returns a copy of it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the nickname is blank.
    pub fn start(&self, nickname: &str) -> Result<ExplorerSession, DomainError> {
        let session = ExplorerSession::start(Uuid::new_v4(), nickname)?;
        self.lock().insert(
            session.id,
            Entry {
                session: session.clone(),
                last_seen: Instant::now(),
            },
        );
        Ok(session)
    }

    /// Removes a session, returning it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if the id is unknown.
    pub fn end(&self, session_id: Uuid) -> Result<ExplorerSession, DomainError> {
        self.lock()
            .remove(&session_id)
            .map(|entry| entry.session)
            .ok_or(DomainError::SessionNotFound(session_id))
    }

    /// Returns a copy of a session and marks it active.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if the id is unknown.
    pub fn get(&self, session_id: Uuid) -> Result<ExplorerSession, DomainError> {
        self.lock()
            .get_mut(&session_id)
            .map(|entry| entry.touch().clone())
            .ok_or(DomainError::SessionNotFound(session_id))
    }

    /// Runs `f` against the live session. `f` must not block or await.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if the id is unknown, otherwise
    /// whatever `f` returns.
    pub fn with_session<T, F>(&self, session_id: Uuid, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut ExplorerSession) -> Result<T, DomainError>,
    {
        let mut sessions = self.lock();
        let entry = sessions
            .get_mut(&session_id)
            .ok_or(DomainError::SessionNotFound(session_id))?;
        f(entry.touch())
    }

    /// Drops sessions not used for at least `max_idle` and returns how many
    /// were dropped. Their markers and discoveries go with them.
    pub fn expire_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < max_idle);
        before - sessions.len()
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether there are no live sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
