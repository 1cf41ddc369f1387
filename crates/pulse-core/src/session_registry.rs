//! Session registry.
//!
//! Owns the per-session state for every live session, keyed by
//! [`SessionId`]. Sessions are created and torn down explicitly rather
//! than springing into existence from ambient globals; removing a session
//! discards its log and all derived state - nothing persists beyond the
//! active session by design.

use crate::session::SessionState;
use crate::summary::SummarizeConfig;
use pulse_proto::{SessionId, ValidationEvent};
use std::collections::HashMap;
use tracing::debug;

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session is registered under the given identifier.
    #[error("session not found: {0}")]
    NotFound(SessionId),

    /// A session with the given identifier already exists.
    #[error("session already exists: {0}")]
    AlreadyExists(SessionId),
}

/// Registry of live sessions and their event-processing state.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, SessionState>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with default windowing thresholds.
    pub fn create(&mut self, id: SessionId) -> Result<(), SessionError> {
        self.create_with_config(id, SummarizeConfig::default())
    }

    /// Creates a session with explicit windowing thresholds.
    pub fn create_with_config(
        &mut self,
        id: SessionId,
        config: SummarizeConfig,
    ) -> Result<(), SessionError> {
        if self.sessions.contains_key(&id) {
            return Err(SessionError::AlreadyExists(id));
        }
        debug!(session = %id, "Session created");
        self.sessions.insert(id, SessionState::with_config(config));
        Ok(())
    }

    /// Appends one inbound event to a session's log.
    ///
    /// Purely additive: a structurally valid event is never rejected. The
    /// transport boundary filters malformed frames before this point.
    pub fn append(&mut self, id: &SessionId, event: ValidationEvent) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;
        session.apply(event);
        Ok(())
    }

    /// Looks up a session for pull-based queries.
    pub fn get(&self, id: &SessionId) -> Option<&SessionState> {
        self.sessions.get(id)
    }

    /// Looks up a session for display mutation (section toggling, config).
    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut SessionState> {
        self.sessions.get_mut(id)
    }

    /// Tears a session down, discarding its log and derived state.
    pub fn remove(&mut self, id: &SessionId) -> Result<(), SessionError> {
        match self.sessions.remove(id) {
            Some(_) => {
                debug!(session = %id, "Session removed");
                Ok(())
            }
            None => Err(SessionError::NotFound(id.clone())),
        }
    }

    /// Identifiers of all live sessions.
    pub fn session_ids(&self) -> impl Iterator<Item = &SessionId> {
        self.sessions.keys()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no session is registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
