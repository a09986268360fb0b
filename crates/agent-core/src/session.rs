//! Session Management
//!
//! A `Session` is the state of one conversation: its message history and the
//! [`ProfileStore`] memory that capabilities read and write. Sessions are
//! isolated by instance; nothing is shared between two conversations.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AgentError, Result};
use crate::message::Conversation;
use crate::state::ProfileStore;

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// State of a single conversation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier
    pub id: SessionId,

    /// Conversation history
    pub conversation: Conversation,

    /// Conversation-scoped memory (risk profile and other preferences)
    pub state: ProfileStore,

    /// Session creation time
    pub created_at: DateTime<Utc>,

    /// Last activity time
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session with a fresh ID
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    /// Create a session with a specific ID
    pub fn with_id(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            conversation: Conversation::new(),
            state: ProfileStore::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the activity timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn message_count(&self) -> usize {
        self.conversation.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Session persistence
pub trait SessionStore: Send + Sync {
    /// Save a session
    fn save(&self, session: &Session) -> Result<()>;

    /// Load a session by ID
    fn load(&self, id: &SessionId) -> Result<Option<Session>>;

    /// Load the session for `id`, or start a fresh one.
    /// A missing id always starts a new conversation.
    fn load_or_create(&self, id: Option<&str>) -> Result<Session> {
        let Some(id) = id.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Session::new());
        };
        let id = SessionId::from_string(id);
        Ok(self.load(&id)?.unwrap_or_else(|| Session::with_id(id)))
    }
}

/// In-memory session store
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map_or(0, |s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> AgentError {
    AgentError::Session("session store lock poisoned".into())
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> Result<()> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    fn load(&self, id: &SessionId) -> Result<Option<Session>> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        Ok(sessions.get(id).cloned())
    }
}
