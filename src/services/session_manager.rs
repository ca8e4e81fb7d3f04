// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// Where a session is in the URL-then-questions flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    #[default]
    AwaitingUrl,
    AwaitingFollowup,
}

impl ConversationStage {
    /// Glyph shown in front of the user's input in the transcript.
    pub fn user_prefix(self) -> &'static str {
        match self {
            ConversationStage::AwaitingUrl => "🔗",
            ConversationStage::AwaitingFollowup => "❓",
        }
    }

    /// Stage entered once the assistant has replied. There is no way back to `AwaitingUrl`.
    pub fn after_reply(self) -> Self {
        ConversationStage::AwaitingFollowup
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("session not found: {0}")]
    NotFound(String),

    #[error("session {0} is still waiting for a reply")]
    Busy(String),
}

/// What a started turn needs to reach the webhook.
#[derive(Debug, Clone)]
pub struct Turn {
    pub stage: ConversationStage,
    pub user_id: String,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub messages: Vec<Message>,
    pub stage: ConversationStage,
    /// Set while the webhook call for the latest user message is in flight.
    pub awaiting_reply: bool,
    pub last_active: Instant,
}

impl Session {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            messages: Vec::new(),
            stage: ConversationStage::default(),
            awaiting_reply: false,
            last_active: Instant::now(),
        }
    }
}

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
    user_id: String,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl SessionManager {
    // Every session created here carries the same user id.
    pub fn new(ttl: Duration, user_id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            user_id: user_id.into(),
        }
    }

    // Create a fresh session and return its id.
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let session = Session::new(id.clone(), self.user_id.clone());

        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), session);
        id
    }

    // Ensure there's a session with this id.
    pub async fn ensure_session(&self, id: &str) -> String {
        {
            let guard = self.inner.read().await;
            if guard.contains_key(id) {
                return id.to_string();
            }
        }
        let mut guard = self.inner.write().await;
        guard
            .entry(id.to_string())
            .or_insert_with(|| Session::new(id, self.user_id.clone()));
        id.to_string()
    }

    /// Record the user's message, prefixed for the current stage, and lock the
    /// session until [`finish_turn`](Self::finish_turn).
    pub async fn start_turn(&self, session_id: &str, input: &str) -> Result<Turn, TurnError> {
        let mut guard = self.inner.write().await;
        let session = guard
            .get_mut(session_id)
            .ok_or_else(|| TurnError::NotFound(session_id.to_string()))?;

        if session.awaiting_reply {
            return Err(TurnError::Busy(session_id.to_string()));
        }

        session.messages.push(Message {
            role: MessageRole::User,
            content: format!("{} {}", session.stage.user_prefix(), input),
        });
        session.awaiting_reply = true;
        session.last_active = Instant::now();

        Ok(Turn {
            stage: session.stage,
            user_id: session.user_id.clone(),
        })
    }

    /// Append the assistant reply and advance the stage.
    ///
    /// A session removed while the reply was pending stays removed.
    pub async fn finish_turn(&self, session_id: &str, reply: &str) -> Result<Session, TurnError> {
        let mut guard = self.inner.write().await;
        let session = guard
            .get_mut(session_id)
            .ok_or_else(|| TurnError::NotFound(session_id.to_string()))?;

        session.messages.push(Message {
            role: MessageRole::Assistant,
            content: reply.to_string(),
        });
        session.stage = session.stage.after_reply();
        session.awaiting_reply = false;
        session.last_active = Instant::now();
        Ok(session.clone())
    }

    /// Clone of the whole session.
    pub async fn snapshot(&self, session_id: &str) -> Option<Session> {
        let guard = self.inner.read().await;
        guard.get(session_id).cloned()
    }

    /// Remove a session by id
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Remove sessions idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, s| now.duration_since(s.last_active) < self.ttl);
        before - guard.len()
    }

    /// Number of sessions
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }
}
