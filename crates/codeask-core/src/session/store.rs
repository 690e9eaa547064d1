//! Session state container.

use tokio::sync::RwLock;

use crate::error::{CodeaskError, Result};

use super::message::Message;

#[derive(Debug, Default)]
struct SessionState {
    codebase_id: Option<String>,
    messages: Vec<Message>,
}

/// The single source of truth for one active Q&A session.
///
/// Owns the ordered conversation and the current codebase identifier. The
/// store performs no I/O; `QuestionPipeline` and `HistorySync` read and write
/// it under their own mutual-exclusion guards, so the lock here only protects
/// individual accesses.
///
/// No mutator may be called before a codebase id is set via
/// [`begin_session`](Self::begin_session), except [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Creates an empty store with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchors the store to a codebase and starts a fresh conversation.
    ///
    /// Called when an upload completes or a persisted codebase id is
    /// restored. Any previous conversation is discarded.
    pub async fn begin_session(&self, codebase_id: impl Into<String>) {
        let mut state = self.state.write().await;
        state.codebase_id = Some(codebase_id.into());
        state.messages.clear();
    }

    /// The codebase id the session is anchored to, if any.
    pub async fn current_codebase_id(&self) -> Option<String> {
        self.state.read().await.codebase_id.clone()
    }

    /// A snapshot of the conversation.
    pub async fn messages(&self) -> Vec<Message> {
        self.state.read().await.messages.clone()
    }

    pub async fn message_count(&self) -> usize {
        self.state.read().await.messages.len()
    }

    /// Appends one message to the live conversation.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSession` when no codebase id has been set.
    pub async fn append_message(&self, message: Message) -> Result<()> {
        let mut state = self.state.write().await;
        if state.codebase_id.is_none() {
            return Err(CodeaskError::NoActiveSession);
        }
        state.messages.push(message);
        Ok(())
    }

    /// Replaces the whole conversation (history replay).
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSession` when no codebase id has been set.
    pub async fn replace_messages(&self, messages: Vec<Message>) -> Result<()> {
        let mut state = self.state.write().await;
        if state.codebase_id.is_none() {
            return Err(CodeaskError::NoActiveSession);
        }
        state.messages = messages;
        Ok(())
    }

    /// Clears the codebase id and the conversation.
    ///
    /// Used when the user starts a new upload. Always allowed.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.codebase_id = None;
        state.messages.clear();
    }
}
