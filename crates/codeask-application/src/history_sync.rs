//! Server-side history reconciliation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use codeask_core::backend::BackendClient;
use codeask_core::error::Result;
use codeask_core::history::HistoryEntry;
use codeask_core::session::{Message, SessionEvent, SessionStore, TurnObserver};

/// Keeps the side list of server-persisted turns and replays entries into
/// the live conversation.
///
/// History is advisory: a failed refresh keeps the previous list (stale
/// beats empty) and is only logged. As a [`TurnObserver`] it refreshes after
/// every resolved turn, which is also how the client learns that a failed
/// turn was never committed server-side.
pub struct HistorySync {
    store: Arc<SessionStore>,
    backend: Arc<dyn BackendClient>,
    entries: RwLock<Vec<HistoryEntry>>,
}

impl HistorySync {
    pub fn new(store: Arc<SessionStore>, backend: Arc<dyn BackendClient>) -> Self {
        Self {
            store,
            backend,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Refreshes the list from the backend. Soft-fails.
    pub async fn refresh(&self, codebase_id: &str) {
        match self.backend.fetch_history(codebase_id).await {
            Ok(history) => {
                *self.entries.write().await = history;
            }
            Err(err) => {
                tracing::warn!(%codebase_id, error = %err, "history refresh failed, keeping previous list");
            }
        }
    }

    /// A snapshot of the current history list, in backend order.
    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.read().await.clone()
    }

    /// Replays the first entry whose question matches exactly, replacing the
    /// live conversation with the reconstructed pair. Returns whether a
    /// match was found.
    ///
    /// Question text is not a unique key; duplicates replay the first match
    /// in list order.
    pub async fn select_entry(&self, question: &str) -> Result<bool> {
        let entry = {
            let entries = self.entries.read().await;
            entries.iter().find(|entry| entry.question == question).cloned()
        };
        let Some(entry) = entry else {
            return Ok(false);
        };

        self.store
            .replace_messages(vec![
                Message::user(entry.question),
                Message::assistant(entry.answer, entry.references, entry.timestamp),
            ])
            .await?;
        Ok(true)
    }
}

#[async_trait]
impl TurnObserver for HistorySync {
    async fn on_turn_resolved(&self, event: &SessionEvent) {
        let SessionEvent::TurnResolved { codebase_id, .. } = event;
        self.refresh(codebase_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockBackendClient, sample_history};
    use chrono::{TimeZone, Utc};
    use codeask_core::CodeaskError;
    use codeask_core::session::{TurnOutcome, TurnObserver};

    async fn store_with_session() -> Arc<SessionStore> {
        let store = Arc::new(SessionStore::new());
        store.begin_session("abc123").await;
        store
    }

    #[tokio::test]
    async fn refresh_replaces_the_list() {
        let store = store_with_session().await;
        let backend = Arc::new(MockBackendClient::new());
        let sync = HistorySync::new(store, backend);

        assert!(sync.entries().await.is_empty());
        sync.refresh("abc123").await;
        assert_eq!(sync.entries().await.len(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_previous_list() {
        let store = store_with_session().await;
        let backend = Arc::new(MockBackendClient::new());
        let sync = HistorySync::new(store.clone(), backend);
        sync.refresh("abc123").await;

        let failing = Arc::new(MockBackendClient::new().failing_history_with("504"));
        let stale = HistorySync::new(store, failing);
        *stale.entries.write().await = sync.entries().await;

        stale.refresh("abc123").await;
        assert_eq!(stale.entries().await.len(), 2);
    }

    #[tokio::test]
    async fn select_entry_reconstructs_the_turn() {
        let store = store_with_session().await;
        store.append_message(Message::user("live question")).await.unwrap();
        let backend = Arc::new(MockBackendClient::new());
        let sync = HistorySync::new(store.clone(), backend);
        sync.refresh("abc123").await;

        let found = sync.select_entry("Where is auth handled?").await.unwrap();
        assert!(found);

        let messages = store.messages().await;
        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_user());
        assert_eq!(messages[0].content(), "Where is auth handled?");
        assert!(messages[1].is_assistant());
        assert_eq!(messages[1].references().len(), 1);
    }

    #[tokio::test]
    async fn select_entry_misses_leave_the_conversation_untouched() {
        let store = store_with_session().await;
        store.append_message(Message::user("live question")).await.unwrap();
        let backend = Arc::new(MockBackendClient::new());
        let sync = HistorySync::new(store.clone(), backend);
        sync.refresh("abc123").await;

        let found = sync.select_entry("never asked").await.unwrap();
        assert!(!found);
        assert_eq!(store.message_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_questions_replay_the_first_match() {
        let mut history = sample_history();
        history.push(HistoryEntry {
            question: "Where is auth handled?".into(),
            answer: "a newer duplicate".into(),
            references: Vec::new(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 30, 11, 0, 0).unwrap(),
        });
        let store = store_with_session().await;
        let backend = Arc::new(MockBackendClient::new().with_history(history));
        let sync = HistorySync::new(store.clone(), backend);
        sync.refresh("abc123").await;

        assert!(sync.select_entry("Where is auth handled?").await.unwrap());
        let messages = store.messages().await;
        assert_eq!(messages[1].content(), "In src/auth.js");
    }

    #[tokio::test]
    async fn select_entry_without_a_session_propagates_the_precondition() {
        let store = Arc::new(SessionStore::new());
        let backend = Arc::new(MockBackendClient::new());
        let sync = HistorySync::new(store, backend);
        *sync.entries.write().await = sample_history();

        let err = sync.select_entry("Where is auth handled?").await.unwrap_err();
        assert!(matches!(err, CodeaskError::NoActiveSession));
    }

    #[tokio::test]
    async fn refreshes_when_a_turn_resolves() {
        let store = store_with_session().await;
        let backend = Arc::new(MockBackendClient::new());
        let sync = HistorySync::new(store, backend.clone());

        sync.on_turn_resolved(&SessionEvent::TurnResolved {
            codebase_id: "abc123".into(),
            outcome: TurnOutcome::Failed,
        })
        .await;

        assert_eq!(backend.history_calls(), 1);
        assert_eq!(sync.entries().await.len(), 2);
    }
}
