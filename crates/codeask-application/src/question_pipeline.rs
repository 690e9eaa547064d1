//! Question submission lifecycle.
//!
//! One `submit` call is one turn:
//!
//! 1. guard (blank input or pending turn is a silent no-op)
//! 2. optimistic append of the user message, before any network I/O
//! 3. pending flag up
//! 4. exactly one terminal message (assistant answer or error), then the
//!    pending flag drops
//! 5. `TurnResolved` published to subscribers, success or failure
//!
//! Failures are terminal for the turn, never retried: retrying LLM calls
//! silently risks duplicate cost server-side. The user resubmits manually.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use codeask_core::backend::BackendClient;
use codeask_core::error::Result;
use codeask_core::session::{Message, SessionEvent, SessionStore, TurnObserver, TurnOutcome};

/// Drives the lifecycle of submitting one question against the session store.
pub struct QuestionPipeline {
    store: Arc<SessionStore>,
    backend: Arc<dyn BackendClient>,
    pending: AtomicBool,
    observers: RwLock<Vec<Arc<dyn TurnObserver>>>,
}

impl QuestionPipeline {
    pub fn new(store: Arc<SessionStore>, backend: Arc<dyn BackendClient>) -> Self {
        Self {
            store,
            backend,
            pending: AtomicBool::new(false),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Registers a subscriber for turn resolution events.
    pub async fn subscribe(&self, observer: Arc<dyn TurnObserver>) {
        self.observers.write().await.push(observer);
    }

    /// Whether a submission is awaiting its answer. The rendering layer uses
    /// this for the progress indicator and to disable the input.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Submits one question.
    ///
    /// Blank input and submit-while-pending are idempotent no-ops, not
    /// errors. The only error here is the `NoActiveSession` precondition;
    /// backend failures resolve into the conversation as error messages.
    pub async fn submit(&self, question: &str) -> Result<()> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(());
        }
        if self.pending.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let turn = self.run_turn(question).await;
        // the flag drops only once the terminal message exists, so there is
        // never a window with no pending indicator and no answer
        self.pending.store(false, Ordering::SeqCst);

        match turn {
            Ok(Some(event)) => {
                self.notify(&event).await;
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Runs one turn to resolution. Returns the event to publish, or `None`
    /// when the session changed mid-flight and the result was dropped.
    async fn run_turn(&self, question: &str) -> Result<Option<SessionEvent>> {
        let codebase_id = self
            .store
            .current_codebase_id()
            .await
            .ok_or(codeask_core::CodeaskError::NoActiveSession)?;

        self.store.append_message(Message::user(question)).await?;

        let (terminal, outcome) = match self.backend.ask(&codebase_id, question).await {
            Ok(response) => (
                Message::assistant(response.answer, response.references, Utc::now()),
                TurnOutcome::Answered,
            ),
            Err(err) => {
                tracing::warn!(error = %err, "question failed");
                (Message::error(err.conversation_message()), TurnOutcome::Failed)
            }
        };

        // a reset (new upload) while the request was in flight abandons the
        // turn; a late answer for the old codebase must not leak in
        if self.store.current_codebase_id().await.as_deref() != Some(codebase_id.as_str()) {
            tracing::debug!(%codebase_id, "session changed mid-flight, dropping resolution");
            return Ok(None);
        }

        self.store.append_message(terminal).await?;
        Ok(Some(SessionEvent::TurnResolved {
            codebase_id,
            outcome,
        }))
    }

    async fn notify(&self, event: &SessionEvent) {
        let observers = self.observers.read().await.clone();
        for observer in observers {
            observer.on_turn_resolved(event).await;
        }
    }
}
