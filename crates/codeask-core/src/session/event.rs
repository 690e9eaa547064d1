//! Session lifecycle events.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The backend returned an answer.
    Answered,
    /// The turn closed with an error message.
    Failed,
}

/// High-level events published by the question pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A submitted question resolved to its terminal message. Fired on both
    /// success and failure; history reflects only server-committed turns, so
    /// subscribers refresh either way.
    TurnResolved {
        codebase_id: String,
        outcome: TurnOutcome,
    },
}

/// Subscriber interface for turn resolution.
///
/// Keeps the pipeline testable in isolation: history refresh is a named
/// subscription, not an inline call.
#[async_trait]
pub trait TurnObserver: Send + Sync {
    async fn on_turn_resolved(&self, event: &SessionEvent);
}
