//! Server-persisted question history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Reference;

/// The durable, server-persisted projection of one completed turn.
///
/// Live `Message` pairs are the ephemeral projection of the same concept.
/// `question` doubles as the (non-unique) lookup key when a historical turn
/// is replayed into the live conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub references: Vec<Reference>,
    pub timestamp: DateTime<Utc>,
}
