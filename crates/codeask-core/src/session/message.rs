//! Conversation message types.
//!
//! A live conversation is an ordered list of messages. Every submitted
//! question appends a user message and resolves to exactly one terminal
//! message, either an assistant answer or an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reference::Reference;

/// A single message in a live conversation, tagged by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// Question as submitted by the user (already trimmed).
    User { content: String },
    /// Answer from the backend, with supporting code references.
    #[serde(rename_all = "camelCase")]
    Assistant {
        content: String,
        #[serde(default)]
        references: Vec<Reference>,
        /// Client receipt time. The backend does not guarantee a timestamp,
        /// so this is when the answer arrived, not when it was computed.
        answered_at: DateTime<Utc>,
    },
    /// Terminal failure for one turn. The conversation continues.
    Error { content: String },
}

impl Message {
    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(
        content: impl Into<String>,
        references: Vec<Reference>,
        answered_at: DateTime<Utc>,
    ) -> Self {
        Self::Assistant {
            content: content.into(),
            references,
            answered_at,
        }
    }

    /// Creates an error message.
    pub fn error(content: impl Into<String>) -> Self {
        Self::Error {
            content: content.into(),
        }
    }

    /// The display text of the message, regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Self::User { content } | Self::Assistant { content, .. } | Self::Error { content } => {
                content
            }
        }
    }

    /// References attached to the message (empty for non-assistant roles).
    pub fn references(&self) -> &[Reference] {
        match self {
            Self::Assistant { references, .. } => references,
            _ => &[],
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Self::User { .. })
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// True for the messages that may close a turn.
    pub fn is_terminal(&self) -> bool {
        self.is_assistant() || self.is_error()
    }
}
