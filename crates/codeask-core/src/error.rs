//! Error types for the codeask client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generic fallback when the backend is unreachable or times out.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
/// Generic fallback when the backend responds with an error body that carries
/// no usable message.
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
/// Generic fallback for a failed upload.
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload file. Please try again.";
/// Generic fallback for a failed question.
pub const ANSWER_FAILED_MESSAGE: &str = "Failed to get answer";

/// A shared error type for the codeask client.
///
/// Variants fall into three groups with different propagation policies:
///
/// - Validation errors (`FileTooLarge`, `InvalidFileType`,
///   `InvalidRepositoryUrl`) are detected client-side and never reach the
///   network layer.
/// - Submission errors (`Submission`, `UploadInFlight`) surface backend or
///   network failures during an upload or a question.
/// - `HistoryFetch` is soft: it is logged and swallowed, never shown.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CodeaskError {
    /// Archive exceeds the upload size limit.
    #[error("File size exceeds 7MB limit")]
    FileTooLarge { size_bytes: u64 },

    /// Archive MIME type is not an accepted zip type.
    #[error("Only .zip files are allowed")]
    InvalidFileType { mime_type: String },

    /// Repository URL does not match the accepted GitHub pattern.
    #[error("Invalid GitHub URL format")]
    InvalidRepositoryUrl { url: String },

    /// A second upload was attempted while one is still in flight.
    #[error("An upload is already in progress")]
    UploadInFlight,

    /// Backend or network failure during upload or question submission.
    #[error("{message}")]
    Submission { message: String },

    /// History refresh failure. Advisory only, callers log and keep the
    /// previous list.
    #[error("Failed to load history: {message}")]
    HistoryFetch { message: String },

    /// A Q&A operation was attempted without an active codebase. The caller
    /// is expected to redirect to the upload surface.
    #[error("No active codebase session")]
    NoActiveSession,

    /// Platform clipboard failure.
    #[error("Clipboard error: {message}")]
    Clipboard { message: String },

    /// IO error (state file operations).
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error.
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CodeaskError {
    /// Creates a Submission error.
    pub fn submission(message: impl Into<String>) -> Self {
        Self::Submission {
            message: message.into(),
        }
    }

    /// Creates a HistoryFetch error.
    pub fn history_fetch(message: impl Into<String>) -> Self {
        Self::HistoryFetch {
            message: message.into(),
        }
    }

    /// Creates a Clipboard error.
    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard {
            message: message.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error was detected client-side, before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::FileTooLarge { .. }
                | Self::InvalidFileType { .. }
                | Self::InvalidRepositoryUrl { .. }
        )
    }

    /// Check if this is a submission (network/backend) error.
    pub fn is_submission(&self) -> bool {
        matches!(self, Self::Submission { .. })
    }

    /// Check if this error is advisory and safe to swallow after logging.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::HistoryFetch { .. })
    }

    /// The text to surface in a conversation when a question fails.
    ///
    /// Submission errors already carry the server-provided (or fallback)
    /// message; anything else degrades to the generic answer failure text.
    pub fn conversation_message(&self) -> String {
        match self {
            Self::Submission { message } => message.clone(),
            _ => ANSWER_FAILED_MESSAGE.to_string(),
        }
    }
}

impl From<std::io::Error> for CodeaskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CodeaskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CodeaskError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CodeaskError>`.
pub type Result<T> = std::result::Result<T, CodeaskError>;
