//! Backend client interface.
//!
//! The Q&A backend is an external collaborator; this trait pins down the
//! request/response contract the rest of the client is written against. The
//! HTTP implementation lives in the infrastructure crate.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::health::HealthReport;
use crate::history::HistoryEntry;
use crate::session::Reference;
use crate::upload::ZipCandidate;

/// Observer for fractional upload transfer progress.
///
/// Called with monotonically non-decreasing percentages in `0..=100`. A side
/// channel, not part of any return value.
pub type ProgressSink = Arc<dyn Fn(u8) + Send + Sync>;

/// Answer payload from `POST /api/qa/ask`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// Interface to the codebase Q&A backend.
///
/// # Errors
///
/// Methods surface backend rejection and unreachability as
/// `CodeaskError::Submission` (or `HistoryFetch` for the history endpoint),
/// carrying the server-provided message when present and a generic fallback
/// otherwise. All calls are bounded by the client-side timeout.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Streams a zip archive for ingestion, reporting transfer progress
    /// through `progress` when provided. Returns the new codebase id.
    async fn upload_archive(
        &self,
        archive: &ZipCandidate,
        progress: Option<ProgressSink>,
    ) -> Result<String>;

    /// Submits a repository URL for server-side cloning and ingestion.
    /// Returns the new codebase id.
    async fn upload_github(&self, repo_url: &str) -> Result<String>;

    /// Asks one question against an ingested codebase.
    async fn ask(&self, codebase_id: &str, question: &str) -> Result<AskResponse>;

    /// Fetches the server-persisted question history for a codebase.
    async fn fetch_history(&self, codebase_id: &str) -> Result<Vec<HistoryEntry>>;

    /// Probes backend health. Infallible: an unreachable backend yields the
    /// degraded [`HealthReport::unreachable`] report.
    async fn check_health(&self) -> HealthReport;
}
