//! Upload validation and submission.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use codeask_core::backend::{BackendClient, ProgressSink};
use codeask_core::error::{CodeaskError, Result};
use codeask_core::state::StateRepository;
use codeask_core::upload::{self, UploadCandidate};

/// Validates a candidate codebase source and drives its submission.
///
/// Exactly one submission may be in flight at a time; a second attempt while
/// one is pending is rejected with `UploadInFlight`. On success the returned
/// codebase id has already been persisted as the session anchor.
pub struct UploadGate {
    backend: Arc<dyn BackendClient>,
    state_repository: Arc<dyn StateRepository>,
    progress: Option<ProgressSink>,
    in_flight: AtomicBool,
}

impl UploadGate {
    pub fn new(backend: Arc<dyn BackendClient>, state_repository: Arc<dyn StateRepository>) -> Self {
        Self {
            backend,
            state_repository,
            progress: None,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Registers an observer for archive transfer progress.
    pub fn with_progress_sink(mut self, sink: ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Validates and submits a candidate, returning the new codebase id.
    ///
    /// Validation failures never reach the network and do not consume the
    /// in-flight slot.
    ///
    /// # Errors
    ///
    /// - validation: `FileTooLarge`, `InvalidFileType`, `InvalidRepositoryUrl`
    /// - `UploadInFlight` when another submission is pending
    /// - `Submission` on backend rejection or unreachability
    pub async fn submit(&self, candidate: UploadCandidate) -> Result<String> {
        let validated = upload::validate(candidate)?;
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(CodeaskError::UploadInFlight);
        }
        let result = self.submit_validated(validated.into_inner()).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn submit_validated(&self, candidate: UploadCandidate) -> Result<String> {
        let codebase_id = match candidate {
            UploadCandidate::Zip(archive) => {
                tracing::info!(
                    file_name = %archive.file_name,
                    size_bytes = archive.size_bytes(),
                    "uploading archive"
                );
                self.backend
                    .upload_archive(&archive, self.progress.clone())
                    .await?
            }
            UploadCandidate::Github(repo) => {
                tracing::info!(url = %repo.url, "submitting repository for cloning");
                self.backend.upload_github(&repo.url).await?
            }
        };
        self.state_repository
            .set_active_codebase(codebase_id.clone())
            .await?;
        tracing::info!(%codebase_id, "codebase ready");
        Ok(codebase_id)
    }
}
