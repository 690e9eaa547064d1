//! Session lifecycle orchestration.

use std::sync::Arc;

use codeask_core::backend::{BackendClient, ProgressSink};
use codeask_core::error::{CodeaskError, Result};
use codeask_core::health::HealthReport;
use codeask_core::session::SessionStore;
use codeask_core::state::StateRepository;
use codeask_core::upload::UploadCandidate;
use codeask_infrastructure::{ClientConfig, HttpBackendClient, JsonStateRepository};

use crate::history_sync::HistorySync;
use crate::question_pipeline::QuestionPipeline;
use crate::upload_gate::UploadGate;

/// Facade wiring the upload and Q&A surfaces to one session.
///
/// Owns the store, the pipeline with its history subscription, and the
/// upload gate. The session anchor (codebase id) is durable; the live
/// conversation is not and dies with this value.
pub struct QaSessionService {
    store: Arc<SessionStore>,
    backend: Arc<dyn BackendClient>,
    state_repository: Arc<dyn StateRepository>,
    pipeline: Arc<QuestionPipeline>,
    history: Arc<HistorySync>,
    upload_gate: Arc<UploadGate>,
}

impl QaSessionService {
    pub async fn new(
        backend: Arc<dyn BackendClient>,
        state_repository: Arc<dyn StateRepository>,
    ) -> Self {
        let store = Arc::new(SessionStore::new());
        let pipeline = Arc::new(QuestionPipeline::new(store.clone(), backend.clone()));
        let history = Arc::new(HistorySync::new(store.clone(), backend.clone()));
        pipeline.subscribe(history.clone()).await;
        let upload_gate = Arc::new(UploadGate::new(backend.clone(), state_repository.clone()));
        Self {
            store,
            backend,
            state_repository,
            pipeline,
            history,
            upload_gate,
        }
    }

    /// Builds the default production wiring: configuration from
    /// `config.toml`/environment, the HTTP backend client, and the JSON
    /// state file.
    pub async fn from_environment() -> Result<Self> {
        let config = ClientConfig::load()?;
        let backend = Arc::new(HttpBackendClient::new(&config)?);
        let state_repository = Arc::new(JsonStateRepository::new().await?);
        Ok(Self::new(backend, state_repository).await)
    }

    /// Routes archive transfer progress to `sink`.
    pub fn with_upload_progress(mut self, sink: ProgressSink) -> Self {
        self.upload_gate = Arc::new(
            UploadGate::new(self.backend.clone(), self.state_repository.clone())
                .with_progress_sink(sink),
        );
        self
    }

    /// Enters the Q&A surface: restores the persisted codebase id, anchors a
    /// fresh session to it and loads its history.
    ///
    /// # Errors
    ///
    /// `NoActiveSession` when no codebase id is persisted; the caller
    /// redirects to the upload surface.
    pub async fn enter(&self) -> Result<String> {
        let codebase_id = self
            .state_repository
            .get_active_codebase()
            .await
            .ok_or(CodeaskError::NoActiveSession)?;
        self.store.begin_session(codebase_id.clone()).await;
        self.history.refresh(&codebase_id).await;
        Ok(codebase_id)
    }

    /// Validates and submits a candidate codebase, then anchors the session
    /// to the resulting id.
    pub async fn upload(&self, candidate: UploadCandidate) -> Result<String> {
        let codebase_id = self.upload_gate.submit(candidate).await?;
        self.store.begin_session(codebase_id.clone()).await;
        Ok(codebase_id)
    }

    /// Submits one question against the active session.
    pub async fn ask(&self, question: &str) -> Result<()> {
        self.pipeline.submit(question).await
    }

    /// Abandons the session for a new upload: the conversation is discarded
    /// and the persisted anchor cleared.
    pub async fn start_new_upload(&self) -> Result<()> {
        self.store.reset().await;
        self.state_repository.clear_active_codebase().await
    }

    pub async fn check_health(&self) -> HealthReport {
        self.backend.check_health().await
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn history(&self) -> &Arc<HistorySync> {
        &self.history
    }

    pub fn pipeline(&self) -> &Arc<QuestionPipeline> {
        &self.pipeline
    }
}
