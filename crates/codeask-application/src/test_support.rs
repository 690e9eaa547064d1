//! Hand-written mocks shared by the application test modules.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::watch;

use codeask_core::backend::{AskResponse, BackendClient, ProgressSink};
use codeask_core::error::{CodeaskError, Result};
use codeask_core::health::{ComponentHealth, HealthReport, ServiceStatus};
use codeask_core::history::HistoryEntry;
use codeask_core::session::{Reference, SessionEvent, TurnObserver};
use codeask_core::state::StateRepository;
use codeask_core::upload::ZipCandidate;

pub(crate) fn sample_reference() -> Reference {
    Reference {
        file_path: "src/auth.js".into(),
        line_start: Some(5),
        line_end: Some(20),
        code: "function authenticate(req) {}".into(),
        full_file_url: None,
    }
}

pub(crate) fn sample_history() -> Vec<HistoryEntry> {
    vec![
        HistoryEntry {
            question: "Where is auth handled?".into(),
            answer: "In src/auth.js".into(),
            references: vec![sample_reference()],
            timestamp: Utc.with_ymd_and_hms(2026, 8, 30, 10, 0, 0).unwrap(),
        },
        HistoryEntry {
            question: "How does routing work?".into(),
            answer: "Via the express router".into(),
            references: Vec::new(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 29, 9, 0, 0).unwrap(),
        },
    ]
}

/// Configurable in-memory [`BackendClient`].
///
/// Calls can be gated: with gating enabled, uploads and asks block until the
/// test releases them, so overlap scenarios are deterministic.
pub(crate) struct MockBackendClient {
    codebase_id: String,
    ask_result: Mutex<Result<AskResponse>>,
    upload_error: Mutex<Option<CodeaskError>>,
    history_result: Mutex<Result<Vec<HistoryEntry>>>,
    gated: bool,
    started_tx: watch::Sender<usize>,
    release_tx: watch::Sender<bool>,
    upload_calls: AtomicUsize,
    ask_calls: AtomicUsize,
    history_calls: AtomicUsize,
}

impl MockBackendClient {
    pub(crate) fn new() -> Self {
        Self {
            codebase_id: "abc123".into(),
            ask_result: Mutex::new(Ok(AskResponse {
                answer: "In src/auth.js".into(),
                references: vec![sample_reference()],
            })),
            upload_error: Mutex::new(None),
            history_result: Mutex::new(Ok(sample_history())),
            gated: false,
            started_tx: watch::channel(0).0,
            release_tx: watch::channel(false).0,
            upload_calls: AtomicUsize::new(0),
            ask_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_ask_response(self, response: AskResponse) -> Self {
        *self.ask_result.lock().unwrap() = Ok(response);
        self
    }

    pub(crate) fn failing_asks_with(self, message: &str) -> Self {
        *self.ask_result.lock().unwrap() = Err(CodeaskError::submission(message));
        self
    }

    pub(crate) fn failing_uploads_with(self, message: &str) -> Self {
        *self.upload_error.lock().unwrap() = Some(CodeaskError::submission(message));
        self
    }

    pub(crate) fn with_history(self, history: Vec<HistoryEntry>) -> Self {
        *self.history_result.lock().unwrap() = Ok(history);
        self
    }

    pub(crate) fn failing_history_with(self, message: &str) -> Self {
        *self.history_result.lock().unwrap() = Err(CodeaskError::history_fetch(message));
        self
    }

    pub(crate) fn with_gated_uploads(mut self) -> Self {
        self.gated = true;
        self
    }

    pub(crate) fn with_gated_asks(mut self) -> Self {
        self.gated = true;
        self
    }

    /// Waits until a gated call has started.
    pub(crate) async fn wait_for_upload_started(&self) {
        self.wait_for_call_started().await;
    }

    pub(crate) async fn wait_for_ask_started(&self) {
        self.wait_for_call_started().await;
    }

    async fn wait_for_call_started(&self) {
        let mut rx = self.started_tx.subscribe();
        rx.wait_for(|started| *started > 0).await.ok();
    }

    /// Unblocks every gated call, current and future.
    pub(crate) fn release_uploads(&self) {
        self.release_tx.send_replace(true);
    }

    pub(crate) fn release_asks(&self) {
        self.release_tx.send_replace(true);
    }

    async fn maybe_block(&self) {
        if !self.gated {
            return;
        }
        self.started_tx.send_modify(|started| *started += 1);
        let mut rx = self.release_tx.subscribe();
        rx.wait_for(|released| *released).await.ok();
    }

    pub(crate) fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn ask_calls(&self) -> usize {
        self.ask_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendClient for MockBackendClient {
    async fn upload_archive(
        &self,
        _archive: &ZipCandidate,
        progress: Option<ProgressSink>,
    ) -> Result<String> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_block().await;
        if let Some(err) = self.upload_error.lock().unwrap().clone() {
            return Err(err);
        }
        if let Some(sink) = progress {
            for percent in [12, 48, 100] {
                sink(percent);
            }
        }
        Ok(self.codebase_id.clone())
    }

    async fn upload_github(&self, _repo_url: &str) -> Result<String> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_block().await;
        if let Some(err) = self.upload_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.codebase_id.clone())
    }

    async fn ask(&self, _codebase_id: &str, _question: &str) -> Result<AskResponse> {
        self.ask_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_block().await;
        self.ask_result.lock().unwrap().clone()
    }

    async fn fetch_history(&self, _codebase_id: &str) -> Result<Vec<HistoryEntry>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.history_result.lock().unwrap().clone()
    }

    async fn check_health(&self) -> HealthReport {
        HealthReport {
            backend: ComponentHealth {
                status: ServiceStatus::Online,
                message: None,
            },
            database: ComponentHealth {
                status: ServiceStatus::Connected,
                message: None,
            },
            llm: ComponentHealth {
                status: ServiceStatus::Available,
                message: None,
            },
        }
    }
}

/// In-memory [`StateRepository`].
pub(crate) struct MockStateRepository {
    active: Mutex<Option<String>>,
}

impl MockStateRepository {
    pub(crate) fn new() -> Self {
        Self {
            active: Mutex::new(None),
        }
    }

    pub(crate) fn with_active(codebase_id: &str) -> Self {
        Self {
            active: Mutex::new(Some(codebase_id.to_string())),
        }
    }
}

#[async_trait]
impl StateRepository for MockStateRepository {
    async fn get_active_codebase(&self) -> Option<String> {
        self.active.lock().unwrap().clone()
    }

    async fn set_active_codebase(&self, codebase_id: String) -> Result<()> {
        *self.active.lock().unwrap() = Some(codebase_id);
        Ok(())
    }

    async fn clear_active_codebase(&self) -> Result<()> {
        *self.active.lock().unwrap() = None;
        Ok(())
    }
}

/// Records every event it receives.
pub(crate) struct RecordingObserver {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingObserver {
    pub(crate) fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl TurnObserver for RecordingObserver {
    async fn on_turn_resolved(&self, event: &SessionEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
