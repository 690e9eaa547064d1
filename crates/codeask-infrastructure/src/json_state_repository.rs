//! File-backed persisted client state.
//!
//! The active codebase id survives client restarts; it is the anchor that
//! lets the Q&A surface reopen without re-uploading. State is a single JSON
//! document cached in memory and rewritten on every change.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use codeask_core::error::Result;
use codeask_core::state::StateRepository;

use crate::paths::CodeaskPaths;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    active_codebase_id: Option<String>,
}

/// JSON-file [`StateRepository`] with an in-memory cache.
pub struct JsonStateRepository {
    path: PathBuf,
    state: Mutex<PersistedState>,
}

impl JsonStateRepository {
    /// Opens the default state file under the codeask config directory.
    pub async fn new() -> Result<Self> {
        Self::with_path(CodeaskPaths::state_file()?).await
    }

    /// Opens a state file at an explicit path (used by tests).
    ///
    /// A missing file starts empty; an unreadable or corrupt file is treated
    /// as empty after a warning, so a damaged state file can never lock the
    /// user out of the upload flow.
    pub async fn with_path(path: PathBuf) -> Result<Self> {
        let state = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "corrupt state file, starting empty");
                PersistedState::default()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => PersistedState::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    async fn persist(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(state)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

#[async_trait]
impl StateRepository for JsonStateRepository {
    async fn get_active_codebase(&self) -> Option<String> {
        self.state.lock().await.active_codebase_id.clone()
    }

    async fn set_active_codebase(&self, codebase_id: String) -> Result<()> {
        let mut state = self.state.lock().await;
        state.active_codebase_id = Some(codebase_id);
        self.persist(&state).await
    }

    async fn clear_active_codebase(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.active_codebase_id = None;
        self.persist(&state).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonStateRepository::with_path(dir.path().join("state.json"))
            .await
            .unwrap();
        assert_eq!(repository.get_active_codebase().await, None);
    }

    #[tokio::test]
    async fn set_and_clear_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let repository = JsonStateRepository::with_path(path.clone()).await.unwrap();
        repository
            .set_active_codebase("abc123".to_string())
            .await
            .unwrap();

        // a fresh repository sees the persisted id
        let reloaded = JsonStateRepository::with_path(path.clone()).await.unwrap();
        assert_eq!(reloaded.get_active_codebase().await.as_deref(), Some("abc123"));

        reloaded.clear_active_codebase().await.unwrap();
        let reloaded = JsonStateRepository::with_path(path).await.unwrap();
        assert_eq!(reloaded.get_active_codebase().await, None);
    }

    #[tokio::test]
    async fn corrupt_state_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let repository = JsonStateRepository::with_path(path).await.unwrap();
        assert_eq!(repository.get_active_codebase().await, None);
    }

    #[tokio::test]
    async fn creates_parent_directories_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let repository = JsonStateRepository::with_path(path.clone()).await.unwrap();
        repository
            .set_active_codebase("abc123".to_string())
            .await
            .unwrap();
        assert!(path.exists());
    }
}
