//! Persisted client state interface.

use async_trait::async_trait;

use crate::error::Result;

/// Durable client-local storage for the active codebase id.
///
/// The codebase id is the session anchor and survives reloads; the live
/// message list does not. Implementations decide the storage mechanism
/// (a JSON state file in the default setup).
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// The persisted active codebase id, if any.
    async fn get_active_codebase(&self) -> Option<String>;

    /// Persists the active codebase id.
    async fn set_active_codebase(&self, codebase_id: String) -> Result<()>;

    /// Clears the persisted codebase id (new-upload flow).
    async fn clear_active_codebase(&self) -> Result<()>;
}
