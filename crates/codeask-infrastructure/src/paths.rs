//! Path management for codeask client files.
//!
//! ```text
//! ~/.config/codeask/           # config directory (platform equivalent)
//! ├── config.toml              # client configuration (optional)
//! └── state.json               # persisted session anchor (codebase id)
//! ```

use std::path::PathBuf;

use codeask_core::error::{CodeaskError, Result};

/// Unified path resolution for codeask.
pub struct CodeaskPaths;

impl CodeaskPaths {
    /// The codeask configuration directory (e.g. `~/.config/codeask/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("codeask"))
            .ok_or_else(|| CodeaskError::config("Cannot find config directory"))
    }

    /// The client configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// The persisted client state file.
    pub fn state_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("state.json"))
    }
}
