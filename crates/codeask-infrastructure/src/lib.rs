//! Infrastructure implementations for the codeask client: the reqwest
//! backend client, file-backed persisted state, the system clipboard, and
//! configuration loading.

pub mod clipboard;
pub mod config;
pub mod http_backend;
pub mod json_state_repository;
pub mod paths;

pub use crate::clipboard::SystemClipboard;
pub use crate::config::ClientConfig;
pub use crate::http_backend::HttpBackendClient;
pub use crate::json_state_repository::JsonStateRepository;
