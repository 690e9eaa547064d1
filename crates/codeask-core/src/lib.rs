//! Core domain for the codeask client: conversation state, the backend
//! contract, upload validation, and the rendering contract for code
//! references. This crate performs no I/O; implementations of its traits
//! live in `codeask-infrastructure`.

pub mod backend;
pub mod display;
pub mod error;
pub mod health;
pub mod history;
pub mod session;
pub mod snippet;
pub mod state;
pub mod upload;

// Re-export common error type
pub use error::CodeaskError;
