//! Use cases for the codeask client: upload gating, the question pipeline,
//! history reconciliation, and the session facade that wires them together.

pub mod history_sync;
pub mod question_pipeline;
pub mod session_service;
pub mod upload_gate;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::history_sync::HistorySync;
pub use crate::question_pipeline::QuestionPipeline;
pub use crate::session_service::QaSessionService;
pub use crate::upload_gate::UploadGate;
