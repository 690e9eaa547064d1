//! Backend health report model.
//!
//! Consumed read-only by the status display; the client only models the
//! payload and the degraded fallback used when the backend is unreachable.

use serde::{Deserialize, Serialize};

/// Status descriptor for one service component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Checking,
    Online,
    Connected,
    Available,
    Error,
    Unknown,
}

impl ServiceStatus {
    /// True for any of the healthy states a component may report.
    pub fn is_operational(&self) -> bool {
        matches!(self, Self::Online | Self::Connected | Self::Available)
    }
}

/// Health of a single component, with an optional human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: ServiceStatus,
    #[serde(default)]
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn new(status: ServiceStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
        }
    }
}

/// Aggregate health report from `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub backend: ComponentHealth,
    pub database: ComponentHealth,
    pub llm: ComponentHealth,
}

impl HealthReport {
    /// The degraded report shown when the health endpoint cannot be reached.
    pub fn unreachable() -> Self {
        Self {
            backend: ComponentHealth::new(ServiceStatus::Error, "Backend unreachable"),
            database: ComponentHealth::new(ServiceStatus::Unknown, "Cannot check"),
            llm: ComponentHealth::new(ServiceStatus::Unknown, "Cannot check"),
        }
    }
}
