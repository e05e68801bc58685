use serde::{Deserialize, Serialize};

/// The literal status string the backend reports when it is ready to accept
/// tasks. Any other value counts as unhealthy.
pub const HEALTHY: &str = "healthy";

/// Response body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Reported status string, `"healthy"` when the orchestrator is up.
    pub status: String,
}

impl HealthStatus {
    /// Returns true iff the backend reported the healthy status literal.
    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }
}
