use serde::{Deserialize, Serialize};

/// Response body of `GET /api/memory/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Number of entries in the orchestrator's memory store. Defaults to 0
    /// when the backend omits the field.
    #[serde(default)]
    pub total_memories: u64,
}
