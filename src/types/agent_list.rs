use serde::{Deserialize, Serialize};

/// Response body of `GET /api/agents`.
///
/// The backend reports the identifiers of the agents currently registered
/// with the orchestrator. A missing or null `agents` field deserializes as
/// an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentList {
    /// Registered agent identifiers, e.g. `"email"` or `"file"`.
    #[serde(default)]
    pub agents: Vec<String>,
}

impl AgentList {
    /// Returns true if no agents are registered.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Returns the number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }
}
