use serde::{Deserialize, Serialize};

/// The orchestrator's analysis of a submitted task.
///
/// Both fields are optional: older backends omit the whole object, and the
/// router may decline to classify a request it passed through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUnderstanding {
    /// Classified task category, e.g. `"file"` or `"email"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,

    /// Identifier of the agent the task was routed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_agent: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full() {
        let understanding: TaskUnderstanding = serde_json::from_value(serde_json::json!({
            "task_type": "file",
            "selected_agent": "file"
        }))
        .unwrap();
        assert_eq!(understanding.task_type.as_deref(), Some("file"));
        assert_eq!(understanding.selected_agent.as_deref(), Some("file"));
    }

    #[test]
    fn deserialize_partial() {
        let understanding: TaskUnderstanding =
            serde_json::from_value(serde_json::json!({"task_type": "data"})).unwrap();
        assert_eq!(understanding.task_type.as_deref(), Some("data"));
        assert!(understanding.selected_agent.is_none());
    }
}
