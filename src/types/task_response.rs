use serde::{Deserialize, Serialize};

use crate::types::task_understanding::TaskUnderstanding;

/// Response body of `POST /api/task`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// The agent's result. Usually a string, but agents that produce
    /// structured output (tables, file listings) return an object.
    #[serde(default)]
    pub result: serde_json::Value,

    /// The router's classification of the task, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_understanding: Option<TaskUnderstanding>,

    /// Number of subtasks the orchestrator decomposed the request into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_string_result() {
        let response: TaskResponse = serde_json::from_value(serde_json::json!({
            "result": "Done",
            "task_understanding": {
                "task_type": "file",
                "selected_agent": "file"
            },
            "subtasks_count": 2
        }))
        .unwrap();
        assert_eq!(response.result, serde_json::json!("Done"));
        assert_eq!(response.subtasks_count, Some(2));
        let understanding = response.task_understanding.unwrap();
        assert_eq!(understanding.task_type.as_deref(), Some("file"));
    }

    #[test]
    fn deserialize_structured_result() {
        let response: TaskResponse = serde_json::from_value(serde_json::json!({
            "result": {"files_moved": 12, "space_freed_mb": 340}
        }))
        .unwrap();
        assert!(response.result.is_object());
        assert!(response.task_understanding.is_none());
        assert!(response.subtasks_count.is_none());
    }

    #[test]
    fn deserialize_empty_body() {
        let response: TaskResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.result.is_null());
    }
}
