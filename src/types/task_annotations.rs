use serde::{Deserialize, Serialize};

use crate::types::task_response::TaskResponse;

/// Annotations attached to an assistant transcript entry, distilled from a
/// [`TaskResponse`]. These drive the badge row under the message body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAnnotations {
    /// Classified task category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,

    /// Identifier of the agent that handled the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_agent: Option<String>,

    /// Number of subtasks the request was decomposed into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks_count: Option<u64>,
}

impl TaskAnnotations {
    /// Extracts annotations from a task response. Returns `None` when the
    /// response carries nothing worth annotating.
    pub fn from_response(response: &TaskResponse) -> Option<Self> {
        let understanding = response.task_understanding.as_ref();
        let annotations = Self {
            task_type: understanding.and_then(|u| u.task_type.clone()),
            selected_agent: understanding.and_then(|u| u.selected_agent.clone()),
            subtasks_count: response.subtasks_count,
        };
        if annotations == Self::default() {
            None
        } else {
            Some(annotations)
        }
    }
}
