use serde::{Deserialize, Serialize};

/// Request body of `POST /api/task`.
///
/// The orchestrator accepts free-form user input plus an open-ended context
/// object. The chat client always sends an empty context; the field exists so
/// callers embedding the client elsewhere can pass additional routing hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// The user's free-form request text.
    pub user_input: String,

    /// Additional context forwarded to the orchestrator. `{}` when unused.
    pub context: serde_json::Value,
}

impl TaskRequest {
    /// Creates a request with the given input and an empty context.
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            context: serde_json::json!({}),
        }
    }

    /// Replaces the context object.
    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = context;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_with_empty_context() {
        let request = TaskRequest::new("list my files");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_input": "list my files",
                "context": {}
            })
        );
    }

    #[test]
    fn with_context_overrides() {
        let request =
            TaskRequest::new("archive the inbox").with_context(serde_json::json!({"dry_run": true}));
        assert_eq!(request.context["dry_run"], true);
    }
}
