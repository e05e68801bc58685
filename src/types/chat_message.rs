use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::task_annotations::TaskAnnotations;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The human operating the chat.
    User,
    /// The orchestrator's reply (including error placeholders).
    Assistant,
}

/// Body of a transcript entry. Agents usually answer with plain text, but
/// structured results are kept structured so exports stay faithful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content.
    Text(String),
    /// Structured (non-string) content.
    Structured(serde_json::Value),
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<serde_json::Value> for MessageContent {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => MessageContent::Text(text),
            other => MessageContent::Structured(other),
        }
    }
}

/// One entry of the in-memory transcript.
///
/// Entries are append-only: nothing mutates or removes a message short of a
/// full transcript clear. Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message author.
    pub role: ChatRole,

    /// Message body.
    pub content: MessageContent,

    /// Router annotations, present only on assistant replies that carried
    /// task-understanding data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskAnnotations>,

    /// When the entry was appended, RFC 3339.
    #[serde(with = "crate::utils::time")]
    pub timestamp: OffsetDateTime,

    /// True for assistant entries that report a send failure.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatMessage {
    /// Creates a user entry timestamped now.
    pub fn user(content: impl Into<MessageContent>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            task: None,
            timestamp: crate::utils::time::now(),
            is_error: false,
        }
    }

    /// Creates an assistant entry timestamped now.
    pub fn assistant(content: impl Into<MessageContent>, task: Option<TaskAnnotations>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            task,
            timestamp: crate::utils::time::now(),
            is_error: false,
        }
    }

    /// Creates an error-flagged assistant entry timestamped now.
    pub fn error(content: impl Into<MessageContent>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            task: None,
            timestamp: crate::utils::time::now(),
            is_error: true,
        }
    }
}
