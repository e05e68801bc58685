//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the transcript
//! and runs the send pipeline against the orchestrator.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde_json::to_writer_pretty;
use tokio::sync::watch;

use crate::client::Deskmate;
use crate::error::{Error, Result};
use crate::observability::{CHAT_SEND_ERRORS, CHAT_SENDS, CHAT_SENDS_BLOCKED};
use crate::poll::StatusSnapshot;
use crate::render::Renderer;
use crate::types::{ChatMessage, MessageContent, TaskAnnotations, TaskRequest};
use crate::utils::time::date_stamp;

/// How a call to [`ChatSession::send`] concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty or whitespace-only; nothing happened.
    Empty,
    /// The client is disconnected; a warning was rendered and no network
    /// call was made.
    Blocked,
    /// The backend answered and an assistant entry was appended.
    Answered,
    /// The request failed; an error-flagged assistant entry was appended.
    Failed,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Number of transcript entries.
    pub message_count: usize,
    /// Latest connectivity/store snapshot from the poller.
    pub status: StatusSnapshot,
}

/// A chat session owning the transcript and a live view of backend status.
///
/// The transcript is append-only and lives for the session; only
/// [`ChatSession::clear`] empties it. Connectivity gates the send pipeline:
/// the flag is read here but mutated only by the poller.
pub struct ChatSession {
    client: Deskmate,
    transcript: Vec<ChatMessage>,
    status: watch::Receiver<StatusSnapshot>,
}

impl ChatSession {
    /// Creates a new session over a client and a poller subscription.
    pub fn new(client: Deskmate, status: watch::Receiver<StatusSnapshot>) -> Self {
        Self {
            client,
            transcript: Vec::new(),
            status,
        }
    }

    /// Returns true if the last applied health probe reported healthy.
    pub fn is_connected(&self) -> bool {
        self.status.borrow().connected
    }

    /// Sends user input through the task pipeline.
    ///
    /// The pipeline:
    /// 1. trims the input; empty input is a silent no-op
    /// 2. refuses with a rendered warning when disconnected
    /// 3. appends the user message optimistically and shows the thinking
    ///    indicator
    /// 4. posts to the task endpoint; the reply (or the error text) lands
    ///    as exactly one assistant entry
    ///
    /// The thinking indicator is cleared on both paths. Send failures are
    /// absorbed into the transcript rather than returned; the outcome tells
    /// the caller which path was taken.
    pub async fn send(&mut self, input: &str, renderer: &mut dyn Renderer) -> SendOutcome {
        let input = input.trim();
        if input.is_empty() {
            return SendOutcome::Empty;
        }

        if !self.is_connected() {
            CHAT_SENDS_BLOCKED.click();
            renderer.print_warning(
                "Not connected to the backend. Check that the orchestrator is running.",
            );
            return SendOutcome::Blocked;
        }

        CHAT_SENDS.click();
        let user_message = ChatMessage::user(input);
        renderer.print_message(&user_message);
        self.transcript.push(user_message);

        renderer.print_thinking();
        match self.client.submit_task(TaskRequest::new(input)).await {
            Ok(response) => {
                renderer.clear_thinking();
                let task = TaskAnnotations::from_response(&response);
                let reply =
                    ChatMessage::assistant(MessageContent::from(response.result.clone()), task);
                renderer.print_message(&reply);
                self.transcript.push(reply);
                SendOutcome::Answered
            }
            Err(err) => {
                CHAT_SEND_ERRORS.click();
                renderer.clear_thinking();
                let reply = ChatMessage::error(format!(
                    "Sorry, something went wrong handling your request: {err}"
                ));
                renderer.print_message(&reply);
                self.transcript.push(reply);
                SendOutcome::Failed
            }
        }
    }

    /// Empties the transcript. Interactive confirmation is the caller's
    /// responsibility.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// Returns the number of transcript entries.
    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }

    /// Returns the transcript entries in insertion order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Returns the dated default export filename, using the local date.
    pub fn default_export_path() -> PathBuf {
        PathBuf::from(format!(
            "chat-history-{}.json",
            date_stamp(crate::utils::time::now())
        ))
    }

    /// Exports the transcript as a pretty-printed JSON array.
    pub fn export_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .map_err(|err| Error::io("failed to create export file", err))?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, &self.transcript).map_err(|err| {
            Error::serialization("failed to serialize transcript", Some(Box::new(err)))
        })
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            message_count: self.message_count(),
            status: *self.status.borrow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatRole;

    /// Renderer test double that records what was rendered.
    #[derive(Default)]
    struct RecordingRenderer {
        messages: Vec<ChatMessage>,
        warnings: Vec<String>,
        thinking_shown: usize,
        thinking_cleared: usize,
    }

    impl Renderer for RecordingRenderer {
        fn print_message(&mut self, message: &ChatMessage) {
            self.messages.push(message.clone());
        }

        fn print_thinking(&mut self) {
            self.thinking_shown += 1;
        }

        fn clear_thinking(&mut self) {
            self.thinking_cleared += 1;
        }

        fn print_info(&mut self, _info: &str) {}

        fn print_warning(&mut self, warning: &str) {
            self.warnings.push(warning.to_string());
        }

        fn print_error(&mut self, _error: &str) {}
    }

    fn session(connected: bool) -> (ChatSession, watch::Sender<StatusSnapshot>) {
        // Discard port so any accidental network call fails fast.
        let client = Deskmate::new(Some("http://127.0.0.1:9".to_string())).unwrap();
        let (tx, rx) = watch::channel(StatusSnapshot {
            connected,
            ..StatusSnapshot::default()
        });
        (ChatSession::new(client, rx), tx)
    }

    #[tokio::test]
    async fn whitespace_input_is_a_no_op() {
        let (mut session, _status) = session(true);
        let mut renderer = RecordingRenderer::default();
        assert_eq!(session.send("  ", &mut renderer).await, SendOutcome::Empty);
        assert_eq!(session.message_count(), 0);
        assert!(renderer.messages.is_empty());
        assert_eq!(renderer.thinking_shown, 0);
    }

    #[tokio::test]
    async fn disconnected_send_is_blocked() {
        let (mut session, _status) = session(false);
        let mut renderer = RecordingRenderer::default();
        assert_eq!(
            session.send("list my files", &mut renderer).await,
            SendOutcome::Blocked
        );
        assert_eq!(session.message_count(), 0);
        assert_eq!(renderer.warnings.len(), 1);
        assert!(renderer.messages.is_empty());
    }

    #[tokio::test]
    async fn failed_send_appends_user_then_error_entry() {
        // Connected per the flag, but the backend address is unreachable.
        let (mut session, _status) = session(true);
        let mut renderer = RecordingRenderer::default();
        assert_eq!(
            session.send("list my files", &mut renderer).await,
            SendOutcome::Failed
        );

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(
            messages[0].content,
            MessageContent::Text("list my files".to_string())
        );
        assert_eq!(messages[1].role, ChatRole::Assistant);
        assert!(messages[1].is_error);
        match &messages[1].content {
            MessageContent::Text(text) => {
                assert!(text.contains("something went wrong"), "{text}");
            }
            other => panic!("expected text content, got {other:?}"),
        }

        // The indicator was shown and cleared exactly once.
        assert_eq!(renderer.thinking_shown, 1);
        assert_eq!(renderer.thinking_cleared, 1);
        assert_eq!(renderer.messages.len(), 2);
    }

    /// Serves a single canned HTTP response, returning the base URL.
    async fn stub_backend(body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn answered_send_appends_user_then_assistant() {
        let url = stub_backend(
            r#"{"result":"Done","task_understanding":{"task_type":"file","selected_agent":"file"},"subtasks_count":2}"#,
        )
        .await;
        let client = Deskmate::new(Some(url)).unwrap();
        let (_tx, rx) = watch::channel(StatusSnapshot {
            connected: true,
            ..StatusSnapshot::default()
        });
        let mut session = ChatSession::new(client, rx);
        let mut renderer = RecordingRenderer::default();

        assert_eq!(
            session.send("list my files", &mut renderer).await,
            SendOutcome::Answered
        );

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[1].role, ChatRole::Assistant);
        assert!(!messages[1].is_error);
        assert_eq!(
            messages[1].content,
            MessageContent::Text("Done".to_string())
        );

        // The worked example: badges are the raw task type, the agent's
        // display name, and the subtask count.
        let task = messages[1].task.as_ref().unwrap();
        assert_eq!(
            crate::render::format_badges(task),
            vec!["file", "文件管理智能体", "2 个子任务"]
        );

        assert_eq!(renderer.thinking_shown, 1);
        assert_eq!(renderer.thinking_cleared, 1);
    }

    #[tokio::test]
    async fn clear_empties_the_transcript() {
        let (mut session, _status) = session(true);
        session.transcript.push(ChatMessage::user("hello"));
        session.transcript.push(ChatMessage::assistant("hi", None));
        assert_eq!(session.message_count(), 2);

        session.clear();
        assert_eq!(session.message_count(), 0);
    }

    #[tokio::test]
    async fn export_round_trips_the_transcript() {
        let (mut session, _status) = session(true);
        session.transcript.push(ChatMessage::user("list my files"));
        session.transcript.push(ChatMessage::assistant(
            serde_json::json!({"files": ["a.txt", "b.txt"]}),
            Some(TaskAnnotations {
                task_type: Some("file".to_string()),
                selected_agent: Some("file".to_string()),
                subtasks_count: Some(2),
            }),
        ));

        let path = std::env::temp_dir().join("deskmate-export-test.json");
        session.export_to(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<ChatMessage> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, session.transcript);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn default_export_path_is_dated() {
        let path = ChatSession::default_export_path();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("chat-history-"), "{name}");
        assert!(name.ends_with(".json"), "{name}");
    }

    #[test]
    fn stats_reflect_snapshot() {
        let (session, _status) = session(true);
        let stats = session.stats();
        assert_eq!(stats.message_count, 0);
        assert!(stats.status.connected);
    }
}
