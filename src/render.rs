//! Output rendering for the chat client.
//!
//! This module provides a trait-based rendering abstraction plus the pure
//! formatting functions behind it: content formatting (structured results are
//! pretty-printed, `- ` lines become bullet list items) and the annotation
//! badge row attached to routed replies.

use std::io::{self, Stdout, Write};

use crate::directory;
use crate::types::{ChatMessage, ChatRole, MessageContent, TaskAnnotations};
use crate::utils::time::clock_label;

/// ANSI escape code for dim text (timestamps, badges).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (assistant label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (online indicator).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (errors, offline indicator).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for yellow text (warnings).
const ANSI_YELLOW: &str = "\x1b[33m";

/// Erase the current line and return the cursor to column zero.
const ANSI_ERASE_LINE: &str = "\r\x1b[2K";

/// Formats message content for display.
///
/// Non-string content is pretty-printed as JSON first; the list transform
/// then applies to the result the same way it applies to plain text. The
/// transform is a single pass and does not handle nested lists.
pub fn format_content(content: &MessageContent) -> String {
    let text = match content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Structured(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    };
    transform_lists(&text)
}

/// Converts lines beginning with `- ` into bullet list items.
fn transform_lists(text: &str) -> String {
    let mut out = Vec::new();
    for line in text.split('\n') {
        if let Some(item) = line.strip_prefix("- ") {
            out.push(format!("  • {item}"));
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}

/// Formats the badge row for an annotated reply.
///
/// Order matches the original surface: task type, agent display name,
/// subtask count. Absent fields produce no badge.
pub fn format_badges(task: &TaskAnnotations) -> Vec<String> {
    let mut badges = Vec::new();
    if let Some(task_type) = &task.task_type {
        badges.push(task_type.clone());
    }
    if let Some(agent) = &task.selected_agent {
        badges.push(directory::display_name(agent).to_string());
    }
    if let Some(count) = task.subtasks_count {
        badges.push(format!("{count} 个子任务"));
    }
    badges
}

/// Trait for rendering chat output.
///
/// This abstraction keeps the session logic testable: the REPL uses the
/// ANSI-styled stdout implementation, tests substitute a recording one.
pub trait Renderer: Send {
    /// Render a transcript entry (either role, including error entries).
    fn print_message(&mut self, message: &ChatMessage);

    /// Show the transient "thinking" indicator while a send is in flight.
    fn print_thinking(&mut self);

    /// Remove the thinking indicator. Always called once per send that
    /// reached the network, whether it succeeded or failed.
    fn clear_thinking(&mut self);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print a blocking warning (send attempted while disconnected).
    fn print_warning(&mut self, warning: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
    in_thinking: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            in_thinking: false,
        }
    }

    /// Flushes stdout to ensure immediate display.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_color {
            format!("{code}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    /// Formats the connectivity indicator shown in the prompt: a filled dot
    /// when connected, a hollow one when not.
    pub fn status_indicator(&self, connected: bool) -> String {
        if connected {
            self.paint(ANSI_GREEN, "●")
        } else {
            self.paint(ANSI_RED, "○")
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_message(&mut self, message: &ChatMessage) {
        let clock = self.paint(ANSI_DIM, &format!("[{}]", clock_label(message.timestamp)));
        let label = match message.role {
            ChatRole::User => self.paint(ANSI_DIM, "You"),
            ChatRole::Assistant if message.is_error => self.paint(ANSI_RED, "Deskmate"),
            ChatRole::Assistant => self.paint(ANSI_CYAN, "Deskmate"),
        };
        println!("{label} {clock}");

        let body = format_content(&message.content);
        for line in body.lines() {
            if message.is_error {
                println!("  {}", self.paint(ANSI_RED, line));
            } else {
                println!("  {line}");
            }
        }

        if let Some(task) = &message.task {
            let badges = format_badges(task)
                .into_iter()
                .map(|badge| format!("[{badge}]"))
                .collect::<Vec<_>>()
                .join(" ");
            if !badges.is_empty() {
                println!("  {}", self.paint(ANSI_DIM, &badges));
            }
        }
        self.flush();
    }

    fn print_thinking(&mut self) {
        self.in_thinking = true;
        if self.use_color {
            print!("{}", self.paint(ANSI_DIM, "Deskmate is thinking…"));
        } else {
            print!("Deskmate is thinking…");
        }
        self.flush();
    }

    fn clear_thinking(&mut self) {
        if !self.in_thinking {
            return;
        }
        self.in_thinking = false;
        if self.use_color {
            print!("{ANSI_ERASE_LINE}");
        } else {
            println!();
        }
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
    }

    fn print_warning(&mut self, warning: &str) {
        println!("{}", self.paint(ANSI_YELLOW, warning));
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("{}", self.paint(ANSI_RED, &format!("Error: {error}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let content = MessageContent::Text("hello there".to_string());
        assert_eq!(format_content(&content), "hello there");
    }

    #[test]
    fn dash_lines_become_bullets() {
        let content = MessageContent::Text(
            "Found these:\n- report.xlsx\n- notes.md\nDone.".to_string(),
        );
        assert_eq!(
            format_content(&content),
            "Found these:\n  • report.xlsx\n  • notes.md\nDone."
        );
    }

    #[test]
    fn dash_mid_line_untouched() {
        let content = MessageContent::Text("a - b\n-not a list".to_string());
        assert_eq!(format_content(&content), "a - b\n-not a list");
    }

    #[test]
    fn structured_content_pretty_printed() {
        let content = MessageContent::Structured(serde_json::json!({"files_moved": 12}));
        let formatted = format_content(&content);
        assert!(formatted.contains("\"files_moved\": 12"));
        assert!(formatted.contains('\n'));
    }

    #[test]
    fn badges_for_worked_example() {
        let task = TaskAnnotations {
            task_type: Some("file".to_string()),
            selected_agent: Some("file".to_string()),
            subtasks_count: Some(2),
        };
        assert_eq!(
            format_badges(&task),
            vec!["file", "文件管理智能体", "2 个子任务"]
        );
    }

    #[test]
    fn badges_skip_absent_fields() {
        let task = TaskAnnotations {
            task_type: None,
            selected_agent: Some("mystery".to_string()),
            subtasks_count: None,
        };
        assert_eq!(format_badges(&task), vec!["mystery"]);
    }

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
        assert_eq!(renderer.status_indicator(true), "●");
    }
}
