//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without dispatching a task
//! to the backend. It also carries the quick-task table: canned prompts
//! that populate and submit the input programmatically.

/// A parsed chat command.
///
/// These commands control the chat session and are never sent to the
/// backend as tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Clear the transcript (after interactive confirmation).
    Clear,

    /// Export the transcript to a JSON file. `None` uses the dated
    /// default filename.
    Export(Option<String>),

    /// Re-fetch and display the agent directory.
    Agents,

    /// Display session statistics (transcript length, connectivity,
    /// store counts).
    Stats,

    /// Submit the named quick task.
    Quick(String),

    /// List the available quick tasks.
    ListQuickTasks,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Canned prompts behind the quick-task shortcuts, one per agent domain.
const QUICK_TASKS: &[(&str, &str)] = &[
    ("email", "帮我整理最近一周的邮件"),
    ("docs", "帮我把这份文档生成摘要"),
    ("schedule", "帮我安排明天上午的会议日程"),
    ("report", "帮我生成本周的数据分析报表"),
    ("files", "帮我整理下载目录中的重复文件"),
];

/// Returns the canned prompt for a quick-task name, if one exists.
pub fn quick_task(name: &str) -> Option<&'static str> {
    QUICK_TASKS
        .iter()
        .find(|(task, _)| task.eq_ignore_ascii_case(name))
        .map(|(_, prompt)| *prompt)
}

/// Returns the names of all quick tasks, in display order.
pub fn quick_task_names() -> Vec<&'static str> {
    QUICK_TASKS.iter().map(|(name, _)| *name).collect()
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be submitted to the backend as a task.
///
/// # Examples
///
/// ```
/// # use deskmate::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/quick files").is_some());
/// assert!(parse_command("list my files").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "clear" => ChatCommand::Clear,
        "export" => ChatCommand::Export(argument.map(|s| s.to_string())),
        "agents" => ChatCommand::Agents,
        "stats" | "status" => ChatCommand::Stats,
        "quick" => match argument {
            Some(name) => ChatCommand::Quick(name.to_string()),
            None => ChatCommand::ListQuickTasks,
        },
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Interprets the answer to the clear-transcript confirmation prompt.
///
/// Only an explicit `y` or `yes` (case-insensitive, surrounding whitespace
/// ignored) confirms; any other answer declines.
pub fn confirms_clear(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /clear                 Clear the transcript (asks for confirmation)
  /export [file]         Export the transcript as JSON
                         (default: chat-history-<date>.json)
  /agents                Show the registered agents
  /quick <name>          Submit a quick task (e.g., /quick files)
  /quick                 List available quick tasks
  /stats                 Show session statistics
  /help                  Show this help message
  /quit                  Exit the chat"#
}
