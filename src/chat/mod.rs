//! Interactive chat on top of the Deskmate client.
//!
//! This module provides the REPL chat front-end for the orchestrator. It
//! supports:
//!
//! - optimistic transcript updates with a transient thinking indicator
//! - annotation badges on routed replies
//! - slash commands for session control and quick-task shortcuts
//! - JSON transcript export
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: transcript ownership and the send pipeline
//! - [`commands`]: slash command parsing and quick-task table

mod commands;
mod config;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{
    ChatCommand, confirms_clear, help_text, parse_command, quick_task, quick_task_names,
};
pub use config::{ChatArgs, ChatConfig};
pub use session::{ChatSession, SendOutcome, SessionStats};
