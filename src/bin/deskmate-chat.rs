//! Interactive chat application for the Deskmate orchestrator.
//!
//! This binary provides a REPL interface over the backend's task-dispatch
//! endpoint, with a background poller keeping the connectivity indicator
//! and store statistics current.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage against the local orchestrator
//! deskmate-chat
//!
//! # Point at another backend
//! deskmate-chat --base-url http://10.0.0.5:8000
//!
//! # Poll more aggressively
//! deskmate-chat --poll-interval 5
//!
//! # Disable colors (useful for piping output)
//! deskmate-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/clear` - Clear the transcript (asks for confirmation)
//! - `/export [file]` - Export the transcript as JSON
//! - `/agents` - Show the registered agents
//! - `/quick <name>` - Submit a quick task
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use deskmate::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, confirms_clear,
    help_text, parse_command, quick_task, quick_task_names,
};
use deskmate::types::AgentList;
use deskmate::{Deskmate, StatusPoller, directory};

/// Main entry point for the deskmate-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("deskmate-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = Deskmate::with_options(config.base_url.clone(), Some(config.timeout))?;
    let poller = StatusPoller::spawn(client.clone(), config.poll_interval);
    let mut session = ChatSession::new(client.clone(), poller.subscribe());
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    // Flag so Ctrl+C during an in-flight request does not kill the process.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Deskmate Chat (backend: {})", client.base_url());
    println!("Type /help for commands, /quit to exit\n");
    print_welcome();

    // The agent directory loads once at startup; /agents re-fetches it.
    print_agent_directory(&client, &mut renderer).await;
    println!();

    loop {
        interrupted.store(false, Ordering::Relaxed);

        let indicator = renderer.status_indicator(session.is_connected());
        let readline = rl.readline(&format!("{indicator} You: "));

        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                // Check for slash commands
                if let Some(cmd) = parse_command(&line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => {
                            if confirm_clear(&mut rl) {
                                session.clear();
                                renderer.print_info("Transcript cleared.\n");
                                print_welcome();
                            } else {
                                renderer.print_info("Clear cancelled.");
                            }
                        }
                        ChatCommand::Export(path) => {
                            let path = path
                                .map(PathBuf::from)
                                .unwrap_or_else(ChatSession::default_export_path);
                            match session.export_to(&path) {
                                Ok(_) => renderer.print_info(&format!(
                                    "Transcript exported to {} ({} messages)",
                                    path.display(),
                                    session.message_count()
                                )),
                                Err(err) => renderer
                                    .print_error(&format!("Failed to export transcript: {err}")),
                            }
                        }
                        ChatCommand::Agents => {
                            print_agent_directory(&client, &mut renderer).await;
                        }
                        ChatCommand::Stats => {
                            print_stats(&client, &session);
                        }
                        ChatCommand::Quick(name) => match quick_task(&name) {
                            Some(prompt) => {
                                renderer.print_info(&format!("Quick task: {prompt}"));
                                session.send(prompt, &mut renderer).await;
                            }
                            None => renderer.print_error(&format!(
                                "Unknown quick task '{}' (available: {})",
                                name,
                                quick_task_names().join(", ")
                            )),
                        },
                        ChatCommand::ListQuickTasks => {
                            println!("    Quick tasks:");
                            for name in quick_task_names() {
                                let prompt = quick_task(name).unwrap_or_default();
                                println!("      /quick {name:<10} {prompt}");
                            }
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular input - dispatch as a task
                session.send(&line, &mut renderer).await;
                if interrupted.load(Ordering::Relaxed) {
                    renderer.print_info("(interrupt noted; the request had already been sent)");
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    poller.shutdown();
    Ok(())
}

fn print_welcome() {
    println!("Welcome! I can help with:");
    println!("  📧 邮件管理 - 自动分类、回复、归档");
    println!("  📄 文档处理 - 格式转换、摘要提取、对比");
    println!("  📅 日程管理 - 会议安排、提醒、冲突检测");
    println!("  📊 数据分析 - 数据处理、可视化、报表生成");
    println!("  💡 知识问答 - 基于知识库的智能问答");
    println!("  📁 文件管理 - 智能整理、重复检测、空间优化");
    println!();
}

async fn print_agent_directory(client: &Deskmate, renderer: &mut PlainTextRenderer) {
    println!("    Registered agents:");
    match client.list_agents().await {
        Ok(list) => print_agents(&list),
        Err(err) => {
            renderer.print_error(&format!("Failed to load agent directory: {err}"));
            println!("      (agent directory unavailable)");
        }
    }
}

fn print_agents(list: &AgentList) {
    if list.is_empty() {
        println!("      (no agents available)");
        return;
    }
    for agent in &list.agents {
        println!(
            "      {} {}",
            directory::icon(agent).glyph(),
            directory::display_name(agent)
        );
    }
}

fn print_stats(client: &Deskmate, session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Backend: {}", client.base_url());
    println!(
        "      Connected: {}",
        if stats.status.connected { "yes" } else { "no" }
    );
    println!("      Messages: {}", stats.message_count);
    println!("      Memory entries: {}", stats.status.memory_count);
    println!("      Vector documents: {}", stats.status.vector_count);
}

fn confirm_clear(rl: &mut DefaultEditor) -> bool {
    match rl.readline("Clear all conversation history? [y/N] ") {
        Ok(answer) => confirms_clear(&answer),
        Err(_) => false,
    }
}
