use anyhow::{Context, Result};
use colored::Colorize;

use crate::{
    agent::{DialogueAgent, GenerateCommandRequest, HttpAgent},
    app::{init_config, Config},
    platform::{Clipboard, SystemClipboard},
};

use super::Commands;

/// Handle CLI subcommands
///
/// Returns `Ok(false)` when the caller should continue into the chat prompt.
pub async fn handle_command(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Chat => Ok(false),
        Commands::Init => {
            let (path, created) = init_config()?;
            if created {
                println!("Created default configuration at: {}", path.display());
            } else {
                println!("Configuration already exists at: {}", path.display());
            }
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Status => {
            let agent = HttpAgent::new(&config.agent)?;
            show_status(&agent, config).await;
            Ok(true)
        }
        Commands::History { session_id } => {
            let agent = HttpAgent::new(&config.agent)?;
            show_history(&agent, session_id).await?;
            Ok(true)
        }
        Commands::Generate {
            start_date,
            end_date,
            copy,
        } => {
            let agent = HttpAgent::new(&config.agent)?;
            let mut system_clipboard = SystemClipboard::new();
            let clipboard: Option<&mut dyn Clipboard> = if *copy {
                Some(&mut system_clipboard)
            } else {
                None
            };
            generate(&agent, start_date, end_date, clipboard).await?;
            hold_clipboard(system_clipboard);
            Ok(true)
        }
    }
}

/// Keep a one-shot copy alive past process exit where the platform needs it
///
/// Blocks until another program takes over the clipboard.
pub fn hold_clipboard(clipboard: SystemClipboard) {
    if !clipboard.needs_hold() {
        return;
    }
    eprintln!(
        "{}",
        "Keeping the command on the clipboard until something else is copied (Ctrl+C to stop)"
            .dimmed()
    );
    if let Err(e) = clipboard.hold_until_taken() {
        eprintln!("{} {:#}", "[ERROR] Failed to keep clipboard contents:".red(), e);
    }
}

/// Show version information
pub fn show_version() {
    println!("report-chat v{}", env!("CARGO_PKG_VERSION"));
    println!("   Chat your way to a sales-report command");
}

/// Report agent reachability and the resolved configuration
pub async fn show_status<A: DialogueAgent + ?Sized>(agent: &A, config: &Config) {
    println!("report-chat Status:");
    println!();

    let base_url = &config.agent.base_url;
    match agent.status().await {
        Ok(message) => println!("  [OK] Agent: {} ({})", base_url, message),
        Err(e) => println!("  [ERROR] Agent: {} unreachable: {:#}", base_url, e),
    }

    println!("  Request timeout: {}s", config.agent.request_timeout_secs);
    println!("  Timestamps: {}", on_off(config.ui.show_timestamps));
    println!("  Auto-copy: {}", on_off(config.ui.auto_copy));
    println!();
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Print the remotely stored transcript of a session
pub async fn show_history<A: DialogueAgent + ?Sized>(agent: &A, session_id: &str) -> Result<()> {
    let messages = agent
        .history(session_id)
        .await
        .with_context(|| format!("Failed to fetch history for session {}", session_id))?;

    if messages.is_empty() {
        println!("No messages stored for session {}", session_id);
        return Ok(());
    }

    for message in messages {
        let label = match message.role.as_str() {
            "user" => "[You]".cyan().bold(),
            "assistant" => "[Assistant]".green().bold(),
            other => format!("[{}]", other).normal(),
        };
        match message.timestamp {
            Some(stamp) => println!("{} {} {}", stamp.dimmed(), label, message.content),
            None => println!("{} {}", label, message.content),
        }
    }
    Ok(())
}

/// Ask the agent for the command for a known date range
pub async fn generate<A: DialogueAgent + ?Sized>(
    agent: &A,
    start_date: &str,
    end_date: &str,
    clipboard: Option<&mut dyn Clipboard>,
) -> Result<String> {
    let request = GenerateCommandRequest {
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
    };
    let command = agent
        .generate_command(&request)
        .await
        .context("Failed to generate command")?;

    println!("{}", command);

    if let Some(clipboard) = clipboard {
        match clipboard.write_text(&command) {
            Ok(()) => eprintln!("{}", "[OK] Command copied to clipboard!".green()),
            Err(e) => eprintln!("{} {:#}", "[ERROR] Failed to copy command:".red(), e),
        }
    }

    Ok(command)
}
