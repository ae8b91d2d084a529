use colored::Colorize;

use crate::session::{ChatMessage, GeneratedCommand, MessageRole, Signal, SignalKind};

pub const HELP_TEXT: &str = "Commands:
  /copy        copy the generated command to the clipboard
  /transcript  show the whole conversation
  /help        show this help
  /quit        leave (Ctrl+D works too)
Anything else is sent to the assistant.
Start a line with // to send text that begins with /.";

/// Render one transcript entry
pub fn format_message(message: &ChatMessage, show_timestamps: bool) -> String {
    let label = match message.role {
        MessageRole::User => "[You]".cyan().bold(),
        MessageRole::Assistant => "[Assistant]".green().bold(),
    };

    if show_timestamps {
        format!(
            "{} {} {}",
            message.timestamp.format("%H:%M:%S").to_string().dimmed(),
            label,
            message.content
        )
    } else {
        format!("{} {}", label, message.content)
    }
}

/// Render a user-visible signal
pub fn format_signal(signal: &Signal) -> String {
    match signal.kind {
        SignalKind::Success => format!("[OK] {}", signal.text).green().to_string(),
        SignalKind::Failure => format!("[ERROR] {}", signal.text).red().to_string(),
    }
}

/// Render the generated command box
pub fn format_command(command: &GeneratedCommand) -> String {
    format!(
        "{}\n  {}\n{}",
        "Generated command:".yellow().bold(),
        command.text.bold(),
        "Type /copy to copy it to the clipboard.".dimmed()
    )
}
