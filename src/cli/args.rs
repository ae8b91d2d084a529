use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "report-chat")]
#[command(version)]
#[command(about = "Chat your way to a sales-report command", long_about = None)]
pub struct Cli {
    /// Base URL of the dialogue agent API (e.g. http://localhost:8001/api)
    #[arg(short, long, env = "REPORT_CHAT_URL")]
    pub base_url: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Send these turns in order instead of opening the prompt (repeatable)
    #[arg(short, long = "message", value_name = "TEXT")]
    pub messages: Vec<String>,

    /// Output format for non-interactive mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, requires = "messages")]
    pub output_format: OutputFormat,

    /// Copy the generated command to the clipboard (non-interactive mode)
    #[arg(long, requires = "messages")]
    pub copy: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start a chat session (default)
    Chat,
    /// Write a default configuration file
    Init,
    /// Show version information
    Version,
    /// Check that the dialogue agent is reachable
    Status,
    /// Show the transcript the agent stored for a session
    History {
        /// Session identifier printed at the top of a chat
        session_id: String,
    },
    /// Build the command directly from a start and end date
    Generate {
        /// Start date, passed to the agent as typed
        start_date: String,
        /// End date, passed to the agent as typed
        end_date: String,
        /// Copy the command to the clipboard
        #[arg(long)]
        copy: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
}
