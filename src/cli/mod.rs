/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;

pub use args::{Cli, Commands, OutputFormat};
pub use commands::{
    generate, handle_command, hold_clipboard, show_history, show_status, show_version,
};
