use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::input::{parse_line, InputAction};
use super::render::{format_command, format_message, format_signal, HELP_TEXT};
use crate::agent::DialogueAgent;
use crate::app::UIConfig;
use crate::platform::Clipboard;
use crate::session::{ConversationController, Resolution};

/// Run the interactive prompt until `/quit` or end of input
pub async fn run_repl<A>(
    controller: &mut ConversationController,
    agent: &A,
    clipboard: &mut dyn Clipboard,
    ui: &UIConfig,
) -> Result<()>
where
    A: DialogueAgent + ?Sized,
{
    println!(
        "{} {}",
        "Session".dimmed(),
        controller.session_id().to_string().dimmed()
    );
    for message in controller.messages() {
        println!("{}", format_message(message, ui.show_timestamps));
    }
    println!("{}", "Type /help for commands.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", ">".bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse_line(&line) {
            InputAction::Submit(text) => {
                controller.set_input(text);
                let Some(request) = controller.submit_input() else {
                    continue;
                };

                println!("{}", "Thinking...".dimmed());
                let outcome = agent.chat(&request).await;
                let resolution = controller.resolve(outcome);

                if let Resolution::Replied { new_command } = resolution {
                    if let Some(reply) = controller.messages().last() {
                        println!("{}", format_message(reply, ui.show_timestamps));
                    }
                    if new_command {
                        if let Some(command) = controller.command() {
                            println!("{}", format_command(command));
                        }
                        if ui.auto_copy {
                            controller.copy_command(clipboard);
                        }
                    }
                }
            }
            InputAction::Copy => {
                if !controller.copy_command(clipboard) && controller.command().is_none() {
                    println!("{}", "No command has been generated yet.".yellow());
                }
            }
            InputAction::Transcript => {
                for message in controller.messages() {
                    println!("{}", format_message(message, ui.show_timestamps));
                }
                if let Some(command) = controller.command() {
                    println!("{}", format_command(command));
                }
            }
            InputAction::Help => println!("{}", HELP_TEXT),
            InputAction::Quit => break,
            InputAction::Unknown(command) => {
                println!("{} {}", "Unknown command:".yellow(), command);
            }
        }

        for signal in controller.drain_signals() {
            println!("{}", format_signal(&signal));
        }
    }

    Ok(())
}
