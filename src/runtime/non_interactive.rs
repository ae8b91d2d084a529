use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::time::Instant;

use crate::{
    agent::DialogueAgent,
    cli::OutputFormat,
    platform::Clipboard,
    session::{ChatMessage, ConversationController, Resolution, Signal},
};

/// Result of a scripted run
#[derive(Debug, Serialize)]
pub struct NonInteractiveResult {
    /// Session the turns were sent under
    pub session_id: String,
    /// Full transcript, welcome turn included
    pub transcript: Vec<ChatMessage>,
    /// The generated command, if any turn produced one
    pub command: Option<String>,
    /// Number of turns whose remote call failed
    pub failures: usize,
    /// Signals emitted along the way, in order
    pub signals: Vec<Signal>,
    /// Wall time for the whole run in milliseconds
    pub duration_ms: u128,
}

/// Sends a fixed list of turns through one controller
pub struct NonInteractiveRunner {
    agent: Box<dyn DialogueAgent>,
    copy: bool,
}

impl NonInteractiveRunner {
    pub fn new(agent: Box<dyn DialogueAgent>, copy: bool) -> Self {
        Self { agent, copy }
    }

    /// Submit each message in order, waiting for every reply before the next
    pub async fn execute(
        &self,
        messages: &[String],
        clipboard: &mut dyn Clipboard,
    ) -> Result<NonInteractiveResult> {
        let start_time = Instant::now();
        let mut controller = ConversationController::new();
        let mut failures = 0;
        let mut signals = Vec::new();

        for message in messages {
            if let Some(Resolution::Failed) = controller.send(self.agent.as_ref(), message).await {
                failures += 1;
            }
            signals.extend(controller.drain_signals());
        }

        if self.copy {
            controller.copy_command(clipboard);
            signals.extend(controller.drain_signals());
        }

        Ok(NonInteractiveResult {
            session_id: controller.session_id().to_string(),
            transcript: controller.messages().to_vec(),
            command: controller.command().map(|c| c.text.clone()),
            failures,
            signals,
            duration_ms: start_time.elapsed().as_millis(),
        })
    }

    /// Format a result for stdout
    pub fn format_result(&self, result: &NonInteractiveResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(result)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
            OutputFormat::Text => {
                let mut output = String::new();
                for message in result.transcript.iter().skip(1) {
                    output.push_str(&format!("[{}] {}\n", message.role, message.content));
                }
                for signal in &result.signals {
                    if signal.is_failure() {
                        output.push_str(&format!("{}\n", signal.text.red()));
                    }
                }
                if let Some(command) = &result.command {
                    output.push_str(&format!("\n{}\n", command));
                }
                output
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{ChatReply, MockDialogueAgent};
    use crate::platform::MockClipboard;

    const REPORT_COMMAND: &str = "report.exe --start 2024-01-01 --end 2024-01-31";

    fn scripted_agent() -> MockDialogueAgent {
        let mut agent = MockDialogueAgent::new();
        agent
            .expect_chat()
            .withf(|request| request.message == "Jan 1 to Jan 31 2024")
            .returning(|_| Ok(ChatReply::text("Got it, anything else?")));
        agent
            .expect_chat()
            .withf(|request| request.message == "that's all")
            .returning(|_| Ok(ChatReply::with_command("Here is your command", REPORT_COMMAND)));
        agent
            .expect_chat()
            .withf(|request| request.message == "boom")
            .returning(|_| Err(anyhow::anyhow!("connection reset")));
        agent
    }

    fn turns(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_runs_turns_in_order() {
        let runner = NonInteractiveRunner::new(Box::new(scripted_agent()), false);
        let mut clipboard = MockClipboard::new();
        clipboard.expect_write_text().times(0);

        let result = runner
            .execute(&turns(&["Jan 1 to Jan 31 2024", "  ", "that's all"]), &mut clipboard)
            .await
            .unwrap();

        // welcome + two exchanges; the blank turn was rejected
        assert_eq!(result.transcript.len(), 5);
        assert_eq!(result.command.as_deref(), Some(REPORT_COMMAND));
        assert_eq!(result.failures, 0);
        assert_eq!(result.signals.len(), 1);
    }

    #[tokio::test]
    async fn test_counts_failures_and_copies() {
        let runner = NonInteractiveRunner::new(Box::new(scripted_agent()), true);
        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_write_text()
            .times(1)
            .returning(|_| Ok(()));

        let result = runner
            .execute(&turns(&["boom", "that's all"]), &mut clipboard)
            .await
            .unwrap();

        assert_eq!(result.failures, 1);
        // welcome, boom, that's all, reply
        assert_eq!(result.transcript.len(), 4);
        assert_eq!(result.command.as_deref(), Some(REPORT_COMMAND));
        assert_eq!(result.signals.len(), 3);
    }

    #[tokio::test]
    async fn test_text_and_json_formats() {
        let runner = NonInteractiveRunner::new(Box::new(scripted_agent()), false);
        let mut clipboard = MockClipboard::new();
        let result = runner
            .execute(&turns(&["that's all"]), &mut clipboard)
            .await
            .unwrap();

        let text = runner.format_result(&result, OutputFormat::Text);
        assert!(text.contains("[user] that's all"));
        assert!(text.contains("[assistant] Here is your command"));
        assert!(text.trim_end().ends_with(REPORT_COMMAND));

        let json: serde_json::Value =
            serde_json::from_str(&runner.format_result(&result, OutputFormat::Json)).unwrap();
        assert_eq!(json["command"], REPORT_COMMAND);
        assert_eq!(json["transcript"][1]["role"], "user");
    }
}
