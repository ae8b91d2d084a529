use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::identity::{create_session_id, SessionId};
use super::signal::Signal;
use super::transcript::{ChatMessage, MessageRole, Transcript};
use crate::agent::{ChatReply, ChatRequest, DialogueAgent};
use crate::constants::{
    COMMAND_READY_SIGNAL, COPY_FAILED_SIGNAL, COPY_OK_SIGNAL, SEND_FAILED_SIGNAL, WELCOME_MESSAGE,
};
use crate::platform::Clipboard;

/// Logical state of the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControllerState {
    /// No outstanding request, no command yet
    Idle,
    /// Exactly one request outstanding; submissions are rejected
    AwaitingResponse,
    /// No outstanding request and a command is available
    IdleWithCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingRequest {
    None,
    InProgress,
}

/// The most recently received command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCommand {
    pub text: String,
}

/// What a `resolve` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Assistant turn appended; `new_command` is true when the reply set the command
    Replied { new_command: bool },
    /// Remote call failed; only the user's turn remains
    Failed,
    /// Nothing was outstanding, so nothing changed
    Ignored,
}

/// Owns the transcript and drives turn-taking against the dialogue agent
///
/// All mutation goes through `&mut self`, so at most one request can be
/// outstanding and the transcript has a single writer.
pub struct ConversationController {
    session_id: SessionId,
    transcript: Transcript,
    input: String,
    pending: PendingRequest,
    command: Option<GeneratedCommand>,
    signals: Vec<Signal>,
}

impl Default for ConversationController {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationController {
    /// Start a conversation with a fresh session id and the welcome turn
    pub fn new() -> Self {
        Self::with_session_id(create_session_id())
    }

    /// Start a conversation bound to an existing session id
    pub fn with_session_id(session_id: SessionId) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(MessageRole::Assistant, WELCOME_MESSAGE);
        debug!(session_id = %session_id, "conversation initialized");

        Self {
            session_id,
            transcript,
            input: String::new(),
            pending: PendingRequest::None,
            command: None,
            signals: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn state(&self) -> ControllerState {
        match (self.pending, &self.command) {
            (PendingRequest::InProgress, _) => ControllerState::AwaitingResponse,
            (PendingRequest::None, Some(_)) => ControllerState::IdleWithCommand,
            (PendingRequest::None, None) => ControllerState::Idle,
        }
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.pending == PendingRequest::InProgress
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.transcript.messages()
    }

    pub fn command(&self) -> Option<&GeneratedCommand> {
        self.command.as_ref()
    }

    /// Current contents of the input buffer
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Record a user turn and produce the outbound request for it
    ///
    /// Returns `None`, changing nothing, when `text` is blank or a request is
    /// already outstanding.
    pub fn submit(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() {
            debug!("submit rejected: empty input");
            return None;
        }
        if self.is_awaiting_response() {
            debug!("submit rejected: request already in flight");
            return None;
        }

        self.transcript.push(MessageRole::User, text);
        self.input.clear();
        self.pending = PendingRequest::InProgress;
        info!(session_id = %self.session_id, turns = self.transcript.len(), "user turn submitted");

        Some(ChatRequest {
            session_id: self.session_id.to_string(),
            message: text.to_string(),
        })
    }

    /// Submit whatever is in the input buffer
    pub fn submit_input(&mut self) -> Option<ChatRequest> {
        let text = self.input.clone();
        self.submit(&text)
    }

    /// Complete the outstanding request with its outcome
    pub fn resolve(&mut self, outcome: Result<ChatReply>) -> Resolution {
        if !self.is_awaiting_response() {
            warn!("resolve ignored: no request outstanding");
            return Resolution::Ignored;
        }
        self.pending = PendingRequest::None;

        match outcome {
            Ok(reply) => {
                self.transcript.push(MessageRole::Assistant, reply.response.as_str());
                debug!(is_complete = reply.is_complete, "assistant turn appended");

                let new_command = match reply.generated_command() {
                    Some(command) => {
                        info!(command = %command, "command generated");
                        self.command = Some(GeneratedCommand {
                            text: command.to_string(),
                        });
                        self.signals.push(Signal::success(COMMAND_READY_SIGNAL));
                        true
                    }
                    None => false,
                };
                Resolution::Replied { new_command }
            }
            Err(e) => {
                let detail = format!("{:#}", e);
                warn!(error = %detail, "chat request failed");
                self.signals.push(Signal::failure(SEND_FAILED_SIGNAL));
                Resolution::Failed
            }
        }
    }

    /// Submit `text`, wait for the agent and resolve
    ///
    /// Returns `None` when the submission was rejected and no call was made.
    pub async fn send<A>(&mut self, agent: &A, text: &str) -> Option<Resolution>
    where
        A: DialogueAgent + ?Sized,
    {
        let request = self.submit(text)?;
        let outcome = agent.chat(&request).await;
        Some(self.resolve(outcome))
    }

    /// Copy the current command to the clipboard
    ///
    /// Returns false without signalling when there is no command.
    pub fn copy_command(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        let Some(command) = &self.command else {
            debug!("copy ignored: no command yet");
            return false;
        };

        match clipboard.write_text(&command.text) {
            Ok(()) => {
                self.signals.push(Signal::success(COPY_OK_SIGNAL));
                true
            }
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                self.signals.push(Signal::failure(COPY_FAILED_SIGNAL));
                false
            }
        }
    }

    /// Take all signals queued since the last call
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }
}
