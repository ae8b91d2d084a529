use anyhow::Result;
use async_trait::async_trait;

use super::types::{ChatReply, ChatRequest, GenerateCommandRequest, RemoteMessage};

/// The remote dialogue agent, reachable over a request/response protocol
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DialogueAgent: Send + Sync {
    /// Send one user turn and wait for the agent's reply
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;

    /// Fetch the transcript the agent stored for a session
    async fn history(&self, session_id: &str) -> Result<Vec<RemoteMessage>>;

    /// Build the command directly from a known date range
    async fn generate_command(&self, request: &GenerateCommandRequest) -> Result<String>;

    /// Check that the agent is reachable; returns its banner message
    async fn status(&self) -> Result<String>;
}
