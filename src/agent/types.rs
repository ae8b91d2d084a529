use serde::{Deserialize, Serialize};

/// Body of `POST {base_url}/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Successful reply from the dialogue agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Assistant reply text
    pub response: String,
    /// Present once the agent has enough information to build the command
    #[serde(default)]
    pub command: Option<String>,
    /// The agent considers the conversation finished
    #[serde(default)]
    pub is_complete: bool,
}

impl ChatReply {
    /// The generated command, if present and non-blank
    pub fn generated_command(&self) -> Option<&str> {
        self.command.as_deref().filter(|c| !c.trim().is_empty())
    }
}

#[cfg(test)]
impl ChatReply {
    /// Plain reply with no command attached
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            command: None,
            is_complete: false,
        }
    }

    /// Reply that carries a generated command
    pub fn with_command(response: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            command: Some(command.into()),
            is_complete: false,
        }
    }
}

/// A message as stored by the remote agent for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMessage {
    #[serde(default)]
    pub id: Option<String>,
    pub session_id: String,
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HistoryResponse {
    pub messages: Vec<RemoteMessage>,
}

/// Body of `POST {base_url}/generate-command`
///
/// Dates are passed through verbatim; the agent owns their format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCommandRequest {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenerateCommandResponse {
    pub command: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StatusResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_without_command() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response": "Got it, anything else?"}"#).unwrap();
        assert_eq!(reply.response, "Got it, anything else?");
        assert_eq!(reply.generated_command(), None);
        assert!(!reply.is_complete);
    }

    #[test]
    fn test_reply_with_null_command() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response": "ok", "command": null, "is_complete": false}"#)
                .unwrap();
        assert_eq!(reply.generated_command(), None);
    }

    #[test]
    fn test_blank_command_is_ignored() {
        let reply = ChatReply::with_command("here", "   ");
        assert_eq!(reply.generated_command(), None);
    }

    #[test]
    fn test_reply_missing_response_is_rejected() {
        assert!(serde_json::from_str::<ChatReply>(r#"{"command": "x"}"#).is_err());
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            session_id: "s1".to_string(),
            message: "hello".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"session_id": "s1", "message": "hello"}));
    }

    #[test]
    fn test_history_tolerates_missing_fields() {
        let history: HistoryResponse = serde_json::from_str(
            r#"{"messages": [{"session_id": "s1", "role": "user", "content": "hi"}]}"#,
        )
        .unwrap();
        assert_eq!(history.messages.len(), 1);
        assert_eq!(history.messages[0].id, None);
    }
}
