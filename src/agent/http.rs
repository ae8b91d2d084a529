use anyhow::{Context as _, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::traits::DialogueAgent;
use super::types::{
    ChatReply, ChatRequest, GenerateCommandRequest, GenerateCommandResponse, HistoryResponse,
    RemoteMessage, StatusResponse,
};
use crate::app::AgentConfig;
use crate::constants::{
    CHAT_ENDPOINT, GENERATE_COMMAND_ENDPOINT, HISTORY_ENDPOINT, STATUS_CHECK_TIMEOUT_SECS,
};
use crate::utils::ReportChatError;

/// Dialogue agent reached over HTTP/JSON
pub struct HttpAgent {
    client: Client,
    base_url: String,
}

impl HttpAgent {
    /// Create a client bound to the configured base URL
    ///
    /// The URL is captured here once and never re-read.
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL every call is issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        if path.is_empty() {
            format!("{}/", self.base_url)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// History URL with the session id as a single percent-encoded path segment
    fn history_url(&self, session_id: &str) -> Result<Url> {
        let base = self.endpoint(HISTORY_ENDPOINT);
        let mut url =
            Url::parse(&base).with_context(|| format!("Invalid agent base URL: {}", base))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Agent base URL cannot carry a path: {}", base))?
            .push(session_id);
        Ok(url)
    }

    /// Send a request and decode a JSON body; any non-2xx status is an error
    async fn send_json<R: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<R> {
        let response = request
            .send()
            .await
            .map_err(ReportChatError::from)
            .with_context(|| format!("Failed to reach dialogue agent at {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportChatError::ApiError {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        response
            .json::<R>()
            .await
            .map_err(ReportChatError::from)
            .with_context(|| format!("Malformed response from {}", url))
    }
}

#[async_trait]
impl DialogueAgent for HttpAgent {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = self.endpoint(CHAT_ENDPOINT);
        debug!(session_id = %request.session_id, "POST {}", url);
        self.send_json(self.client.post(&url).json(request), &url).await
    }

    async fn history(&self, session_id: &str) -> Result<Vec<RemoteMessage>> {
        let url = self.history_url(session_id)?;
        debug!("GET {}", url);
        let history: HistoryResponse = self
            .send_json(self.client.get(url.clone()), url.as_str())
            .await?;
        Ok(history.messages)
    }

    async fn generate_command(&self, request: &GenerateCommandRequest) -> Result<String> {
        let url = self.endpoint(GENERATE_COMMAND_ENDPOINT);
        debug!("POST {}", url);
        let generated: GenerateCommandResponse =
            self.send_json(self.client.post(&url).json(request), &url).await?;
        Ok(generated.command)
    }

    async fn status(&self) -> Result<String> {
        let url = self.endpoint("");
        let request = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(STATUS_CHECK_TIMEOUT_SECS));
        let status: StatusResponse = self.send_json(request, &url).await?;
        Ok(status.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn agent(base_url: &str) -> HttpAgent {
        HttpAgent::new(&AgentConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: 2,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoints_strip_trailing_slash() {
        let agent = agent("http://localhost:8001/api/");
        assert_eq!(agent.base_url(), "http://localhost:8001/api");
        assert_eq!(agent.endpoint(CHAT_ENDPOINT), "http://localhost:8001/api/chat");
        assert_eq!(agent.endpoint(""), "http://localhost:8001/api/");
        assert_eq!(
            agent.endpoint(&format!("{}/abc", HISTORY_ENDPOINT)),
            "http://localhost:8001/api/chat/history/abc"
        );
    }

    /// Serve exactly one HTTP exchange with a canned status and body
    async fn one_shot_server(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Read headers, then as much body as Content-Length announces
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            let header_end = loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let headers = String::from_utf8_lossy(&request[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while request.len() < header_end + content_length {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/api", addr)
    }

    fn chat_request() -> ChatRequest {
        ChatRequest {
            session_id: "s".to_string(),
            message: "hello".to_string(),
        }
    }

    #[test]
    fn test_history_url_encodes_session_id() {
        let agent = agent("http://localhost:8001/api/");
        assert_eq!(
            agent.history_url("session_1").unwrap().as_str(),
            "http://localhost:8001/api/chat/history/session_1"
        );
        assert_eq!(
            agent.history_url("../generate-command").unwrap().as_str(),
            "http://localhost:8001/api/chat/history/..%2Fgenerate-command"
        );
        assert_eq!(
            agent.history_url("a?b#c").unwrap().as_str(),
            "http://localhost:8001/api/chat/history/a%3Fb%23c"
        );
    }

    #[tokio::test]
    async fn test_server_error_status_is_an_error() {
        let base_url = one_shot_server("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
        let agent = agent(&base_url);

        let err = agent.chat(&chat_request()).await.unwrap_err();
        assert!(format!("{:#}", err).contains("500"));
    }

    #[tokio::test]
    async fn test_reply_without_response_field_is_an_error() {
        let base_url = one_shot_server("200 OK", "{}").await;
        let agent = agent(&base_url);

        assert!(agent.chat(&chat_request()).await.is_err());
    }

    #[tokio::test]
    async fn test_successful_reply_is_decoded() {
        let base_url =
            one_shot_server("200 OK", r#"{"response":"ok","command":"report.exe"}"#).await;
        let agent = agent(&base_url);

        let reply = agent.chat(&chat_request()).await.unwrap();
        assert_eq!(reply.response, "ok");
        assert_eq!(reply.generated_command(), Some("report.exe"));
    }

    #[tokio::test]
    async fn test_unreachable_agent_is_an_error() {
        // Grab a free port, then close it so nothing is listening
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let agent = agent(&format!("http://127.0.0.1:{}/api", port));

        let result = agent.chat(&chat_request()).await;
        assert!(result.is_err());
    }
}
