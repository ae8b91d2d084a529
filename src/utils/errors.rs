use thiserror::Error;

/// Main error type for report-chat
#[derive(Error, Debug)]
pub enum ReportChatError {
    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),
}
