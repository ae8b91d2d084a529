/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_AGENT_BASE_URL: &str = "http://localhost:8001/api";
pub const CHAT_ENDPOINT: &str = "chat";
pub const HISTORY_ENDPOINT: &str = "chat/history";
pub const GENERATE_COMMAND_ENDPOINT: &str = "generate-command";

// Timeouts
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const STATUS_CHECK_TIMEOUT_SECS: u64 = 3;

// Configuration
pub const CONFIG_ENV_PREFIX: &str = "REPORT_CHAT_";
pub const LOCAL_CONFIG_DIR: &str = ".report-chat";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// Conversation
pub const WELCOME_MESSAGE: &str = "Hello! I'll help you build the command for your sales report. \
I need two things from you: a start date and an end date. \
Tell me the date range you want, in whatever format is convenient.";

// Signals
pub const COMMAND_READY_SIGNAL: &str = "Command generated!";
pub const SEND_FAILED_SIGNAL: &str = "Failed to send message. Please try again.";
pub const COPY_OK_SIGNAL: &str = "Command copied to clipboard!";
pub const COPY_FAILED_SIGNAL: &str = "Failed to copy command to clipboard.";
