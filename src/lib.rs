pub mod agent;
pub mod app;
pub mod cli;
pub mod constants;
pub mod platform;
pub mod repl;
pub mod runtime;
pub mod session;
pub mod utils;

pub use agent::{ChatReply, ChatRequest, DialogueAgent, HttpAgent};
pub use app::{load_config, Config};
pub use session::{create_session_id, ControllerState, ConversationController, SessionId};
pub use utils::ReportChatError;
