/// Session management module - Gateway

mod controller;
mod identity;
mod signal;
mod transcript;

pub use controller::{ControllerState, ConversationController, GeneratedCommand, Resolution};
pub use identity::{create_session_id, SessionId};
pub use signal::{Signal, SignalKind};
pub use transcript::{ChatMessage, MessageRole, Transcript};
