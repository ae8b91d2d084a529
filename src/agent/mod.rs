// Gateway module for the remote dialogue agent - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod http;
mod traits;
mod types;

// Public re-exports - the ONLY way to access agent functionality
pub use http::HttpAgent;
pub use traits::DialogueAgent;
pub use types::{ChatReply, ChatRequest, GenerateCommandRequest, RemoteMessage};

#[cfg(test)]
pub use traits::MockDialogueAgent;
