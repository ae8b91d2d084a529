/// Platform collaborators - Gateway
mod clipboard;

pub use clipboard::{Clipboard, SystemClipboard};

#[cfg(test)]
pub use clipboard::MockClipboard;
