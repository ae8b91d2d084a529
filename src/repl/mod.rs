// Gateway module for the line-based prompt - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod input;
mod render;
mod ui;

// Public re-exports - the ONLY way to access prompt functionality
pub use input::{parse_line, InputAction};
pub use render::{format_command, format_message, format_signal};
pub use ui::run_repl;
