use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Opaque identifier scoping one conversation on the remote agent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Create a new session identifier
///
/// Timestamp-derived, with the process id and a per-process counter so two
/// controllers created in the same instant still differ. Not a secret.
pub fn create_session_id() -> SessionId {
    let now = Local::now();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!(
        "session_{}_{}_{}",
        now.format("%Y%m%d%H%M%S%6f"),
        std::process::id(),
        seq
    ))
}
