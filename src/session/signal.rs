use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Success,
    Failure,
}

/// A user-visible notification decided by the controller
///
/// The controller only decides when and which kind; rendering is up to the
/// presentation layer, which drains the queue after each transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub text: String,
}

impl Signal {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: SignalKind::Success,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            kind: SignalKind::Failure,
            text: text.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == SignalKind::Failure
    }
}
