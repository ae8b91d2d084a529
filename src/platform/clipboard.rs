use anyhow::Result;

use crate::utils::ReportChatError;

/// Destination for the generated command
#[cfg_attr(test, mockall::automock)]
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by `arboard`
///
/// The handle is opened lazily so that headless sessions without a
/// clipboard only fail when a copy is actually attempted.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
    last_written: Option<String>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a one-shot caller must call [`hold_until_taken`](Self::hold_until_taken)
    /// before exiting for the copied text to survive
    pub fn needs_hold(&self) -> bool {
        cfg!(target_os = "linux") && self.last_written.is_some()
    }

    /// Keep serving the last written text until another program replaces it
    ///
    /// On X11 and Wayland the clipboard lives in the owning process, so a
    /// process that exits right after copying takes the contents with it.
    /// Elsewhere, or when nothing was written, this returns immediately.
    pub fn hold_until_taken(mut self) -> Result<()> {
        let Some(text) = self.last_written.take() else {
            return Ok(());
        };
        self.hold(text)
    }

    #[cfg(target_os = "linux")]
    fn hold(&mut self, text: String) -> Result<()> {
        use arboard::SetExtLinux;

        if let Some(clipboard) = self.inner.as_mut() {
            clipboard
                .set()
                .wait()
                .text(text)
                .map_err(|e| ReportChatError::ClipboardError(e.to_string()))?;
        }
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    fn hold(&mut self, _text: String) -> Result<()> {
        Ok(())
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            let handle = arboard::Clipboard::new()
                .map_err(|e| ReportChatError::ClipboardError(e.to_string()))?;
            self.inner = Some(handle);
        }

        if let Some(clipboard) = self.inner.as_mut() {
            clipboard
                .set_text(text.to_owned())
                .map_err(|e| ReportChatError::ClipboardError(e.to_string()))?;
            self.last_written = Some(text.to_owned());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_without_write_returns_immediately() {
        let clipboard = SystemClipboard::new();
        assert!(!clipboard.needs_hold());
        // Never opens a display connection, so this is safe headless
        assert!(clipboard.hold_until_taken().is_ok());
    }

    #[test]
    fn test_needs_hold_only_after_write_on_linux() {
        let clipboard = SystemClipboard {
            inner: None,
            last_written: Some("report.exe".to_string()),
        };
        assert_eq!(clipboard.needs_hold(), cfg!(target_os = "linux"));
    }
}
