//! Clipboard capability for the modal layer.
//!
//! Two layers back every copy and paste:
//! * a process-local fallback string, updated on every copy;
//! * a pluggable `ClipboardBackend` (the OS clipboard via `SystemClipboard`,
//!   or `NoClipboard` when disabled).
//!
//! Reads prefer the backend and fall back to the local string when the backend
//! is unavailable, fails, or returns empty text. Backend failures never escape
//! this crate: they are logged (sizes and program names only, never content)
//! and reported as `ClipboardRead::Unavailable` / a `false` write.

use std::io;

mod osc52;
mod system;

pub use osc52::osc52_sequence;
pub use system::{ClipboardEnv, CommandSpec, SystemClipboard};

/// Failure classification for OS clipboard access. Internal to backends;
/// the public read/write surface reduces these to "unavailable".
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` timed out after {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },
    #[error("`{program}` exited with status {code:?}")]
    Exit { program: String, code: Option<i32> },
    #[error("clipboard io: {0}")]
    Io(#[from] io::Error),
    #[error("no clipboard command available on {0}")]
    Unsupported(String),
}

/// Outcome of a backend read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardRead {
    Text(String),
    Unavailable,
}

/// External clipboard capability.
pub trait ClipboardBackend {
    /// Best-effort write; true when the text reached the external clipboard.
    fn write(&mut self, text: &str) -> bool;

    fn read(&mut self) -> ClipboardRead;
}

/// Backend used when external clipboard access is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl ClipboardBackend for NoClipboard {
    fn write(&mut self, _text: &str) -> bool {
        false
    }

    fn read(&mut self) -> ClipboardRead {
        ClipboardRead::Unavailable
    }
}

/// Fallback buffer plus external backend.
pub struct ClipboardManager {
    backend: Box<dyn ClipboardBackend>,
    fallback: String,
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::local()
    }
}

impl ClipboardManager {
    pub fn new(backend: Box<dyn ClipboardBackend>) -> Self {
        Self {
            backend,
            fallback: String::new(),
        }
    }

    /// Process-local clipboard only.
    pub fn local() -> Self {
        Self::new(Box::new(NoClipboard))
    }

    /// Store `text` locally and push it to the backend.
    pub fn copy(&mut self, text: &str) {
        self.fallback.clear();
        self.fallback.push_str(text);
        let external = self.backend.write(text);
        tracing::debug!(target: "clipboard", bytes = text.len(), external, "copy");
    }

    /// Current clipboard contents, `None` when both layers are empty.
    pub fn paste(&mut self) -> Option<String> {
        match self.backend.read() {
            ClipboardRead::Text(text) if !text.is_empty() => {
                tracing::debug!(target: "clipboard", bytes = text.len(), source = "external", "paste");
                Some(text)
            }
            _ if !self.fallback.is_empty() => {
                tracing::debug!(target: "clipboard", bytes = self.fallback.len(), source = "fallback", "paste");
                Some(self.fallback.clone())
            }
            _ => {
                tracing::debug!(target: "clipboard", "paste_empty");
                None
            }
        }
    }

    /// The process-local copy, regardless of the backend.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Backend sharing its contents with the test body.
    #[derive(Clone, Default)]
    struct SharedBackend {
        contents: Rc<RefCell<Option<String>>>,
        accept_writes: bool,
    }

    impl ClipboardBackend for SharedBackend {
        fn write(&mut self, text: &str) -> bool {
            if self.accept_writes {
                *self.contents.borrow_mut() = Some(text.to_string());
            }
            self.accept_writes
        }

        fn read(&mut self) -> ClipboardRead {
            match self.contents.borrow().clone() {
                Some(text) => ClipboardRead::Text(text),
                None => ClipboardRead::Unavailable,
            }
        }
    }

    #[test]
    fn local_clipboard_round_trips() {
        let mut cb = ClipboardManager::local();
        assert_eq!(cb.paste(), None);
        cb.copy("abc");
        assert_eq!(cb.paste().as_deref(), Some("abc"));
        assert_eq!(cb.fallback(), "abc");
    }

    #[test]
    fn external_contents_win_when_available() {
        let backend = SharedBackend {
            accept_writes: true,
            ..Default::default()
        };
        let shared = backend.contents.clone();
        let mut cb = ClipboardManager::new(Box::new(backend));
        cb.copy("mine");
        *shared.borrow_mut() = Some("from another app".to_string());
        assert_eq!(cb.paste().as_deref(), Some("from another app"));
    }

    #[test]
    fn empty_or_failed_external_read_uses_fallback() {
        let backend = SharedBackend::default();
        let shared = backend.contents.clone();
        let mut cb = ClipboardManager::new(Box::new(backend));
        cb.copy("kept");
        assert_eq!(cb.paste().as_deref(), Some("kept"));
        *shared.borrow_mut() = Some(String::new());
        assert_eq!(cb.paste().as_deref(), Some("kept"));
    }

    #[test]
    fn errors_render_program_names() {
        let err = ClipboardError::Timeout {
            program: "xclip".into(),
            timeout_ms: 500,
        };
        assert_eq!(err.to_string(), "`xclip` timed out after 500ms");
        let err = ClipboardError::Unsupported("plan9".into());
        assert!(err.to_string().contains("plan9"));
    }
}
