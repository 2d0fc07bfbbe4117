//! Terminal capability detection.
//!
//! Detection runs once at startup from the environment only (no probe
//! round-trips). A `dumb` or unset `TERM` disables every optional protocol;
//! the host then falls back to plain key events.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    /// Deliver pastes as one event instead of a key storm.
    pub bracketed_paste: bool,
    /// Report focus changes so the cursor marker follows focus.
    pub focus_events: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        Self::from_term(std::env::var("TERM").ok().as_deref())
    }

    pub fn from_term(term: Option<&str>) -> Self {
        let capable = !matches!(term, None | Some("") | Some("dumb"));
        Self {
            bracketed_paste: capable,
            focus_events: capable,
        }
    }
}
