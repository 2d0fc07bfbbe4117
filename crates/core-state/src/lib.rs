//! Interpreter state: mode, pending command, visual anchor and undo history.
//!
//! Everything here is plain data owned by one `ModalEditor` for one editing
//! session. Nothing is persisted.
//!
//! Pending command:
//! - `count` accumulates digits typed before a command. A leading `0` is never
//!   accumulated (bare `0` is the line-start motion), but `0` after another
//!   digit is (`10x`).
//! - `operator` / `operator_count` are set together when `d` is typed; the
//!   count typed before the operator moves into `operator_count` so a second
//!   count can accumulate for the motion (`2d3w`).
//! - `find` records an armed `f` / `t` waiting for its target character.
//!
//! Any completed or aborted command calls `reset`.

use core_text::Position;
use std::fmt;

pub mod undo;
pub use undo::{Snapshot, UndoEngine};

/// Active input mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    Normal,
    /// Typing goes straight to the primitive editor.
    #[default]
    Insert,
    /// Character-wise selection between the anchor and the cursor.
    Visual,
}

impl Mode {
    /// Upper-case name shown in the status label.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Visual => "VISUAL",
        }
    }

    /// Parse a configuration name (`normal`, `insert`, `visual`; any case).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "normal" => Some(Mode::Normal),
            "insert" => Some(Mode::Insert),
            "visual" => Some(Mode::Visual),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
}

impl Operator {
    pub fn key(self) -> char {
        match self {
            Operator::Delete => 'd',
        }
    }
}

/// Armed find-char prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindKind {
    /// `f`: land on the target.
    Forward,
    /// `t`: land just before the target.
    Till,
}

impl FindKind {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            'f' => Some(FindKind::Forward),
            't' => Some(FindKind::Till),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            FindKind::Forward => 'f',
            FindKind::Till => 't',
        }
    }
}

/// Transient sub-command state between keystrokes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingCommand {
    count: String,
    operator: Option<Operator>,
    operator_count: Option<u32>,
    find: Option<FindKind>,
}

impl PendingCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when any of count, operator or find is set.
    pub fn has_pending(&self) -> bool {
        !self.count.is_empty() || self.operator.is_some() || self.find.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Accumulate an ASCII digit. Returns false (and stores nothing) for a
    /// non-digit or for a leading `0`.
    pub fn push_digit(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() || (c == '0' && self.count.is_empty()) {
            return false;
        }
        self.count.push(c);
        true
    }

    pub fn has_count(&self) -> bool {
        !self.count.is_empty()
    }

    /// Accumulated count, if any digits were typed. Saturates at `u32::MAX`.
    pub fn count(&self) -> Option<u32> {
        if self.count.is_empty() {
            return None;
        }
        Some(self.count.bytes().fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        }))
    }

    /// Accumulated count or 1, clearing the digits.
    pub fn take_count(&mut self) -> u32 {
        let n = self.count().unwrap_or(1).max(1);
        self.count.clear();
        n
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    /// Arm `op`, moving any typed count into the operator count.
    pub fn begin_operator(&mut self, op: Operator) {
        self.operator_count = self.count();
        self.count.clear();
        self.operator = Some(op);
    }

    /// Count captured with the operator (1 when none was typed).
    pub fn operator_count(&self) -> u32 {
        self.operator_count.unwrap_or(1).max(1)
    }

    /// Composed repeat count: `max(1, operator_count × motion_count)`.
    pub fn composed_count(&self) -> u32 {
        let motion = self.count().unwrap_or(1).max(1);
        self.operator_count().saturating_mul(motion).max(1)
    }

    pub fn find(&self) -> Option<FindKind> {
        self.find
    }

    pub fn arm_find(&mut self, kind: FindKind) {
        self.find = Some(kind);
    }

    /// Label body for the status line: `{opCount}{op}{count}{find}`.
    /// Empty when nothing is pending.
    pub fn display(&self) -> String {
        let mut out = String::new();
        if let Some(op) = self.operator {
            if let Some(n) = self.operator_count {
                out.push_str(&n.to_string());
            }
            out.push(op.key());
        }
        out.push_str(&self.count);
        if let Some(find) = self.find {
            out.push(find.key());
        }
        out
    }
}

/// Visual-mode selection anchor. `None` whenever Visual mode is inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    anchor: Option<Position>,
}

impl Selection {
    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    pub fn start(&mut self, at: Position) {
        self.anchor = Some(at);
    }

    pub fn clear(&mut self) {
        self.anchor = None;
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Half-open linear range `[start, end)` covering anchor and cursor
    /// inclusively, or `None` without an anchor.
    pub fn range(&self, lines: &[String], cursor: Position) -> Option<(usize, usize)> {
        self.anchor
            .map(|anchor| core_text::selection_range(lines, anchor, cursor))
    }
}
