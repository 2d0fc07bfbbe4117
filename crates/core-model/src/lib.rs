//! Primitive editor boundary.
//!
//! The modal interpreter never edits text directly. It drives a host
//! "primitive editor" (the single/multi-line input widget that already exists
//! in the host application) through the enumerated `EditCommand` set and reads
//! back text, lines and cursor. Anything the interpreter does not intercept is
//! passed through `handle_raw` unchanged.
//!
//! Cursor contract: after every command the cursor is a valid position,
//! `line < lines().len()` and `col <= grapheme count of that line`. Moves past
//! the document edges saturate.
//!
//! `TextArea` is the in-memory implementation used by the demo host and by
//! the test suites.

use core_events::KeyToken;
use core_text::Position;

mod textarea;
pub use textarea::TextArea;

/// Commands the interpreter issues against a primitive editor.
///
/// Counts on moves are repeat counts; a zero count is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Left by n clusters; at column 0 continues at the end of the previous line.
    MoveLeft(usize),
    /// Right by n clusters; at line end continues at the start of the next line.
    MoveRight(usize),
    /// Up n lines, column clamped to the target line.
    MoveUp(usize),
    /// Down n lines, column clamped to the target line.
    MoveDown(usize),
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    /// Delete the cluster under the cursor; at line end joins the next line.
    DeleteCharForward,
    DeleteWordForward,
    DeleteWordBackward,
    /// Delete to line end; at line end deletes the line break instead.
    DeleteToLineEnd,
    InsertNewline,
    /// Insert text at the cursor (may contain `\n`), cursor ends after it.
    InsertText(String),
}

/// Capability interface of the host editor the modal layer wraps.
pub trait PrimitiveEditor {
    /// Full document joined with `\n`.
    fn text(&self) -> String;

    /// Replace the whole document. Cursor placement afterwards is the
    /// implementation's choice; callers reposition explicitly.
    fn set_text(&mut self, text: &str);

    /// Logical lines (never empty: an empty document is one empty line).
    fn lines(&self) -> Vec<String>;

    fn cursor(&self) -> Position;

    fn apply(&mut self, command: EditCommand);

    /// Raw passthrough for keys the interpreter does not handle. Returns true
    /// when the editor consumed the key.
    fn handle_raw(&mut self, key: &KeyToken) -> bool;

    /// Whether the widget currently owns keyboard focus (controls the cursor
    /// marker in rendered output).
    fn is_focused(&self) -> bool {
        true
    }
}
