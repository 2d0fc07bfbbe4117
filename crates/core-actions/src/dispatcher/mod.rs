//! Dispatcher applying `Action` to a `ModalEditor`.
//!
//! Sub-modules:
//! * `motion`    - cursor movement (`h j k l 0 $ w b e E`)
//! * `find`      - `f` / `t` arming and resolution
//! * `mode`      - mode switches and Escape
//! * `edit`      - `x D J`, `d` + motion, visual delete
//! * `clipboard` - `y Y p`
//! * `undo`      - `u U`
//!
//! Every command that completes resets the pending sub-command. Only `d` and
//! the `f` / `t` prefixes leave state pending for the next key.

use crate::{Action, ModalEditor};
use core_events::KeyToken;
use core_model::{EditCommand, PrimitiveEditor};
use core_state::Mode;
use core_text::Position;
use tracing::trace;

mod clipboard;
mod edit;
mod find;
mod mode;
mod motion;
mod undo;

/// Largest repeat count honoured by commands that grow the document
/// (`o`, `O`, `p`). Larger counts are clamped to it.
pub const MAX_INSERT_REPEAT: usize = 1000;

/// Largest payload, in bytes, a single `p` may insert. Bigger pastes are
/// aborted without touching the text.
pub const MAX_PASTE_BYTES: usize = 16 << 20;

/// Result of dispatching a single key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchResult {
    /// Text, cursor, mode or pending label changed; a re-render is needed.
    pub dirty: bool,
    /// The key went to the primitive editor's raw passthrough.
    pub forwarded: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            forwarded: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            forwarded: false,
        }
    }
    pub fn forwarded(dirty: bool) -> Self {
        Self {
            dirty,
            forwarded: true,
        }
    }

    /// Combine results of consecutive keys.
    pub fn merge(self, other: Self) -> Self {
        Self {
            dirty: self.dirty || other.dirty,
            forwarded: self.forwarded || other.forwarded,
        }
    }
}

pub(crate) fn dispatch<E: PrimitiveEditor>(
    action: Action,
    key: &KeyToken,
    ed: &mut ModalEditor<E>,
) -> DispatchResult {
    let result = match action {
        Action::Escape => mode::handle_escape(ed, key),
        Action::Forward => forward(ed, key),
        Action::FindTarget(c) => find::resolve(ed, c),
        Action::CancelPending => cancel(ed),
        Action::Count(c) => {
            ed.pending.push_digit(c);
            DispatchResult::dirty()
        }
        Action::OperatorMotion(c) => edit::resolve_operator(ed, c),
        Action::Command(c) => match ed.mode {
            Mode::Visual => visual_command(ed, c),
            _ => normal_command(ed, c),
        },
    };
    trace!(
        target: "actions.dispatch",
        ?action,
        mode = %ed.mode,
        dirty = result.dirty,
        forwarded = result.forwarded,
        "dispatch"
    );
    result
}

fn normal_command<E: PrimitiveEditor>(ed: &mut ModalEditor<E>, c: char) -> DispatchResult {
    match c {
        'h' | 'j' | 'k' | 'l' | '0' | '$' | 'w' | 'b' | 'e' | 'E' => motion::handle_motion(ed, c),
        'f' | 't' => find::arm(ed, c),
        'i' | 'a' | 'I' | 'A' | 'o' | 'O' | 'v' => mode::handle_mode_key(ed, c),
        'x' => edit::delete_chars(ed),
        'd' => edit::begin_delete(ed),
        'D' => edit::delete_to_line_end(ed),
        'J' => edit::join_lines(ed),
        'u' => undo::handle_undo(ed),
        'U' => undo::handle_redo(ed),
        'y' | 'Y' => clipboard::yank_line(ed),
        'p' => clipboard::paste_after(ed),
        _ => cancel(ed),
    }
}

fn visual_command<E: PrimitiveEditor>(ed: &mut ModalEditor<E>, c: char) -> DispatchResult {
    match c {
        'h' | 'j' | 'k' | 'l' | '0' | '$' | 'w' | 'b' | 'e' | 'E' => motion::handle_motion(ed, c),
        'f' | 't' => find::arm(ed, c),
        'v' => mode::leave_visual(ed),
        'd' | 'x' => edit::delete_selection(ed),
        'y' => clipboard::yank_selection(ed),
        'Y' => clipboard::yank_selected_lines(ed),
        'p' => clipboard::paste_over_selection(ed),
        'u' => undo::handle_undo(ed),
        'U' => undo::handle_redo(ed),
        _ => cancel(ed),
    }
}

/// Unrecognised printable key or malformed sub-command.
fn cancel<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    let had_pending = ed.pending.has_pending();
    ed.pending.reset();
    if had_pending {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

/// Raw passthrough, tracked so host-side edits are undoable.
pub(super) fn forward<E: PrimitiveEditor>(ed: &mut ModalEditor<E>, key: &KeyToken) -> DispatchResult {
    ed.pending.reset();
    let consumed = ed.with_tracked_edit(|ed| ed.editor.handle_raw(key));
    DispatchResult::forwarded(consumed)
}

/// Consume the pending count (composed with any operator count) and reset
/// the pending state.
pub(super) fn take_count<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> usize {
    let n = ed.pending.composed_count();
    ed.pending.reset();
    usize::try_from(n).unwrap_or(usize::MAX)
}

/// Move the cursor to `target` (clamped) using primitive moves only.
pub(crate) fn place_cursor<E: PrimitiveEditor>(editor: &mut E, target: Position) {
    let lines = editor.lines();
    let target = target.clamped(&lines);
    let current = editor.cursor();
    editor.apply(EditCommand::LineStart);
    if target.line < current.line {
        editor.apply(EditCommand::MoveUp(current.line - target.line));
    } else if target.line > current.line {
        editor.apply(EditCommand::MoveDown(target.line - current.line));
    }
    editor.apply(EditCommand::LineStart);
    if target.col > 0 {
        editor.apply(EditCommand::MoveRight(target.col));
    }
}

/// Grapheme count of the cursor line.
pub(super) fn current_line_len<E: PrimitiveEditor>(editor: &E) -> usize {
    let cursor = editor.cursor();
    editor
        .lines()
        .get(cursor.line)
        .map(|l| core_text::grapheme::count(l))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::TextArea;

    #[test]
    fn place_cursor_crosses_lines_and_clamps() {
        let mut t = TextArea::new("first\nsecond line\nx");
        place_cursor(&mut t, Position::new(1, 7));
        assert_eq!(t.cursor(), Position::new(1, 7));
        place_cursor(&mut t, Position::new(0, 99));
        assert_eq!(t.cursor(), Position::new(0, 5));
        place_cursor(&mut t, Position::new(9, 3));
        assert_eq!(t.cursor(), Position::new(2, 1));
    }

    #[test]
    fn merge_keeps_any_flag() {
        let r = DispatchResult::clean().merge(DispatchResult::forwarded(false));
        assert!(r.forwarded);
        assert!(!r.dirty);
        assert!(r.merge(DispatchResult::dirty()).dirty);
    }
}
