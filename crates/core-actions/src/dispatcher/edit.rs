//! Text mutation: `x`, `D`, `J`, `d` + motion, and visual delete.
//!
//! Each command issues primitive edits inside one tracked edit, so it lands
//! as exactly one undo entry. Counts are clamped to what the document can
//! still give (clusters left on the line, lines left below) before looping.

use super::{DispatchResult, current_line_len, place_cursor, take_count};
use crate::ModalEditor;
use core_model::{EditCommand, PrimitiveEditor};
use core_state::{FindKind, Mode, Operator};
use core_text::offset::{replace_linear, to_position, total_len};
use core_text::{Position, grapheme};
use tracing::trace;

/// `x`: delete `count` clusters forward, never joining the next line.
pub(super) fn delete_chars<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    let n = take_count(ed);
    let col = ed.editor.cursor().col;
    let n = n.min(current_line_len(&ed.editor).saturating_sub(col));
    if n == 0 {
        return DispatchResult::dirty();
    }
    ed.with_tracked_edit(|ed| repeat(&mut ed.editor, EditCommand::DeleteCharForward, n));
    trace!(target: "actions.dispatch", op = "x", count = n, "delete_chars");
    DispatchResult::dirty()
}

/// `d`: arm the delete operator; the next key picks the motion.
pub(super) fn begin_delete<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    ed.pending.begin_operator(Operator::Delete);
    DispatchResult::dirty()
}

/// `D`: delete to line end. A cursor already at the end leaves the line
/// break alone.
pub(super) fn delete_to_line_end<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    ed.pending.reset();
    if ed.editor.cursor().col < current_line_len(&ed.editor) {
        ed.with_tracked_edit(|ed| ed.editor.apply(EditCommand::DeleteToLineEnd));
    }
    DispatchResult::dirty()
}

/// `J`: join `max(1, count - 1)` following lines onto the cursor line.
pub(super) fn join_lines<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    let times = take_count(ed).saturating_sub(1).max(1);
    ed.with_tracked_edit(|ed| {
        for _ in 0..times {
            if !join_next(&mut ed.editor) {
                break;
            }
        }
    });
    DispatchResult::dirty()
}

/// Join the next line, dropping its leading whitespace and separating the
/// two halves with one space unless either is empty. The cursor rests on the
/// join point. Returns false on the last line.
fn join_next<E: PrimitiveEditor>(editor: &mut E) -> bool {
    let lines = editor.lines();
    let line = editor.cursor().line;
    let Some(next) = lines.get(line + 1) else {
        return false;
    };
    let left_len = grapheme::count(&lines[line]);
    let leading_blank = grapheme::iter(next)
        .take_while(|g| grapheme::is_whitespace(g))
        .count();
    let right_empty = leading_blank == grapheme::count(next);

    editor.apply(EditCommand::LineEnd);
    editor.apply(EditCommand::DeleteCharForward);
    repeat(editor, EditCommand::DeleteCharForward, leading_blank);
    if left_len > 0 && !right_empty {
        editor.apply(EditCommand::InsertText(" ".to_string()));
        editor.apply(EditCommand::MoveLeft(1));
    }
    true
}

/// Resolve the key typed after `d`.
pub(super) fn resolve_operator<E: PrimitiveEditor>(ed: &mut ModalEditor<E>, key: char) -> DispatchResult {
    if let Some(kind) = FindKind::from_key(key) {
        ed.pending.arm_find(kind);
        return DispatchResult::dirty();
    }
    let n = take_count(ed);
    let bound = total_len(&ed.editor.lines()) + 1;
    match key {
        'd' => ed.with_tracked_edit(|ed| delete_lines(&mut ed.editor, n)),
        'w' | 'e' => ed.with_tracked_edit(|ed| {
            repeat(&mut ed.editor, EditCommand::DeleteWordForward, n.min(bound))
        }),
        'b' => ed.with_tracked_edit(|ed| {
            repeat(&mut ed.editor, EditCommand::DeleteWordBackward, n.min(bound))
        }),
        'l' => {
            let col = ed.editor.cursor().col;
            let n = n.min(current_line_len(&ed.editor).saturating_sub(col));
            ed.with_tracked_edit(|ed| repeat(&mut ed.editor, EditCommand::DeleteCharForward, n));
        }
        _ => {
            trace!(target: "actions.dispatch", motion = %key, "operator_aborted");
            return DispatchResult::dirty();
        }
    }
    trace!(target: "actions.dispatch", op = "d", motion = %key, count = n, "operator");
    DispatchResult::dirty()
}

/// Delete `n` whole lines starting at the cursor line; the cursor ends on the
/// first non-blank of the line that takes their place.
fn delete_lines<E: PrimitiveEditor>(editor: &mut E, n: usize) {
    let line_count = editor.lines().len();
    let n = n.min(line_count - editor.cursor().line.min(line_count - 1));
    for _ in 0..n {
        let lines = editor.lines();
        let line = editor.cursor().line;
        let has_text = lines.get(line).is_some_and(|l| !l.is_empty());
        editor.apply(EditCommand::LineStart);
        if has_text {
            editor.apply(EditCommand::DeleteToLineEnd);
        }
        if line + 1 < lines.len() {
            // Now at the end of an empty line: this removes the break.
            editor.apply(EditCommand::DeleteToLineEnd);
        } else if line > 0 {
            editor.apply(EditCommand::MoveLeft(1));
            editor.apply(EditCommand::DeleteCharForward);
        }
    }
    let lines = editor.lines();
    let line = editor.cursor().line;
    let first = lines
        .get(line)
        .map(|l| grapheme::first_non_blank(l))
        .unwrap_or(0);
    place_cursor(editor, Position::new(line, first));
}

/// Visual `d` / `x`: remove the selection and return to Normal mode.
pub(super) fn delete_selection<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    ed.pending.reset();
    let lines = ed.editor.lines();
    if let Some((start, end)) = ed.selection.range(&lines, ed.editor.cursor())
        && start < end
    {
        ed.with_tracked_edit(|ed| {
            let text = replace_linear(&lines, start, end, "");
            ed.editor.set_text(&text);
            place_cursor(&mut ed.editor, to_position(&text, start));
        });
        trace!(target: "actions.dispatch", op = "visual_delete", units = end - start, "delete_selection");
    }
    ed.selection.clear();
    ed.mode = Mode::Normal;
    DispatchResult::dirty()
}

fn repeat<E: PrimitiveEditor>(editor: &mut E, command: EditCommand, n: usize) {
    for _ in 0..n {
        editor.apply(command.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::TextArea;

    fn at(text: &str, line: usize, col: usize) -> TextArea {
        let mut t = TextArea::new(text);
        place_cursor(&mut t, Position::new(line, col));
        t
    }

    #[test]
    fn delete_lines_middle_and_last() {
        let mut t = at("one\n  two\nthree", 0, 2);
        delete_lines(&mut t, 1);
        assert_eq!(t.text(), "  two\nthree");
        assert_eq!(t.cursor(), Position::new(0, 2));

        let mut t = at("one\ntwo", 1, 1);
        delete_lines(&mut t, 1);
        assert_eq!(t.text(), "one");
        assert_eq!(t.cursor(), Position::new(0, 0));
    }

    #[test]
    fn delete_lines_handles_empty_lines_and_overcount() {
        let mut t = at("a\n\nb\nc", 1, 0);
        delete_lines(&mut t, 1);
        assert_eq!(t.text(), "a\nb\nc");

        let mut t = at("a\nb\nc", 1, 0);
        delete_lines(&mut t, 10);
        assert_eq!(t.text(), "a");

        let mut t = at("only", 0, 2);
        delete_lines(&mut t, 3);
        assert_eq!(t.text(), "");
    }

    #[test]
    fn join_strips_indent_and_skips_space_for_empty_sides() {
        let mut t = at("foo\n    bar", 0, 0);
        assert!(join_next(&mut t));
        assert_eq!(t.text(), "foo bar");
        assert_eq!(t.cursor(), Position::new(0, 3));

        let mut t = at("\nbar", 0, 0);
        join_next(&mut t);
        assert_eq!(t.text(), "bar");

        let mut t = at("foo\n   ", 0, 0);
        join_next(&mut t);
        assert_eq!(t.text(), "foo");
        assert!(!join_next(&mut t));
    }
}
