//! Cursor motions.
//!
//! `h` / `l` stop at the line edges (the host's left/right would wrap to the
//! neighbouring line). `j` / `k` stop at the first and last line. `w` / `b`
//! reuse the host's word hops; `e` / `E` are computed here and applied with
//! `place_cursor`. Counts repeat the motion; repetition stops early once the
//! cursor stops moving.

use super::{DispatchResult, current_line_len, place_cursor, take_count};
use crate::ModalEditor;
use core_model::{EditCommand, PrimitiveEditor};
use core_text::motion::word_end;

pub(super) fn handle_motion<E: PrimitiveEditor>(ed: &mut ModalEditor<E>, key: char) -> DispatchResult {
    let n = take_count(ed);
    let before = ed.editor.cursor();
    let line_count = ed.editor.lines().len();
    match key {
        'h' => {
            let steps = n.min(before.col);
            if steps > 0 {
                ed.editor.apply(EditCommand::MoveLeft(steps));
            }
        }
        'l' => {
            let steps = n.min(current_line_len(&ed.editor).saturating_sub(before.col));
            if steps > 0 {
                ed.editor.apply(EditCommand::MoveRight(steps));
            }
        }
        'j' => {
            let steps = n.min(line_count.saturating_sub(1).saturating_sub(before.line));
            if steps > 0 {
                ed.editor.apply(EditCommand::MoveDown(steps));
            }
        }
        'k' => {
            let steps = n.min(before.line);
            if steps > 0 {
                ed.editor.apply(EditCommand::MoveUp(steps));
            }
        }
        '0' => ed.editor.apply(EditCommand::LineStart),
        '$' => ed.editor.apply(EditCommand::LineEnd),
        'w' => repeat_hop(&mut ed.editor, EditCommand::WordRight, n),
        'b' => repeat_hop(&mut ed.editor, EditCommand::WordLeft, n),
        'e' | 'E' => {
            let lines = ed.editor.lines();
            let mut target = before;
            for _ in 0..n {
                let next = word_end(&lines, target, key == 'E');
                if next == target {
                    break;
                }
                target = next;
            }
            place_cursor(&mut ed.editor, target);
        }
        _ => {}
    }
    let after = ed.editor.cursor();
    tracing::trace!(
        target: "actions.dispatch",
        motion = %key,
        count = n,
        from_line = before.line,
        from_col = before.col,
        to_line = after.line,
        to_col = after.col,
        "motion"
    );
    DispatchResult::dirty()
}

fn repeat_hop<E: PrimitiveEditor>(editor: &mut E, hop: EditCommand, n: usize) {
    for _ in 0..n {
        let before = editor.cursor();
        editor.apply(hop.clone());
        if editor.cursor() == before {
            break;
        }
    }
}
