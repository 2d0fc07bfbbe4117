//! Mode transitions.
//!
//! Escape leaves Insert and Visual for Normal. In Normal mode it cancels a
//! pending sub-command, or, with nothing pending, is forwarded to the host
//! unchanged so the host can use it (e.g. to blur the widget).

use super::{DispatchResult, MAX_INSERT_REPEAT, current_line_len, forward, place_cursor, take_count};
use crate::ModalEditor;
use core_events::KeyToken;
use core_model::{EditCommand, PrimitiveEditor};
use core_state::Mode;
use core_text::{Position, grapheme};
use tracing::debug;

pub(super) fn handle_escape<E: PrimitiveEditor>(ed: &mut ModalEditor<E>, key: &KeyToken) -> DispatchResult {
    match ed.mode {
        Mode::Insert => {
            ed.pending.reset();
            set_mode(ed, Mode::Normal);
            DispatchResult::dirty()
        }
        Mode::Visual => leave_visual(ed),
        Mode::Normal if ed.pending.has_pending() => {
            ed.pending.reset();
            DispatchResult::dirty()
        }
        Mode::Normal => forward(ed, key),
    }
}

pub(super) fn leave_visual<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    ed.pending.reset();
    ed.selection.clear();
    set_mode(ed, Mode::Normal);
    DispatchResult::dirty()
}

pub(super) fn handle_mode_key<E: PrimitiveEditor>(ed: &mut ModalEditor<E>, key: char) -> DispatchResult {
    let n = take_count(ed);
    let cursor = ed.editor.cursor();
    match key {
        'i' => {}
        'a' => {
            if cursor.col < current_line_len(&ed.editor) {
                ed.editor.apply(EditCommand::MoveRight(1));
            }
        }
        'I' => {
            let lines = ed.editor.lines();
            let first = lines
                .get(cursor.line)
                .map(|l| grapheme::first_non_blank(l))
                .unwrap_or(0);
            place_cursor(&mut ed.editor, Position::new(cursor.line, first));
        }
        'A' => ed.editor.apply(EditCommand::LineEnd),
        'o' => ed.with_tracked_edit(|ed| {
            for _ in 0..n.min(MAX_INSERT_REPEAT) {
                ed.editor.apply(EditCommand::LineEnd);
                ed.editor.apply(EditCommand::InsertNewline);
            }
        }),
        'O' => ed.with_tracked_edit(|ed| {
            for _ in 0..n.min(MAX_INSERT_REPEAT) {
                ed.editor.apply(EditCommand::LineStart);
                ed.editor.apply(EditCommand::InsertNewline);
                ed.editor.apply(EditCommand::MoveUp(1));
            }
        }),
        'v' => {
            ed.selection.start(cursor);
            set_mode(ed, Mode::Visual);
            return DispatchResult::dirty();
        }
        _ => return DispatchResult::clean(),
    }
    set_mode(ed, Mode::Insert);
    DispatchResult::dirty()
}

fn set_mode<E: PrimitiveEditor>(ed: &mut ModalEditor<E>, mode: Mode) {
    if ed.mode != mode {
        debug!(target: "actions.dispatch", from = %ed.mode, to = %mode, "mode_change");
        ed.mode = mode;
    }
}
