//! Yank and paste.
//!
//! Normal `y` / `Y` copy the cursor line without its newline. Visual `y`
//! copies the selection, visual `Y` the whole lines it touches. `p` inserts
//! after the cursor in Normal mode and overwrites the selection in Visual
//! mode; either way the cursor ends on the last inserted character.

use super::{DispatchResult, MAX_INSERT_REPEAT, MAX_PASTE_BYTES, place_cursor, take_count};
use crate::ModalEditor;
use core_model::PrimitiveEditor;
use core_state::Mode;
use core_text::offset::{replace_linear, slice_linear, to_linear_index, to_position};
use core_text::{Position, grapheme};
use tracing::trace;

pub(super) fn yank_line<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    ed.pending.reset();
    let line = ed.editor.cursor().line;
    let text = ed.editor.lines().get(line).cloned().unwrap_or_default();
    ed.clipboard.copy(&text);
    trace!(target: "actions.dispatch", op = "yank_line", units = grapheme::count(&text), "yank");
    DispatchResult::dirty()
}

pub(super) fn yank_selection<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    ed.pending.reset();
    let lines = ed.editor.lines();
    if let Some((start, end)) = ed.selection.range(&lines, ed.editor.cursor()) {
        let text = slice_linear(&lines, start, end);
        ed.clipboard.copy(&text);
        place_cursor(&mut ed.editor, to_position(&lines.join("\n"), start));
        trace!(target: "actions.dispatch", op = "yank_selection", units = end - start, "yank");
    }
    finish_visual(ed)
}

pub(super) fn yank_selected_lines<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    ed.pending.reset();
    if let Some(anchor) = ed.selection.anchor() {
        let lines = ed.editor.lines();
        let cursor = ed.editor.cursor();
        let first = anchor.line.min(cursor.line);
        let last = anchor.line.max(cursor.line).min(lines.len().saturating_sub(1));
        let text = lines.get(first..=last).map(|l| l.join("\n")).unwrap_or_default();
        ed.clipboard.copy(&text);
        place_cursor(&mut ed.editor, Position::new(first, 0));
        trace!(target: "actions.dispatch", op = "yank_lines", lines = last + 1 - first, "yank");
    }
    finish_visual(ed)
}

/// Normal `p`: insert `count` copies after the cursor (at the cursor when it
/// sits at line end). The count is clamped to `MAX_INSERT_REPEAT`; a payload
/// over `MAX_PASTE_BYTES` aborts the command.
pub(super) fn paste_after<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    let n = take_count(ed).min(MAX_INSERT_REPEAT);
    let Some(text) = ed.clipboard.paste() else {
        return DispatchResult::dirty();
    };
    let Some(payload) = repeat_payload(&text, n) else {
        trace!(target: "actions.dispatch", op = "paste", bytes = text.len(), count = n, "paste_aborted");
        return DispatchResult::dirty();
    };
    let lines = ed.editor.lines();
    let cursor = ed.editor.cursor().clamped(&lines);
    let line_len = lines.get(cursor.line).map(|l| grapheme::count(l)).unwrap_or(0);
    let idx = to_linear_index(&lines, cursor);
    let at = if cursor.col < line_len { idx + 1 } else { idx };
    splice(ed, &lines, at, at, &payload);
    DispatchResult::dirty()
}

/// Visual `p`: overwrite the selection. Without an anchor or clipboard
/// content this only returns to Normal mode.
pub(super) fn paste_over_selection<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    ed.pending.reset();
    let lines = ed.editor.lines();
    let range = ed.selection.range(&lines, ed.editor.cursor());
    let text = range.and_then(|_| ed.clipboard.paste());
    match (range, text) {
        (Some((start, end)), Some(text)) => splice(ed, &lines, start, end, &text),
        _ => trace!(target: "actions.dispatch", op = "visual_paste", "paste_aborted"),
    }
    finish_visual(ed)
}

/// Replace linear `[start, end)` with `payload` in one tracked edit and put
/// the cursor on the last inserted unit.
fn splice<E: PrimitiveEditor>(ed: &mut ModalEditor<E>, lines: &[String], start: usize, end: usize, payload: &str) {
    let inserted = linear_len(payload);
    ed.with_tracked_edit(|ed| {
        let text = replace_linear(lines, start, end, payload);
        ed.editor.set_text(&text);
        let last = if inserted > 0 { start + inserted - 1 } else { start };
        place_cursor(&mut ed.editor, to_position(&text, last));
    });
    trace!(target: "actions.dispatch", op = "paste", units = inserted, replaced = end - start, "paste");
}

/// `n` copies of `text`, or `None` when the result would exceed
/// `MAX_PASTE_BYTES` or cannot be allocated.
fn repeat_payload(text: &str, n: usize) -> Option<String> {
    if text.is_empty() {
        return Some(String::new());
    }
    let bytes = text.len().checked_mul(n).filter(|&b| b <= MAX_PASTE_BYTES)?;
    let mut payload = String::new();
    payload.try_reserve_exact(bytes).ok()?;
    for _ in 0..n {
        payload.push_str(text);
    }
    Some(payload)
}

fn finish_visual<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    ed.selection.clear();
    ed.mode = Mode::Normal;
    DispatchResult::dirty()
}

/// Length of `text` in linear units (clusters plus one per line break).
fn linear_len(text: &str) -> usize {
    text.split('\n').map(grapheme::count).sum::<usize>() + text.matches('\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_len_counts_breaks_once() {
        assert_eq!(linear_len("abc"), 3);
        assert_eq!(linear_len("a\nb"), 3);
        assert_eq!(linear_len("e\u{301}\n"), 2);
        assert_eq!(linear_len(""), 0);
    }

    #[test]
    fn repeat_payload_respects_the_byte_ceiling() {
        assert_eq!(repeat_payload("ab", 3).as_deref(), Some("ababab"));
        assert_eq!(repeat_payload("", usize::MAX).as_deref(), Some(""));
        assert_eq!(repeat_payload("ab", usize::MAX), None);
        assert!(repeat_payload("x", MAX_PASTE_BYTES + 1).is_none());
    }
}
