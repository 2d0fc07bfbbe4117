//! `f<char>` / `t<char>`.
//!
//! The search runs forward from `col + 1` on the cursor line only. The
//! composed count N selects the N-th occurrence; fewer than N occurrences
//! aborts the whole command with no change. With a pending `d` the span up to
//! (`f`) or before (`t`) the hit is deleted once, as a batch of forward
//! character deletes inside one tracked edit.

use super::{DispatchResult, take_count};
use crate::ModalEditor;
use core_model::{EditCommand, PrimitiveEditor};
use core_state::{FindKind, Operator};
use core_text::grapheme;
use tracing::trace;

pub(super) fn arm<E: PrimitiveEditor>(ed: &mut ModalEditor<E>, key: char) -> DispatchResult {
    if let Some(kind) = FindKind::from_key(key) {
        ed.pending.arm_find(kind);
    }
    DispatchResult::dirty()
}

pub(super) fn resolve<E: PrimitiveEditor>(ed: &mut ModalEditor<E>, target: char) -> DispatchResult {
    let Some(kind) = ed.pending.find() else {
        return DispatchResult::clean();
    };
    let operator = ed.pending.operator();
    let n = take_count(ed);
    let cursor = ed.editor.cursor();
    let lines = ed.editor.lines();
    let line = lines.get(cursor.line).map(String::as_str).unwrap_or("");
    let Some(found) = find_nth(line, cursor.col, target, n) else {
        trace!(target: "actions.dispatch", kind = ?kind, count = n, "find_exhausted");
        return DispatchResult::dirty();
    };
    match operator {
        None => {
            let dest = match kind {
                FindKind::Forward => found,
                FindKind::Till => found.saturating_sub(1).max(cursor.col),
            };
            if dest > cursor.col {
                ed.editor.apply(EditCommand::MoveRight(dest - cursor.col));
            }
        }
        Some(Operator::Delete) => {
            let span = match kind {
                FindKind::Forward => found - cursor.col + 1,
                FindKind::Till => found - cursor.col,
            };
            ed.with_tracked_edit(|ed| {
                for _ in 0..span {
                    ed.editor.apply(EditCommand::DeleteCharForward);
                }
            });
        }
    }
    trace!(target: "actions.dispatch", kind = ?kind, count = n, found, "find");
    DispatchResult::dirty()
}

/// Column of the `n`-th occurrence of `target` strictly after `col`.
pub(super) fn find_nth(line: &str, col: usize, target: char, n: usize) -> Option<usize> {
    let mut buf = [0u8; 4];
    let needle: &str = target.encode_utf8(&mut buf);
    grapheme::iter(line)
        .enumerate()
        .skip(col + 1)
        .filter(|(_, g)| *g == needle)
        .nth(n.max(1) - 1)
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_occurrences_after_cursor() {
        assert_eq!(find_nth("abcgxgyz", 0, 'g', 1), Some(3));
        assert_eq!(find_nth("abcgxgyz", 0, 'g', 2), Some(5));
        assert_eq!(find_nth("abcgxgyz", 0, 'g', 3), None);
        assert_eq!(find_nth("gg", 0, 'g', 1), Some(1), "cursor cluster is skipped");
    }

    #[test]
    fn columns_are_clusters() {
        assert_eq!(find_nth("e\u{301}xe\u{301}x", 0, 'x', 2), Some(3));
    }
}
