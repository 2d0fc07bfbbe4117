//! Linear offsets over the `\n`-joined document.
//!
//! A linear index counts grapheme clusters from the start of the document,
//! with every line separator counting as exactly one. `to_linear_index` and
//! `to_position` are inverses for in-bounds positions; out-of-range input is
//! clamped instead of rejected.

use crate::{Position, grapheme};

/// Linear index of `pos` within `lines` joined by `\n` (clamped).
pub fn to_linear_index(lines: &[String], pos: Position) -> usize {
    let pos = pos.clamped(lines);
    let before: usize = lines
        .iter()
        .take(pos.line)
        .map(|l| grapheme::count(l) + 1)
        .sum();
    before + pos.col
}

/// Position of linear `index` in `text` (clamped to the document end).
pub fn to_position(text: &str, index: usize) -> Position {
    let mut remaining = index;
    let mut line_idx = 0usize;
    let mut lines = text.split('\n').peekable();
    while let Some(line) = lines.next() {
        let len = grapheme::count(line);
        if remaining <= len || lines.peek().is_none() {
            return Position::new(line_idx, remaining.min(len));
        }
        remaining -= len + 1;
        line_idx += 1;
    }
    Position::origin()
}

/// Inclusive visual selection between `anchor` and `cursor` as a half-open
/// linear range `[start, end)`. At least one unit wide unless both ends sit
/// at the very end of the document.
pub fn selection_range(lines: &[String], anchor: Position, cursor: Position) -> (usize, usize) {
    let a = to_linear_index(lines, anchor);
    let c = to_linear_index(lines, cursor);
    let total = total_len(lines);
    let start = a.min(c);
    let end = (a.max(c) + 1).min(total);
    (start.min(end), end)
}

/// Length of `lines` joined by `\n`, in linear units.
pub fn total_len(lines: &[String]) -> usize {
    if lines.is_empty() {
        return 0;
    }
    lines.iter().map(|l| grapheme::count(l)).sum::<usize>() + lines.len() - 1
}

/// Substring of the joined document covering linear `[start, end)`.
pub fn slice_linear(lines: &[String], start: usize, end: usize) -> String {
    let text = lines.join("\n");
    let mut out = String::new();
    let mut idx = 0usize;
    for line_or_sep in split_units(&text) {
        if idx >= end {
            break;
        }
        if idx >= start {
            out.push_str(line_or_sep);
        }
        idx += 1;
    }
    out
}

/// Replace linear `[start, end)` of the joined document with `replacement`.
/// Returns the new text.
pub fn replace_linear(lines: &[String], start: usize, end: usize, replacement: &str) -> String {
    let text = lines.join("\n");
    let mut out = String::with_capacity(text.len() + replacement.len());
    let mut idx = 0usize;
    let mut inserted = false;
    for unit in split_units(&text) {
        if idx == start && !inserted {
            out.push_str(replacement);
            inserted = true;
        }
        if idx < start || idx >= end {
            out.push_str(unit);
        }
        idx += 1;
    }
    if !inserted {
        out.push_str(replacement);
    }
    out
}

/// Iterate the document one linear unit at a time (clusters and `\n`).
fn split_units(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n').flat_map(|piece| {
        let (body, sep) = match piece.strip_suffix('\n') {
            Some(body) => (body, Some(&piece[piece.len() - 1..])),
            None => (piece, None),
        };
        grapheme::iter(body).chain(sep)
    })
}
