//! Wrapped layout of the logical document.
//!
//! Every logical line is split by the word-wrap segmenter into one or more
//! rows. Each row remembers where it came from (logical line, column range,
//! linear offset of its first cluster) so the cursor and the visual selection
//! can be projected onto it.
//!
//! Cursor ownership: a row owns the cursor when `start <= col < end`, except
//! the last row of a line which also owns `col >= start` (end-of-line cursor).

use core_text::{Position, grapheme, word_wrap_line};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    pub text: String,
    /// Logical line index.
    pub line: usize,
    /// First column (inclusive) within the logical line.
    pub start: usize,
    /// Last column (exclusive) within the logical line.
    pub end: usize,
    /// Linear offset of `start` in the `\n`-joined document.
    pub linear_start: usize,
    /// True for the row holding the end of its logical line.
    pub last_in_line: bool,
    /// Row-local cursor column, when this row owns the cursor.
    pub cursor: Option<usize>,
}

impl LayoutLine {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Linear offset one past the row's last cluster (the line break for the
    /// last row of a line).
    pub fn linear_end(&self) -> usize {
        self.linear_start + self.len()
    }
}

/// Lay out `lines` into rows at most `width` cells wide.
pub fn layout(lines: &[String], cursor: Position, width: usize) -> Vec<LayoutLine> {
    let mut rows = Vec::new();
    let mut linear_base = 0usize;
    let cursor = cursor.clamped(lines);
    for (line_idx, line) in lines.iter().enumerate() {
        let chunks = word_wrap_line(line, width);
        let last = chunks.len() - 1;
        for (i, chunk) in chunks.into_iter().enumerate() {
            let is_last = i == last;
            let owns_cursor = line_idx == cursor.line
                && cursor.col >= chunk.start
                && (is_last || cursor.col < chunk.end);
            rows.push(LayoutLine {
                linear_start: linear_base + chunk.start,
                line: line_idx,
                start: chunk.start,
                end: chunk.end,
                last_in_line: is_last,
                cursor: owns_cursor.then(|| cursor.col - chunk.start),
                text: chunk.text,
            });
        }
        linear_base += grapheme::count(line) + 1;
    }
    if rows.is_empty() {
        rows.push(LayoutLine {
            text: String::new(),
            line: 0,
            start: 0,
            end: 0,
            linear_start: 0,
            last_in_line: true,
            cursor: Some(0),
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn short_lines_map_one_to_one() {
        let rows = layout(&lines("ab\ncde"), Position::new(1, 1), 10);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].linear_start, 3);
        assert_eq!(rows[1].cursor, Some(1));
        assert_eq!(rows[0].cursor, None);
    }

    #[test]
    fn wrapped_line_assigns_cursor_to_owning_row() {
        let l = lines("hello world again");
        let rows = layout(&l, Position::new(0, 13), 12);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].start, 12);
        assert_eq!(rows[1].cursor, Some(1));
        assert_eq!(rows[0].cursor, None);
    }

    #[test]
    fn end_of_line_cursor_lands_on_last_row() {
        let l = lines("abcdefgh");
        let rows = layout(&l, Position::new(0, 8), 4);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].cursor, Some(4));
        assert!(rows[1].last_in_line);
    }

    #[test]
    fn boundary_column_belongs_to_next_row() {
        let l = lines("abcdefgh");
        let rows = layout(&l, Position::new(0, 4), 4);
        assert_eq!(rows[0].cursor, None);
        assert_eq!(rows[1].cursor, Some(0));
    }

    #[test]
    fn empty_document_is_one_row_with_cursor() {
        let rows = layout(&[], Position::origin(), 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cursor, Some(0));
        let rows = layout(&lines(""), Position::origin(), 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cursor, Some(0));
    }
}
