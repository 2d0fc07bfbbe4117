//! Text primitives shared by the modal input layer.
//!
//! Everything in this crate is pure: functions take `&str` lines (never a
//! buffer object) and return new offsets. Columns are *grapheme cluster*
//! offsets within a logical line, never bytes, so a cursor can never land
//! inside a multi-byte cluster.
//!
//! Modules:
//! * `grapheme` (below) - column <-> byte conversion and cluster classes.
//! * `motion`  - word boundary search used by both the primitive editor and
//!   the interpreter's `e` / `E` motions.
//! * `offset`  - (line, col) <-> linear offset mapping and visual selection
//!   ranges over the `\n`-joined document.
//! * `segment` - NFC normalization + per-cluster width segmentation.
//! * `width`   - display width of clusters and ANSI-decorated strings.
//! * `wrap`    - word-wrap segmenter producing screen-width chunks.

/// A location in the logical (unwrapped) text.
///
/// `col` counts grapheme clusters from the start of `line`. A column equal to
/// the line length is valid and means "after the last cluster".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    pub fn origin() -> Self {
        Self { line: 0, col: 0 }
    }

    /// Clamp into `line ∈ [0, line_count-1]`, `col ∈ [0, line_len(line)]`.
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.col = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.col > max_len {
            self.col = max_len;
        }
    }

    /// Clamped copy against a slice of logical lines.
    pub fn clamped(mut self, lines: &[String]) -> Self {
        self.clamp_to(lines.len(), |idx| {
            lines.get(idx).map(|l| grapheme::count(l)).unwrap_or(0)
        });
        self
    }
}

pub mod motion;
pub mod offset;
pub mod segment;
pub mod width;
pub mod wrap;

pub use offset::{selection_range, to_linear_index, to_position};
pub use width::{egc_width, truncate_to_width, visible_width};
pub use wrap::{WrapSegment, word_wrap_line};

/// Grapheme utilities operating on a single logical line.
pub mod grapheme {
    use unicode_segmentation::UnicodeSegmentation;

    /// Iterate grapheme clusters in a line.
    pub fn iter(line: &str) -> impl Iterator<Item = &str> {
        line.graphemes(true)
    }

    /// Number of clusters in the line.
    pub fn count(line: &str) -> usize {
        line.graphemes(true).count()
    }

    /// Byte offset of the cluster at `col`; `line.len()` when `col` is past the end.
    pub fn byte_at(line: &str, col: usize) -> usize {
        line.grapheme_indices(true)
            .nth(col)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len())
    }

    /// Cluster at `col`, if any.
    pub fn nth(line: &str, col: usize) -> Option<&str> {
        line.graphemes(true).nth(col)
    }

    /// Substring covering clusters `[start, end)` (both clamped).
    pub fn slice(line: &str, start: usize, end: usize) -> &str {
        if start >= end {
            return "";
        }
        let s = byte_at(line, start);
        let e = byte_at(line, end);
        &line[s..e.max(s)]
    }

    /// Column of the first non-blank cluster (line length if all blank).
    pub fn first_non_blank(line: &str) -> usize {
        line.graphemes(true)
            .position(|g| !is_whitespace(g))
            .unwrap_or_else(|| count(line))
    }

    pub fn is_whitespace(g: &str) -> bool {
        g.chars().any(char::is_whitespace)
    }

    pub fn is_punctuation(g: &str) -> bool {
        g.chars().any(is_punctuation_char)
    }

    /// Word cluster: neither whitespace nor punctuation.
    pub fn is_word(g: &str) -> bool {
        !is_whitespace(g) && !is_punctuation(g)
    }

    fn is_punctuation_char(c: char) -> bool {
        c != '_' && (c.is_ascii_punctuation() || matches!(c, '«' | '»' | '…' | '‘' | '’' | '“' | '”'))
    }
}

#[cfg(test)]
mod tests {
    use super::grapheme;
    use super::*;

    #[test]
    fn byte_at_walks_clusters_not_bytes() {
        let s = "aé😀b";
        assert_eq!(grapheme::byte_at(s, 0), 0);
        assert_eq!(grapheme::byte_at(s, 1), 1);
        assert_eq!(grapheme::byte_at(s, 2), 1 + "é".len());
        assert_eq!(grapheme::byte_at(s, 4), s.len());
        assert_eq!(grapheme::byte_at(s, 99), s.len());
    }

    #[test]
    fn combining_sequence_is_one_column() {
        let s = "e\u{0301}x";
        assert_eq!(grapheme::count(s), 2);
        assert_eq!(grapheme::nth(s, 1), Some("x"));
    }

    #[test]
    fn slice_clamps_out_of_range() {
        assert_eq!(grapheme::slice("hello", 1, 3), "el");
        assert_eq!(grapheme::slice("hello", 3, 99), "lo");
        assert_eq!(grapheme::slice("hello", 4, 2), "");
    }

    #[test]
    fn first_non_blank_skips_indent() {
        assert_eq!(grapheme::first_non_blank("   foo"), 3);
        assert_eq!(grapheme::first_non_blank("\tbar"), 1);
        assert_eq!(grapheme::first_non_blank("    "), 4);
        assert_eq!(grapheme::first_non_blank(""), 0);
    }

    #[test]
    fn classes_are_disjoint() {
        for g in ["a", "_", "7", " ", "\t", ".", "(", "é"] {
            let classes = [
                grapheme::is_word(g),
                grapheme::is_whitespace(g),
                grapheme::is_punctuation(g),
            ];
            assert_eq!(classes.iter().filter(|c| **c).count(), 1, "cluster {g:?}");
        }
    }

    #[test]
    fn clamp_position_into_document() {
        let lines = vec!["abc".to_string(), "de".to_string()];
        assert_eq!(Position::new(5, 9).clamped(&lines), Position::new(1, 2));
        assert_eq!(Position::new(0, 9).clamped(&lines), Position::new(0, 3));
        assert_eq!(Position::new(3, 3).clamped(&[]), Position::origin());
    }
}
