//! Row decoration: selection highlight, cursor, cursor marker, colors.
//!
//! Invariants:
//! * Decoration never splits a grapheme cluster; highlight boundaries fall on
//!   cluster columns of the row.
//! * Reverse video is opened and closed with `SGR 7` / `SGR 27` so any color
//!   the host applies around the row survives.
//! * The cursor marker is a zero-width APC string placed immediately before
//!   the cursor cluster; hosts scan for it to position the hardware cursor.

use core_text::grapheme;
use crossterm::style::{Color, Stylize};

/// Zero-width cursor position marker emitted for focused editors.
pub const CURSOR_MARKER: &str = "\x1b_modal:c\x07";

pub const REVERSE_ON: &str = "\x1b[7m";
pub const REVERSE_OFF: &str = "\x1b[27m";

/// What to draw over one layout row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowDecoration {
    /// Row-local highlighted columns `[start, end)`.
    pub selection: Option<(usize, usize)>,
    /// Row-local cursor column.
    pub cursor: Option<usize>,
    /// Draw the cursor cluster in reverse video (no active selection).
    pub block_cursor: bool,
    /// Emit `CURSOR_MARKER` before the cursor cluster.
    pub marker: bool,
    /// The line break after this row is selected (shown as a reverse space).
    pub selected_break: bool,
}

/// Apply `deco` to `text`. Returns the decorated string and its visible width.
pub fn decorate(text: &str, deco: &RowDecoration) -> (String, usize) {
    let clusters: Vec<&str> = grapheme::iter(text).collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut reversed = false;
    for (col, cluster) in clusters.iter().enumerate() {
        if deco.marker && deco.cursor == Some(col) {
            out.push_str(CURSOR_MARKER);
        }
        let in_selection = deco
            .selection
            .is_some_and(|(start, end)| col >= start && col < end);
        let on_block = deco.block_cursor && deco.cursor == Some(col);
        let want = in_selection || on_block;
        if want != reversed {
            out.push_str(if want { REVERSE_ON } else { REVERSE_OFF });
            reversed = want;
        }
        out.push_str(cluster);
    }
    if reversed {
        out.push_str(REVERSE_OFF);
    }
    let mut width = core_text::visible_width(text);
    let end = clusters.len();
    let cursor_at_end = deco.cursor == Some(end);
    if deco.marker && cursor_at_end {
        out.push_str(CURSOR_MARKER);
    }
    if (cursor_at_end && (deco.block_cursor || deco.selection.is_some())) || deco.selected_break {
        out.push_str(REVERSE_ON);
        out.push(' ');
        out.push_str(REVERSE_OFF);
        width += 1;
    }
    (out, width)
}

/// Foreground-colored text.
pub fn paint(text: &str, color: Color) -> String {
    text.with(color).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::width::strip_escapes;

    #[test]
    fn block_cursor_wraps_one_cluster() {
        let deco = RowDecoration {
            cursor: Some(1),
            block_cursor: true,
            ..Default::default()
        };
        let (out, w) = decorate("a😀b", &deco);
        assert_eq!(out, "a\x1b[7m😀\x1b[27mb");
        assert_eq!(w, 4);
    }

    #[test]
    fn end_of_row_cursor_is_a_reverse_space() {
        let deco = RowDecoration {
            cursor: Some(2),
            block_cursor: true,
            marker: true,
            ..Default::default()
        };
        let (out, w) = decorate("ab", &deco);
        assert_eq!(out, format!("ab{CURSOR_MARKER}\x1b[7m \x1b[27m"));
        assert_eq!(w, 3);
    }

    #[test]
    fn selection_span_with_marker_inside() {
        let deco = RowDecoration {
            selection: Some((1, 4)),
            cursor: Some(3),
            marker: true,
            ..Default::default()
        };
        let (out, w) = decorate("abcdef", &deco);
        assert_eq!(out, format!("a\x1b[7mbc{CURSOR_MARKER}d\x1b[27mef"));
        assert_eq!(strip_escapes(&out), "abcdef");
        assert_eq!(w, 6);
    }

    #[test]
    fn selected_empty_line_shows_reverse_space() {
        let deco = RowDecoration {
            selected_break: true,
            ..Default::default()
        };
        let (out, w) = decorate("", &deco);
        assert_eq!(out, "\x1b[7m \x1b[27m");
        assert_eq!(w, 1);
    }

    #[test]
    fn paint_is_zero_width_decoration() {
        let painted = paint("───", Color::Blue);
        assert_eq!(strip_escapes(&painted), "───");
    }
}
