//! Visual-mode renderer: wrapped rows inside a bordered, scrolling box.
//!
//! A frame is a `Vec<String>` of terminal rows, each exactly `width` cells:
//!
//! ```text
//! ──────────────────────     top border, or "─── ↑ N more ───"
//!  first visible row         padding | decorated row | fill | padding
//!  ...                       at most window_height(terminal_rows) rows
//! ──────────────────────     bottom border, or "─── ↓ N more ───"
//! ```
//!
//! Geometry (all in cells):
//! * padding is clamped to `(width - 1) / 2`;
//! * content width = `max(1, width - 2 * padding)`;
//! * layout width = content width minus one column when padding is 0, so an
//!   end-of-line cursor never overflows the row. With padding the cursor may
//!   borrow one cell of the right padding instead.
//!
//! Borders take `Theme::border_color(mode)`. The mode label is composed onto
//! the last row by the caller through `status::overlay_label`.
//!
//! The scroll offset is the only state a render mutates.

pub mod layout;
pub mod status;
pub mod style;
pub mod viewport;

use core_config::Theme;
use core_state::Mode;
use core_text::{Position, visible_width};
use tracing::trace;

pub use layout::{LayoutLine, layout};
pub use style::{CURSOR_MARKER, RowDecoration};
pub use viewport::{Viewport, window_height};

/// Everything a frame depends on besides the renderer's own settings.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub lines: &'a [String],
    pub cursor: Position,
    /// Linear half-open selection range while Visual mode is active.
    pub selection: Option<(usize, usize)>,
    pub focused: bool,
    pub mode: Mode,
}

#[derive(Debug, Clone)]
pub struct VisualRenderer {
    viewport: Viewport,
    padding_x: usize,
    terminal_rows: usize,
    theme: Theme,
    last_layout_width: usize,
}

impl Default for VisualRenderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl VisualRenderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            viewport: Viewport::default(),
            padding_x: 0,
            terminal_rows: 24,
            theme,
            last_layout_width: 0,
        }
    }

    pub fn set_padding_x(&mut self, padding: usize) {
        self.padding_x = padding;
    }

    pub fn set_terminal_rows(&mut self, rows: usize) {
        self.terminal_rows = rows;
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn scroll_offset(&self) -> usize {
        self.viewport.scroll_offset
    }

    /// Wrap width used by the most recent frame.
    pub fn last_layout_width(&self) -> usize {
        self.last_layout_width
    }

    pub fn render(&mut self, frame: &FrameInput<'_>, width: usize) -> Vec<String> {
        let max_padding = width.saturating_sub(1) / 2;
        let padding_x = self.padding_x.min(max_padding);
        let content_width = 1.max(width.saturating_sub(padding_x * 2));
        let layout_width = 1.max(content_width.saturating_sub(if padding_x > 0 { 0 } else { 1 }));
        self.last_layout_width = layout_width;

        let rows = layout(frame.lines, frame.cursor, layout_width);
        let window = window_height(self.terminal_rows);
        let cursor_row = rows.iter().position(|r| r.cursor.is_some()).unwrap_or(0);
        self.viewport.follow(cursor_row, rows.len(), window);
        let offset = self.viewport.scroll_offset;

        let border = self.theme.border_color(frame.mode);
        let mut out = Vec::with_capacity(window.min(rows.len()) + 2);
        out.push(style::paint(&border_row(offset, "↑", width), border));

        let left_padding = " ".repeat(padding_x);
        for row in rows.iter().skip(offset).take(window) {
            let deco = decoration_for(row, frame);
            let (text, row_width) = style::decorate(&row.text, &deco);
            let fill = " ".repeat(content_width.saturating_sub(row_width));
            // An end-of-row cursor may borrow one cell of the right padding.
            let right = if row_width > content_width && padding_x > 0 {
                padding_x - 1
            } else {
                padding_x
            };
            out.push(format!("{left_padding}{text}{fill}{}", " ".repeat(right)));
        }

        let below = self.viewport.rows_below(rows.len(), window);
        out.push(style::paint(&border_row(below, "↓", width), border));

        trace!(
            target: "render.visual",
            width,
            rows = rows.len(),
            window,
            scroll_offset = offset,
            below,
            "frame"
        );
        out
    }
}

/// Plain border, or `─── ↑ N more ───` when `hidden > 0`.
fn border_row(hidden: usize, arrow: &str, width: usize) -> String {
    if hidden == 0 {
        return "─".repeat(width);
    }
    let indicator = format!("─── {arrow} {hidden} more ");
    let remaining = width.saturating_sub(visible_width(&indicator));
    core_text::truncate_to_width(&format!("{indicator}{}", "─".repeat(remaining)), width)
}

fn decoration_for(row: &LayoutLine, frame: &FrameInput<'_>) -> RowDecoration {
    let mut deco = RowDecoration {
        cursor: row.cursor,
        block_cursor: frame.selection.is_none(),
        marker: frame.focused && row.cursor.is_some(),
        ..Default::default()
    };
    if let Some((start, end)) = frame.selection {
        let lo = start.max(row.linear_start);
        let hi = end.min(row.linear_end());
        if lo < hi {
            deco.selection = Some((lo - row.linear_start, hi - row.linear_start));
        }
        let brk = row.linear_end();
        deco.selected_break = row.last_in_line && start <= brk && brk < end;
    }
    deco
}
