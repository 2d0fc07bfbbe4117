//! Mode label composition.
//!
//! Format: ` NORMAL `, ` INSERT `, ` VISUAL `, and while a sub-command is
//! pending ` NORMAL [2d3] ` (operator count, operator, count, find prefix).
//! The label replaces the tail of the last rendered row; the row content is
//! truncated so the total stays within the render width.

use core_state::Mode;
use core_text::{truncate_to_width, visible_width};
use crossterm::style::Color;

use crate::style::paint;

/// Plain label text for `mode` with an optional pending-command suffix.
pub fn compose_label(mode: Mode, pending: &str) -> String {
    if pending.is_empty() {
        format!(" {} ", mode.label())
    } else {
        format!(" {} [{}] ", mode.label(), pending)
    }
}

/// Overlay `label` onto the end of `row`, painted with `color`.
///
/// The row keeps its first `width - label_width` cells (escape sequences
/// retained) and is padded with `─` when shorter, so the result is exactly
/// `width` cells wide. A label wider than `width` is itself truncated.
pub fn overlay_label(row: &str, label: &str, width: usize, color: Color) -> String {
    let label_width = visible_width(label);
    if label_width >= width {
        return paint(&truncate_to_width(label, width), color);
    }
    let room = width - label_width;
    let head = truncate_to_width(row, room);
    let fill = room.saturating_sub(visible_width(&head));
    format!("{head}{}{}", "─".repeat(fill), paint(label, color))
}
