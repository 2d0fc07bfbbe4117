//! Vertical scroll window over the wrapped rows.
//!
//! The window is `max(5, ⌊0.3 × terminal rows⌋)` rows tall. `follow` moves
//! the offset the minimum amount needed to keep the cursor row visible, then
//! clamps it to `[0, max(0, total - window)]`. The offset is the only state
//! rendering mutates.

/// Minimum window height regardless of terminal size.
pub const MIN_WINDOW_ROWS: usize = 5;

pub fn window_height(terminal_rows: usize) -> usize {
    MIN_WINDOW_ROWS.max(terminal_rows.saturating_mul(3) / 10)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub scroll_offset: usize,
}

impl Viewport {
    pub fn new(scroll_offset: usize) -> Self {
        Self { scroll_offset }
    }

    /// Keep `cursor_row` inside a `window`-row view of `total` rows.
    pub fn follow(&mut self, cursor_row: usize, total: usize, window: usize) {
        let window = window.max(1);
        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + window {
            self.scroll_offset = cursor_row + 1 - window;
        }
        let max_scroll = total.saturating_sub(window);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }
    }

    /// Rows hidden below the window.
    pub fn rows_below(&self, total: usize, window: usize) -> usize {
        total.saturating_sub(self.scroll_offset + window.min(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn window_has_floor_of_five() {
        assert_eq!(window_height(0), 5);
        assert_eq!(window_height(10), 5);
        assert_eq!(window_height(40), 12);
    }

    #[test]
    fn follow_scrolls_down_then_up() {
        let mut vp = Viewport::default();
        vp.follow(7, 20, 5);
        assert_eq!(vp.scroll_offset, 3);
        vp.follow(5, 20, 5);
        assert_eq!(vp.scroll_offset, 3, "cursor still visible, no move");
        vp.follow(1, 20, 5);
        assert_eq!(vp.scroll_offset, 1);
    }

    #[test]
    fn offset_clamps_when_document_shrinks() {
        let mut vp = Viewport::new(15);
        vp.follow(2, 6, 5);
        assert_eq!(vp.scroll_offset, 1);
        vp.follow(0, 3, 5);
        assert_eq!(vp.scroll_offset, 0);
    }

    #[test]
    fn rows_below_counts_hidden_tail() {
        let vp = Viewport::new(2);
        assert_eq!(vp.rows_below(10, 5), 3);
        assert_eq!(vp.rows_below(3, 5), 0);
    }

    proptest! {
        #[test]
        fn follow_keeps_cursor_visible_and_offset_clamped(
            start in 0usize..100,
            total in 0usize..100,
            cursor in 0usize..100,
            window in 1usize..20,
        ) {
            let cursor = cursor.min(total.saturating_sub(1));
            let mut vp = Viewport::new(start);
            vp.follow(cursor, total, window);
            prop_assert!(vp.scroll_offset <= total.saturating_sub(window));
            if total > 0 {
                prop_assert!(vp.scroll_offset <= cursor);
                prop_assert!(cursor < vp.scroll_offset + window);
            }
        }
    }
}
