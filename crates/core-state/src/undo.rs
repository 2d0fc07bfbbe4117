use core_text::Position;
use tracing::trace;

/// Immutable (text, cursor) capture.
///
/// Equality looks at `text` only: a cursor move alone is never an edit.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub text: String,
    pub cursor: Position,
}

impl Snapshot {
    pub fn new(text: impl Into<String>, cursor: Position) -> Self {
        Self {
            text: text.into(),
            cursor,
        }
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Snapshot {}

/// Undo/redo stacks plus the reentrant edit-tracking transaction.
///
/// A transaction opens when `begin` moves the depth 0 -> 1 (capturing the
/// "before" snapshot) and closes when `end` moves it 1 -> 0. Nested begin/end
/// pairs only adjust the depth, so every primitive call issued for one user
/// command lands in the same entry. The entry is recorded iff the closing text
/// differs from the opening text; recording clears the redo stack.
///
/// Stacks are unbounded for the lifetime of the session.
#[derive(Default)]
pub struct UndoEngine {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    depth: usize,
    start: Option<Snapshot>,
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    /// Current transaction nesting (0 when idle).
    pub fn tracking_depth(&self) -> usize {
        self.depth
    }

    /// Enter a tracked edit. `capture` runs only for the outermost entry.
    pub fn begin<F>(&mut self, capture: F)
    where
        F: FnOnce() -> Snapshot,
    {
        if self.depth == 0 {
            self.start = Some(capture());
            trace!(target: "state.undo", "transaction_open");
        }
        self.depth += 1;
    }

    /// Leave a tracked edit. On the outermost exit `capture` takes the "after"
    /// snapshot; returns true when an undo entry was recorded.
    pub fn end<F>(&mut self, capture: F) -> bool
    where
        F: FnOnce() -> Snapshot,
    {
        if self.depth == 0 {
            trace!(target: "state.undo", "transaction_end_unbalanced");
            return false;
        }
        self.depth -= 1;
        if self.depth > 0 {
            return false;
        }
        let Some(before) = self.start.take() else {
            return false;
        };
        let after = capture();
        if before == after {
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "transaction_noop");
            return false;
        }
        self.undo_stack.push(before);
        self.redo_stack.clear();
        trace!(
            target: "state.undo",
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "push_snapshot"
        );
        true
    }

    /// Pop the newest undo entry, parking `current` on the redo stack.
    /// `None` (and no stack change) when there is nothing to undo.
    pub fn pop_undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let last = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        Some(last)
    }

    /// Pop the newest redo entry, parking `current` on the undo stack.
    pub fn pop_redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len(), "redo_pop");
        Some(next)
    }
}
