//! Modal command interpreter.
//!
//! `ModalEditor` wraps a host `PrimitiveEditor` and layers Normal / Insert /
//! Visual modes on top of it. Every key goes through two stages:
//!
//! 1. `key_translator::translate` classifies the token against the current
//!    mode and pending sub-command into an `Action` (pure, no side effects).
//! 2. `dispatcher::dispatch` applies the `Action`, driving the primitive
//!    editor exclusively through `EditCommand`s, `set_text` and
//!    `handle_raw`.
//!
//! Edits that change text run inside `with_tracked_edit`, so one user command
//! is one undo entry no matter how many primitive calls it issues.

use core_clipboard::{ClipboardManager, SystemClipboard};
use core_config::Config;
use core_events::{InputEvent, KEYPRESS_TOTAL, KeyToken};
use core_model::{EditCommand, PrimitiveEditor};
use core_render::status::{compose_label, overlay_label};
use core_render::{FrameInput, VisualRenderer};
use core_state::{Mode, PendingCommand, Selection, Snapshot, UndoEngine};
use core_text::Position;
use std::sync::atomic::Ordering;
use tracing::trace;

mod dispatcher;
mod key_translator;

pub use dispatcher::{DispatchResult, MAX_INSERT_REPEAT, MAX_PASTE_BYTES};
pub use key_translator::{Action, translate};

pub struct ModalEditor<E: PrimitiveEditor> {
    pub(crate) editor: E,
    pub(crate) mode: Mode,
    pub(crate) pending: PendingCommand,
    pub(crate) history: UndoEngine,
    pub(crate) selection: Selection,
    pub(crate) clipboard: ClipboardManager,
    renderer: VisualRenderer,
}

impl<E: PrimitiveEditor> ModalEditor<E> {
    /// Wrap `editor`, using the OS clipboard when the config enables it.
    pub fn new(editor: E, config: &Config) -> Self {
        let clipboard = if config.file.clipboard.enabled {
            ClipboardManager::new(Box::new(SystemClipboard::new(
                config.clipboard_timeout(),
                config.file.clipboard.osc52,
            )))
        } else {
            ClipboardManager::local()
        };
        Self::with_clipboard(editor, config, clipboard)
    }

    pub fn with_clipboard(editor: E, config: &Config, clipboard: ClipboardManager) -> Self {
        let mut renderer = VisualRenderer::new(config.theme());
        renderer.set_padding_x(usize::from(config.effective_padding_x));
        Self {
            editor,
            mode: config.initial_mode(),
            pending: PendingCommand::new(),
            history: UndoEngine::new(),
            selection: Selection::default(),
            clipboard,
            renderer,
        }
    }

    /// Feed one key. See `translate` for the classification order.
    pub fn handle_input(&mut self, key: &KeyToken) -> DispatchResult {
        KEYPRESS_TOTAL.fetch_add(1, Ordering::Relaxed);
        let action = translate(self.mode, &self.pending, key);
        trace!(target: "actions.translate", mode = %self.mode, ?action, "translated");
        dispatcher::dispatch(action, key, self)
    }

    /// Decode a raw terminal chunk and feed every resulting key in order.
    pub fn handle_raw_input(&mut self, raw: &str) -> DispatchResult {
        core_input::decode(raw)
            .iter()
            .fold(DispatchResult::clean(), |acc, key| {
                acc.merge(self.handle_input(key))
            })
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> DispatchResult {
        match event {
            InputEvent::Key(key) => self.handle_input(key),
            InputEvent::Paste(text) => self.paste_text(text),
            InputEvent::Resize { rows, .. } => {
                self.set_terminal_rows(usize::from(*rows));
                DispatchResult::dirty()
            }
        }
    }

    /// Bracketed paste from the host terminal. Inserted as one undo entry in
    /// Insert mode; ignored otherwise.
    pub fn paste_text(&mut self, text: &str) -> DispatchResult {
        if self.mode != Mode::Insert || text.is_empty() {
            return DispatchResult::clean();
        }
        self.with_tracked_edit(|ed| ed.editor.apply(EditCommand::InsertText(text.to_string())));
        DispatchResult::dirty()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn has_pending_command(&self) -> bool {
        self.pending.has_pending()
    }

    /// Pending sub-command as shown in the mode label, e.g. `2d3`.
    pub fn pending_display(&self) -> String {
        self.pending.display()
    }

    pub fn anchor(&self) -> Option<Position> {
        self.selection.anchor()
    }

    /// Linear `[start, end)` of the visual selection, `None` outside Visual mode.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        if self.mode != Mode::Visual {
            return None;
        }
        self.selection.range(&self.editor.lines(), self.editor.cursor())
    }

    pub fn text(&self) -> String {
        self.editor.text()
    }

    pub fn lines(&self) -> Vec<String> {
        self.editor.lines()
    }

    pub fn cursor(&self) -> Position {
        self.editor.cursor()
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn clipboard(&self) -> &ClipboardManager {
        &self.clipboard
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    pub fn capture(&self) -> Snapshot {
        Snapshot::new(self.editor.text(), self.editor.cursor())
    }

    /// Replace the document with `snapshot.text` and put the cursor back,
    /// clamped to the restored document.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.editor.set_text(&snapshot.text);
        dispatcher::place_cursor(&mut self.editor, snapshot.cursor);
    }

    /// Run `body` as one undo transaction. Nested calls join the outermost
    /// transaction; nothing is recorded when the text ends up unchanged.
    pub fn with_tracked_edit<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        let editor = &self.editor;
        self.history
            .begin(|| Snapshot::new(editor.text(), editor.cursor()));
        let out = body(self);
        let editor = &self.editor;
        self.history
            .end(|| Snapshot::new(editor.text(), editor.cursor()));
        out
    }

    /// Step back one undo entry. Returns false when the history is empty.
    pub fn undo(&mut self) -> bool {
        self.pending.reset();
        let current = self.capture();
        let Some(snapshot) = self.history.pop_undo(current) else {
            return false;
        };
        self.restore(&snapshot);
        self.mode = Mode::Normal;
        self.selection.clear();
        true
    }

    pub fn redo(&mut self) -> bool {
        self.pending.reset();
        let current = self.capture();
        let Some(snapshot) = self.history.pop_redo(current) else {
            return false;
        };
        self.restore(&snapshot);
        self.mode = Mode::Normal;
        self.selection.clear();
        true
    }

    pub fn set_terminal_rows(&mut self, rows: usize) {
        self.renderer.set_terminal_rows(rows);
    }

    pub fn set_padding_x(&mut self, padding: usize) {
        self.renderer.set_padding_x(padding);
    }

    pub fn scroll_offset(&self) -> usize {
        self.renderer.scroll_offset()
    }

    /// Render the bordered frame for `width` columns with the mode label on
    /// the last row.
    pub fn render(&mut self, width: usize) -> Vec<String> {
        let lines = self.editor.lines();
        let cursor = self.editor.cursor();
        let selection = if self.mode == Mode::Visual {
            self.selection.range(&lines, cursor)
        } else {
            None
        };
        let frame = FrameInput {
            lines: &lines,
            cursor,
            selection,
            focused: self.editor.is_focused(),
            mode: self.mode,
        };
        let mut rows = self.renderer.render(&frame, width);
        let label = compose_label(self.mode, &self.pending.display());
        let color = self.renderer.theme().mode_color(self.mode);
        if let Some(last) = rows.last_mut() {
            *last = overlay_label(last, &label, width, color);
        }
        rows
    }
}
