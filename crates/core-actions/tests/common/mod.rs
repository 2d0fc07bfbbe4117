#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, ModalEditor};
use core_clipboard::ClipboardManager;
use core_config::Config;
use core_events::KeyToken;
use core_model::{EditCommand, PrimitiveEditor, TextArea};
use core_text::Position;

pub fn config(initial_mode: &str) -> Config {
    let mut cfg = Config::default();
    cfg.file.editor.initial_mode = initial_mode.to_string();
    cfg
}

/// Normal-mode editor over `text` with the cursor at (`line`, `col`) and a
/// process-local clipboard.
pub fn editor(text: &str, line: usize, col: usize) -> ModalEditor<TextArea> {
    editor_in(text, line, col, "normal")
}

pub fn editor_in(text: &str, line: usize, col: usize, mode: &str) -> ModalEditor<TextArea> {
    let mut area = TextArea::new(text);
    area.apply(EditCommand::MoveUp(usize::MAX));
    area.apply(EditCommand::MoveDown(line));
    area.apply(EditCommand::LineStart);
    area.apply(EditCommand::MoveRight(col));
    ModalEditor::with_clipboard(area, &config(mode), ClipboardManager::local())
}

/// `"3l<Esc>x"` -> tokens. `<Esc>` is the only named key recognised.
pub fn tokens(seq: &str) -> Vec<KeyToken> {
    let mut out = Vec::new();
    let mut rest = seq;
    while let Some(c) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("<Esc>") {
            out.push(KeyToken::esc());
            rest = tail;
            continue;
        }
        out.push(KeyToken::Char(c));
        rest = &rest[c.len_utf8()..];
    }
    out
}

pub fn feed(ed: &mut ModalEditor<TextArea>, seq: &str) -> DispatchResult {
    tokens(seq)
        .iter()
        .fold(DispatchResult::clean(), |acc, key| acc.merge(ed.handle_input(key)))
}

pub fn pos(line: usize, col: usize) -> Position {
    Position::new(line, col)
}
