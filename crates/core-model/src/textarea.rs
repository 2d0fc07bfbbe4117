use core_events::{KeyToken, ModMask, NamedKey};
use core_text::motion::{word_left, word_right};
use core_text::segment::normalize;
use core_text::{Position, grapheme};
use tracing::trace;

use crate::{EditCommand, PrimitiveEditor};

/// In-memory multi-line input widget.
///
/// Columns are grapheme clusters. Inserted text is NFC-normalized together
/// with the line it lands in, so a combining mark typed after its base
/// character merges into one cluster.
#[derive(Debug, Clone)]
pub struct TextArea {
    lines: Vec<String>,
    cursor: Position,
    focused: bool,
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextArea {
    /// Create with `text`, cursor at the end of the document.
    pub fn new(text: &str) -> Self {
        let mut area = Self {
            lines: vec![String::new()],
            cursor: Position::origin(),
            focused: true,
        };
        area.set_text(text);
        area
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map(|l| grapheme::count(l)).unwrap_or(0)
    }

    fn current_len(&self) -> usize {
        self.line_len(self.cursor.line)
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.col = self.current_len();
        }
    }

    fn move_right(&mut self) {
        if self.cursor.col < self.current_len() {
            self.cursor.col += 1;
        } else if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.cursor.col = 0;
        }
    }

    fn move_vertical(&mut self, target: usize) {
        self.cursor.line = target.min(self.lines.len() - 1);
        self.cursor.col = self.cursor.col.min(self.current_len());
    }

    /// Remove clusters `[start, end)` on the cursor line; cursor goes to `start`.
    fn remove_cols(&mut self, start: usize, end: usize) {
        let line = &mut self.lines[self.cursor.line];
        let s = grapheme::byte_at(line, start);
        let e = grapheme::byte_at(line, end);
        if s < e {
            line.replace_range(s..e, "");
        }
        self.cursor.col = start;
    }

    /// Join the next line onto the cursor line (no-op on the last line).
    fn join_next(&mut self) {
        if self.cursor.line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor.line + 1);
            self.lines[self.cursor.line].push_str(&next);
        }
    }

    fn backspace(&mut self) {
        if self.cursor.col > 0 {
            let col = self.cursor.col;
            self.remove_cols(col - 1, col);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.col = self.current_len();
            self.join_next();
        }
    }

    fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor.line];
        let at = grapheme::byte_at(line, self.cursor.col);
        let rest = line.split_off(at);
        self.lines.insert(self.cursor.line + 1, rest);
        self.cursor = Position::new(self.cursor.line + 1, 0);
    }

    fn insert_text(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n");
        let mut pieces = text.split('\n');
        let first = pieces.next().unwrap_or_default();
        self.insert_inline(first);
        for piece in pieces {
            self.insert_newline();
            self.insert_inline(piece);
        }
    }

    fn insert_inline(&mut self, piece: &str) {
        if piece.is_empty() {
            return;
        }
        let line = &self.lines[self.cursor.line];
        let at = grapheme::byte_at(line, self.cursor.col);
        let head = normalize(&format!("{}{}", &line[..at], piece));
        let tail = &line[at..];
        let merged = normalize(&format!("{head}{tail}"));
        // Normalization can fold the boundary; keep the cursor right after the
        // inserted text as long as the head survives as a prefix.
        let col = if merged.starts_with(&head) {
            grapheme::count(&head)
        } else {
            grapheme::count(&merged) - grapheme::count(tail).min(grapheme::count(&merged))
        };
        self.lines[self.cursor.line] = merged;
        self.cursor.col = col.min(self.current_len());
    }

    fn handle_chord(&mut self, c: char, mods: ModMask) -> bool {
        let ctrl = mods.contains(ModMask::CTRL);
        let alt = mods.contains(ModMask::ALT);
        match (c, ctrl, alt) {
            ('a', true, false) => self.apply(EditCommand::LineStart),
            ('e', true, false) => self.apply(EditCommand::LineEnd),
            ('k', true, false) => self.apply(EditCommand::DeleteToLineEnd),
            ('w', true, false) => self.apply(EditCommand::DeleteWordBackward),
            ('h', true, false) => self.backspace(),
            ('d', false, true) => self.apply(EditCommand::DeleteWordForward),
            ('b', false, true) => self.apply(EditCommand::WordLeft),
            ('f', false, true) => self.apply(EditCommand::WordRight),
            _ => return false,
        }
        true
    }
}

impl PrimitiveEditor for TextArea {
    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn set_text(&mut self, text: &str) {
        let normalized = normalize(&text.replace("\r\n", "\n"));
        self.lines = normalized.split('\n').map(str::to_string).collect();
        let last = self.lines.len() - 1;
        self.cursor = Position::new(last, self.line_len(last));
        trace!(target: "model.textarea", lines = self.lines.len(), "set_text");
    }

    fn lines(&self) -> Vec<String> {
        self.lines.clone()
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn apply(&mut self, command: EditCommand) {
        match command {
            EditCommand::MoveLeft(n) => (0..n).for_each(|_| self.move_left()),
            EditCommand::MoveRight(n) => (0..n).for_each(|_| self.move_right()),
            EditCommand::MoveUp(n) => self.move_vertical(self.cursor.line.saturating_sub(n)),
            EditCommand::MoveDown(n) => self.move_vertical(self.cursor.line.saturating_add(n)),
            EditCommand::LineStart => self.cursor.col = 0,
            EditCommand::LineEnd => self.cursor.col = self.current_len(),
            EditCommand::WordLeft => {
                if self.cursor.col == 0 {
                    self.move_left();
                } else {
                    self.cursor.col = word_left(&self.lines[self.cursor.line], self.cursor.col);
                }
            }
            EditCommand::WordRight => {
                if self.cursor.col >= self.current_len() {
                    self.move_right();
                } else {
                    self.cursor.col = word_right(&self.lines[self.cursor.line], self.cursor.col);
                }
            }
            EditCommand::DeleteCharForward => {
                let col = self.cursor.col;
                if col < self.current_len() {
                    self.remove_cols(col, col + 1);
                } else {
                    self.join_next();
                }
            }
            EditCommand::DeleteWordForward => {
                let col = self.cursor.col;
                if col < self.current_len() {
                    let end = word_right(&self.lines[self.cursor.line], col);
                    self.remove_cols(col, end);
                } else {
                    self.join_next();
                }
            }
            EditCommand::DeleteWordBackward => {
                let col = self.cursor.col;
                if col > 0 {
                    let start = word_left(&self.lines[self.cursor.line], col);
                    self.remove_cols(start, col);
                } else {
                    self.backspace();
                }
            }
            EditCommand::DeleteToLineEnd => {
                let col = self.cursor.col;
                let len = self.current_len();
                if col < len {
                    self.remove_cols(col, len);
                } else {
                    self.join_next();
                }
            }
            EditCommand::InsertNewline => self.insert_newline(),
            EditCommand::InsertText(text) => self.insert_text(&text),
        }
    }

    fn handle_raw(&mut self, key: &KeyToken) -> bool {
        if let Some(c) = key.printable() {
            self.insert_text(c.encode_utf8(&mut [0u8; 4]));
            return true;
        }
        if let Some((c, mods)) = key.chord_char() {
            return self.handle_chord(c, mods);
        }
        let KeyToken::Named(named) = key else {
            return false;
        };
        match named {
            NamedKey::Enter => self.insert_newline(),
            NamedKey::Backspace => self.backspace(),
            NamedKey::Delete => self.apply(EditCommand::DeleteCharForward),
            NamedKey::Tab => self.insert_text("\t"),
            NamedKey::Left => self.move_left(),
            NamedKey::Right => self.move_right(),
            NamedKey::Up => self.apply(EditCommand::MoveUp(1)),
            NamedKey::Down => self.apply(EditCommand::MoveDown(1)),
            NamedKey::Home => self.apply(EditCommand::LineStart),
            NamedKey::End => self.apply(EditCommand::LineEnd),
            _ => return false,
        }
        true
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}
