//! Input token types shared by the host, the primitive editor and the modal
//! interpreter.
//!
//! A `KeyToken` is one logical keypress as the interpreter sees it: either a
//! printable character, a named key, or a chord wrapping a base token plus a
//! modifier mask. Hosts decode their raw input (terminal escape sequences,
//! crossterm events) into tokens via `core-input`; nothing above this crate
//! deals with escape-sequence strings.
//!
//! Printable means a single `char` with code point >= 32 that is not DEL and
//! not wrapped in a chord. Chords with SHIFT only on a printable char are
//! normalized away by the decoders, so `Y` arrives as `Char('Y')`.

use std::fmt;
use std::sync::atomic::AtomicU64;

/// Total tokens handed to an interpreter (relaxed counter, read by tests and
/// the demo host's shutdown log).
pub static KEYPRESS_TOTAL: AtomicU64 = AtomicU64::new(0);

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ModMask: u16 { const CTRL=1; const ALT=2; const SHIFT=4; const META=8; const SUPER=16; }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Esc,
    Backspace,
    Tab,
    F(u8),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
}

/// Canonical logical key token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyToken {
    Char(char),
    Named(NamedKey),
    Chord { base: Box<KeyToken>, mods: ModMask },
}

impl KeyToken {
    pub fn esc() -> Self {
        KeyToken::Named(NamedKey::Esc)
    }

    pub fn ctrl(c: char) -> Self {
        KeyToken::Chord {
            base: Box::new(KeyToken::Char(c.to_ascii_lowercase())),
            mods: ModMask::CTRL,
        }
    }

    pub fn alt(c: char) -> Self {
        KeyToken::Chord {
            base: Box::new(KeyToken::Char(c)),
            mods: ModMask::ALT,
        }
    }

    pub fn is_escape(&self) -> bool {
        matches!(self, KeyToken::Named(NamedKey::Esc))
    }

    /// The character if this token is a single printable character.
    pub fn printable(&self) -> Option<char> {
        match self {
            KeyToken::Char(c) if (*c as u32) >= 32 && *c != '\u{7f}' => Some(*c),
            _ => None,
        }
    }

    /// Base character and modifiers of a chord, e.g. `(w, CTRL)` for `<C-w>`.
    pub fn chord_char(&self) -> Option<(char, ModMask)> {
        match self {
            KeyToken::Chord { base, mods } => match base.as_ref() {
                KeyToken::Char(c) => Some((*c, *mods)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Char(c) => write!(f, "{c}"),
            KeyToken::Named(NamedKey::F(n)) => write!(f, "<F{n}>"),
            KeyToken::Named(n) => write!(f, "<{n:?}>"),
            KeyToken::Chord { base, mods } => {
                f.write_str("<")?;
                if mods.contains(ModMask::CTRL) {
                    f.write_str("C-")?;
                }
                if mods.contains(ModMask::ALT) {
                    f.write_str("A-")?;
                }
                if mods.contains(ModMask::SHIFT) {
                    f.write_str("S-")?;
                }
                if mods.intersects(ModMask::META | ModMask::SUPER) {
                    f.write_str("M-")?;
                }
                let inner = base.to_string();
                write!(f, "{}>", inner.trim_start_matches('<').trim_end_matches('>'))
            }
        }
    }
}

/// Events a host loop feeds into the modal layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyToken),
    /// Bracketed paste payload (already normalized to `\n` line endings).
    Paste(String),
    Resize { columns: u16, rows: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_excludes_controls_and_chords() {
        assert_eq!(KeyToken::Char('x').printable(), Some('x'));
        assert_eq!(KeyToken::Char(' ').printable(), Some(' '));
        assert_eq!(KeyToken::Char('\u{1}').printable(), None);
        assert_eq!(KeyToken::Char('\u{7f}').printable(), None);
        assert_eq!(KeyToken::ctrl('w').printable(), None);
        assert_eq!(KeyToken::esc().printable(), None);
    }

    #[test]
    fn display_uses_vim_notation() {
        assert_eq!(KeyToken::esc().to_string(), "<Esc>");
        assert_eq!(KeyToken::ctrl('W').to_string(), "<C-w>");
        assert_eq!(KeyToken::alt('d').to_string(), "<A-d>");
        assert_eq!(KeyToken::Named(NamedKey::F(5)).to_string(), "<F5>");
        assert_eq!(KeyToken::Char('q').to_string(), "q");
    }

    #[test]
    fn chord_char_extracts_base() {
        assert_eq!(KeyToken::ctrl('k').chord_char(), Some(('k', ModMask::CTRL)));
        assert_eq!(KeyToken::Char('k').chord_char(), None);
    }
}
