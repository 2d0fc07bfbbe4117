//! Decoding of raw terminal input strings into `KeyToken`s.
//!
//! Hosts that hand the modal layer undecoded byte strings (one read from the
//! tty, a pasted chunk) go through here. Known escape sequences decode to a
//! single named key or chord; anything else is split into one `Char` token per
//! scalar value.

use core_events::{KeyToken, ModMask, NamedKey};

const CSI_TABLE: &[(&str, NamedKey)] = &[
    ("\x1b[A", NamedKey::Up),
    ("\x1b[B", NamedKey::Down),
    ("\x1b[C", NamedKey::Right),
    ("\x1b[D", NamedKey::Left),
    ("\x1bOA", NamedKey::Up),
    ("\x1bOB", NamedKey::Down),
    ("\x1bOC", NamedKey::Right),
    ("\x1bOD", NamedKey::Left),
    ("\x1b[H", NamedKey::Home),
    ("\x1bOH", NamedKey::Home),
    ("\x1b[1~", NamedKey::Home),
    ("\x1b[7~", NamedKey::Home),
    ("\x1b[F", NamedKey::End),
    ("\x1bOF", NamedKey::End),
    ("\x1b[4~", NamedKey::End),
    ("\x1b[8~", NamedKey::End),
    ("\x1b[2~", NamedKey::Insert),
    ("\x1b[3~", NamedKey::Delete),
    ("\x1b[5~", NamedKey::PageUp),
    ("\x1b[6~", NamedKey::PageDown),
];

/// Decode an input string that represents exactly one keypress.
///
/// Returns `None` when the string is empty or is several keys (e.g. a paste).
pub fn decode_key(raw: &str) -> Option<KeyToken> {
    match raw {
        "" => return None,
        "\x1b" => return Some(KeyToken::Named(NamedKey::Esc)),
        "\r" | "\n" => return Some(KeyToken::Named(NamedKey::Enter)),
        "\x7f" | "\x08" => return Some(KeyToken::Named(NamedKey::Backspace)),
        "\t" => return Some(KeyToken::Named(NamedKey::Tab)),
        _ => {}
    }
    if let Some((_, named)) = CSI_TABLE.iter().find(|(seq, _)| *seq == raw) {
        return Some(KeyToken::Named(*named));
    }
    let mut chars = raw.chars();
    let first = chars.next()?;
    match (first, chars.next(), chars.next()) {
        (c, None, _) => Some(single_char(c)),
        ('\x1b', Some(c), None) if !c.is_control() => Some(KeyToken::Chord {
            base: Box::new(KeyToken::Char(c)),
            mods: ModMask::ALT,
        }),
        _ => None,
    }
}

/// Decode an arbitrary input string into the sequence of keys it represents.
pub fn decode(raw: &str) -> Vec<KeyToken> {
    if let Some(token) = decode_key(raw) {
        tracing::trace!(target: "input.decode", bytes = raw.len(), tokens = 1, "decode");
        return vec![token];
    }
    let tokens: Vec<KeyToken> = raw.chars().map(single_char).collect();
    tracing::trace!(
        target: "input.decode",
        bytes = raw.len(),
        tokens = tokens.len(),
        "decode_split"
    );
    tokens
}

fn single_char(c: char) -> KeyToken {
    match c {
        '\x1b' => KeyToken::Named(NamedKey::Esc),
        '\r' | '\n' => KeyToken::Named(NamedKey::Enter),
        '\t' => KeyToken::Named(NamedKey::Tab),
        '\x7f' | '\x08' => KeyToken::Named(NamedKey::Backspace),
        '\x01'..='\x1a' => {
            let letter = (b'a' + (c as u8 - 1)) as char;
            KeyToken::ctrl(letter)
        }
        other => KeyToken::Char(other),
    }
}
