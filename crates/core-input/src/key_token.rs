use core_events::{InputEvent, KeyToken, ModMask, NamedKey};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// Map a crossterm key event into a single modal-layer token.
///
/// Modifiers fold into a `Chord`, except SHIFT alone on a character (the
/// terminal already reports the shifted character, so `Y` stays `Char('Y')`).
/// Returns `None` for key releases and key codes we do not support
/// (e.g. media keys).
pub fn map_key_event(event: &CKeyEvent) -> Option<KeyToken> {
    if matches!(event.kind, CKeyEventKind::Release) {
        return None;
    }
    let base = map_key_token(&event.code)?;
    let mut mods = map_mod_mask(event.modifiers);
    if matches!(base, KeyToken::Char(_)) {
        mods.remove(ModMask::SHIFT);
    }
    if mods.is_empty() {
        return Some(base);
    }
    let base = match base {
        KeyToken::Char(c) if mods.contains(ModMask::CTRL) => KeyToken::Char(c.to_ascii_lowercase()),
        other => other,
    };
    Some(KeyToken::Chord {
        base: Box::new(base),
        mods,
    })
}

/// Map any crossterm event the host loop cares about.
pub fn map_event(event: &CEvent) -> Option<InputEvent> {
    match event {
        CEvent::Key(key) => map_key_event(key).map(InputEvent::Key),
        CEvent::Paste(text) => Some(InputEvent::Paste(text.replace("\r\n", "\n").replace('\r', "\n"))),
        CEvent::Resize(columns, rows) => Some(InputEvent::Resize {
            columns: *columns,
            rows: *rows,
        }),
        _ => None,
    }
}

/// Convert a crossterm key code into a key token.
fn map_key_token(code: &CKeyCode) -> Option<KeyToken> {
    let token = match code {
        CKeyCode::Char(c) => KeyToken::Char(*c),
        CKeyCode::Enter => KeyToken::Named(NamedKey::Enter),
        CKeyCode::Esc => KeyToken::Named(NamedKey::Esc),
        CKeyCode::Backspace => KeyToken::Named(NamedKey::Backspace),
        CKeyCode::Tab | CKeyCode::BackTab => KeyToken::Named(NamedKey::Tab),
        CKeyCode::Up => KeyToken::Named(NamedKey::Up),
        CKeyCode::Down => KeyToken::Named(NamedKey::Down),
        CKeyCode::Left => KeyToken::Named(NamedKey::Left),
        CKeyCode::Right => KeyToken::Named(NamedKey::Right),
        CKeyCode::Home => KeyToken::Named(NamedKey::Home),
        CKeyCode::End => KeyToken::Named(NamedKey::End),
        CKeyCode::PageUp => KeyToken::Named(NamedKey::PageUp),
        CKeyCode::PageDown => KeyToken::Named(NamedKey::PageDown),
        CKeyCode::Insert => KeyToken::Named(NamedKey::Insert),
        CKeyCode::Delete => KeyToken::Named(NamedKey::Delete),
        CKeyCode::F(n) => KeyToken::Named(NamedKey::F(*n)),
        CKeyCode::Null
        | CKeyCode::CapsLock
        | CKeyCode::ScrollLock
        | CKeyCode::NumLock
        | CKeyCode::PrintScreen
        | CKeyCode::Pause
        | CKeyCode::Menu
        | CKeyCode::KeypadBegin
        | CKeyCode::Media(_)
        | CKeyCode::Modifier(_) => return None,
    };
    Some(token)
}

fn map_mod_mask(mods: CKeyModifiers) -> ModMask {
    let mut out = ModMask::empty();
    if mods.contains(CKeyModifiers::CONTROL) {
        out |= ModMask::CTRL;
    }
    if mods.contains(CKeyModifiers::ALT) {
        out |= ModMask::ALT;
    }
    if mods.contains(CKeyModifiers::SHIFT) {
        out |= ModMask::SHIFT;
    }
    if mods.contains(CKeyModifiers::SUPER) {
        out |= ModMask::SUPER;
    }
    if mods.contains(CKeyModifiers::META) {
        out |= ModMask::META;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState as CKeyEventState;

    fn key_event(code: CKeyCode, modifiers: CKeyModifiers, kind: CKeyEventKind) -> CKeyEvent {
        CKeyEvent {
            code,
            modifiers,
            kind,
            state: CKeyEventState::empty(),
        }
    }

    fn press(code: CKeyCode, modifiers: CKeyModifiers) -> CKeyEvent {
        key_event(code, modifiers, CKeyEventKind::Press)
    }

    #[test]
    fn maps_basic_char() {
        let token = map_key_event(&press(CKeyCode::Char('a'), CKeyModifiers::NONE));
        assert_eq!(token, Some(KeyToken::Char('a')));
    }

    #[test]
    fn shift_alone_is_folded_into_the_char() {
        let token = map_key_event(&press(CKeyCode::Char('Y'), CKeyModifiers::SHIFT));
        assert_eq!(token, Some(KeyToken::Char('Y')));
    }

    #[test]
    fn ctrl_char_becomes_lowercase_chord() {
        let token = map_key_event(&press(
            CKeyCode::Char('W'),
            CKeyModifiers::CONTROL | CKeyModifiers::SHIFT,
        ));
        assert_eq!(token, Some(KeyToken::ctrl('w')));
    }

    #[test]
    fn named_key_with_modifier_is_chord() {
        let token = map_key_event(&press(CKeyCode::Left, CKeyModifiers::ALT));
        assert_eq!(
            token,
            Some(KeyToken::Chord {
                base: Box::new(KeyToken::Named(NamedKey::Left)),
                mods: ModMask::ALT,
            })
        );
    }

    #[test]
    fn maps_function_key() {
        let token = map_key_event(&press(CKeyCode::F(5), CKeyModifiers::NONE));
        assert_eq!(token, Some(KeyToken::Named(NamedKey::F(5))));
    }

    #[test]
    fn release_and_unsupported_keys_return_none() {
        let release = key_event(
            CKeyCode::Char('j'),
            CKeyModifiers::NONE,
            CKeyEventKind::Release,
        );
        assert!(map_key_event(&release).is_none());
        assert!(map_key_event(&press(CKeyCode::CapsLock, CKeyModifiers::NONE)).is_none());
    }

    #[test]
    fn paste_normalizes_line_endings() {
        let ev = CEvent::Paste("a\r\nb\rc".to_string());
        assert_eq!(map_event(&ev), Some(InputEvent::Paste("a\nb\nc".to_string())));
    }
}
