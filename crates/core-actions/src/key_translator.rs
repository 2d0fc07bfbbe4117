//! Key classification.
//!
//! `translate` maps one `KeyToken` to an `Action` given the current mode and
//! pending sub-command. Priority order:
//!
//! 1. Escape.
//! 2. Insert mode: everything else goes to the primitive editor.
//! 3. Pending find (`f` / `t`): a printable character is the target, anything
//!    else cancels.
//! 4. ASCII digit, except a bare `0` (no digits typed yet), accumulates the
//!    count.
//! 5. Pending operator: printable keys are resolved as the operator's motion,
//!    anything else cancels. A bare `0` lands here and aborts the operator.
//! 6. Normal / Visual key table for printable keys; non-printable keys are
//!    forwarded to the host.
//!
//! Translation is pure; `dispatch` owns every state change.

use core_events::KeyToken;
use core_state::{Mode, PendingCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Escape,
    /// Hand the raw token to the primitive editor.
    Forward,
    /// Target character of a pending `f` / `t`.
    FindTarget(char),
    /// Drop the pending sub-command without side effects.
    CancelPending,
    Count(char),
    /// Key typed while an operator is pending.
    OperatorMotion(char),
    /// Normal / Visual key table entry.
    Command(char),
}

pub fn translate(mode: Mode, pending: &PendingCommand, key: &KeyToken) -> Action {
    if key.is_escape() {
        return Action::Escape;
    }
    if mode == Mode::Insert {
        return Action::Forward;
    }
    let printable = key.printable();
    if pending.find().is_some() {
        return match printable {
            Some(c) => Action::FindTarget(c),
            None => Action::CancelPending,
        };
    }
    if let Some(c) = printable
        && c.is_ascii_digit()
        && (c != '0' || pending.has_count())
    {
        return Action::Count(c);
    }
    if pending.operator().is_some() {
        return match printable {
            Some(c) => Action::OperatorMotion(c),
            None => Action::CancelPending,
        };
    }
    match printable {
        Some(c) => Action::Command(c),
        None => Action::Forward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::NamedKey;
    use core_state::{FindKind, Operator};

    fn ch(c: char) -> KeyToken {
        KeyToken::Char(c)
    }

    #[test]
    fn insert_mode_forwards_everything_but_escape() {
        let p = PendingCommand::new();
        assert_eq!(translate(Mode::Insert, &p, &ch('d')), Action::Forward);
        assert_eq!(translate(Mode::Insert, &p, &KeyToken::ctrl('w')), Action::Forward);
        assert_eq!(translate(Mode::Insert, &p, &KeyToken::esc()), Action::Escape);
    }

    #[test]
    fn bare_zero_is_a_command_but_trailing_zero_counts() {
        let mut p = PendingCommand::new();
        assert_eq!(translate(Mode::Normal, &p, &ch('0')), Action::Command('0'));
        p.push_digit('1');
        assert_eq!(translate(Mode::Normal, &p, &ch('0')), Action::Count('0'));
    }

    #[test]
    fn zero_after_operator_goes_to_resolver() {
        let mut p = PendingCommand::new();
        p.begin_operator(Operator::Delete);
        assert_eq!(translate(Mode::Normal, &p, &ch('0')), Action::OperatorMotion('0'));
        assert_eq!(translate(Mode::Normal, &p, &ch('3')), Action::Count('3'));
        assert_eq!(
            translate(Mode::Normal, &p, &KeyToken::Named(NamedKey::Left)),
            Action::CancelPending
        );
    }

    #[test]
    fn pending_find_takes_digits_as_targets() {
        let mut p = PendingCommand::new();
        p.arm_find(FindKind::Forward);
        assert_eq!(translate(Mode::Normal, &p, &ch('7')), Action::FindTarget('7'));
        assert_eq!(translate(Mode::Visual, &p, &KeyToken::ctrl('a')), Action::CancelPending);
    }

    #[test]
    fn non_printable_in_normal_is_forwarded() {
        let p = PendingCommand::new();
        assert_eq!(
            translate(Mode::Normal, &p, &KeyToken::Named(NamedKey::Up)),
            Action::Forward
        );
        assert_eq!(translate(Mode::Visual, &p, &ch('y')), Action::Command('y'));
    }
}
