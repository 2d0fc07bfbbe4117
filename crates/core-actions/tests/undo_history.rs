mod common;
use common::*;
use core_model::{EditCommand, PrimitiveEditor};
use core_state::Mode;
use proptest::prelude::*;

#[test]
fn compound_command_is_one_entry() {
    let mut ed = editor("a\nb\nc\nd", 0, 0);
    feed(&mut ed, "3J");
    assert_eq!(ed.undo_depth(), 1);
    feed(&mut ed, "u");
    assert_eq!(ed.text(), "a\nb\nc\nd");
    assert_eq!(ed.cursor(), pos(0, 0));
}

#[test]
fn nested_tracked_edits_collapse() {
    let mut ed = editor("abc", 0, 0);
    ed.with_tracked_edit(|ed| {
        ed.editor_mut().apply(EditCommand::DeleteCharForward);
        ed.with_tracked_edit(|ed| ed.editor_mut().apply(EditCommand::DeleteCharForward));
        ed.editor_mut().apply(EditCommand::InsertText("xy".into()));
    });
    assert_eq!(ed.text(), "xyc");
    assert_eq!(ed.undo_depth(), 1);
}

#[test]
fn no_net_change_records_nothing() {
    let mut ed = editor("abc", 0, 1);
    ed.with_tracked_edit(|ed| {
        ed.editor_mut().apply(EditCommand::DeleteCharForward);
        ed.editor_mut().apply(EditCommand::InsertText("b".into()));
    });
    assert_eq!(ed.undo_depth(), 0);
    feed(&mut ed, "$l0");
    assert_eq!(ed.undo_depth(), 0, "motions never record");
}

#[test]
fn undo_on_empty_history_is_noop_but_clears_pending() {
    let mut ed = editor("abc", 0, 0);
    feed(&mut ed, "2d");
    assert!(ed.has_pending_command());
    assert!(!ed.undo());
    assert!(!ed.has_pending_command());
    assert_eq!(ed.text(), "abc");
}

#[test]
fn new_edit_clears_redo() {
    let mut ed = editor("abcdef", 0, 0);
    feed(&mut ed, "xxu");
    assert_eq!(ed.redo_depth(), 1);
    feed(&mut ed, "x");
    assert_eq!(ed.redo_depth(), 0);
}

#[test]
fn undo_from_insert_forces_normal() {
    let mut ed = editor_in("", 0, 0, "insert");
    feed(&mut ed, "hi");
    assert_eq!(ed.undo_depth(), 2, "every insert keystroke is its own entry");
    assert!(ed.undo());
    assert_eq!(ed.mode(), Mode::Normal);
    assert_eq!(ed.text(), "h");
}

#[test]
fn undo_and_redo_take_counts() {
    let mut ed = editor("abcdef", 0, 0);
    feed(&mut ed, "xxx");
    feed(&mut ed, "2u");
    assert_eq!(ed.text(), "bcdef");
    feed(&mut ed, "5U");
    assert_eq!(ed.text(), "def");
    assert_eq!(ed.redo_depth(), 0);
}

#[test]
fn undo_leaves_visual_mode() {
    let mut ed = editor("abc", 0, 0);
    feed(&mut ed, "x");
    feed(&mut ed, "vlu");
    assert_eq!(ed.mode(), Mode::Normal);
    assert_eq!(ed.anchor(), None);
    assert_eq!(ed.text(), "abc");
}

// Commands whose first recorded edit starts at the cursor the command was
// typed at, so undoing everything must restore the starting cursor too.
fn command() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "x", "2x", "dw", "db", "dd", "d2w", "J", "D", "ofoo<Esc>", "Obar<Esc>", "p", "yyp", "vd",
        "2p",
    ])
}

proptest! {
    #[test]
    fn undo_all_then_redo_all_round_trips(cmds in prop::collection::vec(command(), 1..12)) {
        let mut ed = editor("alpha beta\n  gamma delta\nepsilon", 1, 3);
        let start = ed.capture();
        for c in &cmds {
            feed(&mut ed, c);
        }
        let end = ed.capture();
        let depth = ed.undo_depth();
        for _ in 0..depth {
            prop_assert!(ed.undo());
        }
        prop_assert!(!ed.undo());
        prop_assert_eq!(ed.text(), start.text.clone());
        prop_assert_eq!(ed.cursor(), start.cursor);
        for _ in 0..depth {
            prop_assert!(ed.redo());
        }
        prop_assert_eq!(ed.text(), end.text);
    }
}
