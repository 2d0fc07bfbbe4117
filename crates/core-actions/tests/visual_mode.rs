mod common;
use common::*;
use core_actions::{MAX_INSERT_REPEAT, MAX_PASTE_BYTES};
use core_state::Mode;
use pretty_assertions::assert_eq;

#[test]
fn yank_selection_then_paste_at_line_end() {
    let mut ed = editor("abcdef", 0, 0);
    feed(&mut ed, "v2ly");
    assert_eq!(ed.clipboard().fallback(), "abc");
    assert_eq!(ed.mode(), Mode::Normal);
    assert_eq!(ed.anchor(), None);
    feed(&mut ed, "$p");
    assert_eq!(ed.text(), "abcdefabc");
    assert_eq!(ed.cursor(), pos(0, 8));
}

#[test]
fn selection_is_inclusive_in_either_direction() {
    let mut ed = editor("abcdef", 0, 3);
    feed(&mut ed, "v");
    assert_eq!(ed.selection_range(), Some((3, 4)));
    feed(&mut ed, "2h");
    assert_eq!(ed.selection_range(), Some((1, 4)));
    feed(&mut ed, "<Esc>");
    assert_eq!(ed.selection_range(), None);
    assert_eq!(ed.mode(), Mode::Normal);
}

#[test]
fn v_toggles_back_to_normal() {
    let mut ed = editor("abc", 0, 0);
    feed(&mut ed, "vlv");
    assert_eq!(ed.mode(), Mode::Normal);
    assert_eq!(ed.anchor(), None);
    assert_eq!(ed.cursor(), pos(0, 1));
}

#[test]
fn visual_line_yank_covers_whole_lines() {
    let mut ed = editor("one\ntwo\nthree", 1, 2);
    feed(&mut ed, "vkY");
    assert_eq!(ed.clipboard().fallback(), "one\ntwo");
    assert_eq!(ed.mode(), Mode::Normal);
}

#[test]
fn normal_yank_copies_line_without_newline() {
    let mut ed = editor("one\ntwo", 1, 1);
    feed(&mut ed, "y");
    assert_eq!(ed.clipboard().fallback(), "two");
    feed(&mut ed, "kY");
    assert_eq!(ed.clipboard().fallback(), "one");
}

#[test]
fn visual_delete_removes_selection() {
    let mut ed = editor("abcdef", 0, 1);
    feed(&mut ed, "vld");
    assert_eq!(ed.text(), "adef");
    assert_eq!(ed.cursor(), pos(0, 1));
    assert_eq!(ed.mode(), Mode::Normal);

    let mut ed = editor("ab\ncd", 0, 1);
    feed(&mut ed, "vjx");
    assert_eq!(ed.text(), "a");
    assert_eq!(ed.undo_depth(), 1);
}

#[test]
fn visual_paste_overwrites_selection() {
    let mut ed = editor("hello world", 0, 0);
    feed(&mut ed, "vey");
    feed(&mut ed, "wlvep");
    assert_eq!(ed.text(), "hello hello");
    assert_eq!(ed.cursor(), pos(0, 10));
    assert_eq!(ed.mode(), Mode::Normal);
    assert_eq!(ed.undo_depth(), 1);
}

#[test]
fn visual_paste_without_clipboard_aborts_to_normal() {
    let mut ed = editor("abc", 0, 0);
    feed(&mut ed, "vlp");
    assert_eq!(ed.text(), "abc");
    assert_eq!(ed.mode(), Mode::Normal);
    assert_eq!(ed.anchor(), None);
    assert_eq!(ed.undo_depth(), 0);
}

#[test]
fn normal_paste_with_count_goes_after_cursor() {
    let mut ed = editor("ab", 0, 0);
    feed(&mut ed, "y2p");
    assert_eq!(ed.text(), "aababb");
    assert_eq!(ed.cursor(), pos(0, 4));
    assert_eq!(ed.undo_depth(), 1);
}

#[test]
fn paste_count_is_clamped() {
    let mut ed = editor("ab", 0, 1);
    feed(&mut ed, "y4294967295p");
    assert_eq!(ed.text().len(), 2 * (1 + MAX_INSERT_REPEAT));
    assert_eq!(ed.undo_depth(), 1);
}

#[test]
fn oversized_paste_is_aborted_without_an_edit() {
    let line = "x".repeat(MAX_PASTE_BYTES / MAX_INSERT_REPEAT + 1);
    let mut ed = editor(&line, 0, 0);
    feed(&mut ed, "y1000p");
    assert_eq!(ed.text(), line);
    assert_eq!(ed.cursor(), pos(0, 0));
    assert_eq!(ed.undo_depth(), 0);
    assert!(!ed.has_pending_command());
}

#[test]
fn multiline_paste_places_cursor_on_last_unit() {
    let mut ed = editor("one\ntwo\nx", 0, 0);
    feed(&mut ed, "vjYjjp");
    assert_eq!(ed.text(), "one\ntwo\nxone\ntwo");
    assert_eq!(ed.cursor(), pos(3, 2));
}
