use vim_motions::registers::UNNAMED;
use vim_motions::traits::Host;
use vim_motions::{Action, Engine, Mode, Motion, MotionAction, Register, Selection, VisualKind};

mod support;
use support::mock_buffer::{MockBuffer, feed};

fn setup(text: &str, cursor: usize) -> (Engine, MockBuffer) {
    (Engine::new(), MockBuffer::with_cursor(text, cursor))
}

#[test]
fn test_dot_repeats_change_with_typed_text() {
    let (mut eng, mut buf) = setup("foo bar baz", 0);

    feed(&mut eng, &mut buf, "ciwxy<esc>");
    assert_eq!(buf.contents(), "xy bar baz");
    assert_eq!(buf.cursor(), 1);

    feed(&mut eng, &mut buf, "w.");
    assert_eq!(buf.contents(), "xy xy baz");
    assert_eq!(buf.cursor(), 4);
    assert_eq!(eng.mode(), Mode::Normal);
}

#[test]
fn test_dot_count_replaces_original_count() {
    let (mut eng, mut buf) = setup("a b c d e f", 0);

    feed(&mut eng, &mut buf, "dw");
    assert_eq!(buf.contents(), "b c d e f");
    feed(&mut eng, &mut buf, "3.");
    assert_eq!(buf.contents(), "e f");
}

#[test]
fn test_dot_repeats_instants_and_appends() {
    let (mut eng, mut buf) = setup("abcdef", 0);
    feed(&mut eng, &mut buf, "x..");
    assert_eq!(buf.contents(), "def");

    let (mut eng, mut buf) = setup("a\nb", 0);
    feed(&mut eng, &mut buf, "A!<esc>j.");
    assert_eq!(buf.contents(), "a!\nb!");
}

#[test]
fn test_motions_and_yanks_do_not_replace_last_change() {
    let (mut eng, mut buf) = setup("one two three", 0);

    feed(&mut eng, &mut buf, "xwyw$.");
    assert_eq!(buf.contents(), "ne two thre");
}

#[test]
fn test_dot_without_history_does_nothing() {
    let (mut eng, mut buf) = setup("abc", 1);

    feed(&mut eng, &mut buf, ".");
    assert_eq!(buf.contents(), "abc");
    assert_eq!(buf.cursor(), 1);
    assert_eq!(eng.mode(), Mode::Normal);
}

#[test]
fn test_rejected_edit_abandons_command() {
    let (mut eng, mut buf) = setup("one\ntwo", 0);

    buf.reject_next_edit();
    let actions = feed(&mut eng, &mut buf, "dd");
    // only the operator key completed an action
    assert_eq!(actions.len(), 1);
    assert_eq!(buf.contents(), "one\ntwo");
    assert_eq!(eng.mode(), Mode::Normal);
    assert_eq!(eng.registers_mut().read(UNNAMED), None);

    feed(&mut eng, &mut buf, "dd");
    assert_eq!(buf.contents(), "two");
}

#[test]
fn test_rejected_insert_returns_to_normal() {
    let (mut eng, mut buf) = setup("abc", 0);

    feed(&mut eng, &mut buf, "i");
    buf.reject_next_edit();
    feed(&mut eng, &mut buf, "x");
    assert_eq!(buf.contents(), "abc");
    assert_eq!(eng.mode(), Mode::Normal);
}

#[test]
fn test_insert_typing_and_backspace() {
    let (mut eng, mut buf) = setup("", 0);

    let actions = feed(&mut eng, &mut buf, "ihello<bs><bs>p<cr>x");
    assert!(actions.iter().all(|a| matches!(a, Action::ChangeMode(_))));
    assert_eq!(buf.contents(), "help\nx");
    assert_eq!(eng.mode(), Mode::Insert);

    feed(&mut eng, &mut buf, "<esc>");
    assert_eq!(eng.mode(), Mode::Normal);
    assert_eq!(buf.cursor(), 5);
}

#[test]
fn test_backspace_at_buffer_start_is_ignored() {
    let (mut eng, mut buf) = setup("abc", 0);

    feed(&mut eng, &mut buf, "i<bs><bs>");
    assert_eq!(buf.contents(), "abc");
    assert_eq!(eng.mode(), Mode::Insert);
}

#[test]
fn test_insert_entry_points() {
    let (mut eng, mut buf) = setup("  abc", 3);

    feed(&mut eng, &mut buf, "Ix<esc>");
    assert_eq!(buf.contents(), "  xabc");
    assert_eq!(buf.cursor(), 2);

    feed(&mut eng, &mut buf, "gIy<esc>");
    assert_eq!(buf.contents(), "y  xabc");

    feed(&mut eng, &mut buf, "Az<esc>");
    assert_eq!(buf.contents(), "y  xabcz");

    feed(&mut eng, &mut buf, "onext<esc>");
    assert_eq!(buf.contents(), "y  xabcz\nnext");
    assert_eq!(buf.cursor_line_col(), (1, 3));

    feed(&mut eng, &mut buf, "Oprev<esc>");
    assert_eq!(buf.contents(), "y  xabcz\nprev\nnext");
    assert_eq!(buf.cursor_line_col(), (1, 3));
}

#[test]
fn test_append_after_cursor() {
    let (mut eng, mut buf) = setup("ab", 0);
    feed(&mut eng, &mut buf, "aX<esc>");
    assert_eq!(buf.contents(), "aXb");

    let (mut eng, mut buf) = setup("", 0);
    feed(&mut eng, &mut buf, "aok<esc>");
    assert_eq!(buf.contents(), "ok");
}

#[test]
fn test_undo_restores_text_and_cursor() {
    let (mut eng, mut buf) = setup("one two", 4);

    feed(&mut eng, &mut buf, "dw");
    assert_eq!(buf.contents(), "one ");
    feed(&mut eng, &mut buf, "u");
    assert_eq!(buf.contents(), "one two");
    assert_eq!(buf.cursor(), 4);

    let (mut eng, mut buf) = setup("abcd", 0);
    feed(&mut eng, &mut buf, "xxx2u");
    assert_eq!(buf.contents(), "bcd");
}

#[test]
fn test_ctrl_bracket_escapes() {
    let (mut eng, mut buf) = setup("abc", 0);

    feed(&mut eng, &mut buf, "iz<C-[>");
    assert_eq!(eng.mode(), Mode::Normal);
    assert_eq!(buf.contents(), "zabc");

    feed(&mut eng, &mut buf, "vl<C-[>");
    assert_eq!(eng.mode(), Mode::Normal);
    assert_eq!(buf.selection(), Selection::cursor(1));
}

#[test]
fn test_other_chords_cancel_pending_input() {
    let (mut eng, mut buf) = setup("abc", 0);

    feed(&mut eng, &mut buf, "2d<C-x>");
    assert_eq!(eng.mode(), Mode::Normal);
    assert_eq!(eng.snapshot().pending_count, None);

    // typing is unaffected
    feed(&mut eng, &mut buf, "i<C-x>q");
    assert_eq!(eng.mode(), Mode::Insert);
    assert_eq!(buf.contents(), "qabc");
}

#[test]
fn test_marks_follow_lines_inserted_above() {
    let (mut eng, mut buf) = setup("one\ntwo\nthree", 5);

    feed(&mut eng, &mut buf, "maggOnew<esc>");
    assert_eq!(buf.contents(), "new\none\ntwo\nthree");
    let mark = eng.marks().get('a').map(|p| (p.line, p.col));
    assert_eq!(mark, Some((2, 1)));

    feed(&mut eng, &mut buf, "gg`a");
    assert_eq!(buf.cursor(), 9);
}

#[test]
fn test_marks_follow_external_edits() {
    let (mut eng, mut buf) = setup("one\ntwo", 5);
    feed(&mut eng, &mut buf, "mb");

    buf.external_edit(0, 0, "zero\nhalf\n");
    let changes = buf.take_changes();
    eng.notify_document_changed(&buf, &changes);
    assert_eq!(eng.marks().get('b').map(|p| (p.line, p.col)), Some((3, 1)));
}

#[test]
fn test_deleting_marked_text_drops_mark() {
    let (mut eng, mut buf) = setup("one\ntwo\nthree", 5);

    feed(&mut eng, &mut buf, "madd");
    assert_eq!(buf.contents(), "one\nthree");
    assert!(eng.marks().get('a').is_none());
}

#[test]
fn test_host_selection_enters_and_leaves_visual() {
    let (mut eng, mut buf) = setup("abcdef", 0);

    let selection = Selection { anchor: 1, active: 4 };
    buf.set_selection(selection).unwrap();
    eng.notify_selection_changed(&[selection]);
    assert_eq!(eng.mode(), Mode::Visual(VisualKind::CharWise));

    feed(&mut eng, &mut buf, "d");
    assert_eq!(buf.contents(), "aef");
    assert_eq!(eng.mode(), Mode::Normal);

    feed(&mut eng, &mut buf, "vl");
    eng.notify_selection_changed(&[Selection::cursor(0)]);
    assert_eq!(eng.mode(), Mode::Normal);
}

#[test]
fn test_empty_selection_list_is_ignored() {
    let mut eng = Engine::new();
    eng.notify_selection_changed(&[]);
    assert_eq!(eng.mode(), Mode::Normal);
}

#[test]
fn test_process_key_by_name() {
    let (mut eng, mut buf) = setup("abc", 0);

    let action = eng.process_key(&mut buf, "l");
    assert_eq!(
        action,
        Some(Action::Motion(MotionAction {
            count: 1,
            motion: Motion::Right,
        }))
    );
    assert_eq!(buf.cursor(), 1);

    eng.process_key(&mut buf, "d");
    assert_eq!(eng.mode(), Mode::OperatorPending);
    assert_eq!(eng.process_key(&mut buf, "<nonsense>"), None);
    assert_eq!(eng.mode(), Mode::Normal);
}

#[test]
fn test_process_keys_collects_actions() {
    let (mut eng, mut buf) = setup("one two", 0);

    let actions = eng.process_keys(&mut buf, "wyiw");
    assert_eq!(actions.len(), 3);
    assert_eq!(
        eng.registers_mut().read(UNNAMED),
        Some(Register::new(false, "two"))
    );
}

#[test]
fn test_snapshot_reports_partial_input() {
    let (mut eng, mut buf) = setup("abc", 0);

    feed(&mut eng, &mut buf, "\"a2");
    let snap = eng.snapshot();
    assert_eq!(snap.register, Some('a'));
    assert_eq!(snap.pending_count, Some(2));

    feed(&mut eng, &mut buf, "<esc>");
    let snap = eng.snapshot();
    assert_eq!(snap.register, None);
    assert_eq!(snap.pending_count, None);
}
