use std::io::Write;

use indoc::indoc;
use wm_context::WmError;
use wm_context::input::keyboard::KeyKind;
use wm_context::peer::{Notification, StateChange};
use wm_context::script::{ScriptError, ScriptRunner};

#[test]
fn ontop_owner_scenario() {
    let mut runner = ScriptRunner::default();
    runner
        .run(indoc! {"
            create a
            create b owner=a
            expect children a b
            ontop-tree a on
            expect on-top a on
            expect on-top b on

            remove-child a b
            destroy a
            expect alive a no
            expect alive b yes
            expect owner b none
        "})
        .unwrap();
    assert_eq!(
        runner.notifications(),
        vec![("a".to_string(), Notification::Destroyed)]
    );
}

#[test]
fn drag_grab_hands_back_to_menu_grab() {
    let mut runner = ScriptRunner::default();
    runner
        .run(indoc! {"
            create main
            create menu owner=main type=popup frame=untitled
            view main
            view menu
            grab menu
            expect grab menu

            event main press 1 10 10
            event main motion 30 12 button1
            expect drag main
            event main release 1 30 12 button1
            expect drag none
            expect grab menu

            ungrab menu
            expect grab none
        "})
        .unwrap();
}

#[test]
fn typed_control_character_is_logged() {
    let mut runner = ScriptRunner::default();
    runner
        .run(indoc! {"
            create w
            view w
            event w key-press a ctrl
            event w key-release a ctrl
        "})
        .unwrap();
    let typed: Vec<String> = runner
        .notifications()
        .into_iter()
        .filter_map(|(_, n)| match n {
            Notification::Key(k) if k.kind == KeyKind::Typed => Some(k.chars),
            _ => None,
        })
        .collect();
    assert_eq!(typed, vec!["\u{1}"]);
}

#[test]
fn window_state_events_are_reported() {
    let mut runner = ScriptRunner::default();
    runner
        .run(indoc! {"
            create w
            event w state iconified iconified
            event w configure 0 0 500 400
            event w state iconified none
        "})
        .unwrap();
    let states: Vec<StateChange> = runner
        .notifications()
        .into_iter()
        .filter_map(|(_, n)| match n {
            Notification::StateChanged(change) => Some(change),
            _ => None,
        })
        .collect();
    assert_eq!(states, vec![StateChange::Minimize, StateChange::Restore]);
    assert!(
        !runner
            .notifications()
            .iter()
            .any(|(_, n)| matches!(n, Notification::Resized(..)))
    );
}

#[test]
fn render_log_lists_one_entry_per_line() {
    let mut runner = ScriptRunner::default();
    runner
        .run(indoc! {"
            create w
            event w delete
            enabled w off
            event w delete
        "})
        .unwrap();
    assert_eq!(runner.render_log(), "w: Closed\n");
}

#[test]
fn failed_expectation_names_the_line() {
    let mut runner = ScriptRunner::default();
    let err = runner
        .run(indoc! {"
            create a
            create b
            expect owner b a
        "})
        .unwrap_err();
    assert!(matches!(err, ScriptError::Expectation { line: 3, .. }));
}

#[test]
fn parse_errors_stop_the_script_before_it_runs() {
    let mut runner = ScriptRunner::default();
    let err = runner
        .run(indoc! {"
            create a
            level a sideways
        "})
        .unwrap_err();
    assert!(matches!(err, ScriptError::Parse { line: 2, .. }));
    assert_eq!(runner.window("a"), None);
}

#[test]
fn name_errors() {
    let mut runner = ScriptRunner::default();
    let err = runner.run("show ghost\n").unwrap_err();
    assert!(matches!(err, ScriptError::UnknownName { line: 1, ref name } if name == "ghost"));

    let err = runner.run("create a\ncreate a\n").unwrap_err();
    assert!(matches!(err, ScriptError::DuplicateName { line: 2, .. }));
}

#[test]
fn engine_errors_carry_the_line() {
    let mut runner = ScriptRunner::default();
    let err = runner
        .run(indoc! {"
            create a
            create b owner=a
            add-child b a
        "})
        .unwrap_err();
    assert!(matches!(
        err,
        ScriptError::Engine {
            line: 3,
            source: WmError::HierarchyCycle { .. }
        }
    ));
}

#[test]
fn runs_script_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "create w").unwrap();
    writeln!(file, "level w floating").unwrap();
    writeln!(file, "expect on-top w yes").unwrap();
    file.flush().unwrap();

    let mut runner = ScriptRunner::default();
    runner.run_file(file.path()).unwrap();
    assert!(runner.window("w").is_some());
}

#[test]
fn missing_script_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut runner = ScriptRunner::default();
    let err = runner
        .run_file(&dir.path().join("missing.wm"))
        .unwrap_err();
    assert!(matches!(err, ScriptError::Io(_)));
}
