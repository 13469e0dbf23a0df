use crate::support::*;
use std::sync::Arc;
use zonekit_editor::FinishOutcome;

#[test]
fn test_undo_redo_new_zone() {
    let mut editor = editor();
    let FinishOutcome::Committed(report) = draw(&mut editor, &rect(0, 0, 100, 100)) else {
        panic!("expected a committed zone");
    };
    let zone = report.zone.unwrap();

    assert_eq!(editor.undo().unwrap().as_deref(), Some("Add zone"));
    assert_eq!(editor.board().zone_count(), 0);
    assert!(editor.can_redo());

    editor.redo().unwrap();
    assert_eq!(corners(&editor, zone), rect(0, 0, 100, 100));
}

#[test]
fn test_undo_merge_restores_both_zones() {
    let mut editor = editor();
    let existing = place(&mut editor, GND, rect(0, 0, 100, 100));
    draw(&mut editor, &rect(50, 50, 150, 150));
    assert_eq!(editor.board().zone_count(), 1);

    editor.undo().unwrap();
    assert_eq!(editor.board().zone_count(), 1);
    assert_eq!(corners(&editor, existing), rect(0, 0, 100, 100));
}

#[test]
fn test_new_gesture_clears_redo() {
    let mut editor = editor();
    draw(&mut editor, &rect(0, 0, 100, 100));
    editor.undo().unwrap();
    assert!(editor.can_redo());

    draw(&mut editor, &rect(500, 0, 600, 100));
    assert!(!editor.can_redo());
    assert_eq!(editor.redo().unwrap(), None);
}

#[test]
fn test_undo_depth_follows_config() {
    let mut editor = editor();
    for i in 0..60 {
        let x = i * 1000;
        draw(&mut editor, &rect(x, 0, x + 100, 100));
    }
    assert_eq!(editor.journal().undo_depth(), 50);
}

#[test]
fn test_undo_notifies_listeners() {
    let mut editor = editor();
    draw(&mut editor, &rect(0, 0, 100, 100));
    let recorder = Arc::new(Recorder::default());
    let handle = editor.add_listener(recorder.clone());

    editor.undo().unwrap();
    assert_eq!(recorder.count("removed"), 1);
    editor.redo().unwrap();
    assert_eq!(recorder.count("added"), 1);

    assert!(editor.remove_listener(handle));
    editor.undo().unwrap();
    assert_eq!(recorder.count("removed"), 1);
}
