use crate::support::*;
use proptest::prelude::*;
use std::sync::Arc;
use zonekit_core::{OutlineError, ZoneEditError};
use zonekit_editor::{EditState, FinishOutcome};

fn gnd_square(editor: &mut TestEditor) -> zonekit_core::ZoneId {
    match draw(editor, &rect(0, 0, 100, 100)) {
        FinishOutcome::Committed(report) => report.zone.expect("zone survives"),
        other => panic!("expected a committed zone, got {other:?}"),
    }
}

#[test]
fn test_drag_corner_abort_restores_position() {
    let mut editor = editor();
    let zone = gnd_square(&mut editor);

    editor.start_move_corner(zone, 2).unwrap();
    assert_eq!(editor.state(), EditState::MovingCorner);
    editor.on_mouse_move(p(150, 100)).unwrap();
    assert_eq!(corners(&editor, zone)[2], p(150, 100));

    assert!(editor.abort().unwrap());
    assert_eq!(corners(&editor, zone)[2], p(100, 100));
    assert_eq!(editor.board().zone(zone).unwrap().corner_count(), 4);
    assert_eq!(editor.state(), EditState::Idle);
    assert_eq!(editor.journal().undo_depth(), 1);
}

#[test]
fn test_drag_corner_commit_and_undo() {
    let mut editor = editor();
    let zone = gnd_square(&mut editor);

    editor.start_move_corner(zone, 2).unwrap();
    editor.on_mouse_move(p(150, 100)).unwrap();
    let report = editor.end_move().unwrap();
    assert_eq!(report.zone, Some(zone));
    assert_eq!(corners(&editor, zone)[2], p(150, 100));
    assert!(editor.board().zone(zone).unwrap().flags().selected_corner.is_none());

    assert_eq!(editor.undo().unwrap().as_deref(), Some("Move zone corner"));
    assert_eq!(corners(&editor, zone), rect(0, 0, 100, 100));
    editor.redo().unwrap();
    assert_eq!(corners(&editor, zone)[2], p(150, 100));
}

#[test]
fn test_inserted_corner_removed_on_abort() {
    let mut editor = editor();
    let zone = gnd_square(&mut editor);

    editor.insert_corner_and_move(zone, 0, p(50, 0)).unwrap();
    assert_eq!(editor.board().zone(zone).unwrap().corner_count(), 5);
    editor.on_mouse_move(p(50, -30)).unwrap();
    assert_eq!(corners(&editor, zone)[1], p(50, -30));

    editor.abort().unwrap();
    assert_eq!(corners(&editor, zone), rect(0, 0, 100, 100));
}

#[test]
fn test_inserted_corner_undo_removes_it() {
    let mut editor = editor();
    let zone = gnd_square(&mut editor);

    editor.insert_corner_and_move(zone, 0, p(50, 0)).unwrap();
    editor.on_mouse_move(p(50, -30)).unwrap();
    editor.end_move().unwrap();
    assert_eq!(editor.board().zone(zone).unwrap().corner_count(), 5);

    editor.undo().unwrap();
    assert_eq!(corners(&editor, zone), rect(0, 0, 100, 100));
}

#[test]
fn test_drag_edge_moves_both_ends() {
    let mut editor = editor();
    let zone = gnd_square(&mut editor);

    editor.start_drag_edge(zone, 0, p(50, 0)).unwrap();
    assert_eq!(editor.state(), EditState::DraggingEdge);
    editor.on_mouse_move(p(55, -10)).unwrap();
    editor.on_mouse_move(p(50, -20)).unwrap();
    editor.end_move().unwrap();

    assert_eq!(
        corners(&editor, zone),
        vec![p(0, -20), p(100, -20), p(100, 100), p(0, 100)]
    );
}

#[test]
fn test_move_zone_onto_neighbour_merges() {
    let mut editor = editor();
    let neighbour = place(&mut editor, GND, rect(300, 0, 400, 100));
    let zone = gnd_square(&mut editor);

    editor.start_move_zone(zone, p(0, 0)).unwrap();
    editor.on_mouse_move(p(250, 0)).unwrap();
    let report = editor.end_move().unwrap();

    assert_eq!(report.merged, 1);
    assert_eq!(report.zone, Some(neighbour));
    assert_eq!(editor.board().zone_count(), 1);
    let area = editor.board().zone(neighbour).unwrap().outline().area();
    assert!((area - 15_000.0).abs() < 1.0, "area was {area}");

    editor.undo().unwrap();
    assert_eq!(editor.board().zone_count(), 2);
    assert_eq!(corners(&editor, zone), rect(0, 0, 100, 100));
    assert_eq!(corners(&editor, neighbour), rect(300, 0, 400, 100));
}

#[test]
fn test_drc_after_move_is_advisory() {
    let mut editor = editor();
    let recorder = Arc::new(Recorder::default());
    editor.add_listener(recorder.clone());
    let zone = gnd_square(&mut editor);
    editor.checker_mut().warnings = vec!["clearance to VCC".to_string()];

    editor.start_move_zone(zone, p(0, 0)).unwrap();
    editor.on_mouse_move(p(10, 0)).unwrap();
    let report = editor.end_move().unwrap();

    assert_eq!(report.drc_warnings, vec!["clearance to VCC".to_string()]);
    assert_eq!(corners(&editor, zone), rect(10, 0, 110, 100));
    assert_eq!(recorder.count("drc"), 1);
}

#[test]
fn test_undo_refused_while_dragging() {
    let mut editor = editor();
    let zone = gnd_square(&mut editor);
    editor.start_move_zone(zone, p(0, 0)).unwrap();

    assert!(!editor.can_undo());
    assert!(matches!(
        editor.undo(),
        Err(ZoneEditError::SessionActive { .. })
    ));
    assert!(matches!(
        editor.start_move_corner(zone, 0),
        Err(ZoneEditError::SessionActive { .. })
    ));
}

#[test]
fn test_bad_corner_index_is_fatal() {
    let mut editor = editor();
    let zone = gnd_square(&mut editor);

    let err = editor.start_move_corner(zone, 9).unwrap_err();
    assert_eq!(
        err,
        ZoneEditError::Outline(OutlineError::VertexOutOfRange { index: 9, count: 4 })
    );
    assert!(err.is_fatal());
    assert_eq!(editor.state(), EditState::Idle);
}

#[test]
fn test_end_move_requires_drag() {
    let mut editor = editor();
    assert_eq!(editor.end_move(), Err(ZoneEditError::NoActiveSession));

    editor
        .begin_zone(p(0, 0), zonekit_editor::ZoneTool::Copper)
        .unwrap();
    assert_eq!(editor.end_move(), Err(ZoneEditError::NoActiveSession));
    assert_eq!(editor.state(), EditState::DrawingNewZone);
}

#[derive(Debug, Clone, Copy)]
enum Gesture {
    Corner(usize),
    Edge(usize),
    Whole,
}

fn gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (0usize..4).prop_map(Gesture::Corner),
        (0usize..4).prop_map(Gesture::Edge),
        Just(Gesture::Whole),
    ]
}

proptest! {
    #[test]
    fn prop_abort_restores_every_vertex(
        gesture in gesture(),
        moves in prop::collection::vec((-500i64..500, -500i64..500), 1..8),
    ) {
        let mut editor = editor();
        let zone = place(&mut editor, GND, rect(0, 0, 100, 100));
        let before = editor.board().zone(zone).unwrap().outline().clone();

        match gesture {
            Gesture::Corner(corner) => editor.start_move_corner(zone, corner).unwrap(),
            Gesture::Edge(edge) => editor.start_drag_edge(zone, edge, p(7, 3)).unwrap(),
            Gesture::Whole => editor.start_move_zone(zone, p(7, 3)).unwrap(),
        }
        for (x, y) in moves {
            editor.on_mouse_move(p(x, y)).unwrap();
        }
        editor.abort().unwrap();

        let after = editor.board().zone(zone).unwrap().outline();
        prop_assert_eq!(after, &before);
        prop_assert_eq!(editor.state(), EditState::Idle);
    }
}
