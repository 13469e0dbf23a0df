use crate::support::*;
use zonekit_core::{LayerId, NetCode, OutlineError, ZoneEditError, ZoneId};
use zonekit_editor::{Contour, CornerDeleteOutcome};

const VCC: NetCode = NetCode(2);

fn with_triangle_hole(editor: &mut TestEditor) -> ZoneId {
    let zone = place(editor, GND, rect(0, 0, 1000, 1000));
    editor
        .board_mut()
        .unwrap()
        .zone_mut(zone)
        .unwrap()
        .outline_mut()
        .add_hole(Contour::new(vec![p(100, 100), p(300, 100), p(200, 300)]))
        .unwrap();
    zone
}

#[test]
fn test_corner_delete_on_square_deletes_zone() {
    let mut editor = editor();
    let zone = place(&mut editor, GND, rect(0, 0, 100, 100));
    place(&mut editor, VCC, rect(500, 0, 600, 100));

    let outcome = editor.remove_zone_corner(zone, 1).unwrap();
    assert_eq!(outcome, CornerDeleteOutcome::ZoneDeleted);
    assert_eq!(editor.board().zone_count(), 1);
    assert!(!editor.board().contains(zone));

    editor.undo().unwrap();
    assert_eq!(editor.board().zone_count(), 2);
    assert_eq!(editor.board().index_of(zone), Some(0));
    assert_eq!(corners(&editor, zone), rect(0, 0, 100, 100));
}

#[test]
fn test_corner_delete_on_pentagon_keeps_zone() {
    let mut editor = editor();
    let zone = place(
        &mut editor,
        GND,
        vec![p(0, 0), p(100, 0), p(100, 100), p(50, 150), p(0, 100)],
    );

    let outcome = editor.remove_zone_corner(zone, 3).unwrap();
    assert!(matches!(outcome, CornerDeleteOutcome::CornerRemoved(_)));
    assert_eq!(corners(&editor, zone), rect(0, 0, 100, 100));
    assert_eq!(editor.journal().undo_depth(), 1);
}

#[test]
fn test_corner_delete_reports_drc_without_reverting() {
    let mut editor = editor();
    let zone = place(
        &mut editor,
        GND,
        vec![p(0, 0), p(100, 0), p(100, 100), p(50, 150), p(0, 100)],
    );
    editor.checker_mut().warnings = vec!["zones overlap".to_string()];

    let CornerDeleteOutcome::CornerRemoved(report) = editor.remove_zone_corner(zone, 3).unwrap()
    else {
        panic!("expected the corner to be removed");
    };
    assert_eq!(report.drc_warnings.len(), 1);
    assert_eq!(editor.board().zone(zone).unwrap().corner_count(), 4);
}

#[test]
fn test_hole_corner_delete_removes_degenerate_hole() {
    let mut editor = editor();
    let zone = with_triangle_hole(&mut editor);

    let outcome = editor.remove_zone_corner(zone, 5).unwrap();
    assert!(matches!(outcome, CornerDeleteOutcome::CornerRemoved(_)));
    let outline = editor.board().zone(zone).unwrap().outline();
    assert_eq!(outline.hole_count(), 0);
    assert_eq!(outline.total_vertices(), 4);
}

#[test]
fn test_corner_delete_bad_index_is_fatal() {
    let mut editor = editor();
    let zone = place(&mut editor, GND, rect(0, 0, 100, 100));

    let err = editor.remove_zone_corner(zone, 4).unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(editor.board().zone_count(), 1);
}

#[test]
fn test_delete_exterior_contour_is_fatal() {
    let mut editor = editor();
    let zone = with_triangle_hole(&mut editor);

    let err = editor.delete_zone_contour(zone, 2).unwrap_err();
    assert_eq!(err, ZoneEditError::Outline(OutlineError::ExteriorContour));
    assert!(err.is_fatal());
    assert_eq!(editor.board().zone(zone).unwrap().outline().hole_count(), 1);
}

#[test]
fn test_delete_hole_contour_and_undo() {
    let mut editor = editor();
    let zone = with_triangle_hole(&mut editor);
    editor
        .board_mut()
        .unwrap()
        .zone_mut(zone)
        .unwrap()
        .set_filled_polygons(Vec::new());

    editor.delete_zone_contour(zone, 6).unwrap();
    let z = editor.board().zone(zone).unwrap();
    assert_eq!(z.outline().hole_count(), 0);
    assert!(!z.is_filled());

    assert_eq!(editor.undo().unwrap().as_deref(), Some("Delete zone cutout"));
    assert_eq!(editor.board().zone(zone).unwrap().outline().hole_count(), 1);
}

#[test]
fn test_duplicate_onto_other_layer() {
    let mut editor = editor();
    let zone = place(&mut editor, GND, rect(0, 0, 100, 100));
    editor.prompt_mut().layer = Some(LayerId::B_CU);

    let report = editor.duplicate_zone(zone).unwrap().expect("prompt accepted");
    let copy = report.zone.unwrap();
    assert_ne!(copy, zone);
    assert_eq!(editor.board().zone_count(), 2);
    assert_eq!(editor.board().zone(copy).unwrap().layer(), LayerId::B_CU);
    assert_eq!(corners(&editor, copy), rect(0, 0, 100, 100));

    editor.undo().unwrap();
    assert_eq!(editor.board().zone_count(), 1);
}

#[test]
fn test_duplicate_on_same_layer_rejected() {
    let mut editor = editor();
    let zone = place(&mut editor, GND, rect(0, 0, 100, 100));

    assert_eq!(
        editor.duplicate_zone(zone),
        Err(ZoneEditError::DuplicateOnSameLayer)
    );
    assert_eq!(editor.board().zone_count(), 1);
}

#[test]
fn test_edit_params_change_net_merges_with_new_net() {
    let mut editor = editor();
    let vcc_zone = place(&mut editor, VCC, rect(0, 0, 100, 100));
    let zone = place(&mut editor, GND, rect(50, 0, 150, 100));
    editor.prompt_mut().net = Some(VCC);

    let report = editor.edit_zone_params(zone).unwrap().expect("accepted");
    assert_eq!(report.merged, 1);
    assert_eq!(report.zone, Some(vcc_zone));
    assert_eq!(editor.board().zone_count(), 1);

    editor.undo().unwrap();
    assert_eq!(editor.board().zone_count(), 2);
    assert_eq!(editor.board().zone(zone).unwrap().net(), GND);
}

#[test]
fn test_edit_params_export_touches_settings_only() {
    let mut editor = editor();
    let a = place(&mut editor, GND, rect(0, 0, 100, 100));
    let b = place(&mut editor, VCC, rect(500, 0, 600, 100));
    editor.prompt_mut().export = true;
    editor.prompt_mut().clearance = Some(1234);

    editor.edit_zone_params(a).unwrap();
    for id in [a, b] {
        let zone = editor.board().zone(id).unwrap();
        assert_eq!(zone.settings().clearance, 1234);
    }
    assert_eq!(editor.board().zone(b).unwrap().net(), VCC);
    assert_eq!(corners(&editor, b), rect(500, 0, 600, 100));
    assert_eq!(
        editor.journal().last_record().unwrap().description,
        "Export zone parameters"
    );
}

#[test]
fn test_edit_params_abort_changes_nothing() {
    let mut editor = editor();
    let zone = place(&mut editor, GND, rect(0, 0, 100, 100));
    editor.prompt_mut().abort = true;

    assert_eq!(editor.edit_zone_params(zone), Ok(None));
    assert!(!editor.journal().can_undo());
}

#[test]
fn test_unknown_zone() {
    let mut editor = editor();
    assert_eq!(
        editor.remove_zone_corner(ZoneId(42), 0),
        Err(ZoneEditError::ZoneNotFound(ZoneId(42)))
    );
}
