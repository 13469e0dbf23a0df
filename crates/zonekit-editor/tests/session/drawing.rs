use crate::support::*;
use std::sync::Arc;
use zonekit_core::{LayerId, NetCode, ZoneEditError};
use zonekit_editor::{BeginOutcome, DrcVerdict, EditState, FinishOutcome, LastCornerOutcome, ZoneTool};

#[test]
fn test_draw_gnd_square() {
    let mut editor = editor();
    let outcome = draw(&mut editor, &rect(0, 0, 100, 100));

    let FinishOutcome::Committed(report) = outcome else {
        panic!("expected a committed zone, got {outcome:?}");
    };
    let id = report.zone.expect("zone survives");
    assert_eq!(editor.board().zone_count(), 1);
    assert_eq!(corners(&editor, id), rect(0, 0, 100, 100));

    let zone = editor.board().zone(id).unwrap();
    assert_eq!(zone.outline().hole_count(), 0);
    assert_eq!(editor.board().nets().name(zone.net()), Some("GND"));
    assert!(!zone.flags().is_new);
    assert_eq!(editor.state(), EditState::Idle);
    assert_eq!(editor.journal().undo_depth(), 1);
}

#[test]
fn test_two_corners_never_commit() {
    let mut editor = editor();
    let outcome = draw(&mut editor, &[p(0, 0), p(100, 0)]);

    assert_eq!(outcome, FinishOutcome::Cancelled);
    assert_eq!(editor.board().zone_count(), 0);
    assert_eq!(editor.state(), EditState::Idle);
    assert!(!editor.journal().can_undo());
}

#[test]
fn test_duplicate_clicks_are_pruned() {
    let mut editor = editor();
    let outcome = draw(
        &mut editor,
        &[p(0, 0), p(100, 0), p(100, 0), p(100, 100), p(0, 100), p(0, 100)],
    );
    let FinishOutcome::Committed(report) = outcome else {
        panic!("expected a committed zone");
    };
    assert_eq!(corners(&editor, report.zone.unwrap()).len(), 4);
}

#[test]
fn test_end_zone_without_session() {
    let mut editor = editor();
    assert_eq!(editor.end_zone(), Err(ZoneEditError::NoActiveSession));
}

#[test]
fn test_prompt_abort_destroys_candidate() {
    let mut editor = editor();
    editor.prompt_mut().abort = true;

    let outcome = editor.begin_zone(p(0, 0), ZoneTool::Copper).unwrap();
    assert_eq!(outcome, BeginOutcome::Aborted);
    assert_eq!(editor.state(), EditState::Idle);
    assert!(editor.candidate().is_none());
}

#[test]
fn test_first_click_prompts_once() {
    let mut editor = editor();
    draw(&mut editor, &rect(0, 0, 100, 100));
    assert_eq!(editor.prompt_mut().calls, vec!["copper"]);
    assert_eq!(editor.board().highlight_net(), Some(GND));
}

#[test]
fn test_non_copper_layer_uses_non_copper_prompt() {
    let mut editor = editor();
    editor.set_active_layer(LayerId::F_SILKS);
    editor.begin_zone(p(0, 0), ZoneTool::Copper).unwrap();
    assert_eq!(editor.prompt_mut().calls, vec!["non-copper"]);
    assert_eq!(editor.candidate().unwrap().layer(), LayerId::F_SILKS);
}

#[test]
fn test_keepout_requires_copper_layer() {
    let mut editor = editor();
    editor.set_active_layer(LayerId::F_SILKS);

    let err = editor.begin_zone(p(0, 0), ZoneTool::Keepout).unwrap_err();
    assert_eq!(err, ZoneEditError::KeepoutNotOnCopper);
    assert_eq!(editor.state(), EditState::Idle);
}

#[test]
fn test_keepout_forces_unconnected_net() {
    let mut editor = editor();
    editor.set_active_layer(LayerId::B_CU);
    editor.begin_zone(p(0, 0), ZoneTool::Keepout).unwrap();

    let candidate = editor.candidate().unwrap();
    assert!(candidate.is_keepout());
    assert_eq!(candidate.net(), NetCode::UNCONNECTED);
    assert!(candidate.layer_set().contains(LayerId::B_CU));
    assert_eq!(editor.prompt_mut().calls, vec!["keepout"]);
}

#[test]
fn test_start_point_violation_discards_candidate() {
    let mut editor = editor();
    editor
        .checker_mut()
        .verdicts
        .push_back(DrcVerdict::Violation("inside another zone".into()));

    let err = editor.begin_zone(p(0, 0), ZoneTool::Copper).unwrap_err();
    assert!(matches!(err, ZoneEditError::StartPointViolation { .. }));
    assert!(err.is_rule_violation());
    assert_eq!(editor.state(), EditState::Idle);
}

#[test]
fn test_edge_violation_keeps_session_open() {
    let mut editor = editor();
    editor.checker_mut().verdicts.extend([
        DrcVerdict::Pass,
        DrcVerdict::Violation("too close".into()),
    ]);

    editor.begin_zone(p(0, 0), ZoneTool::Copper).unwrap();
    let err = editor.begin_zone(p(100, 0), ZoneTool::Copper).unwrap_err();
    assert!(matches!(err, ZoneEditError::EdgeViolation { index: 0, .. }));
    assert_eq!(editor.state(), EditState::DrawingNewZone);
    assert_eq!(editor.candidate().unwrap().corner_count(), 2);

    // Retry at the same spot once the checker is satisfied
    let outcome = editor.begin_zone(p(100, 0), ZoneTool::Copper).unwrap();
    assert_eq!(outcome, BeginOutcome::CornerAdded { corners: 2 });
    assert_eq!(editor.checker().edge_calls, vec![0, 0, 0]);
}

#[test]
fn test_closing_edge_violation_blocks_finish() {
    let mut editor = editor();
    editor.checker_mut().verdicts.extend([
        DrcVerdict::Pass,
        DrcVerdict::Pass,
        DrcVerdict::Pass,
        DrcVerdict::Pass,
        DrcVerdict::Pass,
        DrcVerdict::Violation("overlaps VCC".into()),
    ]);
    for point in rect(0, 0, 100, 100) {
        editor.begin_zone(point, ZoneTool::Copper).unwrap();
    }

    let err = editor.end_zone().unwrap_err();
    assert!(matches!(err, ZoneEditError::ClosingEdgeViolation { .. }));
    assert_eq!(editor.state(), EditState::DrawingNewZone);
    assert_eq!(editor.board().zone_count(), 0);
    assert_eq!(editor.checker().edge_calls, vec![0, 0, 1, 2, 2, 3]);

    assert!(matches!(editor.end_zone(), Ok(FinishOutcome::Committed(_))));
    assert_eq!(editor.board().zone_count(), 1);
}

#[test]
fn test_legacy_drc_off_skips_checks() {
    let mut editor = editor();
    editor.settings_mut().legacy_drc_on = false;
    editor
        .checker_mut()
        .verdicts
        .push_back(DrcVerdict::Violation("never asked".into()));

    draw(&mut editor, &rect(0, 0, 100, 100));
    assert!(editor.checker().edge_calls.is_empty());
    assert_eq!(editor.board().zone_count(), 1);
}

#[test]
fn test_fatal_checker_is_reported() {
    let mut editor = editor();
    editor
        .checker_mut()
        .verdicts
        .push_back(DrcVerdict::Fatal("no rules loaded".into()));

    let err = editor.begin_zone(p(0, 0), ZoneTool::Copper).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_delete_last_corner_until_cancelled() {
    let mut editor = editor();
    for point in [p(0, 0), p(100, 0), p(100, 100)] {
        editor.begin_zone(point, ZoneTool::Copper).unwrap();
    }

    assert_eq!(
        editor.delete_last_corner(),
        Ok(LastCornerOutcome::Removed { corners: 2 })
    );
    assert_eq!(
        editor.delete_last_corner(),
        Ok(LastCornerOutcome::Removed { corners: 1 })
    );
    assert_eq!(editor.delete_last_corner(), Ok(LastCornerOutcome::Cancelled));
    assert_eq!(editor.state(), EditState::Idle);
    assert_eq!(editor.board().zone_count(), 0);
}

#[test]
fn test_rubber_band_follows_cursor_at_45_degrees() {
    let mut editor = editor();
    editor.settings_mut().zone_45_only = true;
    editor.begin_zone(p(0, 0), ZoneTool::Copper).unwrap();

    editor.on_mouse_move(p(100, 10)).unwrap();
    assert_eq!(editor.candidate().unwrap().corner_position(1), Some(p(100, 0)));
    assert_eq!(editor.last_cursor(), Some(p(100, 10)));
}

#[test]
fn test_cutout_adds_hole_to_target() {
    let mut editor = editor();
    let target = place(&mut editor, GND, rect(0, 0, 1000, 1000));
    editor.add_zone_cutout(target).unwrap();

    let outcome = draw(&mut editor, &rect(200, 200, 400, 400));
    let FinishOutcome::Committed(report) = outcome else {
        panic!("expected the cutout to commit");
    };
    assert_eq!(report.zone, Some(target));
    assert_eq!(editor.board().zone_count(), 1);

    let outline = editor.board().zone(target).unwrap().outline();
    assert_eq!(outline.hole_count(), 1);
    assert!((outline.area() - (1_000_000.0 - 40_000.0)).abs() < 1.0);
    assert!(editor.prompt_mut().calls.is_empty());
}

#[test]
fn test_similar_zone_copies_parameters() {
    let mut editor = editor();
    let vcc = NetCode(2);
    let template = place(&mut editor, vcc, rect(0, 0, 100, 100));
    editor.add_similar_zone(template).unwrap();

    let outcome = draw(&mut editor, &rect(500, 500, 600, 600));
    let FinishOutcome::Committed(report) = outcome else {
        panic!("expected a committed zone");
    };
    let zone = editor.board().zone(report.zone.unwrap()).unwrap();
    assert_eq!(zone.net(), vcc);
    assert_eq!(zone.layer(), LayerId::F_CU);
    assert_eq!(editor.board().zone_count(), 2);
    assert!(editor.prompt_mut().calls.is_empty());
}

#[test]
fn test_deleted_template_is_forgotten() {
    let mut editor = editor();
    let template = place(&mut editor, NetCode(2), rect(0, 0, 100, 100));
    editor.add_similar_zone(template).unwrap();
    editor.remove_zone(template).unwrap();

    draw(&mut editor, &rect(500, 500, 600, 600));
    assert_eq!(editor.prompt_mut().calls, vec!["copper"]);
}

#[test]
fn test_overlapping_new_zone_is_combined() {
    let mut editor = editor();
    let existing = place(&mut editor, GND, rect(0, 0, 100, 100));

    let outcome = draw(&mut editor, &rect(50, 50, 150, 150));
    let FinishOutcome::Committed(report) = outcome else {
        panic!("expected a committed zone");
    };
    assert_eq!(report.merged, 1);
    assert_eq!(report.zone, Some(existing));
    assert_eq!(editor.board().zone_count(), 1);
    let area = editor.board().zone(existing).unwrap().outline().area();
    assert!((area - 17_500.0).abs() < 1.0);
}

#[test]
fn test_capture_released_on_every_exit() {
    let mut editor = editor();
    let recorder = Arc::new(Recorder::default());
    editor.add_listener(recorder.clone());

    draw(&mut editor, &rect(0, 0, 100, 100));
    draw(&mut editor, &[p(500, 500), p(600, 500)]);
    editor.begin_zone(p(900, 900), ZoneTool::Copper).unwrap();
    editor.abort().unwrap();

    assert_eq!(recorder.count("released"), 3);
    assert_eq!(recorder.count("added"), 1);
}

#[test]
fn test_begin_zone_aborts_running_drag() {
    let mut editor = editor();
    let zone = place(&mut editor, GND, rect(0, 0, 100, 100));
    editor.start_move_zone(zone, p(10, 10)).unwrap();
    editor.on_mouse_move(p(60, 10)).unwrap();

    editor.begin_zone(p(500, 500), ZoneTool::Copper).unwrap();
    assert_eq!(editor.state(), EditState::DrawingNewZone);
    assert_eq!(corners(&editor, zone), rect(0, 0, 100, 100));
}
