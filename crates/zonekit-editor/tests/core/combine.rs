use proptest::prelude::*;
use zonekit_core::{BoardPoint, LayerId, NetCode, ZoneId};
use zonekit_editor::{combine_zones, Board, Contour, PolygonOutline, Zone, ZoneSettings};
use zonekit_settings::ZoneDefaults;

fn rect(x0: i64, y0: i64, x1: i64, y1: i64) -> Vec<BoardPoint> {
    vec![
        BoardPoint::new(x0, y0),
        BoardPoint::new(x1, y0),
        BoardPoint::new(x1, y1),
        BoardPoint::new(x0, y1),
    ]
}

fn add(board: &mut Board, net: NetCode, outline: PolygonOutline) -> ZoneId {
    let mut settings = ZoneSettings::from_defaults(&ZoneDefaults::default(), LayerId::F_CU);
    settings.net = net;
    let id = board.new_zone_id();
    board.add(Zone::with_outline(id, settings, outline));
    id
}

proptest! {
    #[test]
    fn prop_union_keeps_total_area(
        x in 1i64..99,
        y in 1i64..99,
        w in 1i64..200,
        h in 1i64..200,
    ) {
        let mut board = Board::new();
        let first = add(&mut board, NetCode(1), PolygonOutline::from_points(rect(0, 0, 100, 100)));
        let second = add(&mut board, NetCode(1), PolygonOutline::from_points(rect(x, y, x + w, y + h)));

        let report = combine_zones(&mut board, second);
        prop_assert_eq!(report.merged, 1);
        prop_assert_eq!(report.survivor, Some(first));
        prop_assert_eq!(board.zone_count(), 1);

        let overlap = (100.min(x + w) - x) * (100.min(y + h) - y);
        let expected = (10_000 + w * h - overlap) as f64;
        let area = board.zone(first).unwrap().outline().area();
        prop_assert!((area - expected).abs() < 1e-6, "area {} expected {}", area, expected);
    }
}

#[test]
fn test_filled_neighbour_does_not_fill_cutout() {
    let mut board = Board::new();
    let mut outline = PolygonOutline::from_points(rect(0, 0, 1000, 1000));
    outline
        .add_hole(Contour::new(rect(400, 400, 600, 600)))
        .unwrap();
    let holed = add(&mut board, NetCode(1), outline);
    add(&mut board, NetCode(1), PolygonOutline::from_points(rect(300, 300, 700, 700)));

    let report = combine_zones(&mut board, holed);
    assert_eq!(report.merged, 1);
    assert_eq!(board.zone_count(), 1);
    let zone = board.zone(holed).unwrap();
    assert_eq!(zone.outline().hole_count(), 1);
    assert_eq!(zone.outline().area(), 1_000_000.0 - 40_000.0);
}

#[test]
fn test_keepouts_ignore_nets_but_not_copper() {
    let mut board = Board::new();
    let copper = add(&mut board, NetCode(1), PolygonOutline::from_points(rect(0, 0, 100, 100)));
    let settings =
        ZoneSettings::from_defaults(&ZoneDefaults::default(), LayerId::F_CU).into_keepout();
    let keepout = board.new_zone_id();
    board.add(Zone::with_outline(
        keepout,
        settings,
        PolygonOutline::from_points(rect(50, 0, 150, 100)),
    ));

    let report = combine_zones(&mut board, keepout);
    assert_eq!(report.merged, 0);
    assert!(!report.changed_board());
    assert_eq!(board.zone_count(), 2);
    assert!(board.contains(copper));
}

#[test]
fn test_edited_zone_fills_neighbour_cutout() {
    let mut board = Board::new();
    let mut outline = PolygonOutline::from_points(rect(0, 0, 1000, 1000));
    outline
        .add_hole(Contour::new(rect(400, 400, 600, 600)))
        .unwrap();
    let neighbour = add(&mut board, NetCode(1), outline);
    let edited = add(&mut board, NetCode(1), PolygonOutline::from_points(rect(300, 300, 700, 700)));

    // Only the edited zone's own holes survive a merge
    let report = combine_zones(&mut board, edited);
    assert_eq!(report.merged, 1);
    assert_eq!(report.survivor, Some(neighbour));
    let zone = board.zone(neighbour).unwrap();
    assert_eq!(zone.outline().hole_count(), 0);
    assert_eq!(zone.outline().area(), 1_000_000.0);
}
