use proptest::prelude::*;
use zonekit_core::BoardPoint;
use zonekit_editor::{Contour, PolygonOutline};

fn points(max: usize) -> impl Strategy<Value = Vec<BoardPoint>> {
    prop::collection::vec((0i64..3, 0i64..3), 1..max)
        .prop_map(|v| v.into_iter().map(|(x, y)| BoardPoint::new(x, y)).collect())
}

fn outline_with_holes() -> impl Strategy<Value = PolygonOutline> {
    (points(8), prop::collection::vec(points(6), 0..4)).prop_map(|(exterior, holes)| {
        let mut outline = PolygonOutline::from_points(exterior);
        for hole in holes {
            outline
                .add_hole(Contour::new(hole))
                .expect("exterior is never empty");
        }
        outline
    })
}

proptest! {
    #[test]
    fn prop_no_null_segments_remain(mut outline in outline_with_holes()) {
        let before = outline.total_vertices();
        let removed = outline.remove_null_segments();
        prop_assert_eq!(before - removed, outline.total_vertices());

        for contour in outline.contours() {
            let pts = contour.points();
            if pts.len() < 2 {
                continue;
            }
            for (i, point) in pts.iter().enumerate() {
                prop_assert_ne!(*point, pts[(i + 1) % pts.len()]);
            }
        }
    }

    #[test]
    fn prop_relative_index_round_trip(outline in outline_with_holes()) {
        let total = outline.total_vertices();
        for global in 0..total {
            let index = outline.relative_indices(global).expect("in range");
            prop_assert_eq!(outline.global_index(index), Some(global));
            prop_assert_eq!(
                outline.vertex(global),
                outline.contour(index.contour).map(|c| c.points()[index.vertex])
            );
        }
        prop_assert!(outline.relative_indices(total).is_none());
    }
}

#[test]
fn test_translate_moves_holes_too() {
    let mut outline = PolygonOutline::from_points(vec![
        BoardPoint::new(0, 0),
        BoardPoint::new(100, 0),
        BoardPoint::new(100, 100),
        BoardPoint::new(0, 100),
    ]);
    outline
        .add_hole(Contour::new(vec![
            BoardPoint::new(10, 10),
            BoardPoint::new(20, 10),
            BoardPoint::new(20, 20),
        ]))
        .unwrap();

    outline.translate(zonekit_core::BoardVector::new(5, -5));
    assert_eq!(outline.vertex(0), Some(BoardPoint::new(5, -5)));
    assert_eq!(outline.vertex(4), Some(BoardPoint::new(15, 5)));
    assert_eq!(outline.area(), 10_000.0 - 50.0);
}
