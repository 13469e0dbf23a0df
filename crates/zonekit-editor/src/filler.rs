//! Copper fill of a zone outline.
//!
//! The fill is the outline minus every obstacle on the zone's layer:
//! keepouts forbidding copper pour, taken as drawn, and copper zones of
//! another net with a higher priority, grown by the larger clearance of
//! the two zones.

use crate::board::Board;
use crate::outline::PolygonOutline;
use crate::zone::Zone;
use geo::{Area, BooleanOps, Coord, Line, MultiPolygon, Polygon};
use std::f64::consts::FRAC_PI_8;

/// Fill polygons of `zone` against the rest of `board`. Keepouts get none.
pub fn compute_fill(board: &Board, zone: &Zone) -> Vec<PolygonOutline> {
    if zone.is_keepout() {
        return Vec::new();
    }
    let Some(outline) = zone.outline().to_geo() else {
        return Vec::new();
    };

    let mut obstacles = MultiPolygon::new(Vec::new());
    for other in board.zones().iter().filter(|o| o.id() != zone.id()) {
        let Some(clearance) = obstacle_clearance(zone, other) else {
            continue;
        };
        if let Some(polygon) = other.outline().to_geo() {
            obstacles = obstacles.union(&inflate(&polygon, clearance as f64));
        }
    }

    let fill = if obstacles.0.is_empty() {
        MultiPolygon::new(vec![outline])
    } else {
        MultiPolygon::new(vec![outline]).difference(&obstacles)
    };
    tracing::debug!(
        "Zone {}: {} fill polygon(s), {} obstacle(s)",
        zone.id(),
        fill.0.len(),
        obstacles.0.len()
    );
    fill.0
        .iter()
        .filter(|p| p.unsigned_area() > 0.0)
        .map(PolygonOutline::from_geo)
        .collect()
}

/// Clearance kept around `other` when filling `zone`, `None` if it does
/// not obstruct the fill
fn obstacle_clearance(zone: &Zone, other: &Zone) -> Option<i64> {
    if !other.layer_set().contains(zone.layer()) {
        return None;
    }
    match other.settings().keepout {
        Some(rules) => rules.no_copper_pour.then_some(0),
        None => (other.net() != zone.net()
            && other.settings().priority > zone.settings().priority)
            .then(|| zone.settings().clearance.max(other.settings().clearance)),
    }
}

/// Grows `polygon` outwards by `by`: a band along every edge plus an
/// octagon circumscribing the rounded corner at every vertex
fn inflate(polygon: &Polygon<f64>, by: f64) -> MultiPolygon<f64> {
    let mut grown = MultiPolygon::new(vec![polygon.clone()]);
    if by <= 0.0 {
        return grown;
    }
    for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
        for line in ring.lines() {
            if let Some(band) = edge_band(line, by) {
                grown = grown.union(&MultiPolygon::new(vec![band]));
            }
        }
        for coord in ring.coords() {
            grown = grown.union(&MultiPolygon::new(vec![octagon(*coord, by)]));
        }
    }
    grown
}

fn edge_band(line: Line<f64>, half_width: f64) -> Option<Polygon<f64>> {
    let d = line.delta();
    let len = d.x.hypot(d.y);
    if len == 0.0 {
        return None;
    }
    let n = Coord {
        x: -d.y / len * half_width,
        y: d.x / len * half_width,
    };
    Some(Polygon::new(
        vec![line.start + n, line.end + n, line.end - n, line.start - n].into(),
        Vec::new(),
    ))
}

fn octagon(center: Coord<f64>, radius: f64) -> Polygon<f64> {
    let r = radius / FRAC_PI_8.cos();
    let ring: Vec<Coord<f64>> = (0..8)
        .map(|i| {
            let a = FRAC_PI_8 + f64::from(i) * 2.0 * FRAC_PI_8;
            Coord {
                x: center.x + r * a.cos(),
                y: center.y + r * a.sin(),
            }
        })
        .collect();
    Polygon::new(ring.into(), Vec::new())
}
