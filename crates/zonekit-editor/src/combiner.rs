//! Post-edit merge pass over zones sharing net and layers.
//!
//! Overlapping or touching combinable zones are unioned into the earliest
//! of them in board order. Holes the edited zone carried before the pass
//! are subtracted again afterwards so a user cutout is never re-absorbed by
//! a neighbour. A subtraction that splits the outline yields extra zones.

use crate::board::Board;
use crate::journal::UndoEntry;
use crate::outline::PolygonOutline;
use crate::zone::Zone;
use geo::{Area, BooleanOps, Contains, Intersects, MultiPolygon, Polygon};
use zonekit_core::{BoardPoint, ZoneId};

/// Everything a combine pass did to the board
#[derive(Debug, Clone, Default)]
pub struct CombineReport {
    /// Pre-pass states of every zone reshaped, removed or created
    pub touched: Vec<UndoEntry>,
    /// Number of zones absorbed into another
    pub merged: usize,
    /// Zones split off by a cutout
    pub split: Vec<ZoneId>,
    /// The zone now holding the edited area, if any remains
    pub survivor: Option<ZoneId>,
}

impl CombineReport {
    pub fn changed_board(&self) -> bool {
        !self.touched.is_empty()
    }

    fn touch(&mut self, entry: UndoEntry) {
        let id = entry.zone_id();
        if !self.touched.iter().any(|e| e.zone_id() == id) {
            self.touched.push(entry);
        }
    }
}

/// Merges zones combinable with `edited` and returns what changed.
pub fn combine_zones(board: &mut Board, edited: ZoneId) -> CombineReport {
    let mut report = CombineReport::default();
    let Some(zone) = board.zone(edited) else {
        tracing::debug!("Combine: zone {} no longer on board", edited);
        return report;
    };
    let template = zone.clone();
    let cutouts: Vec<Polygon<f64>> = zone
        .outline()
        .holes()
        .iter()
        .filter_map(|hole| contour_polygon(hole.points()))
        .collect();

    let mut survivor = edited;
    while let Some((keep, absorb, merged)) = find_merge(board, &template) {
        let keep_id = board.zones()[keep].id();
        let absorb_id = board.zones()[absorb].id();
        tracing::debug!("Combine: zone {} absorbs {}", keep_id, absorb_id);

        report.touch(UndoEntry::Changed {
            zone: snapshot(&board.zones()[keep]),
        });
        if let Some(removed) = board.remove(absorb_id) {
            report.touch(UndoEntry::Deleted {
                zone: snapshot(&removed),
                index: absorb,
            });
        }
        if let Some(target) = board.zone_mut(keep_id) {
            *target.outline_mut() = PolygonOutline::from_geo(&merged);
        }
        if absorb_id == survivor {
            survivor = keep_id;
        }
        report.merged += 1;
    }

    if report.merged > 0 || !cutouts_intact(board, survivor, &cutouts) {
        restore_cutouts(board, survivor, &cutouts, &mut report);
    }

    report.survivor = board.contains(survivor).then_some(survivor);
    if report.merged > 0 {
        tracing::info!(
            "Combined {} zone(s) into {}",
            report.merged,
            report.survivor.map_or_else(|| "-".to_string(), |id| id.to_string())
        );
    }
    report
}

fn snapshot(zone: &Zone) -> Zone {
    let mut copy = zone.clone();
    copy.clear_flags();
    copy
}

/// First pair (board order) of combinable zones whose outlines meet and
/// whose union is a single polygon.
fn find_merge(board: &Board, template: &Zone) -> Option<(usize, usize, Polygon<f64>)> {
    let candidates: Vec<(usize, Polygon<f64>)> = board
        .zones()
        .iter()
        .enumerate()
        .filter(|(_, z)| z.is_combinable_with(template))
        .filter_map(|(i, z)| z.outline().to_geo().map(|p| (i, p)))
        .collect();

    for (a, (i, pi)) in candidates.iter().enumerate() {
        for (j, pj) in &candidates[a + 1..] {
            if !pi.intersects(pj) {
                continue;
            }
            let mut union = pi.union(pj);
            if union.0.len() == 1 {
                return union.0.pop().map(|p| (*i, *j, p));
            }
        }
    }
    None
}

fn contour_polygon(points: &[BoardPoint]) -> Option<Polygon<f64>> {
    PolygonOutline::from_points(points.to_vec()).to_geo()
}

/// The zone's exterior with only the holes lying inside it
fn valid_polygon(zone: &Zone) -> Option<Polygon<f64>> {
    let outer = contour_polygon(zone.outline().exterior()?.points())?;
    let holes = zone
        .outline()
        .holes()
        .iter()
        .filter_map(|h| contour_polygon(h.points()))
        .filter(|h| outer.contains(h))
        .map(|h| h.exterior().clone())
        .collect();
    Some(Polygon::new(outer.exterior().clone(), holes))
}

fn cutouts_intact(board: &Board, id: ZoneId, cutouts: &[Polygon<f64>]) -> bool {
    let outer = board
        .zone(id)
        .and_then(|z| z.outline().exterior())
        .and_then(|c| contour_polygon(c.points()));
    match outer {
        Some(outer) => cutouts.iter().all(|hole| outer.contains(hole)),
        None => true,
    }
}

fn restore_cutouts(
    board: &mut Board,
    id: ZoneId,
    cutouts: &[Polygon<f64>],
    report: &mut CombineReport,
) {
    let Some(zone) = board.zone(id) else { return };
    let Some(polygon) = valid_polygon(zone) else {
        return;
    };
    let before = zone.outline().area();
    let mut shape = MultiPolygon::new(vec![polygon]);
    for hole in cutouts {
        shape = shape.difference(&MultiPolygon::new(vec![hole.clone()]));
    }
    if shape.0.len() == 1 && (shape.unsigned_area() - before).abs() < 1.0 {
        return;
    }

    let original = snapshot(zone);
    let Some(index) = board.index_of(id) else { return };
    let mut parts = shape.0;
    parts.sort_by(|a, b| b.unsigned_area().total_cmp(&a.unsigned_area()));
    let mut parts = parts.into_iter();

    match parts.next() {
        Some(largest) => {
            report.touch(UndoEntry::Changed { zone: original.clone() });
            if let Some(target) = board.zone_mut(id) {
                *target.outline_mut() = PolygonOutline::from_geo(&largest);
            }
        }
        None => {
            tracing::debug!("Combine: cutouts consumed zone {}", id);
            board.remove(id);
            report.touch(UndoEntry::Deleted {
                zone: original,
                index,
            });
            return;
        }
    }

    for (offset, part) in parts.enumerate() {
        let piece_id = board.new_zone_id();
        let piece = Zone::with_outline(
            piece_id,
            original.settings().clone(),
            PolygonOutline::from_geo(&part),
        );
        board.insert(index + 1 + offset, piece.clone());
        report.touch(UndoEntry::New { zone: piece });
        report.split.push(piece_id);
    }
}
