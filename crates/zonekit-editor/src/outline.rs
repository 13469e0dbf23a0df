//! Polygon outline of a zone.
//!
//! An outline is an ordered list of closed contours. Contour 0 is the
//! exterior boundary, every further contour is a hole. Vertices are
//! addressed either by a global index (counting through all contours in
//! order) or by a [`VertexIndex`] relative to one contour.

use geo::{Area, Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};
use zonekit_core::{BoardPoint, BoardVector, OutlineError};

/// Position of a vertex relative to its contour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexIndex {
    pub contour: usize,
    pub vertex: usize,
}

/// One closed ring of vertices. The closing edge is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contour {
    points: Vec<BoardPoint>,
}

impl Contour {
    pub fn new(points: Vec<BoardPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[BoardPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Absolute enclosed area (shoelace)
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: i128 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x as i128 * b.y as i128 - b.x as i128 * a.y as i128
            })
            .sum();
        (twice.abs() as f64) / 2.0
    }

    /// Collapses consecutive equal vertices, including the closing pair.
    fn remove_null_segments(&mut self) -> usize {
        let before = self.points.len();
        self.points.dedup();
        while self.points.len() > 1 && self.points.first() == self.points.last() {
            self.points.pop();
        }
        before - self.points.len()
    }

    fn to_line_string(&self) -> LineString<f64> {
        LineString::from(
            self.points
                .iter()
                .map(|p| Coord {
                    x: p.x as f64,
                    y: p.y as f64,
                })
                .collect::<Vec<_>>(),
        )
    }

    fn from_line_string(ring: &LineString<f64>) -> Self {
        let mut points: Vec<BoardPoint> = ring
            .coords()
            .map(|c| BoardPoint::new(c.x.round() as i64, c.y.round() as i64))
            .collect();
        // geo rings repeat the first coordinate at the end
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        let mut contour = Contour::new(points);
        contour.remove_null_segments();
        contour
    }
}

/// Outline of one zone: an exterior contour followed by its holes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolygonOutline {
    contours: Vec<Contour>,
}

impl PolygonOutline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline with a single exterior contour
    pub fn from_points(points: Vec<BoardPoint>) -> Self {
        Self {
            contours: vec![Contour::new(points)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_vertices() == 0
    }

    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    pub fn hole_count(&self) -> usize {
        self.contours.len().saturating_sub(1)
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn contour(&self, index: usize) -> Option<&Contour> {
        self.contours.get(index)
    }

    pub fn exterior(&self) -> Option<&Contour> {
        self.contours.first()
    }

    pub fn holes(&self) -> &[Contour] {
        self.contours.get(1..).unwrap_or(&[])
    }

    pub fn total_vertices(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// Maps a global vertex index to its contour-relative position
    pub fn relative_indices(&self, global: usize) -> Option<VertexIndex> {
        let mut offset = 0;
        for (contour, c) in self.contours.iter().enumerate() {
            if global < offset + c.len() {
                return Some(VertexIndex {
                    contour,
                    vertex: global - offset,
                });
            }
            offset += c.len();
        }
        None
    }

    /// Maps a contour-relative position back to a global vertex index
    pub fn global_index(&self, index: VertexIndex) -> Option<usize> {
        let contour = self.contours.get(index.contour)?;
        if index.vertex >= contour.len() {
            return None;
        }
        let offset: usize = self.contours[..index.contour].iter().map(Contour::len).sum();
        Some(offset + index.vertex)
    }

    pub fn vertex(&self, global: usize) -> Option<BoardPoint> {
        let idx = self.relative_indices(global)?;
        Some(self.contours[idx.contour].points[idx.vertex])
    }

    pub fn vertices(&self) -> impl Iterator<Item = BoardPoint> + '_ {
        self.contours.iter().flat_map(|c| c.points.iter().copied())
    }

    pub fn set_corner_position(
        &mut self,
        global: usize,
        point: BoardPoint,
    ) -> Result<(), OutlineError> {
        let idx = self.checked_indices(global)?;
        self.contours[idx.contour].points[idx.vertex] = point;
        Ok(())
    }

    /// Appends a corner to `contour` and returns the outline's vertex count.
    ///
    /// Without `allow_duplicate`, a point equal to the contour's last vertex
    /// is ignored. The interactive tools pass `true` so the trailing
    /// rubber-band vertex always exists; such duplicates are pruned by
    /// [`PolygonOutline::remove_null_segments`] before the outline is committed.
    pub fn append_corner(
        &mut self,
        point: BoardPoint,
        contour: usize,
        allow_duplicate: bool,
    ) -> Result<usize, OutlineError> {
        if contour == 0 && self.contours.is_empty() {
            self.contours.push(Contour::default());
        }
        let count = self.contours.len();
        let target = self
            .contours
            .get_mut(contour)
            .ok_or(OutlineError::ContourOutOfRange { contour, count })?;

        if allow_duplicate || target.points.last() != Some(&point) {
            target.points.push(point);
        }
        Ok(self.total_vertices())
    }

    /// Inserts a vertex right after `after` in the same contour and returns
    /// the global index of the new vertex.
    pub fn insert_vertex(
        &mut self,
        after: usize,
        point: BoardPoint,
    ) -> Result<usize, OutlineError> {
        let idx = self.checked_indices(after)?;
        self.contours[idx.contour]
            .points
            .insert(idx.vertex + 1, point);
        Ok(after + 1)
    }

    /// Removes one vertex and returns the outline's vertex count.
    ///
    /// An index that does not address a vertex leaves the outline untouched.
    /// A hole emptied by the removal is dropped; the exterior is kept even
    /// when empty, so callers must check counts before finalizing.
    pub fn remove_vertex(&mut self, global: usize) -> usize {
        if let Some(idx) = self.relative_indices(global) {
            self.contours[idx.contour].points.remove(idx.vertex);
            if idx.contour > 0 && self.contours[idx.contour].is_empty() {
                self.contours.remove(idx.contour);
            }
        }
        self.total_vertices()
    }

    /// Collapses every run of coincident consecutive vertices (cyclically)
    /// and returns how many vertices were removed.
    pub fn remove_null_segments(&mut self) -> usize {
        self.contours
            .iter_mut()
            .map(Contour::remove_null_segments)
            .sum()
    }

    /// Appends `hole` as a new hole contour and returns its contour index
    pub fn add_hole(&mut self, hole: Contour) -> Result<usize, OutlineError> {
        if self.exterior().map_or(true, Contour::is_empty) {
            return Err(OutlineError::NoExterior);
        }
        self.contours.push(hole);
        Ok(self.contours.len() - 1)
    }

    /// Removes hole contour `contour`. The exterior cannot be removed here.
    pub fn remove_contour(&mut self, contour: usize) -> Result<Contour, OutlineError> {
        if contour == 0 {
            return Err(OutlineError::ExteriorContour);
        }
        if contour >= self.contours.len() {
            return Err(OutlineError::ContourOutOfRange {
                contour,
                count: self.contours.len(),
            });
        }
        Ok(self.contours.remove(contour))
    }

    pub fn remove_all_contours(&mut self) {
        self.contours.clear();
    }

    pub fn translate(&mut self, offset: BoardVector) {
        for contour in &mut self.contours {
            for p in &mut contour.points {
                *p += offset;
            }
        }
    }

    /// Moves the edge starting at `edge` (the vertex and its successor in the
    /// same contour) by `offset`.
    pub fn move_edge(&mut self, edge: usize, offset: BoardVector) -> Result<(), OutlineError> {
        let idx = self.checked_indices(edge)?;
        let points = &mut self.contours[idx.contour].points;
        let next = (idx.vertex + 1) % points.len();
        points[idx.vertex] += offset;
        if next != idx.vertex {
            points[next] += offset;
        }
        Ok(())
    }

    /// Exterior area minus hole areas
    pub fn area(&self) -> f64 {
        let exterior = self.exterior().map_or(0.0, Contour::area);
        exterior - self.holes().iter().map(Contour::area).sum::<f64>()
    }

    /// Axis-aligned bounds as `(min, max)`
    pub fn bounding_box(&self) -> Option<(BoardPoint, BoardPoint)> {
        let mut iter = self.vertices();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| {
            (
                BoardPoint::new(min.x.min(p.x), min.y.min(p.y)),
                BoardPoint::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }

    /// Converts to a `geo` polygon; `None` when the exterior is degenerate
    pub fn to_geo(&self) -> Option<Polygon<f64>> {
        let exterior = self.exterior().filter(|c| c.len() >= 3)?;
        let holes = self
            .holes()
            .iter()
            .filter(|h| h.len() >= 3)
            .map(Contour::to_line_string)
            .collect();
        let polygon = Polygon::new(exterior.to_line_string(), holes);
        (polygon.unsigned_area() > 0.0).then_some(polygon)
    }

    /// Builds an outline from a `geo` polygon, snapping to integer units
    pub fn from_geo(polygon: &Polygon<f64>) -> Self {
        let mut contours = vec![Contour::from_line_string(polygon.exterior())];
        contours.extend(
            polygon
                .interiors()
                .iter()
                .map(Contour::from_line_string)
                .filter(|c| c.len() >= 3),
        );
        Self { contours }
    }

    fn checked_indices(&self, global: usize) -> Result<VertexIndex, OutlineError> {
        self.relative_indices(global)
            .ok_or(OutlineError::VertexOutOfRange {
                index: global,
                count: self.total_vertices(),
            })
    }
}
