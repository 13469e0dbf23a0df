//! Integer board geometry.
//!
//! Board coordinates are signed integer internal units (see [`crate::units`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A position on the board, in internal units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoardPoint {
    pub x: i64,
    pub y: i64,
}

impl BoardPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &BoardPoint) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for BoardPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A displacement between two board points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoardVector {
    pub dx: i64,
    pub dy: i64,
}

impl BoardVector {
    pub const ZERO: BoardVector = BoardVector { dx: 0, dy: 0 };

    pub const fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl Neg for BoardVector {
    type Output = BoardVector;

    fn neg(self) -> BoardVector {
        BoardVector::new(-self.dx, -self.dy)
    }
}

impl Sub for BoardPoint {
    type Output = BoardVector;

    fn sub(self, rhs: BoardPoint) -> BoardVector {
        BoardVector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<BoardVector> for BoardPoint {
    type Output = BoardPoint;

    fn add(self, rhs: BoardVector) -> BoardPoint {
        BoardPoint::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub<BoardVector> for BoardPoint {
    type Output = BoardPoint;

    fn sub(self, rhs: BoardVector) -> BoardPoint {
        BoardPoint::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

impl AddAssign<BoardVector> for BoardPoint {
    fn add_assign(&mut self, rhs: BoardVector) {
        self.x += rhs.dx;
        self.y += rhs.dy;
    }
}

impl SubAssign<BoardVector> for BoardPoint {
    fn sub_assign(&mut self, rhs: BoardVector) {
        self.x -= rhs.dx;
        self.y -= rhs.dy;
    }
}

/// Constrains the segment `origin -> cursor` to a multiple of 45 degrees.
///
/// Returns the end point to use instead of `cursor`. Nearly horizontal or
/// vertical segments are flattened; anything in between becomes a diagonal
/// whose length fits inside the cursor's bounding box.
pub fn snap_to_45(cursor: BoardPoint, origin: BoardPoint) -> BoardPoint {
    let delta = cursor - origin;
    let ax = delta.dx.abs();
    let ay = delta.dy.abs();

    if ax == 0 && ay == 0 {
        return origin;
    }

    // tan(22.5°) ≈ 0.414; compare with integer math to stay exact
    if ay * 1000 <= ax * 414 {
        return BoardPoint::new(cursor.x, origin.y);
    }
    if ax * 1000 <= ay * 414 {
        return BoardPoint::new(origin.x, cursor.y);
    }

    let d = ax.min(ay);
    BoardPoint::new(
        origin.x + d * delta.dx.signum(),
        origin.y + d * delta.dy.signum(),
    )
}
