//! Coordinates and compass directions.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A coordinate on the grid.
///
/// Signed so that stepping off the edge yields a point that bounds checks
/// reject instead of wrapping. Serializes as an `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row).
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (king-move) distance to another point, saturating at
    /// `i32::MAX`.
    #[must_use]
    pub const fn chebyshev(self, other: Point) -> i32 {
        let dx = self.x.saturating_sub(other.x).saturating_abs();
        let dy = self.y.saturating_sub(other.y).saturating_abs();
        if dx > dy { dx } else { dy }
    }

    /// Direction leading from `self` to an adjacent `other`, if any.
    #[must_use]
    pub fn direction_to(self, other: Point) -> Option<Direction> {
        let dx = other.x.checked_sub(self.x)?;
        let dy = other.y.checked_sub(self.y)?;
        Direction::from_delta(dx, dy)
    }
}

impl Add<Direction> for Point {
    type Output = Point;

    fn add(self, direction: Direction) -> Point {
        let (dx, dy) = direction.delta();
        Point::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight compass directions.
///
/// Serializes as a `[dx, dy]` pair; any other pair fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub enum Direction {
    /// (0, -1)
    N,
    /// (1, -1)
    NE,
    /// (1, 0)
    E,
    /// (1, 1)
    SE,
    /// (0, 1)
    S,
    /// (-1, 1)
    SW,
    /// (-1, 0)
    W,
    /// (-1, -1)
    NW,
}

impl Direction {
    /// All eight directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// The unit vector for this direction. North is negative y.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }

    /// Look up the direction for a unit vector.
    #[must_use]
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }
}

impl From<Direction> for (i32, i32) {
    fn from(direction: Direction) -> Self {
        direction.delta()
    }
}

impl TryFrom<(i32, i32)> for Direction {
    type Error = String;

    fn try_from((dx, dy): (i32, i32)) -> Result<Self, Self::Error> {
        Self::from_delta(dx, dy).ok_or_else(|| format!("({dx}, {dy}) is not a compass direction"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_plus_direction() {
        assert_eq!(Point::new(1, 1) + Direction::SE, Point::new(2, 2));
        assert_eq!(Point::new(0, 0) + Direction::NW, Point::new(-1, -1));
        assert_eq!(Point::new(3, 4) + Direction::N, Point::new(3, 3));
    }

    #[test]
    fn test_directions_are_distinct_unit_vectors() {
        for (i, a) in Direction::ALL.iter().enumerate() {
            let (dx, dy) = a.delta();
            assert!((-1..=1).contains(&dx) && (-1..=1).contains(&dy));
            assert_ne!((dx, dy), (0, 0));
            for b in &Direction::ALL[i + 1..] {
                assert_ne!(a.delta(), b.delta());
            }
        }
    }

    #[test]
    fn test_from_delta_rejects_non_unit() {
        assert_eq!(Direction::from_delta(1, 0), Some(Direction::E));
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn test_chebyshev() {
        assert_eq!(Point::new(0, 0).chebyshev(Point::new(3, -2)), 3);
        assert_eq!(Point::new(5, 5).chebyshev(Point::new(5, 5)), 0);
    }

    #[test]
    fn test_direction_to() {
        let p = Point::new(2, 2);
        assert_eq!(p.direction_to(Point::new(3, 1)), Some(Direction::NE));
        assert_eq!(p.direction_to(Point::new(4, 2)), None);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let p = Point::new(1, 0);
        let far = Point::new(i32::MIN, 0);
        assert_eq!(p.direction_to(far), None);
        assert_eq!(Point::new(i32::MAX, 0).direction_to(Point::new(i32::MIN, 0)), None);
        assert_eq!(p.chebyshev(far), i32::MAX);
        assert_eq!(Point::new(i32::MAX, i32::MIN) + Direction::NE, Point::new(i32::MAX, i32::MIN));
    }
}
