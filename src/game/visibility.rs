//! Fog of war.
//!
//! A tile is visible when some in-bounds tile within a 7×7 block centred on
//! it (Chebyshev distance ≤ [`SIGHT_RADIUS`]) holds one of the player's units
//! or is the player's home base. Visibility is computed from the
//! authoritative grid, never from a bot's partial view.
//!
//! Cost is O(width · height · 49) per turn; nothing is cached between turns.

use crate::game::{Grid, Point};

/// Chebyshev radius of the sight neighbourhood.
pub const SIGHT_RADIUS: i32 = 3;

/// Check whether the tile at `point` is visible to the player.
///
/// Points off the grid are never visible.
#[must_use]
pub fn is_visible(grid: &Grid, point: Point) -> bool {
    if !grid.in_bounds(point) {
        return false;
    }

    for dy in -SIGHT_RADIUS..=SIGHT_RADIUS {
        for dx in -SIGHT_RADIUS..=SIGHT_RADIUS {
            let probe = point + Point::new(dx, dy);
            if let Ok(tile) = grid.get(probe)
                && (tile.has_units() || tile.is_own_hq())
            {
                return true;
            }
        }
    }

    false
}

/// Per-turn fog mask over a whole grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityMap {
    width: u16,
    visible: Vec<bool>,
}

impl VisibilityMap {
    /// Evaluate [`is_visible`] for every tile.
    #[must_use]
    pub fn compute(grid: &Grid) -> Self {
        let visible = grid.iter().map(|(point, _)| is_visible(grid, point)).collect();
        Self {
            width: grid.width(),
            visible,
        }
    }

    /// Whether the point was visible when the mask was computed.
    #[must_use]
    pub fn is_visible(&self, point: Point) -> bool {
        let width = i32::from(self.width);
        if point.x < 0 || point.y < 0 || point.x >= width {
            return false;
        }
        usize::try_from(point.y * width + point.x)
            .ok()
            .and_then(|idx| self.visible.get(idx).copied())
            .unwrap_or(false)
    }

    /// Number of visible tiles.
    #[must_use]
    pub fn count(&self) -> usize {
        self.visible.iter().filter(|&&v| v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Hq, Tile, UnitId};

    #[test]
    fn test_nothing_visible_without_sources() {
        let grid = Grid::new(8, 8).unwrap();
        assert_eq!(VisibilityMap::compute(&grid).count(), 0);
    }

    #[test]
    fn test_unit_sight_radius() {
        let mut grid = Grid::new(12, 12).unwrap();
        grid.insert_unit(Point::new(5, 5), UnitId(0)).unwrap();

        assert!(is_visible(&grid, Point::new(5, 5)));
        assert!(is_visible(&grid, Point::new(8, 8)));
        assert!(is_visible(&grid, Point::new(2, 8)));
        assert!(!is_visible(&grid, Point::new(9, 5)));
        assert!(!is_visible(&grid, Point::new(5, 1)));
    }

    #[test]
    fn test_own_hq_is_a_source() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.set(Point::new(0, 0), Tile::with_hq(Hq::Own)).unwrap();

        assert!(is_visible(&grid, Point::new(3, 3)));
        assert!(!is_visible(&grid, Point::new(4, 0)));
    }

    #[test]
    fn test_enemy_hq_is_not_a_source() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.set(Point::new(5, 5), Tile::with_hq(Hq::Enemy)).unwrap();
        grid.set(Point::new(6, 5), Tile::enemy()).unwrap();
        assert!(!is_visible(&grid, Point::new(5, 5)));
    }

    #[test]
    fn test_mask_matches_direct_check() {
        let mut grid = Grid::new(9, 7).unwrap();
        grid.insert_unit(Point::new(1, 1), UnitId(0)).unwrap();
        let mask = VisibilityMap::compute(&grid);

        for (point, _) in grid.iter() {
            assert_eq!(mask.is_visible(point), is_visible(&grid, point), "at {point}");
        }
        assert!(!mask.is_visible(Point::new(-1, 0)));
        assert!(!mask.is_visible(Point::new(0, 7)));
    }
}
