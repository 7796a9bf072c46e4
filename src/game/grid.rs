//! Grid and tile types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GridError;
use crate::game::{Direction, Point};

/// Identifier of one of the player's units.
///
/// Serialized as a string on the wire; either a string or an integer is
/// accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for UnitId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UnitId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(UnitId(n)),
            Raw::Text(s) => s
                .parse()
                .map(UnitId)
                .map_err(|_| serde::de::Error::custom(format!("invalid unit id {s:?}"))),
        }
    }
}

/// Which side's headquarters sits on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hq {
    /// The player's home base.
    Own,
    /// The enemy headquarters, also the victory tile.
    Enemy,
}

/// A single tile on the authoritative grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tile {
    /// Permanently impassable.
    pub blocked: bool,
    /// Headquarters marker, fixed at load time.
    pub hq: Option<Hq>,
    /// Player units standing here, in arrival order.
    pub units: Vec<UnitId>,
    /// Whether an enemy occupies the tile. Multiplicity is not tracked.
    pub enemy_present: bool,
}

impl Tile {
    /// Create an empty, passable tile.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            blocked: false,
            hq: None,
            units: Vec::new(),
            enemy_present: false,
        }
    }

    /// Create a blocked tile.
    #[must_use]
    pub fn blocked() -> Self {
        Self {
            blocked: true,
            ..Self::empty()
        }
    }

    /// Create a tile carrying a headquarters marker.
    #[must_use]
    pub fn with_hq(hq: Hq) -> Self {
        Self {
            hq: Some(hq),
            ..Self::empty()
        }
    }

    /// Create a tile holding an enemy.
    #[must_use]
    pub fn enemy() -> Self {
        Self {
            enemy_present: true,
            ..Self::empty()
        }
    }

    /// The player's home base is here.
    #[must_use]
    pub fn is_own_hq(&self) -> bool {
        self.hq == Some(Hq::Own)
    }

    /// The enemy headquarters is here.
    #[must_use]
    pub fn is_enemy_hq(&self) -> bool {
        self.hq == Some(Hq::Enemy)
    }

    /// At least one player unit stands here.
    #[must_use]
    pub fn has_units(&self) -> bool {
        !self.units.is_empty()
    }
}

/// The game grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Width of the grid in tiles.
    width: u16,
    /// Height of the grid in tiles.
    height: u16,
    /// Tiles stored in row-major order.
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create a new grid filled with empty tiles.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let size = usize::from(width) * usize::from(height);
        Some(Self {
            width,
            height,
            tiles: vec![Tile::empty(); size],
        })
    }

    /// Get the width of the grid.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the grid.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Raw tiles in row-major order.
    #[must_use]
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, Tile> {
        self.tiles.chunks(usize::from(self.width))
    }

    /// Check if a point is within the grid bounds.
    #[must_use]
    pub fn in_bounds(&self, point: Point) -> bool {
        (0..i32::from(self.width)).contains(&point.x) && (0..i32::from(self.height)).contains(&point.y)
    }

    /// Convert a point to an index into the tiles array.
    fn index(&self, point: Point) -> Result<usize, GridError> {
        if !self.in_bounds(point) {
            return Err(GridError::OutOfBounds(point));
        }
        // In bounds, so both components are non-negative and fit in u16.
        #[allow(clippy::cast_sign_loss)]
        let (x, y) = (point.x as usize, point.y as usize);
        Ok(y * usize::from(self.width) + x)
    }

    /// Get the tile at the given point.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] outside the grid.
    pub fn get(&self, point: Point) -> Result<&Tile, GridError> {
        let idx = self.index(point)?;
        Ok(&self.tiles[idx])
    }

    /// Get a mutable reference to the tile at the given point.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] outside the grid.
    pub fn get_mut(&mut self, point: Point) -> Result<&mut Tile, GridError> {
        let idx = self.index(point)?;
        Ok(&mut self.tiles[idx])
    }

    /// Replace the tile at the given point.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] outside the grid.
    pub fn set(&mut self, point: Point, tile: Tile) -> Result<(), GridError> {
        *self.get_mut(point)? = tile;
        Ok(())
    }

    /// The point one step away in `direction`, if it is on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when the step leaves the grid.
    pub fn neighbor(&self, point: Point, direction: Direction) -> Result<Point, GridError> {
        let target = point + direction;
        if self.in_bounds(target) {
            Ok(target)
        } else {
            Err(GridError::OutOfBounds(target))
        }
    }

    /// Iterate over all points and tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Tile)> {
        let width = usize::from(self.width);
        self.tiles.iter().enumerate().map(move |(idx, tile)| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let point = Point::new((idx % width) as i32, (idx / width) as i32);
            (point, tile)
        })
    }

    /// Append a unit to a tile's unit list.
    ///
    /// # Errors
    ///
    /// Fails if the point is off the grid or the tile is blocked.
    pub fn insert_unit(&mut self, point: Point, unit: UnitId) -> Result<(), GridError> {
        let tile = self.get_mut(point)?;
        if tile.blocked {
            return Err(GridError::Blocked(point));
        }
        tile.units.push(unit);
        Ok(())
    }

    /// Remove a unit from a tile's unit list, preserving the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnitNotOnTile`] if the unit is not listed there;
    /// the tile is left untouched.
    pub fn remove_unit(&mut self, point: Point, unit: UnitId) -> Result<(), GridError> {
        let tile = self.get_mut(point)?;
        let pos = tile
            .units
            .iter()
            .position(|&u| u == unit)
            .ok_or(GridError::UnitNotOnTile { unit, point })?;
        tile.units.remove(pos);
        Ok(())
    }
}
