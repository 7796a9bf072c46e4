//! Game layer for Skirmish.
//!
//! The authoritative side of the simulation:
//! - Points and compass directions
//! - Grid of tiles (blocked, HQ markers, units, enemies)
//! - Fog of war
//! - Map loading
//! - Game state and terminal conditions

mod grid;
mod invariants;
mod loader;
mod point;
mod state;
mod visibility;

pub use grid::{Grid, Hq, Tile, UnitId};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use loader::{DEFAULT_UNITS, MapSettings, load_map, parse_map};
pub use point::{Direction, Point};
pub use state::{DEFAULT_TURNS, GameState, Status, WinReason};
pub use visibility::{SIGHT_RADIUS, VisibilityMap, is_visible};
