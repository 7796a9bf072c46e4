//! Initial map loading.
//!
//! One line per row, one character per column:
//!
//! | glyph | tile |
//! |-------|------|
//! | `' '` | empty |
//! | `B`   | blocked |
//! | `H`   | home base, seeded with the starting units |
//! | `G`   | enemy headquarters (the goal) |
//! | `E`   | enemy |
//!
//! Rows shorter than the widest row are padded with empty tiles.

use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::game::{GameState, Grid, Hq, Point, Tile, UnitId};

/// Number of units seeded on the home base.
pub const DEFAULT_UNITS: u32 = 5;

/// Parameters for building a game from a map.
#[derive(Debug, Clone, Copy)]
pub struct MapSettings {
    /// Turn budget for the game.
    pub turns: u32,
    /// Units placed on the home base, ids `0..units`.
    pub units: u32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            turns: crate::game::DEFAULT_TURNS,
            units: DEFAULT_UNITS,
        }
    }
}

/// Read and parse a map file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the map is invalid.
pub fn load_map(path: &Path, settings: MapSettings) -> Result<GameState, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_map(&text, settings)
}

/// Parse map text into a fresh game state.
///
/// # Errors
///
/// Returns an error for empty maps, unknown glyphs, and a missing or
/// repeated `H` or `G`.
pub fn parse_map(text: &str, settings: MapSettings) -> Result<GameState, LoadError> {
    let rows: Vec<Vec<char>> = text
        .lines()
        .map(|line| line.trim_end_matches('\r').chars().collect())
        .collect();

    let height = rows.len();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 || height == 0 {
        return Err(LoadError::Empty);
    }

    let too_large = || LoadError::TooLarge { width, height };
    let grid_width = u16::try_from(width).map_err(|_| too_large())?;
    let grid_height = u16::try_from(height).map_err(|_| too_large())?;
    let mut grid = Grid::new(grid_width, grid_height).ok_or(LoadError::Empty)?;

    let mut base = None;
    let mut goal = None;

    for (y, row) in rows.iter().enumerate() {
        for (x, &glyph) in row.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let point = Point::new(x as i32, y as i32);
            let tile = match glyph {
                ' ' => continue,
                'B' => Tile::blocked(),
                'E' => Tile::enemy(),
                'H' => {
                    if base.replace(point).is_some() {
                        return Err(LoadError::DuplicateBase(point));
                    }
                    Tile::with_hq(Hq::Own)
                }
                'G' => {
                    if goal.replace(point).is_some() {
                        return Err(LoadError::DuplicateGoal(point));
                    }
                    Tile::with_hq(Hq::Enemy)
                }
                _ => return Err(LoadError::UnknownGlyph { glyph, x, y }),
            };
            grid.set(point, tile).map_err(|_| too_large())?;
        }
    }

    let base = base.ok_or(LoadError::MissingBase)?;
    let goal = goal.ok_or(LoadError::MissingGoal)?;

    for id in 0..settings.units {
        grid.insert_unit(base, UnitId(id)).map_err(|_| LoadError::MissingBase)?;
    }

    Ok(GameState::new(grid, base, goal, settings.turns))
}
