//! Game state management.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::GridError;
use crate::game::{Direction, Grid, Point, UnitId};

/// Default number of turns before the game is lost.
pub const DEFAULT_TURNS: u32 = 100;

/// Why the game was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    /// A unit stands on the enemy headquarters.
    GoalCaptured,
    /// No enemy remains on the grid.
    EnemiesEliminated,
}

/// Engine state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The game continues.
    Running,
    /// Terminal: the player won.
    Won(WinReason),
    /// Terminal: the turn budget ran out.
    Lost,
}

impl Status {
    /// Whether no further turns will be played.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// Complete authoritative game state.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The game grid.
    pub grid: Grid,
    /// Positions of tiles that still hold an enemy.
    pub enemies: BTreeSet<Point>,
    /// Tracked position of every player unit.
    pub units: BTreeMap<UnitId, Point>,
    /// Turns left before the game is lost.
    pub turns_remaining: u32,
    /// The player's home base.
    pub base: Point,
    /// The enemy headquarters; occupying it wins.
    pub goal: Point,
}

impl GameState {
    /// Create a game state from a prepared grid.
    ///
    /// Units are read back from the grid's tile lists and enemies from the
    /// tiles' enemy flags.
    #[must_use]
    pub fn new(grid: Grid, base: Point, goal: Point, turns: u32) -> Self {
        let mut units = BTreeMap::new();
        let mut enemies = BTreeSet::new();
        for (point, tile) in grid.iter() {
            for &unit in &tile.units {
                units.insert(unit, point);
            }
            if tile.enemy_present {
                enemies.insert(point);
            }
        }

        Self {
            grid,
            enemies,
            units,
            turns_remaining: turns,
            base,
            goal,
        }
    }

    /// Whether any unit stands on the goal tile.
    #[must_use]
    pub fn enemy_base_owned(&self) -> bool {
        self.grid.get(self.goal).is_ok_and(|tile| tile.has_units())
    }

    /// Whether the tracked enemy set is empty.
    #[must_use]
    pub fn all_enemies_killed(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Evaluate the terminal conditions in priority order.
    #[must_use]
    pub fn evaluate(&self) -> Status {
        if self.enemy_base_owned() {
            Status::Won(WinReason::GoalCaptured)
        } else if self.all_enemies_killed() {
            Status::Won(WinReason::EnemiesEliminated)
        } else if self.turns_remaining == 0 {
            Status::Lost
        } else {
            Status::Running
        }
    }

    /// Where a unit currently is.
    #[must_use]
    pub fn unit_position(&self, unit: UnitId) -> Option<Point> {
        self.units.get(&unit).copied()
    }

    /// Move a unit one step. No legality checks beyond grid consistency.
    ///
    /// # Errors
    ///
    /// Fails without mutating anything if the unit is unknown or not listed
    /// on its tracked tile, or if the target is off the grid or blocked.
    pub fn move_unit(&mut self, unit: UnitId, direction: Direction) -> Result<Point, GridError> {
        let from = self
            .unit_position(unit)
            .ok_or(GridError::UnknownUnit(unit))?;
        let to = self.grid.neighbor(from, direction)?;
        if self.grid.get(to)?.blocked {
            return Err(GridError::Blocked(to));
        }

        self.grid.remove_unit(from, unit)?;
        self.grid.insert_unit(to, unit)?;
        self.units.insert(unit, to);
        Ok(to)
    }

    /// Clear the enemy marker on a tile.
    ///
    /// Returns whether an enemy was actually removed.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for points off the grid.
    pub fn clear_enemy(&mut self, point: Point) -> Result<bool, GridError> {
        let tile = self.grid.get_mut(point)?;
        let had_enemy = std::mem::replace(&mut tile.enemy_present, false);
        self.enemies.remove(&point);
        Ok(had_enemy)
    }

    /// Consume one turn from the budget.
    pub fn advance_turn(&mut self) {
        self.turns_remaining = self.turns_remaining.saturating_sub(1);
    }
}
