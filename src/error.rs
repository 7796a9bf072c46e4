//! Error types for the skirmish engine.
//!
//! Bot-side validation errors are control-flow signals: decision logic skips
//! the offending intent and keeps going. Server-side they become
//! [`RejectedAction`] outcomes and the action is dropped.

use thiserror::Error;

use crate::game::{Point, UnitId};

/// Grid-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Coordinate outside `[0, width) × [0, height)`.
    #[error("point {0} is out of bounds")]
    OutOfBounds(Point),
    /// Unit id is not listed on the tile it was removed from.
    #[error("unit {unit} is not on tile {point}")]
    UnitNotOnTile {
        /// The unit that was expected on the tile.
        unit: UnitId,
        /// The tile that was inspected.
        point: Point,
    },
    /// Blocked tiles never carry units.
    #[error("tile {0} is blocked")]
    Blocked(Point),
    /// No unit with this id is tracked.
    #[error("unit {0} is not tracked")]
    UnknownUnit(UnitId),
}

/// Reasons a move or attack intent is illegal against a map view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Target lies outside the known map.
    #[error("target {0} is out of map")]
    OutOfMap(Point),
    /// Target is blocked or hidden by fog.
    #[error("target {0} is unreachable")]
    Unreachable(Point),
    /// Move target holds an enemy.
    #[error("target {0} is occupied by an enemy")]
    TargetOccupiedByEnemy(Point),
    /// Attack target holds no enemy.
    #[error("target {0} is empty")]
    EmptyTarget(Point),
}

/// Why the engine dropped an action instead of applying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectedAction {
    /// The target failed the shared validator checks.
    #[error(transparent)]
    Invalid(#[from] ActionError),
    /// The unit id does not name any unit in the game.
    #[error("unit {0} does not exist")]
    StaleUnitReference(UnitId),
    /// The unit tracker and the tile lists disagree.
    #[error("unit {unit} is not on tile {point}")]
    UnitNotOnTile {
        /// The unit being moved.
        unit: UnitId,
        /// Where the tracker placed it.
        point: Point,
    },
    /// The attack origin holds none of the player's units.
    #[error("no unit at {0} to attack from")]
    NoAttacker(Point),
    /// Attack target is not one step away from its origin.
    #[error("{to} is not adjacent to {from}")]
    NotAdjacent {
        /// Attack origin.
        from: Point,
        /// Attack target.
        to: Point,
    },
}

/// Failures while loading an initial map.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the map source failed.
    #[error("failed to read map: {0}")]
    Io(#[from] std::io::Error),
    /// The map has no rows or no columns.
    #[error("map is empty")]
    Empty,
    /// Dimensions do not fit the grid coordinate type.
    #[error("map is too large: {width}x{height}")]
    TooLarge {
        /// Widest row.
        width: usize,
        /// Number of rows.
        height: usize,
    },
    /// An unrecognised character.
    #[error("unknown glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph {
        /// The offending character.
        glyph: char,
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },
    /// No `H` tile.
    #[error("map has no home base ('H')")]
    MissingBase,
    /// More than one `H` tile.
    #[error("map has more than one home base ('H'), second at {0}")]
    DuplicateBase(Point),
    /// No `G` tile.
    #[error("map has no goal ('G')")]
    MissingGoal,
    /// More than one `G` tile.
    #[error("map has more than one goal ('G'), second at {0}")]
    DuplicateGoal(Point),
}

/// Failures while decoding wire data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A comma-separated token matched no known form.
    #[error("unrecognised tile token {0:?}")]
    UnknownToken(String),
    /// Fog or blocked tokens mixed with other tokens.
    #[error("token {0:?} must appear alone")]
    NotAlone(String),
}

/// Failures talking to a bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// The bot did not answer within the turn budget.
    #[error("bot exceeded the turn budget")]
    Timeout,
    /// The bot answered with something that is not a valid response.
    #[error("malformed bot response: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The bot process closed its output.
    #[error("bot disconnected")]
    Disconnected,
    /// Spawning or writing to the bot failed.
    #[error("bot i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal engine failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The bot can no longer be reached.
    #[error(transparent)]
    Bot(#[from] BotError),
    /// The game already reached a terminal state.
    #[error("game is already over")]
    GameOver,
}
