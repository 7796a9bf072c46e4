//! Turn engine.
//!
//! Owns the authoritative [`GameState`] and drives the state machine:
//!
//! ```text
//! Running ──goal occupied / no enemies left──▶ Won
//!    │
//!    └────────────turn budget spent──────────▶ Lost
//! ```
//!
//! Each tick first evaluates the terminal conditions. While still running it
//! encodes the fog-masked map, asks the bot for intents, re-validates every
//! intent against the authoritative grid, applies the ones that pass, and
//! consumes one turn.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::bot::Bot;
use crate::error::{ActionError, BotError, EngineError, RejectedAction};
use crate::game::{
    DEFAULT_TURNS, DEFAULT_UNITS, GameState, Grid, MapSettings, Point, Status, UnitId, assert_invariants,
    is_visible,
};
use crate::protocol::{ActionRecord, Sides, TurnRequest};
use crate::validate::{MapView, check_attack, check_move};

/// Default wall-clock budget for one bot turn.
pub const DEFAULT_TURN_BUDGET: Duration = Duration::from_secs(1);

/// Engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Wire identities for the player and the enemy.
    pub sides: Sides,
    /// Turns before the game is lost.
    pub max_turns: u32,
    /// Units seeded on the home base.
    pub initial_units: u32,
    /// Wall-clock budget per bot turn; `None` waits indefinitely.
    pub turn_budget: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sides: Sides::default(),
            max_turns: DEFAULT_TURNS,
            initial_units: DEFAULT_UNITS,
            turn_budget: Some(DEFAULT_TURN_BUDGET),
        }
    }
}

impl EngineConfig {
    /// Loader settings matching this configuration.
    #[must_use]
    pub const fn map_settings(&self) -> MapSettings {
        MapSettings {
            turns: self.max_turns,
            units: self.initial_units,
        }
    }
}

/// The authoritative grid seen through the validator's eyes.
///
/// Reachability includes the live fog rule, so the server never accepts a
/// target the player could not have seen.
#[derive(Debug, Clone, Copy)]
pub struct AuthoritativeView<'a> {
    grid: &'a Grid,
}

impl<'a> AuthoritativeView<'a> {
    /// Wrap a grid.
    #[must_use]
    pub const fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }
}

impl MapView for AuthoritativeView<'_> {
    fn contains(&self, point: Point) -> bool {
        self.grid.in_bounds(point)
    }

    fn is_reachable(&self, point: Point) -> bool {
        self.grid.get(point).is_ok_and(|tile| !tile.blocked) && is_visible(self.grid, point)
    }

    fn has_enemy(&self, point: Point) -> bool {
        self.grid.get(point).is_ok_and(|tile| tile.enemy_present)
    }
}

/// Why a turn was played without any action.
#[derive(Debug)]
pub enum Forfeit {
    /// The bot answered after the budget ran out.
    Overrun(Duration),
    /// The bot failed in a recoverable way.
    Bot(BotError),
}

/// What happened during one played turn.
#[derive(Debug, Default)]
pub struct TurnReport {
    /// 1-based number of the turn.
    pub turn: u32,
    /// Actions that passed re-validation and were applied, in order.
    pub applied: Vec<ActionRecord>,
    /// Actions dropped by re-validation.
    pub rejected: Vec<(ActionRecord, RejectedAction)>,
    /// Set when the bot's answer was discarded.
    pub forfeit: Option<Forfeit>,
}

/// Result of a single tick.
#[derive(Debug)]
pub enum Tick {
    /// A turn was played; the game may or may not be over yet.
    Played(TurnReport),
    /// A terminal condition was detected; nothing was mutated.
    Finished(Status),
}

/// Counters over a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Final status.
    pub status: Status,
    /// Turns actually played.
    pub turns_played: u32,
    /// Turns left in the budget.
    pub turns_remaining: u32,
    /// Actions applied.
    pub applied: u32,
    /// Actions rejected by re-validation.
    pub rejected: u32,
    /// Turns whose answer was discarded.
    pub forfeited: u32,
}

/// Drives a game against a bot.
#[derive(Debug)]
pub struct TurnEngine<B> {
    state: GameState,
    config: EngineConfig,
    bot: B,
    status: Status,
    summary: RunSummary,
}

impl<B: Bot> TurnEngine<B> {
    /// Create an engine for a freshly loaded state.
    #[must_use]
    pub fn new(state: GameState, config: EngineConfig, bot: B) -> Self {
        let summary = RunSummary {
            status: Status::Running,
            turns_played: 0,
            turns_remaining: state.turns_remaining,
            applied: 0,
            rejected: 0,
            forfeited: 0,
        };
        Self {
            state,
            config,
            bot,
            status: Status::Running,
            summary,
        }
    }

    /// The authoritative state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Counters so far.
    #[must_use]
    pub const fn summary(&self) -> RunSummary {
        self.summary
    }

    /// The request the bot would receive right now.
    #[must_use]
    pub fn request(&self) -> TurnRequest {
        TurnRequest::encode(&self.state, self.config.sides)
    }

    /// Advance the state machine by one step.
    ///
    /// # Errors
    ///
    /// [`EngineError::GameOver`] once terminal, or [`EngineError::Bot`] when
    /// the bot can no longer be reached.
    pub fn tick(&mut self) -> Result<Tick, EngineError> {
        if self.status.is_terminal() {
            return Err(EngineError::GameOver);
        }

        let status = self.state.evaluate();
        if status.is_terminal() {
            info!(?status, turns_played = self.summary.turns_played, "game finished");
            self.status = status;
            self.summary.status = status;
            return Ok(Tick::Finished(status));
        }

        let mut report = TurnReport {
            turn: self.summary.turns_played + 1,
            ..TurnReport::default()
        };

        let request = self.request();
        let started = Instant::now();
        let answer = self.bot.on_turn(&request);
        let elapsed = started.elapsed();

        match answer {
            Ok(response) => match self.config.turn_budget {
                Some(budget) if elapsed > budget => {
                    warn!(turn = report.turn, ?elapsed, "bot overran its budget; turn forfeited");
                    report.forfeit = Some(Forfeit::Overrun(elapsed));
                }
                _ => {
                    for action in response.actions {
                        match self.apply(action) {
                            Ok(()) => {
                                debug!(turn = report.turn, ?action, "applied");
                                report.applied.push(action);
                            }
                            Err(reason) => {
                                warn!(turn = report.turn, ?action, %reason, "rejected");
                                report.rejected.push((action, reason));
                            }
                        }
                    }
                }
            },
            Err(e @ (BotError::Timeout | BotError::Malformed(_))) => {
                warn!(turn = report.turn, error = %e, "turn forfeited");
                report.forfeit = Some(Forfeit::Bot(e));
            }
            Err(e) => return Err(e.into()),
        }

        self.state.advance_turn();
        assert_invariants(&self.state);

        self.summary.turns_played += 1;
        self.summary.turns_remaining = self.state.turns_remaining;
        self.summary.applied += count(report.applied.len());
        self.summary.rejected += count(report.rejected.len());
        self.summary.forfeited += u32::from(report.forfeit.is_some());

        Ok(Tick::Played(report))
    }

    /// Play until a terminal state, calling `observe` after every turn.
    ///
    /// # Errors
    ///
    /// See [`TurnEngine::tick`].
    pub fn run_with(&mut self, mut observe: impl FnMut(&GameState, &TurnReport)) -> Result<RunSummary, EngineError> {
        loop {
            match self.tick()? {
                Tick::Played(report) => observe(&self.state, &report),
                Tick::Finished(_) => return Ok(self.summary),
            }
        }
    }

    /// Play until a terminal state.
    ///
    /// # Errors
    ///
    /// See [`TurnEngine::tick`].
    pub fn run(&mut self) -> Result<RunSummary, EngineError> {
        self.run_with(|_, _| {})
    }

    /// Re-validate and apply one action.
    fn apply(&mut self, action: ActionRecord) -> Result<(), RejectedAction> {
        match action {
            ActionRecord::Move { unit_id, direction } => {
                let from = self.locate(unit_id)?;
                check_move(&AuthoritativeView::new(&self.state.grid), from, direction)?;
                self.state
                    .move_unit(unit_id, direction)
                    .map(|_| ())
                    .map_err(|_| RejectedAction::UnitNotOnTile { unit: unit_id, point: from })
            }
            ActionRecord::Attack { from, to } => {
                let has_attacker = self.state.grid.get(from).is_ok_and(|tile| tile.has_units());
                if !has_attacker {
                    return Err(RejectedAction::NoAttacker(from));
                }
                if !self.state.grid.in_bounds(to) {
                    return Err(ActionError::OutOfMap(to).into());
                }
                let direction = from.direction_to(to).ok_or(RejectedAction::NotAdjacent { from, to })?;
                check_attack(&AuthoritativeView::new(&self.state.grid), from, direction)?;
                self.state
                    .clear_enemy(to)
                    .map(|_| ())
                    .map_err(|_| ActionError::OutOfMap(to).into())
            }
        }
    }

    /// Where a unit is, checked against the tile lists.
    fn locate(&self, unit: UnitId) -> Result<Point, RejectedAction> {
        let point = self
            .state
            .unit_position(unit)
            .ok_or(RejectedAction::StaleUnitReference(unit))?;
        let listed = self.state.grid.get(point).is_ok_and(|tile| tile.units.contains(&unit));
        if listed {
            Ok(point)
        } else {
            Err(RejectedAction::UnitNotOnTile { unit, point })
        }
    }

    /// Give back the state and the bot.
    #[must_use]
    pub fn into_parts(self) -> (GameState, B) {
        (self.state, self.bot)
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
