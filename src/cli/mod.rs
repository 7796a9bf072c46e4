//! CLI command implementations for Skirmish.

pub(crate) mod run;
pub(crate) mod serve;
pub(crate) mod validate;
pub(crate) mod watch;

mod output;

use clap::{Args, ValueEnum};
use skirmish::bot::{Bot, ProcessBot, SampleBot};
use skirmish::engine::EngineConfig;
use skirmish::error::{BotError, EngineError, LoadError};
use skirmish::game::{DEFAULT_TURNS, DEFAULT_UNITS, GameState, Status, load_map};
use skirmish::protocol::Sides;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

/// Exit code for any error.
pub(crate) const ERROR_EXIT: u8 = 2;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Game setup shared by `run` and `watch`.
#[derive(Args, Debug, Clone)]
pub(crate) struct GameArgs {
    /// Maximum turns (default: 100)
    #[arg(short, long, default_value_t = DEFAULT_TURNS)]
    pub(crate) turns: u32,

    /// Units placed on the home base (default: 5)
    #[arg(short, long, default_value_t = DEFAULT_UNITS)]
    pub(crate) units: u32,

    /// Bot command to spawn; the built-in sample bot plays when omitted
    #[arg(short, long)]
    pub(crate) bot: Option<String>,

    /// Player id written on the wire
    #[arg(long, default_value = "1")]
    pub(crate) player_id: u32,

    /// Enemy id written on the wire
    #[arg(long, default_value = "2")]
    pub(crate) enemy_id: u32,

    /// Bot turn budget in milliseconds (0 disables the limit)
    #[arg(long, default_value = "1000")]
    pub(crate) budget_ms: u64,
}

impl GameArgs {
    /// Per-turn budget; zero means unlimited.
    pub(crate) fn turn_budget(&self) -> Option<Duration> {
        (self.budget_ms > 0).then(|| Duration::from_millis(self.budget_ms))
    }

    /// Engine configuration for these arguments.
    pub(crate) fn config(&self) -> Result<EngineConfig, CliError> {
        if self.player_id == self.enemy_id {
            return Err(CliError::new("player and enemy ids must differ"));
        }
        Ok(EngineConfig {
            sides: Sides {
                player: self.player_id,
                enemy: self.enemy_id,
            },
            max_turns: self.turns,
            initial_units: self.units,
            turn_budget: self.turn_budget(),
        })
    }

    /// Load the map with these settings.
    pub(crate) fn load(&self, map: &Path, config: &EngineConfig) -> Result<GameState, CliError> {
        load_map(map, config.map_settings())
            .map_err(|e| CliError::new(format!("Failed to load {}: {e}", map.display())))
    }

    /// The selected bot.
    pub(crate) fn bot(&self) -> Result<Box<dyn Bot>, CliError> {
        match &self.bot {
            Some(command) => Ok(Box::new(ProcessBot::spawn(command, self.turn_budget())?)),
            None => Ok(Box::new(SampleBot::new())),
        }
    }
}

/// Map a final status to the process exit code.
pub(crate) fn status_code(status: Status) -> ExitCode {
    match status {
        Status::Won(_) => ExitCode::SUCCESS,
        Status::Lost | Status::Running => ExitCode::FAILURE,
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<BotError> for CliError {
    fn from(e: BotError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        Self::new(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        game: GameArgs,
    }

    fn parse(args: &[&str]) -> GameArgs {
        Harness::try_parse_from(std::iter::once("skirmish").chain(args.iter().copied()))
            .unwrap()
            .game
    }

    #[test]
    fn test_budget_defaults_to_one_second() {
        let game = parse(&[]);
        assert_eq!(game.config().unwrap().turn_budget, Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_zero_budget_is_unlimited() {
        let game = parse(&["--budget-ms", "0"]);
        assert_eq!(game.turn_budget(), None);
        assert_eq!(game.config().unwrap().turn_budget, None);
    }

    #[test]
    fn test_budget_reaches_engine_config() {
        let game = parse(&["--budget-ms", "250", "--turns", "7"]);
        let config = game.config().unwrap();
        assert_eq!(config.turn_budget, Some(Duration::from_millis(250)));
        assert_eq!(config.max_turns, 7);
    }

    #[test]
    fn test_equal_sides_are_rejected() {
        let game = parse(&["--player-id", "3", "--enemy-id", "3"]);
        assert!(game.config().is_err());
    }
}
