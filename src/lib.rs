// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Skirmish: a turn-based grid skirmish engine with fog of war.
//!
//! The engine owns the authoritative map; each turn a bot receives a
//! fog-masked, string-encoded view of it and answers with move and attack
//! intents, which the engine re-validates before applying.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Turn Engine (state machine)       │
//! ├──────────────────┬──────────────────┤
//! │  Wire protocol   │  Bot (in-process │
//! │  (JSON, codec)   │   or subprocess) │
//! ├──────────────────┴──────────────────┤
//! │  Game: grid, fog, state, loader     │
//! └─────────────────────────────────────┘
//! ```

pub mod bot;
pub mod engine;
pub mod error;
pub mod game;
pub mod protocol;
pub mod render;
pub mod validate;

pub use error::{ActionError, BotError, DecodeError, EngineError, GridError, LoadError, RejectedAction};

// Re-export key types at crate root for convenience
pub use bot::{Bot, BotView, ProcessBot, SampleBot};
pub use engine::{EngineConfig, RunSummary, Tick, TurnEngine, TurnReport};
pub use game::{Direction, GameState, Grid, Point, Status, Tile, UnitId, WinReason};
pub use protocol::{ActionRecord, TurnRequest, TurnResponse};
