//! Wire protocol between the engine and a bot.
//!
//! Each turn the engine sends a [`TurnRequest`] holding the fog-masked,
//! encoded map and receives a [`TurnResponse`] with the bot's intents.

mod codec;
mod message;

pub use codec::{
    BLOCKER, FOG, ObservedTile, PlayerId, PlayerUnit, Sides, decode_tile, encode_tile,
};
pub use message::{ActionRecord, TurnRequest, TurnResponse};
