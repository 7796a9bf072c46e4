//! Bot side of the protocol.
//!
//! A [`Bot`] receives the encoded, fog-masked map each turn and answers with
//! intents. Bots decode the map into a [`BotView`] and pre-check intents with
//! [`crate::validate::Intents`] before returning them.

mod process;
mod sample;
mod view;

pub use process::{ProcessBot, serve_stdio};
pub use sample::SampleBot;
pub use view::BotView;

use crate::error::BotError;
use crate::protocol::{TurnRequest, TurnResponse};

/// A decision maker driven once per turn.
pub trait Bot {
    /// Answer one turn.
    ///
    /// # Errors
    ///
    /// Transport failures; see [`BotError`].
    fn on_turn(&mut self, request: &TurnRequest) -> Result<TurnResponse, BotError>;
}

/// Adapts a closure into a [`Bot`].
#[derive(Debug, Clone, Copy)]
pub struct FnBot<F>(pub F);

impl<F> Bot for FnBot<F>
where
    F: FnMut(&TurnRequest) -> TurnResponse,
{
    fn on_turn(&mut self, request: &TurnRequest) -> Result<TurnResponse, BotError> {
        Ok((self.0)(request))
    }
}

impl<B: Bot + ?Sized> Bot for Box<B> {
    fn on_turn(&mut self, request: &TurnRequest) -> Result<TurnResponse, BotError> {
        (**self).on_turn(request)
    }
}
