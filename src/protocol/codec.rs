//! Tile wire codec.
//!
//! Encoding writes literal player ids from the authoritative grid. Decoding
//! takes the requesting player's id and reinterprets every token relative to
//! it: an id equal to the requester's is "own", anything else is "enemy".
//!
//! Token grammar (comma separated):
//!
//! ```text
//! F                fog, alone
//! B                blocked, alone
//! HQ:<player>Id:0  headquarters
//! U:<player>Id:<n> unit
//! ```

use crate::error::DecodeError;
use crate::game::{Hq, Point, Tile, UnitId};

/// Numeric player identity on the wire.
pub type PlayerId = u32;

/// Fog token.
pub const FOG: &str = "F";
/// Blocked token.
pub const BLOCKER: &str = "B";

const HQ_PREFIX: &str = "HQ:";
const UNIT_PREFIX: &str = "U:";
const ID_INFIX: &str = "Id:";

/// The two identities the encoder writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sides {
    /// Id of the player the map is prepared for.
    pub player: PlayerId,
    /// Id written for everything the enemy owns.
    pub enemy: PlayerId,
}

impl Default for Sides {
    fn default() -> Self {
        Self { player: 1, enemy: 2 }
    }
}

fn hq_token(owner: PlayerId) -> String {
    format!("{HQ_PREFIX}{owner}{ID_INFIX}0")
}

fn unit_token(owner: PlayerId, id: u32) -> String {
    format!("{UNIT_PREFIX}{owner}{ID_INFIX}{id}")
}

/// Encode one authoritative tile.
///
/// Fog hides everything, including blocked terrain. Enemy presence masks
/// the player's own units and discloses no count.
#[must_use]
pub fn encode_tile(tile: &Tile, visible: bool, sides: Sides) -> String {
    if !visible {
        return FOG.to_string();
    }
    if tile.blocked {
        return BLOCKER.to_string();
    }

    let mut parts = Vec::new();
    match tile.hq {
        Some(Hq::Own) => parts.push(hq_token(sides.player)),
        Some(Hq::Enemy) => parts.push(hq_token(sides.enemy)),
        None => {}
    }

    if tile.enemy_present {
        parts.push(unit_token(sides.enemy, 0));
    } else {
        parts.extend(tile.units.iter().map(|unit| unit_token(sides.player, unit.0)));
    }

    parts.join(",")
}

/// One of the requester's units as seen on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerUnit {
    /// The unit's id.
    pub id: UnitId,
    /// The tile it was decoded from.
    pub position: Point,
}

/// A tile reconstructed from the requester's point of view.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedTile {
    /// Where the tile is.
    pub position: Point,
    /// Requester's units on the tile.
    pub units: Vec<PlayerUnit>,
    /// Enemy unit tokens seen on the tile.
    pub enemies_count: u32,
    /// The requester's headquarters is here.
    pub own_hq: bool,
    /// Someone else's headquarters is here.
    pub enemy_hq: bool,
    /// Not blocked and not fogged.
    pub reachable: bool,
    /// Hidden by fog; nothing else about the tile is known.
    pub fogged: bool,
}

impl ObservedTile {
    fn blank(position: Point) -> Self {
        Self {
            position,
            units: Vec::new(),
            enemies_count: 0,
            own_hq: false,
            enemy_hq: false,
            reachable: true,
            fogged: false,
        }
    }

    /// Whether any enemy is on the tile.
    #[must_use]
    pub const fn has_enemy(&self) -> bool {
        self.enemies_count > 0
    }
}

/// Split `<owner>Id:<n>` after a token prefix.
fn parse_owned(rest: &str) -> Option<(PlayerId, u32)> {
    let (owner, id) = rest.split_once(ID_INFIX)?;
    Some((owner.parse().ok()?, id.parse().ok()?))
}

/// Decode one wire tile for `requester`.
///
/// # Errors
///
/// Returns [`DecodeError`] for unknown tokens, or when a fog or blocked
/// token shares the tile with other tokens.
pub fn decode_tile(content: &str, position: Point, requester: PlayerId) -> Result<ObservedTile, DecodeError> {
    let mut tile = ObservedTile::blank(position);
    if content.is_empty() {
        return Ok(tile);
    }

    let tokens: Vec<&str> = content.split(',').collect();
    for &token in &tokens {
        if token == FOG || token == BLOCKER {
            if tokens.len() > 1 {
                return Err(DecodeError::NotAlone(token.to_string()));
            }
            tile.reachable = false;
            tile.fogged = token == FOG;
        } else if let Some((owner, _)) = token.strip_prefix(HQ_PREFIX).and_then(parse_owned) {
            if owner == requester {
                tile.own_hq = true;
            } else {
                tile.enemy_hq = true;
            }
        } else if let Some((owner, id)) = token.strip_prefix(UNIT_PREFIX).and_then(parse_owned) {
            if owner == requester {
                tile.units.push(PlayerUnit { id: UnitId(id), position });
            } else {
                tile.enemies_count += 1;
            }
        } else {
            return Err(DecodeError::UnknownToken(token.to_string()));
        }
    }

    Ok(tile)
}
