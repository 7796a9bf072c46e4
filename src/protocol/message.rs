//! Per-turn request and response envelopes.
//!
//! ```text
//! -> {"player_num":1,"map":[["HQ:1Id:0,U:1Id:0","","F"],...]}
//! <- {"ACTIONS":[{"action_type":"MOVE","unit_id":"0","direction":[1,1]},
//!                {"action_type":"ATTACK","from":[2,2],"to":[3,2]}]}
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game::{Direction, GameState, Point, UnitId, is_visible};
use crate::protocol::codec::{PlayerId, Sides, encode_tile};

/// What the engine sends the bot each turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRequest {
    /// Id of the player the map was prepared for.
    pub player_num: PlayerId,
    /// Encoded tiles, row by row.
    pub map: Vec<Vec<String>>,
}

impl TurnRequest {
    /// Encode the authoritative state for `sides.player`.
    ///
    /// Rows are encoded in parallel; visibility is evaluated per tile.
    #[must_use]
    pub fn encode(state: &GameState, sides: Sides) -> Self {
        let grid = &state.grid;
        let width = usize::from(grid.width());
        let map = grid
            .tiles()
            .par_chunks(width)
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, tile)| {
                        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                        let point = Point::new(x as i32, y as i32);
                        encode_tile(tile, is_visible(grid, point), sides)
                    })
                    .collect()
            })
            .collect();

        Self {
            player_num: sides.player,
            map,
        }
    }
}

/// One intent submitted by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "UPPERCASE")]
pub enum ActionRecord {
    /// Step a unit one tile.
    Move {
        /// The unit to move.
        unit_id: UnitId,
        /// Step direction.
        direction: Direction,
    },
    /// Clear the enemy on an adjacent tile.
    Attack {
        /// Tile the attack is launched from.
        from: Point,
        /// Tile under attack.
        to: Point,
    },
}

/// What the bot returns each turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResponse {
    /// Intents in submission order; a missing field means none.
    #[serde(rename = "ACTIONS", default)]
    pub actions: Vec<ActionRecord>,
}

impl TurnResponse {
    /// A response with no intents.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{MapSettings, parse_map};

    #[test]
    fn test_action_wire_format() {
        let mv = ActionRecord::Move {
            unit_id: UnitId(3),
            direction: Direction::SW,
        };
        let json = serde_json::to_string(&mv).unwrap();
        assert_eq!(json, r#"{"action_type":"MOVE","unit_id":"3","direction":[-1,1]}"#);

        let attack = ActionRecord::Attack {
            from: Point::new(1, 2),
            to: Point::new(2, 2),
        };
        let json = serde_json::to_string(&attack).unwrap();
        assert_eq!(json, r#"{"action_type":"ATTACK","from":[1,2],"to":[2,2]}"#);
    }

    #[test]
    fn test_response_parsing() {
        let response: TurnResponse = serde_json::from_str(
            r#"{"ACTIONS":[{"action_type":"MOVE","unit_id":0,"direction":[0,-1]}]}"#,
        )
        .unwrap();
        assert_eq!(
            response.actions,
            vec![ActionRecord::Move {
                unit_id: UnitId(0),
                direction: Direction::N
            }]
        );

        let response: TurnResponse = serde_json::from_str("{}").unwrap();
        assert!(response.actions.is_empty());
    }

    #[test]
    fn test_unknown_or_malformed_actions_are_rejected() {
        assert!(serde_json::from_str::<TurnResponse>(
            r#"{"ACTIONS":[{"action_type":"SPAWN","x":1}]}"#
        )
        .is_err());
        assert!(serde_json::from_str::<TurnResponse>(
            r#"{"ACTIONS":[{"action_type":"MOVE","unit_id":"0","direction":[2,0]}]}"#
        )
        .is_err());
    }

    #[test]
    fn test_encode_request() {
        let state = parse_map("H B\n   \n  G", MapSettings { turns: 5, units: 2 }).unwrap();
        let request = TurnRequest::encode(&state, Sides::default());
        assert_eq!(request.player_num, 1);
        assert_eq!(request.map.len(), 3);
        assert_eq!(request.map[0], vec!["HQ:1Id:0,U:1Id:0,U:1Id:1", "", "B"]);
        assert_eq!(request.map[2][2], "HQ:2Id:0");
    }

    #[test]
    fn test_encode_request_fogs_distant_tiles() {
        let state = parse_map("H      G", MapSettings::default()).unwrap();
        let request = TurnRequest::encode(&state, Sides::default());
        assert_eq!(request.map[0][3], "");
        assert_eq!(request.map[0][4], "F");
        assert_eq!(request.map[0][7], "F");
    }
}
