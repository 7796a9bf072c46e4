//! Placeholder decision logic.
//!
//! Each unit attacks an adjacent enemy when it sees one, otherwise it takes
//! the first legal step, preferring steps toward a visible enemy
//! headquarters. Enough to drive the engine end to end; not a strategy.

use std::collections::HashSet;

use crate::bot::{Bot, BotView};
use crate::error::BotError;
use crate::game::Direction;
use crate::protocol::{TurnRequest, TurnResponse};
use crate::validate::Intents;

/// The bundled sample bot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleBot;

impl SampleBot {
    /// Create the sample bot.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decide a turn's intents from a decoded view.
    #[must_use]
    pub fn decide(view: &BotView) -> TurnResponse {
        let mut intents = Intents::new(view);
        let mut attacked = HashSet::new();
        let goal = view.enemy_hq();

        for unit in view.units() {
            let struck = Direction::ALL.into_iter().any(|direction| {
                let target = unit.position + direction;
                !attacked.contains(&target)
                    && intents.attack(unit.position, direction).is_ok()
                    && attacked.insert(target)
            });
            if struck {
                continue;
            }

            let mut order = Direction::ALL;
            order.rotate_left(unit.id.0 as usize % Direction::ALL.len());
            if let Some(goal) = goal {
                order.sort_by_key(|&direction| (unit.position + direction).chebyshev(goal));
            }

            for direction in order {
                if intents.move_unit(unit, direction).is_ok() {
                    break;
                }
            }
        }

        intents.into_response()
    }
}

impl Bot for SampleBot {
    fn on_turn(&mut self, request: &TurnRequest) -> Result<TurnResponse, BotError> {
        match BotView::decode(request) {
            Ok(view) => Ok(Self::decide(&view)),
            Err(e) => {
                tracing::warn!(error = %e, "sample bot could not decode the map; passing");
                Ok(TurnResponse::empty())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Point, UnitId};
    use crate::protocol::ActionRecord;

    fn view(map: &[&[&str]]) -> BotView {
        let request = TurnRequest {
            player_num: 1,
            map: map
                .iter()
                .map(|row| row.iter().map(|s| (*s).to_string()).collect())
                .collect(),
        };
        BotView::decode(&request).unwrap()
    }

    #[test]
    fn test_attacks_adjacent_enemy_once() {
        let view = view(&[&["U:1Id:0,U:1Id:1", "U:2Id:0"], &["", "HQ:2Id:0"]]);
        let response = SampleBot::decide(&view);

        let attacks = response
            .actions
            .iter()
            .filter(|a| matches!(a, ActionRecord::Attack { .. }))
            .count();
        assert_eq!(attacks, 1);
        assert!(response.actions.contains(&ActionRecord::Attack {
            from: Point::new(0, 0),
            to: Point::new(1, 0)
        }));
    }

    #[test]
    fn test_steps_toward_goal() {
        let view = view(&[&["U:1Id:3", "", ""], &["", "", ""], &["", "", "HQ:2Id:0"]]);
        let response = SampleBot::decide(&view);
        assert_eq!(
            response.actions,
            vec![ActionRecord::Move {
                unit_id: UnitId(3),
                direction: Direction::SE
            }]
        );
    }

    #[test]
    fn test_never_steps_into_fog_or_blocks() {
        let view = view(&[&["U:1Id:0", "B"], &["F", "F"]]);
        assert!(SampleBot::decide(&view).actions.is_empty());
    }

    #[test]
    fn test_undecodable_map_passes() {
        let mut bot = SampleBot::new();
        let request = TurnRequest {
            player_num: 1,
            map: vec![vec!["garbage".into()]],
        };
        assert_eq!(bot.on_turn(&request).unwrap(), TurnResponse::empty());
    }
}
