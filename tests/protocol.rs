//! Wire-level tests: engine requests through the JSON-lines transport and
//! back.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use skirmish::bot::{Bot, BotView, SampleBot, serve_stdio};
use skirmish::engine::{EngineConfig, Tick, TurnEngine};
use skirmish::error::BotError;
use skirmish::game::{MapSettings, Point, UnitId, parse_map};
use skirmish::protocol::{ActionRecord, Sides, TurnRequest, TurnResponse};

const MAP: &str = "H  E\n    \n B G";

/// Runs a bot behind `serve_stdio`, the way a child process would.
struct Piped<B>(B);

impl<B: Bot> Bot for Piped<B> {
    fn on_turn(&mut self, request: &TurnRequest) -> Result<TurnResponse, BotError> {
        let mut input = serde_json::to_vec(request)?;
        input.push(b'\n');
        let mut output = Vec::new();
        serve_stdio(&mut self.0, input.as_slice(), &mut output)?;
        Ok(serde_json::from_slice(&output)?)
    }
}

#[test]
fn test_request_json_shape() {
    let state = parse_map(MAP, MapSettings { turns: 3, units: 1 }).unwrap();
    let request = TurnRequest::encode(&state, Sides::default());
    let json: serde_json::Value = serde_json::to_value(&request).unwrap();

    assert_eq!(json["player_num"], 1);
    assert_eq!(json["map"][0][0], "HQ:1Id:0,U:1Id:0");
    assert_eq!(json["map"][0][3], "U:2Id:0");
    assert_eq!(json["map"][2][1], "B");
    assert_eq!(json["map"][2][3], "HQ:2Id:0");
}

#[test]
fn test_decode_inverts_perspective() {
    let state = parse_map(MAP, MapSettings { turns: 3, units: 2 }).unwrap();
    let sides = Sides { player: 7, enemy: 3 };
    let request = TurnRequest::encode(&state, sides);
    let view = BotView::decode(&request).unwrap();

    assert_eq!(view.player_id(), 7);
    assert_eq!(view.units().map(|u| u.id).collect::<Vec<_>>(), vec![UnitId(0), UnitId(1)]);
    assert_eq!(view.enemy_hq(), Some(Point::new(3, 2)));
    assert!(view.get(Point::new(3, 0)).unwrap().has_enemy());
    assert!(view.get(Point::new(0, 0)).unwrap().own_hq);
}

#[test]
fn test_sample_bot_over_the_wire() {
    let state = parse_map(MAP, MapSettings { turns: 20, units: 3 }).unwrap();
    let mut engine = TurnEngine::new(state, EngineConfig::default(), Piped(SampleBot::new()));

    let Tick::Played(report) = engine.tick().unwrap() else {
        panic!("first tick should play a turn");
    };
    assert!(report.forfeit.is_none());
    assert!(report.rejected.is_empty());
    assert_eq!(report.applied.len(), 3);

    let summary = engine.run().unwrap();
    assert!(summary.status.is_terminal());
}

#[test]
fn test_malformed_answer_forfeits_turn() {
    struct Garbage;
    impl Bot for Garbage {
        fn on_turn(&mut self, _: &TurnRequest) -> Result<TurnResponse, BotError> {
            Ok(serde_json::from_str(r#"{"ACTIONS":[{"action_type":"JUMP"}]}"#)?)
        }
    }

    let state = parse_map(MAP, MapSettings { turns: 2, units: 1 }).unwrap();
    let mut engine = TurnEngine::new(state, EngineConfig::default(), Garbage);
    let Tick::Played(report) = engine.tick().unwrap() else {
        panic!("first tick should play a turn");
    };
    assert!(report.forfeit.is_some());
    assert_eq!(engine.state().turns_remaining, 1);
}

#[test]
fn test_disconnected_bot_is_fatal() {
    struct Gone;
    impl Bot for Gone {
        fn on_turn(&mut self, _: &TurnRequest) -> Result<TurnResponse, BotError> {
            Err(BotError::Disconnected)
        }
    }

    let state = parse_map(MAP, MapSettings::default()).unwrap();
    let mut engine = TurnEngine::new(state, EngineConfig::default(), Gone);
    assert!(engine.tick().is_err());
    assert_eq!(engine.state().turns_remaining, 100);
}

#[test]
fn test_actions_round_trip_through_json() {
    let response = TurnResponse {
        actions: vec![
            ActionRecord::Move {
                unit_id: UnitId(4),
                direction: skirmish::game::Direction::NW,
            },
            ActionRecord::Attack {
                from: Point::new(0, 0),
                to: Point::new(1, 1),
            },
        ],
    };
    let json = serde_json::to_string(&response).unwrap();
    assert!(json.starts_with(r#"{"ACTIONS":[{"action_type":"MOVE","unit_id":"4","direction":[-1,-1]}"#));
    assert_eq!(serde_json::from_str::<TurnResponse>(&json).unwrap(), response);
}
