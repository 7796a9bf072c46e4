//! Multi-turn integration tests for the turn engine.
//!
//! These tests drive complete games through the public API: scripted bots
//! for the exact scenarios, the sample bot for whole-game runs.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use skirmish::bot::{FnBot, SampleBot};
use skirmish::engine::{EngineConfig, Tick, TurnEngine};
use skirmish::game::{
    Direction, MapSettings, Point, Status, UnitId, WinReason, check_invariants, parse_map,
};
use skirmish::protocol::{ActionRecord, TurnRequest, TurnResponse};

/// Map with a far-away enemy so the game does not end immediately.
const SMALL: &str = "H E\n   \n  G";

/// A bot that plays `script` one entry per turn, then passes.
fn scripted(script: Vec<Vec<ActionRecord>>) -> FnBot<impl FnMut(&TurnRequest) -> TurnResponse> {
    let mut turns = script.into_iter();
    FnBot(move |_: &TurnRequest| TurnResponse {
        actions: turns.next().unwrap_or_default(),
    })
}

fn step(unit: u32, direction: Direction) -> ActionRecord {
    ActionRecord::Move {
        unit_id: UnitId(unit),
        direction,
    }
}

#[test]
fn test_capture_goal_in_two_moves() {
    let state = parse_map(SMALL, MapSettings { turns: 10, units: 5 }).unwrap();
    let bot = scripted(vec![vec![step(0, Direction::SE)], vec![step(0, Direction::SE)]]);
    let mut engine = TurnEngine::new(state, EngineConfig::default(), bot);

    assert!(matches!(engine.tick().unwrap(), Tick::Played(_)));
    assert_eq!(engine.state().unit_position(UnitId(0)), Some(Point::new(1, 1)));
    assert!(matches!(engine.tick().unwrap(), Tick::Played(_)));
    assert_eq!(engine.state().unit_position(UnitId(0)), Some(Point::new(2, 2)));

    // The arriving move is only judged at the start of the next tick.
    assert_eq!(engine.status(), Status::Running);
    assert!(matches!(
        engine.tick().unwrap(),
        Tick::Finished(Status::Won(WinReason::GoalCaptured))
    ));
    assert_eq!(engine.summary().turns_played, 2);
    assert_eq!(engine.state().turns_remaining, 8);
}

#[test]
fn test_loss_when_turns_run_out() {
    let state = parse_map(SMALL, MapSettings { turns: 2, units: 5 }).unwrap();
    let mut engine = TurnEngine::new(state, EngineConfig::default(), scripted(Vec::new()));

    let summary = engine.run().unwrap();
    assert_eq!(summary.status, Status::Lost);
    assert_eq!(summary.turns_played, 2);
    assert_eq!(summary.applied, 0);
}

#[test]
fn test_attack_on_last_enemy_wins_next_tick() {
    let state = parse_map("HE\n  \n G", MapSettings { turns: 5, units: 1 }).unwrap();
    let bot = scripted(vec![vec![ActionRecord::Attack {
        from: Point::new(0, 0),
        to: Point::new(1, 0),
    }]]);
    let mut engine = TurnEngine::new(state, EngineConfig::default(), bot);

    let Tick::Played(report) = engine.tick().unwrap() else {
        panic!("first tick should play a turn");
    };
    assert_eq!(report.applied.len(), 1);
    assert!(engine.state().enemies.is_empty());
    assert!(!engine.state().grid.get(Point::new(1, 0)).unwrap().enemy_present);

    assert!(matches!(
        engine.tick().unwrap(),
        Tick::Finished(Status::Won(WinReason::EnemiesEliminated))
    ));
}

#[test]
fn test_attack_without_attacker_is_rejected() {
    // Nothing stands on (3, 0); the enemy next to it survives.
    let state = parse_map("H   E\n    E\n    G", MapSettings { turns: 3, units: 1 }).unwrap();
    let bot = scripted(vec![vec![ActionRecord::Attack {
        from: Point::new(3, 0),
        to: Point::new(4, 0),
    }]]);
    let mut engine = TurnEngine::new(state, EngineConfig::default(), bot);

    let Tick::Played(report) = engine.tick().unwrap() else {
        panic!("first tick should play a turn");
    };
    assert!(report.applied.is_empty());
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(engine.state().enemies.len(), 2);
}

#[test]
fn test_sample_bot_plays_to_completion() {
    let map = "\
H        B
   B     B
      E
  BBB
        E G";
    let state = parse_map(map, MapSettings { turns: 60, units: 5 }).unwrap();
    let mut engine = TurnEngine::new(state, EngineConfig::default(), SampleBot::new());

    let summary = engine
        .run_with(|state, _| assert!(check_invariants(state).is_empty()))
        .unwrap();

    assert!(summary.status.is_terminal());
    assert!(summary.turns_played <= 60);
    assert_eq!(summary.forfeited, 0);
    // The sample bot pre-validates everything it sends.
    assert_eq!(summary.rejected, 0);
}

#[test]
fn test_sample_bot_wins_open_field() {
    let state = parse_map("H     \n      \n   E G", MapSettings::default()).unwrap();
    let mut engine = TurnEngine::new(state, EngineConfig::default(), SampleBot::new());
    let summary = engine.run().unwrap();
    assert!(matches!(summary.status, Status::Won(_)));
}

#[test]
fn test_bundled_map_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("maps/default.txt");
    let state = skirmish::game::load_map(&path, MapSettings::default()).unwrap();
    assert!(check_invariants(&state).is_empty());
    assert_eq!(state.base, Point::new(0, 0));
    assert!(!state.enemies.is_empty());
}
