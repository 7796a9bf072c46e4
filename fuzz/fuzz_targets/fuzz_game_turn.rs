#![no_main]

//! Full game turn fuzzer.
//!
//! Builds a map from fuzzer bytes, then feeds the engine arbitrary action
//! streams as if they came from a hostile bot. Whatever the bot sends, the
//! engine must reject what is illegal and keep the state consistent.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use skirmish::bot::FnBot;
use skirmish::engine::{EngineConfig, Tick, TurnEngine};
use skirmish::game::{Direction, MapSettings, Point, UnitId, check_invariants, parse_map};
use skirmish::protocol::{ActionRecord, TurnRequest, TurnResponse};

/// A fuzzer-generated action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    /// Move a (possibly unknown) unit.
    Move { unit: u8, direction: u8 },
    /// Attack between arbitrary points, on or off the map.
    Attack { from: (i32, i32), to: (i32, i32) },
    /// Attack from a tile on the map towards any point.
    Strike { from: (u8, u8), to: (i32, i32) },
}

impl FuzzAction {
    fn record(self) -> ActionRecord {
        match self {
            FuzzAction::Move { unit, direction } => ActionRecord::Move {
                unit_id: UnitId(u32::from(unit % 8)),
                direction: Direction::ALL[usize::from(direction) % Direction::ALL.len()],
            },
            FuzzAction::Attack { from, to } => ActionRecord::Attack {
                from: Point::new(from.0, from.1),
                to: Point::new(to.0, to.1),
            },
            FuzzAction::Strike { from, to } => ActionRecord::Attack {
                from: Point::new(i32::from(from.0 % 10), i32::from(from.1 % 10)),
                to: Point::new(to.0, to.1),
            },
        }
    }
}

/// Structured input for full game turn fuzzing.
#[derive(Arbitrary, Debug)]
struct GameTurnInput {
    /// Tile kinds, 10×10 row-major.
    tiles: Vec<u8>,
    /// Actions per turn.
    turns: Vec<Vec<FuzzAction>>,
}

fn build_map(tiles: &[u8]) -> String {
    let mut text = String::new();
    for y in 0..10 {
        for x in 0..10 {
            let glyph = match (x, y) {
                (0, 0) => 'H',
                (9, 9) => 'G',
                _ => match tiles.get(y * 10 + x).copied().unwrap_or(0) % 8 {
                    0 => 'B',
                    1 => 'E',
                    _ => ' ',
                },
            };
            text.push(glyph);
        }
        text.push('\n');
    }
    text
}

fuzz_target!(|input: GameTurnInput| {
    let turn_count = input.turns.len().min(20);
    let Ok(state) = parse_map(&build_map(&input.tiles), MapSettings { turns: 20, units: 5 }) else {
        return;
    };
    assert!(check_invariants(&state).is_empty());

    let mut script = input.turns.into_iter().take(turn_count);
    let bot = FnBot(move |_: &TurnRequest| TurnResponse {
        actions: script
            .next()
            .unwrap_or_default()
            .into_iter()
            .take(32)
            .map(FuzzAction::record)
            .collect(),
    });
    let config = EngineConfig {
        turn_budget: None,
        ..EngineConfig::default()
    };
    let mut engine = TurnEngine::new(state, config, bot);

    for _ in 0..=turn_count {
        match engine.tick() {
            Ok(Tick::Played(_)) => {
                let violations = check_invariants(engine.state());
                assert!(violations.is_empty(), "invariants violated: {violations:?}");
            }
            Ok(Tick::Finished(_)) => break,
            Err(e) => panic!("engine failed on an in-process bot: {e}"),
        }
    }
});
