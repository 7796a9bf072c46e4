#![no_main]

//! Wire decoder fuzzer.
//!
//! Arbitrary tile strings and request JSON must decode or fail cleanly,
//! never panic. Tiles that decode must re-encode consistently.

use libfuzzer_sys::fuzz_target;
use skirmish::bot::BotView;
use skirmish::game::Point;
use skirmish::protocol::{TurnRequest, TurnResponse, decode_tile};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(tile) = decode_tile(text, Point::new(0, 0), 1) {
        // Fog and blocked tiles carry nothing else.
        if !tile.reachable {
            assert!(tile.units.is_empty());
            assert_eq!(tile.enemies_count, 0);
            assert!(!tile.own_hq && !tile.enemy_hq);
        }
    }

    if let Ok(request) = serde_json::from_str::<TurnRequest>(text) {
        let _ = BotView::decode(&request);
    }

    let _ = serde_json::from_str::<TurnResponse>(text);
});
