//! Game invariants - consistency checks that detect bugs.
//!
//! These should never trigger for a state built by the loader and mutated
//! only through the engine. If they do, it indicates a bug.

use std::collections::BTreeMap;

use crate::game::{GameState, Hq, Point};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: String) -> Self {
        Self { message }
    }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut seen: BTreeMap<_, Point> = BTreeMap::new();

    for (point, tile) in state.grid.iter() {
        if tile.blocked && (tile.has_units() || tile.hq.is_some() || tile.enemy_present) {
            violations.push(InvariantViolation::new(format!(
                "Blocked tile {point} carries units, an HQ or an enemy"
            )));
        }

        for &unit in &tile.units {
            if let Some(first) = seen.insert(unit, point) {
                violations.push(InvariantViolation::new(format!(
                    "Unit {unit} listed on both {first} and {point}"
                )));
            }
            match state.units.get(&unit) {
                Some(&tracked) if tracked != point => {
                    violations.push(InvariantViolation::new(format!(
                        "Unit {unit} is on {point} but tracked at {tracked}"
                    )));
                }
                None => violations.push(InvariantViolation::new(format!(
                    "Unit {unit} on {point} is not tracked"
                ))),
                Some(_) => {}
            }
        }

        if tile.enemy_present != state.enemies.contains(&point) {
            violations.push(InvariantViolation::new(format!(
                "Enemy flag on {point} disagrees with the tracked enemy set"
            )));
        }
    }

    for (&unit, &point) in &state.units {
        if !seen.contains_key(&unit) {
            violations.push(InvariantViolation::new(format!(
                "Tracked unit {unit} at {point} is on no tile"
            )));
        }
    }

    for &point in &state.enemies {
        if !state.grid.in_bounds(point) {
            violations.push(InvariantViolation::new(format!(
                "Tracked enemy {point} is off the grid"
            )));
        }
    }

    if state.grid.get(state.base).map(|t| t.hq) != Ok(Some(Hq::Own)) {
        violations.push(InvariantViolation::new(format!(
            "Base {} does not carry the home HQ",
            state.base
        )));
    }
    if state.grid.get(state.goal).map(|t| t.hq) != Ok(Some(Hq::Enemy)) {
        violations.push(InvariantViolation::new(format!(
            "Goal {} does not carry the enemy HQ",
            state.goal
        )));
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
