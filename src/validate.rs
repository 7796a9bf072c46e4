//! Move and attack legality checks.
//!
//! The checks run against any [`MapView`]: the bot's decoded, fog-limited
//! view for optimistic pre-checks, and the engine's authoritative view when
//! re-validating before mutation.

use crate::error::ActionError;
use crate::game::{Direction, Point};
use crate::protocol::{ActionRecord, PlayerUnit, TurnResponse};

/// The queries the validator needs from a map.
pub trait MapView {
    /// The point is inside the known map.
    fn contains(&self, point: Point) -> bool;
    /// The point can be entered (not blocked, not fogged).
    fn is_reachable(&self, point: Point) -> bool;
    /// An enemy occupies the point.
    fn has_enemy(&self, point: Point) -> bool;
}

/// Check that `target` is on the map and reachable.
///
/// # Errors
///
/// [`ActionError::OutOfMap`] or [`ActionError::Unreachable`].
pub fn validate_target(view: &impl MapView, target: Point) -> Result<(), ActionError> {
    if !view.contains(target) {
        return Err(ActionError::OutOfMap(target));
    }
    if !view.is_reachable(target) {
        return Err(ActionError::Unreachable(target));
    }
    Ok(())
}

/// Check a one-step move from `from` and return its target.
///
/// # Errors
///
/// Target errors from [`validate_target`], or
/// [`ActionError::TargetOccupiedByEnemy`].
pub fn check_move(view: &impl MapView, from: Point, direction: Direction) -> Result<Point, ActionError> {
    let target = from + direction;
    validate_target(view, target)?;
    if view.has_enemy(target) {
        return Err(ActionError::TargetOccupiedByEnemy(target));
    }
    Ok(target)
}

/// Check an attack from `from` and return its target.
///
/// # Errors
///
/// Target errors from [`validate_target`], or [`ActionError::EmptyTarget`].
pub fn check_attack(view: &impl MapView, from: Point, direction: Direction) -> Result<Point, ActionError> {
    let target = from + direction;
    validate_target(view, target)?;
    if !view.has_enemy(target) {
        return Err(ActionError::EmptyTarget(target));
    }
    Ok(target)
}

/// Collects validated intents for one turn.
///
/// Each accepted intent becomes an [`ActionRecord`]; rejected ones leave
/// nothing behind, so callers can simply try the next option.
#[derive(Debug)]
pub struct Intents<'v, V> {
    view: &'v V,
    actions: Vec<ActionRecord>,
}

impl<'v, V: MapView> Intents<'v, V> {
    /// Start an empty intent list over `view`.
    #[must_use]
    pub fn new(view: &'v V) -> Self {
        Self {
            view,
            actions: Vec::new(),
        }
    }

    /// The view intents are validated against.
    #[must_use]
    pub fn view(&self) -> &'v V {
        self.view
    }

    /// Queue a move for `unit`.
    ///
    /// # Errors
    ///
    /// See [`check_move`].
    pub fn move_unit(&mut self, unit: &PlayerUnit, direction: Direction) -> Result<Point, ActionError> {
        let target = check_move(self.view, unit.position, direction)?;
        self.actions.push(ActionRecord::Move {
            unit_id: unit.id,
            direction,
        });
        Ok(target)
    }

    /// Queue an attack from `from`.
    ///
    /// # Errors
    ///
    /// See [`check_attack`].
    pub fn attack(&mut self, from: Point, direction: Direction) -> Result<Point, ActionError> {
        let to = check_attack(self.view, from, direction)?;
        self.actions.push(ActionRecord::Attack { from, to });
        Ok(to)
    }

    /// Intents queued so far.
    #[must_use]
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// Finish the turn.
    #[must_use]
    pub fn into_response(self) -> TurnResponse {
        TurnResponse {
            actions: self.actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::game::UnitId;

    /// 4×4 map with explicit blocked and enemy sets.
    struct Fixture {
        blocked: HashSet<Point>,
        enemies: HashSet<Point>,
    }

    impl MapView for Fixture {
        fn contains(&self, p: Point) -> bool {
            (0..4).contains(&p.x) && (0..4).contains(&p.y)
        }
        fn is_reachable(&self, p: Point) -> bool {
            !self.blocked.contains(&p)
        }
        fn has_enemy(&self, p: Point) -> bool {
            self.enemies.contains(&p)
        }
    }

    fn fixture() -> Fixture {
        Fixture {
            blocked: [Point::new(1, 0)].into_iter().collect(),
            enemies: [Point::new(1, 1)].into_iter().collect(),
        }
    }

    #[test]
    fn test_validate_target() {
        let view = fixture();
        assert_eq!(validate_target(&view, Point::new(0, 1)), Ok(()));
        assert_eq!(validate_target(&view, Point::new(4, 0)), Err(ActionError::OutOfMap(Point::new(4, 0))));
        assert_eq!(validate_target(&view, Point::new(1, 0)), Err(ActionError::Unreachable(Point::new(1, 0))));
    }

    #[test]
    fn test_move_checks() {
        let view = fixture();
        let origin = Point::new(0, 0);
        assert_eq!(check_move(&view, origin, Direction::S), Ok(Point::new(0, 1)));
        assert_eq!(check_move(&view, origin, Direction::N), Err(ActionError::OutOfMap(Point::new(0, -1))));
        assert_eq!(check_move(&view, origin, Direction::E), Err(ActionError::Unreachable(Point::new(1, 0))));
        assert_eq!(
            check_move(&view, origin, Direction::SE),
            Err(ActionError::TargetOccupiedByEnemy(Point::new(1, 1)))
        );
    }

    #[test]
    fn test_attack_checks() {
        let view = fixture();
        let origin = Point::new(0, 0);
        assert_eq!(check_attack(&view, origin, Direction::SE), Ok(Point::new(1, 1)));
        assert_eq!(check_attack(&view, origin, Direction::S), Err(ActionError::EmptyTarget(Point::new(0, 1))));
    }

    #[test]
    fn test_intents_only_keep_accepted_actions() {
        let view = fixture();
        let unit = PlayerUnit {
            id: UnitId(2),
            position: Point::new(0, 0),
        };
        let mut intents = Intents::new(&view);

        assert!(intents.move_unit(&unit, Direction::E).is_err());
        assert!(intents.move_unit(&unit, Direction::S).is_ok());
        assert!(intents.attack(unit.position, Direction::S).is_err());
        assert!(intents.attack(unit.position, Direction::SE).is_ok());

        let response = intents.into_response();
        assert_eq!(
            response.actions,
            vec![
                ActionRecord::Move {
                    unit_id: UnitId(2),
                    direction: Direction::S
                },
                ActionRecord::Attack {
                    from: Point::new(0, 0),
                    to: Point::new(1, 1)
                },
            ]
        );
    }
}
