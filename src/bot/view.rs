//! The bot's decoded, player-relative map.

use crate::error::DecodeError;
use crate::game::Point;
use crate::protocol::{ObservedTile, PlayerId, PlayerUnit, TurnRequest, decode_tile};
use crate::validate::MapView;

/// A turn's map decoded from the requester's point of view.
///
/// Bounds are whatever the request contained; rows need not share a length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotView {
    player_id: PlayerId,
    rows: Vec<Vec<ObservedTile>>,
}

impl BotView {
    /// Decode every tile of a request for its `player_num`.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] encountered.
    pub fn decode(request: &TurnRequest) -> Result<Self, DecodeError> {
        let player_id = request.player_num;
        let rows = request
            .map
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, content)| {
                        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                        let point = Point::new(x as i32, y as i32);
                        decode_tile(content, point, player_id)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { player_id, rows })
    }

    /// The requester's id.
    #[must_use]
    pub const fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// The tile at `point`, if the request covered it.
    #[must_use]
    pub fn get(&self, point: Point) -> Option<&ObservedTile> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        self.rows.get(y)?.get(x)
    }

    /// All tiles, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = &ObservedTile> {
        self.rows.iter().flatten()
    }

    /// All of the requester's units, row by row.
    pub fn units(&self) -> impl Iterator<Item = &PlayerUnit> {
        self.tiles().flat_map(|tile| tile.units.iter())
    }

    /// Position of a visible enemy headquarters.
    #[must_use]
    pub fn enemy_hq(&self) -> Option<Point> {
        self.tiles().find(|tile| tile.enemy_hq).map(|tile| tile.position)
    }
}

impl MapView for BotView {
    fn contains(&self, point: Point) -> bool {
        self.get(point).is_some()
    }

    fn is_reachable(&self, point: Point) -> bool {
        self.get(point).is_some_and(|tile| tile.reachable)
    }

    fn has_enemy(&self, point: Point) -> bool {
        self.get(point).is_some_and(ObservedTile::has_enemy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::UnitId;

    fn request() -> TurnRequest {
        TurnRequest {
            player_num: 1,
            map: vec![
                vec!["HQ:1Id:0,U:1Id:0".into(), "".into(), "F".into()],
                vec!["B".into(), "U:2Id:0".into(), "HQ:2Id:0".into()],
            ],
        }
    }

    #[test]
    fn test_decode_view() {
        let view = BotView::decode(&request()).unwrap();
        assert_eq!(view.player_id(), 1);
        assert_eq!(view.tiles().count(), 6);
        assert_eq!(
            view.units().copied().collect::<Vec<_>>(),
            vec![PlayerUnit { id: UnitId(0), position: Point::new(0, 0) }]
        );
        assert_eq!(view.enemy_hq(), Some(Point::new(2, 1)));
    }

    #[test]
    fn test_map_view_queries() {
        let view = BotView::decode(&request()).unwrap();
        assert!(view.contains(Point::new(2, 1)));
        assert!(!view.contains(Point::new(3, 0)));
        assert!(!view.contains(Point::new(-1, 0)));
        assert!(!view.is_reachable(Point::new(2, 0)));
        assert!(!view.is_reachable(Point::new(0, 1)));
        assert!(view.is_reachable(Point::new(1, 0)));
        assert!(view.has_enemy(Point::new(1, 1)));
    }

    #[test]
    fn test_decode_failure_propagates() {
        let mut bad = request();
        bad.map[1][0] = "??".into();
        assert!(BotView::decode(&bad).is_err());
    }
}
