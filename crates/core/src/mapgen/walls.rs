//! Structural classification of wall and doorway tiles.

use std::collections::BTreeMap;

use crate::types::{Pos, Rect, WallType};

use super::geometry::LevelGeometry;
use super::grid::neighbors8;

/// Classifies every wall tile and doorway tile. Each tile is decided
/// independently; iteration order never affects the result.
///
/// Priority per wall tile: adjacency to a corridor-owned floor tile wins
/// over room-band classification, so a room corner touched by a corridor
/// reads as a corridor wall. Doorway tiles are floor tiles on a room
/// perimeter and never appear in the wall set; they are recorded here so
/// the map covers every classified tile.
pub(super) fn classify_walls(
    room_bounds: &[Rect],
    geometry: &LevelGeometry,
) -> BTreeMap<Pos, WallType> {
    let mut wall_types = BTreeMap::new();
    for &pos in &geometry.wall_tiles {
        wall_types.insert(pos, classify(pos, room_bounds, geometry));
    }
    for &pos in &geometry.door_tiles {
        wall_types.insert(pos, WallType::Doorway);
    }
    wall_types
}

fn classify(pos: Pos, room_bounds: &[Rect], geometry: &LevelGeometry) -> WallType {
    if neighbors8(pos).any(|n| geometry.corridor_tiles.contains_key(&n)) {
        return WallType::Corridor;
    }

    for &bounds in room_bounds {
        if let Some(wall_type) = room_band_classification(bounds, pos) {
            return wall_type;
        }
    }

    WallType::Interior
}

/// The room's one-tile wall band. `None` when the tile is outside it.
fn room_band_classification(bounds: Rect, pos: Pos) -> Option<WallType> {
    if !bounds.expanded(1).contains(pos) || bounds.contains(pos) {
        return None;
    }

    let north = pos.y == bounds.y as i32 - 1;
    let south = pos.y == bounds.bottom() as i32 + 1;
    let west = pos.x == bounds.x as i32 - 1;
    let east = pos.x == bounds.right() as i32 + 1;

    Some(match (north, south, west, east) {
        (true, _, true, _) => WallType::NorthWestCorner,
        (true, _, _, true) => WallType::NorthEastCorner,
        (_, true, true, _) => WallType::SouthWestCorner,
        (_, true, _, true) => WallType::SouthEastCorner,
        (true, ..) => WallType::North,
        (_, true, ..) => WallType::South,
        (_, _, true, _) => WallType::West,
        _ => WallType::East,
    })
}

#[cfg(test)]
mod tests {
    use super::super::geometry::build_geometry;
    use super::*;

    #[test]
    fn room_band_edges_and_corners_classify_by_direction() {
        let rooms = [Rect::new(2, 2, 3, 3)];
        let geometry = build_geometry(&rooms, &[]);
        let wall_types = classify_walls(&rooms, &geometry);

        assert_eq!(wall_types.get(&Pos::new(1, 1)), Some(&WallType::NorthWestCorner));
        assert_eq!(wall_types.get(&Pos::new(1, 5)), Some(&WallType::NorthEastCorner));
        assert_eq!(wall_types.get(&Pos::new(5, 1)), Some(&WallType::SouthWestCorner));
        assert_eq!(wall_types.get(&Pos::new(5, 5)), Some(&WallType::SouthEastCorner));
        assert_eq!(wall_types.get(&Pos::new(1, 3)), Some(&WallType::North));
        assert_eq!(wall_types.get(&Pos::new(5, 3)), Some(&WallType::South));
        assert_eq!(wall_types.get(&Pos::new(3, 1)), Some(&WallType::West));
        assert_eq!(wall_types.get(&Pos::new(3, 5)), Some(&WallType::East));
    }

    #[test]
    fn corridor_adjacency_wins_over_a_genuine_room_corner() {
        let rooms = [Rect::new(2, 2, 3, 3)];
        // A lone corridor tile diagonally outside the room's top-left corner.
        let geometry = build_geometry(&rooms, &[vec![Pos::new(1, 0)]]);
        let wall_types = classify_walls(&rooms, &geometry);

        assert_eq!(wall_types.get(&Pos::new(1, 1)), Some(&WallType::Corridor));
        // The rest of the band is untouched.
        assert_eq!(wall_types.get(&Pos::new(1, 5)), Some(&WallType::NorthEastCorner));
        assert_eq!(wall_types.get(&Pos::new(1, 3)), Some(&WallType::North));
    }

    #[test]
    fn doorways_enter_the_map_as_their_own_type() {
        let rooms = [Rect::new(2, 2, 4, 4), Rect::new(10, 2, 4, 4)];
        let path: Vec<Pos> = (5..=10).map(|x| Pos::new(3, x)).collect();
        let geometry = build_geometry(&rooms, &[path]);
        let wall_types = classify_walls(&rooms, &geometry);

        assert_eq!(wall_types.get(&Pos::new(3, 5)), Some(&WallType::Doorway));
        assert_eq!(wall_types.get(&Pos::new(3, 10)), Some(&WallType::Doorway));
    }

    #[test]
    fn every_wall_tile_is_classified() {
        let rooms = [Rect::new(2, 2, 4, 4), Rect::new(10, 2, 4, 4)];
        let path: Vec<Pos> = (5..=10).map(|x| Pos::new(3, x)).collect();
        let geometry = build_geometry(&rooms, &[path]);
        let wall_types = classify_walls(&rooms, &geometry);

        for pos in &geometry.wall_tiles {
            assert!(wall_types.contains_key(pos));
        }
        assert_eq!(wall_types.len(), geometry.wall_tiles.len() + geometry.door_tiles.len());
    }
}
