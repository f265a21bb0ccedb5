//! Tile-level realization of rooms and corridors: floor, door, and wall
//! sets plus per-tile ownership.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Pos, Rect};

use super::grid::neighbors8;

/// Tile sets and ownership maps for one floor. Ownership is exclusive:
/// a floor tile belongs to exactly one room or exactly one corridor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct LevelGeometry {
    pub floor_tiles: BTreeSet<Pos>,
    pub door_tiles: BTreeSet<Pos>,
    pub wall_tiles: BTreeSet<Pos>,
    pub room_tiles: BTreeMap<Pos, usize>,
    pub corridor_tiles: BTreeMap<Pos, usize>,
}

/// Rooms claim their full bounds first; corridor paths claim whatever is
/// left, earlier corridors winning overlaps. A path tile inside a room's
/// perimeter ring becomes a door.
pub(super) fn build_geometry(room_bounds: &[Rect], corridor_paths: &[Vec<Pos>]) -> LevelGeometry {
    let mut geometry = LevelGeometry::default();

    for (room, bounds) in room_bounds.iter().enumerate() {
        for y in bounds.y..=bounds.bottom() {
            for x in bounds.x..=bounds.right() {
                let pos = Pos::new(y as i32, x as i32);
                geometry.room_tiles.insert(pos, room);
                geometry.floor_tiles.insert(pos);
            }
        }
    }

    for (corridor, path) in corridor_paths.iter().enumerate() {
        for &pos in path {
            match geometry.room_tiles.get(&pos) {
                Some(&room) => {
                    if on_perimeter(room_bounds[room], pos) {
                        geometry.door_tiles.insert(pos);
                    }
                }
                None => {
                    geometry.corridor_tiles.entry(pos).or_insert(corridor);
                    geometry.floor_tiles.insert(pos);
                }
            }
        }
    }

    for &pos in &geometry.floor_tiles {
        for neighbor in neighbors8(pos) {
            if !geometry.floor_tiles.contains(&neighbor) {
                geometry.wall_tiles.insert(neighbor);
            }
        }
    }

    geometry
}

fn on_perimeter(bounds: Rect, pos: Pos) -> bool {
    let x = pos.x as usize;
    let y = pos.y as usize;
    x == bounds.x || x == bounds.right() || y == bounds.y || y == bounds.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_and_corridor_tiles_are_disjoint_and_cover_the_floor() {
        let rooms = [Rect::new(2, 2, 4, 4), Rect::new(10, 2, 4, 4)];
        let path: Vec<Pos> = (5..=10).map(|x| Pos::new(3, x)).collect();

        let geometry = build_geometry(&rooms, &[path]);

        for pos in &geometry.floor_tiles {
            let in_room = geometry.room_tiles.contains_key(pos);
            let in_corridor = geometry.corridor_tiles.contains_key(pos);
            assert!(in_room ^ in_corridor, "tile {pos:?} owned by both or neither");
        }
        assert_eq!(
            geometry.floor_tiles.len(),
            geometry.room_tiles.len() + geometry.corridor_tiles.len()
        );
    }

    #[test]
    fn path_ends_on_room_perimeters_become_doors() {
        let rooms = [Rect::new(2, 2, 4, 4), Rect::new(10, 2, 4, 4)];
        let path: Vec<Pos> = (5..=10).map(|x| Pos::new(3, x)).collect();

        let geometry = build_geometry(&rooms, &[path]);

        assert_eq!(
            geometry.door_tiles.iter().copied().collect::<Vec<_>>(),
            vec![Pos::new(3, 5), Pos::new(3, 10)]
        );
    }

    #[test]
    fn walls_ring_every_floor_tile() {
        let rooms = [Rect::new(2, 2, 3, 3)];
        let geometry = build_geometry(&rooms, &[]);

        for pos in &geometry.wall_tiles {
            assert!(!geometry.floor_tiles.contains(pos));
            assert!(neighbors8(*pos).any(|n| geometry.floor_tiles.contains(&n)));
        }
        // A 3x3 room is ringed by exactly 16 wall tiles.
        assert_eq!(geometry.wall_tiles.len(), 16);
    }

    #[test]
    fn overlapping_corridors_keep_first_owner() {
        let rooms = [Rect::new(2, 2, 3, 3), Rect::new(10, 2, 3, 3), Rect::new(2, 10, 3, 3)];
        let shared = Pos::new(3, 7);
        let first = vec![Pos::new(3, 4), Pos::new(3, 5), Pos::new(3, 6), shared];
        let second = vec![shared, Pos::new(4, 7), Pos::new(5, 7)];

        let geometry = build_geometry(&rooms, &[first, second]);

        assert_eq!(geometry.corridor_tiles.get(&shared), Some(&0));
    }
}
