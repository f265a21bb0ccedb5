//! Point-query index over a finished level, built lazily on first use.

use std::collections::BTreeMap;

use crate::types::{CorridorId, Pos, Rect, RoomId};

use super::model::Level;

/// Tile-to-owner lookup maps plus the corridor-derived room adjacency
/// graph. `bounds` is the union of room rectangles, tighter than the
/// configured grid.
#[derive(Debug)]
pub struct SpatialIndex {
    bounds: Rect,
    room_at: BTreeMap<Pos, RoomId>,
    corridor_at: BTreeMap<Pos, CorridorId>,
    adjacency: BTreeMap<RoomId, Vec<RoomId>>,
}

impl SpatialIndex {
    pub(super) fn build(level: &Level) -> Self {
        let mut bounds: Option<Rect> = None;
        for room in level.rooms() {
            bounds = Some(match bounds {
                None => room.bounds,
                Some(current) => union(current, room.bounds),
            });
        }

        let mut adjacency: BTreeMap<RoomId, Vec<RoomId>> = BTreeMap::new();
        for room in level.rooms() {
            adjacency.insert(room.id, Vec::new());
        }
        for corridor in level.corridors() {
            let (a, b) = (corridor.start_room, corridor.end_room);
            let forward = adjacency.entry(a).or_default();
            if !forward.contains(&b) {
                forward.push(b);
            }
            let backward = adjacency.entry(b).or_default();
            if !backward.contains(&a) {
                backward.push(a);
            }
        }

        Self {
            bounds: bounds.unwrap_or(Rect::new(0, 0, 1, 1)),
            room_at: level.room_tiles.clone(),
            corridor_at: level.corridor_tiles.clone(),
            adjacency,
        }
    }

    /// Union of all room rectangles.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn room_at(&self, pos: Pos) -> Option<RoomId> {
        self.room_at.get(&pos).copied()
    }

    pub fn corridor_at(&self, pos: Pos) -> Option<CorridorId> {
        self.corridor_at.get(&pos).copied()
    }

    /// Rooms connected to `room` by a selected corridor, in corridor
    /// creation order.
    pub fn neighbors(&self, room: RoomId) -> &[RoomId] {
        self.adjacency.get(&room).map_or(&[], Vec::as_slice)
    }
}

fn union(a: Rect, b: Rect) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    let right = a.right().max(b.right());
    let bottom = a.bottom().max(b.bottom());
    Rect::new(x, y, right - x + 1, bottom - y + 1)
}
