//! Public data model for generated levels: rooms, corridors, tile sets,
//! and the lazily built spatial index.

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet};

use slotmap::SlotMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{CorridorId, Pos, Rect, RoomId, RoomType, TileKind, WallType};

use super::index::SpatialIndex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    /// Sequential creation index, stable for a given seed.
    pub index: usize,
    pub bounds: Rect,
    pub room_type: RoomType,
    /// Partition-adjacency neighbors (candidate graph), not the corridor
    /// graph; see [`Level::neighbors`] for the latter.
    pub neighbors: Vec<RoomId>,
}

impl Room {
    /// Center tile of the room's bounds.
    pub fn center(&self) -> Pos {
        self.bounds.center()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Corridor {
    pub id: CorridorId,
    pub start_room: RoomId,
    pub end_room: RoomId,
    /// Carved tiles from the start room's perimeter to the end room's.
    pub path: Vec<Pos>,
    /// True for the bounded set of non-tree edges added after the
    /// spanning selection.
    pub is_loop: bool,
}

/// A fully generated floor. Built wholesale by the generator and never
/// mutated afterwards; only the spatial index populates lazily.
#[derive(Debug)]
pub struct Level {
    pub(super) rooms: SlotMap<RoomId, Room>,
    pub(super) corridors: SlotMap<CorridorId, Corridor>,
    pub(super) room_order: Vec<RoomId>,
    pub(super) corridor_order: Vec<CorridorId>,
    pub(super) floor_tiles: BTreeSet<Pos>,
    pub(super) door_tiles: BTreeSet<Pos>,
    pub(super) wall_tiles: BTreeSet<Pos>,
    pub(super) room_tiles: BTreeMap<Pos, RoomId>,
    pub(super) corridor_tiles: BTreeMap<Pos, CorridorId>,
    pub(super) wall_types: BTreeMap<Pos, WallType>,
    pub(super) bounds: Rect,
    pub(super) floor_index: u8,
    pub(super) seed: u64,
    pub(super) index: OnceCell<SpatialIndex>,
}

impl Level {
    /// Rooms in creation order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.room_order.iter().map(|&id| &self.rooms[id])
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn room_count(&self) -> usize {
        self.room_order.len()
    }

    /// Corridors in creation order.
    pub fn corridors(&self) -> impl Iterator<Item = &Corridor> {
        self.corridor_order.iter().map(|&id| &self.corridors[id])
    }

    pub fn corridor(&self, id: CorridorId) -> Option<&Corridor> {
        self.corridors.get(id)
    }

    pub fn corridor_count(&self) -> usize {
        self.corridor_order.len()
    }

    pub fn floor_tiles(&self) -> &BTreeSet<Pos> {
        &self.floor_tiles
    }

    pub fn door_tiles(&self) -> &BTreeSet<Pos> {
        &self.door_tiles
    }

    pub fn wall_tiles(&self) -> &BTreeSet<Pos> {
        &self.wall_tiles
    }

    pub fn wall_types(&self) -> &BTreeMap<Pos, WallType> {
        &self.wall_types
    }

    /// Full grid bounds from the configuration, not the tighter union of
    /// room rectangles (see [`SpatialIndex::bounds`] for that).
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn floor_index(&self) -> u8 {
        self.floor_index
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Everything outside the generated tile sets reads as wall,
    /// including out-of-bounds coordinates.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if self.door_tiles.contains(&pos) {
            TileKind::Door
        } else if self.floor_tiles.contains(&pos) {
            TileKind::Floor
        } else {
            TileKind::Wall
        }
    }

    pub fn room_at(&self, pos: Pos) -> Option<&Room> {
        self.index().room_at(pos).and_then(|id| self.rooms.get(id))
    }

    pub fn corridor_at(&self, pos: Pos) -> Option<&Corridor> {
        self.index().corridor_at(pos).and_then(|id| self.corridors.get(id))
    }

    /// Rooms reachable through a single selected corridor.
    pub fn neighbors(&self, room: RoomId) -> &[RoomId] {
        self.index().neighbors(room)
    }

    pub fn spatial_index(&self) -> &SpatialIndex {
        self.index()
    }

    fn index(&self) -> &SpatialIndex {
        self.index.get_or_init(|| SpatialIndex::build(self))
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        bytes.push(self.floor_index);
        extend_rect(&mut bytes, self.bounds);

        bytes.extend((self.room_order.len() as u32).to_le_bytes());
        for room in self.rooms() {
            bytes.extend((room.index as u32).to_le_bytes());
            extend_rect(&mut bytes, room.bounds);
            bytes.push(room_type_code(room.room_type));
            bytes.extend((room.neighbors.len() as u32).to_le_bytes());
            for &neighbor in &room.neighbors {
                bytes.extend((self.rooms[neighbor].index as u32).to_le_bytes());
            }
        }

        bytes.extend((self.corridor_order.len() as u32).to_le_bytes());
        for corridor in self.corridors() {
            bytes.extend((self.rooms[corridor.start_room].index as u32).to_le_bytes());
            bytes.extend((self.rooms[corridor.end_room].index as u32).to_le_bytes());
            bytes.push(u8::from(corridor.is_loop));
            bytes.extend((corridor.path.len() as u32).to_le_bytes());
            for pos in &corridor.path {
                extend_pos(&mut bytes, *pos);
            }
        }

        for (label, tiles) in
            [(0_u8, &self.floor_tiles), (1, &self.door_tiles), (2, &self.wall_tiles)]
        {
            bytes.push(label);
            bytes.extend((tiles.len() as u32).to_le_bytes());
            for pos in tiles {
                extend_pos(&mut bytes, *pos);
            }
        }

        bytes.extend((self.wall_types.len() as u32).to_le_bytes());
        for (pos, wall_type) in &self.wall_types {
            extend_pos(&mut bytes, *pos);
            bytes.push(wall_type_code(*wall_type));
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn extend_pos(bytes: &mut Vec<u8>, pos: Pos) {
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.x.to_le_bytes());
}

fn extend_rect(bytes: &mut Vec<u8>, rect: Rect) {
    bytes.extend((rect.x as u32).to_le_bytes());
    bytes.extend((rect.y as u32).to_le_bytes());
    bytes.extend((rect.width as u32).to_le_bytes());
    bytes.extend((rect.height as u32).to_le_bytes());
}

fn room_type_code(room_type: RoomType) -> u8 {
    match room_type {
        RoomType::Entrance => 0,
        RoomType::Exit => 1,
        RoomType::Shop => 2,
        RoomType::Treasure => 3,
        RoomType::Boss => 4,
        RoomType::Combat => 5,
        RoomType::Empty => 6,
    }
}

fn wall_type_code(wall_type: WallType) -> u8 {
    match wall_type {
        WallType::North => 0,
        WallType::South => 1,
        WallType::East => 2,
        WallType::West => 3,
        WallType::NorthWestCorner => 4,
        WallType::NorthEastCorner => 5,
        WallType::SouthWestCorner => 6,
        WallType::SouthEastCorner => 7,
        WallType::Interior => 8,
        WallType::Corridor => 9,
        WallType::Doorway => 10,
    }
}
