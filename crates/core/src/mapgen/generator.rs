//! The generation pipeline: partition the grid, carve rooms, connect
//! them, assign roles, and realize tiles into a [`Level`].

use std::cell::OnceCell;

use slotmap::SlotMap;

use crate::types::{CorridorId, GenerationError, Pos, Rect, RoomId};

use super::adjacency::resolve_faces;
use super::assign::assign_room_types;
use super::config::GenerationConfig;
use super::corridors::{build_candidates, select_corridors};
use super::geometry::build_geometry;
use super::model::{Corridor, Level, Room};
use super::partition::PartitionTree;
use super::progression::extra_loop_corridors;
use super::rooms::carve_rooms;
use super::seed;
use super::walls::classify_walls;

/// Deterministic level generator. One instance covers a whole run: every
/// floor derives its own seed from the base seed, so floors can be
/// generated in any order and regenerate identically.
#[derive(Clone, Debug)]
pub struct LevelGenerator {
    base_seed: u64,
    config: GenerationConfig,
}

impl LevelGenerator {
    /// Validates the config once up front; later calls to
    /// [`LevelGenerator::generate`] only fail on structural problems.
    pub fn new(base_seed: u64, config: GenerationConfig) -> Result<Self, GenerationError> {
        let config = config.validated()?;
        Ok(Self { base_seed, config })
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn generate(&self, floor_index: u8) -> Result<Level, GenerationError> {
        let level_seed = seed::derive_level_seed(self.base_seed, floor_index);

        // One tile of border stays outside the partition tree on every side.
        let root = Rect::new(1, 1, self.config.width - 2, self.config.height - 2);
        let tree = PartitionTree::build(level_seed, root, &self.config)?;
        let leaf_bounds: Vec<Rect> =
            tree.leaves().iter().map(|&leaf_id| tree.node(leaf_id).bounds).collect();

        let room_bounds = carve_rooms(level_seed, &leaf_bounds, &self.config);
        let room_centers: Vec<Pos> = room_bounds.iter().map(Rect::center).collect();

        let faces = resolve_faces(&leaf_bounds);
        let candidates = build_candidates(&faces, &leaf_bounds, &room_bounds);
        let selection =
            select_corridors(&candidates, &room_centers, extra_loop_corridors(floor_index))?;
        let selected: Vec<usize> =
            selection.spanning.iter().chain(&selection.loops).copied().collect();

        let edges: Vec<(usize, usize)> =
            selected.iter().map(|&i| (candidates[i].a, candidates[i].b)).collect();
        let room_types = assign_room_types(level_seed, &room_centers, &edges, &self.config);

        let paths: Vec<Vec<Pos>> = selected.iter().map(|&i| candidates[i].path.clone()).collect();
        let geometry = build_geometry(&room_bounds, &paths);
        let wall_types = classify_walls(&room_bounds, &geometry);

        let mut rooms: SlotMap<RoomId, Room> = SlotMap::with_key();
        let mut room_order = Vec::with_capacity(room_bounds.len());
        for (index, &bounds) in room_bounds.iter().enumerate() {
            let id = rooms.insert_with_key(|id| Room {
                id,
                index,
                bounds,
                room_type: room_types[index],
                neighbors: Vec::new(),
            });
            room_order.push(id);
        }
        for face in &faces {
            let (a, b) = (room_order[face.a], room_order[face.b]);
            rooms[a].neighbors.push(b);
            rooms[b].neighbors.push(a);
        }

        let mut corridors: SlotMap<CorridorId, Corridor> = SlotMap::with_key();
        let mut corridor_order = Vec::with_capacity(selected.len());
        for (slot, &i) in selected.iter().enumerate() {
            let candidate = &candidates[i];
            let id = corridors.insert_with_key(|id| Corridor {
                id,
                start_room: room_order[candidate.a],
                end_room: room_order[candidate.b],
                path: candidate.path.clone(),
                is_loop: slot >= selection.spanning.len(),
            });
            corridor_order.push(id);
        }

        let room_tiles =
            geometry.room_tiles.iter().map(|(&pos, &room)| (pos, room_order[room])).collect();
        let corridor_tiles = geometry
            .corridor_tiles
            .iter()
            .map(|(&pos, &corridor)| (pos, corridor_order[corridor]))
            .collect();

        log::info!(
            "generated floor {floor_index}: {} rooms, {} corridors ({} loops)",
            room_order.len(),
            corridor_order.len(),
            selection.loops.len()
        );

        Ok(Level {
            rooms,
            corridors,
            room_order,
            corridor_order,
            floor_tiles: geometry.floor_tiles,
            door_tiles: geometry.door_tiles,
            wall_tiles: geometry.wall_tiles,
            room_tiles,
            corridor_tiles,
            wall_types,
            bounds: Rect::new(0, 0, self.config.width, self.config.height),
            floor_index,
            seed: level_seed,
            index: OnceCell::new(),
        })
    }
}
