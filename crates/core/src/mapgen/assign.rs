//! Room role assignment driven by graph distance from the entrance.

use std::collections::VecDeque;

use crate::types::{Pos, RoomType};

use super::config::GenerationConfig;
use super::seed;

const BOSS_STREAM_BASE: u64 = 4_100;
const TREASURE_STREAM_BASE: u64 = 4_200;
const SHOP_STREAM_BASE: u64 = 4_300;
const COMBAT_STREAM_BASE: u64 = 4_400;

/// Assigns a role to every room. `edges` are the selected corridor
/// endpoints (spanning plus loops). Exactly one Entrance and one Exit
/// come out of this pass whenever two or more rooms exist.
pub(super) fn assign_room_types(
    level_seed: u64,
    room_centers: &[Pos],
    edges: &[(usize, usize)],
    config: &GenerationConfig,
) -> Vec<RoomType> {
    let room_count = room_centers.len();
    let mut types = vec![RoomType::Empty; room_count];
    if room_count == 0 {
        return types;
    }

    let entrance = entrance_room(room_centers);
    types[entrance] = RoomType::Entrance;
    if room_count == 1 {
        log::warn!("single-room floor has no exit");
        return types;
    }

    let distances = bfs_distances(room_count, edges, entrance);
    let exit = exit_room(room_centers, &distances, entrance);
    types[exit] = RoomType::Exit;

    let mut pool: Vec<usize> = (0..room_count).filter(|&r| r != entrance && r != exit).collect();

    let quotas = [
        (RoomType::Boss, config.boss_rooms_per_floor, true, BOSS_STREAM_BASE),
        (RoomType::Treasure, config.treasure_rooms_per_floor, true, TREASURE_STREAM_BASE),
        (RoomType::Shop, config.shop_rooms_per_floor, false, SHOP_STREAM_BASE),
    ];
    for (room_type, quota, distance_biased, stream_base) in quotas {
        let quota = if quota > pool.len() {
            log::warn!(
                "{room_type:?} quota {quota} clamped to {} available rooms",
                pool.len()
            );
            pool.len()
        } else {
            quota
        };
        for draw in 0..quota {
            let picked = if distance_biased {
                weighted_pick(level_seed, stream_base + draw as u64, &pool, &distances)
            } else {
                seed::random_usize(level_seed, stream_base + draw as u64, 0, pool.len() - 1)
            };
            let room = pool.swap_remove(picked);
            types[room] = room_type;
        }
    }

    for room in pool {
        let roll = seed::random_usize(level_seed, COMBAT_STREAM_BASE + room as u64, 0, 99);
        types[room] = if (roll as u8) < config.combat_room_percent {
            RoomType::Combat
        } else {
            RoomType::Empty
        };
    }

    types
}

/// Corner-biased deterministic pick: the room whose center is smallest in
/// `(y, x)` order.
fn entrance_room(room_centers: &[Pos]) -> usize {
    let mut best = 0;
    for (room, center) in room_centers.iter().enumerate() {
        if (center.y, center.x) < (room_centers[best].y, room_centers[best].x) {
            best = room;
        }
    }
    best
}

fn exit_room(room_centers: &[Pos], distances: &[u32], entrance: usize) -> usize {
    let mut best = usize::MAX;
    for room in 0..room_centers.len() {
        if room == entrance {
            continue;
        }
        if best == usize::MAX {
            best = room;
            continue;
        }
        let center = room_centers[room];
        let best_center = room_centers[best];
        if distances[room] > distances[best]
            || (distances[room] == distances[best]
                && (center.y, center.x) > (best_center.y, best_center.x))
        {
            best = room;
        }
    }
    best
}

pub(super) fn bfs_distances(room_count: usize, edges: &[(usize, usize)], start: usize) -> Vec<u32> {
    let mut neighbors = vec![Vec::new(); room_count];
    for &(a, b) in edges {
        neighbors[a].push(b);
        neighbors[b].push(a);
    }

    let mut distances = vec![u32::MAX; room_count];
    distances[start] = 0;
    let mut queue = VecDeque::from([start]);
    while let Some(room) = queue.pop_front() {
        for &next in &neighbors[room] {
            if distances[next] == u32::MAX {
                distances[next] = distances[room] + 1;
                queue.push_back(next);
            }
        }
    }
    distances
}

/// Draw from `pool` with weight `1 + distance`, favoring rooms far from
/// the entrance.
fn weighted_pick(level_seed: u64, stream: u64, pool: &[usize], distances: &[u32]) -> usize {
    let total: u64 = pool.iter().map(|&room| 1 + distances[room] as u64).sum();
    let mut remaining = seed::mix_seed_stream(level_seed, stream) % total;
    for (i, &room) in pool.iter().enumerate() {
        let weight = 1 + distances[room] as u64;
        if remaining < weight {
            return i;
        }
        remaining -= weight;
    }
    pool.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_centers(count: usize) -> Vec<Pos> {
        (0..count).map(|i| Pos::new(2, (i * 6) as i32)).collect()
    }

    fn line_edges(count: usize) -> Vec<(usize, usize)> {
        (0..count - 1).map(|i| (i, i + 1)).collect()
    }

    #[test]
    fn eight_rooms_get_one_of_each_special_type() {
        let centers = line_centers(8);
        let edges = line_edges(8);
        let config = GenerationConfig::default();

        let types = assign_room_types(9, &centers, &edges, &config);

        let count = |t: RoomType| types.iter().filter(|&&x| x == t).count();
        assert_eq!(count(RoomType::Entrance), 1);
        assert_eq!(count(RoomType::Exit), 1);
        assert_eq!(count(RoomType::Shop), 1);
        assert_eq!(count(RoomType::Treasure), 1);
        assert_eq!(count(RoomType::Boss), 1);
        assert_eq!(count(RoomType::Combat) + count(RoomType::Empty), 3);
    }

    #[test]
    fn exit_distance_dominates_every_other_room() {
        let centers = line_centers(8);
        let edges = line_edges(8);
        let config = GenerationConfig::default();

        let types = assign_room_types(9, &centers, &edges, &config);
        let entrance = types.iter().position(|&t| t == RoomType::Entrance).unwrap();
        let exit = types.iter().position(|&t| t == RoomType::Exit).unwrap();

        let distances = bfs_distances(8, &edges, entrance);
        for room in 0..8 {
            assert!(distances[room] <= distances[exit]);
        }
    }

    #[test]
    fn entrance_is_the_top_left_most_center() {
        let centers = vec![Pos::new(9, 9), Pos::new(2, 14), Pos::new(2, 3), Pos::new(5, 1)];
        let edges = vec![(0, 1), (1, 2), (2, 3)];
        let types = assign_room_types(1, &centers, &edges, &GenerationConfig::default());
        assert_eq!(types[2], RoomType::Entrance);
    }

    #[test]
    fn oversized_quotas_clamp_to_available_rooms() {
        let centers = line_centers(4);
        let edges = line_edges(4);
        let config = GenerationConfig {
            boss_rooms_per_floor: 5,
            treasure_rooms_per_floor: 5,
            shop_rooms_per_floor: 5,
            ..GenerationConfig::default()
        };

        let types = assign_room_types(7, &centers, &edges, &config);

        let count = |t: RoomType| types.iter().filter(|&&x| x == t).count();
        assert_eq!(count(RoomType::Entrance), 1);
        assert_eq!(count(RoomType::Exit), 1);
        assert_eq!(count(RoomType::Boss), 2);
        assert_eq!(count(RoomType::Treasure), 0);
        assert_eq!(count(RoomType::Shop), 0);
    }

    #[test]
    fn assignment_is_deterministic_per_seed() {
        let centers = line_centers(10);
        let edges = line_edges(10);
        let config = GenerationConfig::default();

        let first = assign_room_types(123, &centers, &edges, &config);
        let second = assign_room_types(123, &centers, &edges, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn single_room_floor_is_entrance_only() {
        let types =
            assign_room_types(3, &[Pos::new(2, 2)], &[], &GenerationConfig::default());
        assert_eq!(types, vec![RoomType::Entrance]);
    }
}
