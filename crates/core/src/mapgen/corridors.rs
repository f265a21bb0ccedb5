//! Corridor candidate carving and Kruskal spanning-tree selection.

use crate::types::{GenerationError, Pos, Rect};

use super::adjacency::AdjacencyFace;
use super::grid::squared_distance;

/// A carved candidate path between two rooms. The first and last path
/// tiles sit on the source and destination room perimeters; every other
/// tile stays inside the two partitions' margin space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct CorridorCandidate {
    pub a: usize,
    pub b: usize,
    pub path: Vec<Pos>,
}

/// Indices into the candidate list, split into the spanning set and the
/// extra loop edges re-added after the tree is complete.
#[derive(Clone, Debug, Default)]
pub(super) struct CorridorSelection {
    pub spanning: Vec<usize>,
    pub loops: Vec<usize>,
}

/// Union-find over room indices, path compression on lookup.
pub(super) struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    pub fn new(size: usize) -> Self {
        Self { parent: (0..size).collect() }
    }

    pub fn find_root(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cursor = index;
        while self.parent[cursor] != root {
            let next = self.parent[cursor];
            self.parent[cursor] = root;
            cursor = next;
        }
        root
    }

    /// Joins the two components; returns false when already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find_root(a);
        let root_b = self.find_root(b);
        if root_a == root_b {
            return false;
        }
        self.parent[root_b] = root_a;
        true
    }
}

/// One candidate per adjacency face. Faces whose geometry cannot host a
/// path confined to the two partitions are skipped with a diagnostic.
pub(super) fn build_candidates(
    faces: &[AdjacencyFace],
    leaf_bounds: &[Rect],
    room_bounds: &[Rect],
) -> Vec<CorridorCandidate> {
    let mut candidates = Vec::with_capacity(faces.len());
    for face in faces {
        let carved = if face.vertical {
            carve_vertical(room_bounds[face.a], room_bounds[face.b], leaf_bounds[face.b])
        } else {
            carve_horizontal(room_bounds[face.a], room_bounds[face.b], leaf_bounds[face.b])
        };
        match carved {
            Some(path) => candidates.push(CorridorCandidate { a: face.a, b: face.b, path }),
            None => log::debug!(
                "no confinable corridor between rooms {} and {}, face skipped",
                face.a,
                face.b
            ),
        }
    }
    candidates
}

/// Kruskal over candidates sorted by squared center distance (stable
/// tie-break on input order), then a bounded loop pass over the shortest
/// discarded candidates.
pub(super) fn select_corridors(
    candidates: &[CorridorCandidate],
    room_centers: &[Pos],
    extra_loops: usize,
) -> Result<CorridorSelection, GenerationError> {
    let room_count = room_centers.len();
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&i| {
        let candidate = &candidates[i];
        (squared_distance(room_centers[candidate.a], room_centers[candidate.b]), i)
    });

    let mut components = DisjointSet::new(room_count);
    let mut selection = CorridorSelection::default();
    for &i in &order {
        if selection.spanning.len() + 1 == room_count {
            break;
        }
        let candidate = &candidates[i];
        if components.union(candidate.a, candidate.b) {
            selection.spanning.push(i);
        }
    }

    if selection.spanning.len() + 1 < room_count {
        let mut roots: Vec<usize> = (0..room_count).map(|r| components.find_root(r)).collect();
        roots.sort_unstable();
        roots.dedup();
        return Err(GenerationError::Disconnected { components: roots.len(), rooms: room_count });
    }

    let mut connected_pairs: Vec<(usize, usize)> = selection
        .spanning
        .iter()
        .map(|&i| ordered_pair(candidates[i].a, candidates[i].b))
        .collect();
    for &i in &order {
        if selection.loops.len() == extra_loops {
            break;
        }
        if selection.spanning.contains(&i) {
            continue;
        }
        let pair = ordered_pair(candidates[i].a, candidates[i].b);
        if connected_pairs.contains(&pair) {
            continue;
        }
        connected_pairs.push(pair);
        selection.loops.push(i);
    }

    Ok(selection)
}

fn ordered_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

// Vertical face: room_a left of room_b. The crossing row must lie inside
// room_a's rows and inside partition_b, so every carved tile falls in one
// of the two partitions.
fn carve_vertical(room_a: Rect, room_b: Rect, partition_b: Rect) -> Option<Vec<Pos>> {
    let band_low = room_a.y.max(partition_b.y);
    let band_high = room_a.bottom().min(partition_b.bottom());
    if band_low > band_high {
        return None;
    }

    let ay = (room_b.center().y as usize).clamp(band_low, band_high);
    let by = ay.clamp(room_b.y, room_b.bottom());

    let mut path = Vec::new();
    if ay == by {
        for x in room_a.right()..=room_b.x {
            path.push(Pos::new(ay as i32, x as i32));
        }
        return Some(path);
    }

    let bend_x = room_b.x - 1;
    for x in room_a.right()..=bend_x {
        path.push(Pos::new(ay as i32, x as i32));
    }
    path.extend(vertical_run(ay, by, bend_x));
    path.push(Pos::new(by as i32, room_b.x as i32));
    Some(path)
}

// Horizontal face: room_a above room_b. Mirror of the vertical carve.
fn carve_horizontal(room_a: Rect, room_b: Rect, partition_b: Rect) -> Option<Vec<Pos>> {
    let band_low = room_a.x.max(partition_b.x);
    let band_high = room_a.right().min(partition_b.right());
    if band_low > band_high {
        return None;
    }

    let ax = (room_b.center().x as usize).clamp(band_low, band_high);
    let bx = ax.clamp(room_b.x, room_b.right());

    let mut path = Vec::new();
    if ax == bx {
        for y in room_a.bottom()..=room_b.y {
            path.push(Pos::new(y as i32, ax as i32));
        }
        return Some(path);
    }

    let bend_y = room_b.y - 1;
    for y in room_a.bottom()..=bend_y {
        path.push(Pos::new(y as i32, ax as i32));
    }
    path.extend(horizontal_run(ax, bx, bend_y));
    path.push(Pos::new(room_b.y as i32, bx as i32));
    Some(path)
}

fn vertical_run(from_y: usize, to_y: usize, x: usize) -> Vec<Pos> {
    let mut run = Vec::new();
    if from_y < to_y {
        for y in (from_y + 1)..=to_y {
            run.push(Pos::new(y as i32, x as i32));
        }
    } else {
        for y in (to_y..from_y).rev() {
            run.push(Pos::new(y as i32, x as i32));
        }
    }
    run
}

fn horizontal_run(from_x: usize, to_x: usize, y: usize) -> Vec<Pos> {
    let mut run = Vec::new();
    if from_x < to_x {
        for x in (from_x + 1)..=to_x {
            run.push(Pos::new(y as i32, x as i32));
        }
    } else {
        for x in (to_x..from_x).rev() {
            run.push(Pos::new(y as i32, x as i32));
        }
    }
    run
}
