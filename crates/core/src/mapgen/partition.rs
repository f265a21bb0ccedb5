//! Binary space partitioning of the level rectangle into an arena-backed
//! tree of sub-rectangles.

use crate::types::{GenerationError, Rect};

use super::config::GenerationConfig;
use super::seed;

/// When one dimension exceeds the other by this factor the longer axis is
/// always split; near-square partitions pick an axis at random.
const ASPECT_SPLIT_THRESHOLD: f32 = 1.25;

const SPLIT_STREAM_BASE: u64 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Partition {
    pub bounds: Rect,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub parent: Option<usize>,
}

impl Partition {
    fn leaf(bounds: Rect, parent: Option<usize>) -> Self {
        Self { bounds, left: None, right: None, parent }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Arena of partition nodes; children hold parent back-links as indices.
#[derive(Clone, Debug)]
pub(super) struct PartitionTree {
    nodes: Vec<Partition>,
}

impl PartitionTree {
    /// Splits `bounds` recursively until no node can be divided while
    /// keeping both children at `min_partition_size` or larger.
    pub fn build(
        level_seed: u64,
        bounds: Rect,
        config: &GenerationConfig,
    ) -> Result<PartitionTree, GenerationError> {
        let min = config.min_partition_size;
        if bounds.width < min || bounds.height < min {
            return Err(GenerationError::Config {
                reason: format!(
                    "partition area {}x{} below minimum partition size {}",
                    bounds.width, bounds.height, min
                ),
            });
        }

        let mut tree = PartitionTree { nodes: vec![Partition::leaf(bounds, None)] };
        let mut pending = vec![0_usize];
        while let Some(node_id) = pending.pop() {
            if let Some((left, right)) = tree.try_split(level_seed, node_id, config) {
                pending.push(right);
                pending.push(left);
            }
        }
        Ok(tree)
    }

    pub fn node(&self, node_id: usize) -> &Partition {
        &self.nodes[node_id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Leaf ids in depth-first preorder, left child first. Stable for a
    /// given seed and config.
    pub fn leaves(&self) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![0_usize];
        while let Some(node_id) = stack.pop() {
            let node = &self.nodes[node_id];
            match (node.left, node.right) {
                (Some(left), Some(right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                _ => leaves.push(node_id),
            }
        }
        leaves
    }

    fn try_split(
        &mut self,
        level_seed: u64,
        node_id: usize,
        config: &GenerationConfig,
    ) -> Option<(usize, usize)> {
        let bounds = self.nodes[node_id].bounds;
        let min = config.min_partition_size;
        let can_split_horizontally = bounds.width >= min * 2;
        let can_split_vertically = bounds.height >= min * 2;

        let split_vertical = match (can_split_horizontally, can_split_vertically) {
            (false, false) => return None,
            (true, false) => false,
            (false, true) => true,
            (true, true) => {
                let width = bounds.width as f32;
                let height = bounds.height as f32;
                if width >= height * ASPECT_SPLIT_THRESHOLD {
                    false
                } else if height >= width * ASPECT_SPLIT_THRESHOLD {
                    true
                } else {
                    seed::random_bool(level_seed, SPLIT_STREAM_BASE + node_id as u64 * 2)
                }
            }
        };

        let axis_extent = if split_vertical { bounds.height } else { bounds.width };
        let offset = split_offset(level_seed, node_id, axis_extent, config);

        let (left_bounds, right_bounds) = if split_vertical {
            (
                Rect::new(bounds.x, bounds.y, bounds.width, offset),
                Rect::new(bounds.x, bounds.y + offset, bounds.width, bounds.height - offset),
            )
        } else {
            (
                Rect::new(bounds.x, bounds.y, offset, bounds.height),
                Rect::new(bounds.x + offset, bounds.y, bounds.width - offset, bounds.height),
            )
        };

        let left_id = self.nodes.len();
        self.nodes.push(Partition::leaf(left_bounds, Some(node_id)));
        let right_id = self.nodes.len();
        self.nodes.push(Partition::leaf(right_bounds, Some(node_id)));
        self.nodes[node_id].left = Some(left_id);
        self.nodes[node_id].right = Some(right_id);
        Some((left_id, right_id))
    }
}

/// Split offset along the chosen axis, drawn inside the configured ratio
/// band but clamped so both children keep the minimum extent.
fn split_offset(
    level_seed: u64,
    node_id: usize,
    axis_extent: usize,
    config: &GenerationConfig,
) -> usize {
    let min = config.min_partition_size;
    let ratio_low = (axis_extent as f32 * config.split_ratio_min).ceil() as usize;
    let ratio_high = (axis_extent as f32 * config.split_ratio_max).floor() as usize;
    let low = ratio_low.max(min);
    let high = ratio_high.min(axis_extent - min);
    let (low, high) = if low <= high { (low, high) } else { (min, axis_extent - min) };
    seed::random_usize(level_seed, SPLIT_STREAM_BASE + node_id as u64 * 2 + 1, low, high)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GenerationConfig {
        GenerationConfig::default()
    }

    #[test]
    fn build_rejects_area_below_minimum_partition() {
        let result = PartitionTree::build(1, Rect::new(1, 1, 5, 40), &config());
        assert!(matches!(result, Err(GenerationError::Config { .. })));
    }

    #[test]
    fn all_leaves_meet_the_minimum_size() {
        let tree = PartitionTree::build(42, Rect::new(1, 1, 62, 46), &config()).unwrap();
        for leaf_id in tree.leaves() {
            let bounds = tree.node(leaf_id).bounds;
            assert!(bounds.width >= config().min_partition_size);
            assert!(bounds.height >= config().min_partition_size);
        }
    }

    #[test]
    fn leaves_tile_the_root_rectangle_exactly() {
        let root = Rect::new(1, 1, 62, 46);
        let tree = PartitionTree::build(7, root, &config()).unwrap();
        let leaves = tree.leaves();

        let total_area: usize =
            leaves.iter().map(|&leaf_id| tree.node(leaf_id).bounds.area()).sum();
        assert_eq!(total_area, root.area());

        for (i, &a) in leaves.iter().enumerate() {
            for &b in &leaves[i + 1..] {
                assert!(!tree.node(a).bounds.intersects(&tree.node(b).bounds));
            }
        }
    }

    #[test]
    fn no_splittable_leaf_remains() {
        let tree = PartitionTree::build(9, Rect::new(1, 1, 62, 46), &config()).unwrap();
        let min = config().min_partition_size;
        for leaf_id in tree.leaves() {
            let bounds = tree.node(leaf_id).bounds;
            assert!(bounds.width < min * 2 && bounds.height < min * 2);
        }
    }

    #[test]
    fn termination_on_small_grid_with_small_partitions() {
        let small = GenerationConfig {
            width: 20,
            height: 20,
            min_partition_size: 5,
            min_room_size: 3,
            ..GenerationConfig::default()
        };
        let tree = PartitionTree::build(3, Rect::new(1, 1, 18, 18), &small).unwrap();
        assert!(!tree.leaves().is_empty());
        for leaf_id in tree.leaves() {
            let bounds = tree.node(leaf_id).bounds;
            assert!(bounds.width >= 5 && bounds.height >= 5);
        }
    }

    #[test]
    fn children_keep_parent_back_links() {
        let tree = PartitionTree::build(11, Rect::new(1, 1, 62, 46), &config()).unwrap();
        for node_id in 0..tree.len() {
            let node = tree.node(node_id);
            if let (Some(left), Some(right)) = (node.left, node.right) {
                assert_eq!(tree.node(left).parent, Some(node_id));
                assert_eq!(tree.node(right).parent, Some(node_id));
            }
        }
    }

    #[test]
    fn same_seed_builds_the_same_tree() {
        let a = PartitionTree::build(77, Rect::new(1, 1, 62, 46), &config()).unwrap();
        let b = PartitionTree::build(77, Rect::new(1, 1, 62, 46), &config()).unwrap();
        assert_eq!(a.len(), b.len());
        for node_id in 0..a.len() {
            assert_eq!(a.node(node_id), b.node(node_id));
        }
    }
}
