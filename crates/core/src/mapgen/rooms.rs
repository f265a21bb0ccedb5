//! Room carving: one room per leaf partition, inset from the partition
//! edges.

use crate::types::Rect;

use super::config::GenerationConfig;
use super::seed;

const INSET_STREAM_BASE: u64 = 2_000;

/// Carves a room inside each leaf partition. Each side gets its own inset
/// draw; a leaf too small for the drawn insets falls back to a
/// minimum-size room centered in the partition.
pub(super) fn carve_rooms(
    level_seed: u64,
    leaf_bounds: &[Rect],
    config: &GenerationConfig,
) -> Vec<Rect> {
    leaf_bounds
        .iter()
        .enumerate()
        .map(|(i, &bounds)| carve_room(level_seed, i, bounds, config))
        .collect()
}

fn carve_room(level_seed: u64, leaf_index: usize, bounds: Rect, config: &GenerationConfig) -> Rect {
    let stream = INSET_STREAM_BASE + leaf_index as u64 * 4;
    let inset_left = inset_draw(level_seed, stream, config);
    let inset_right = inset_draw(level_seed, stream + 1, config);
    let inset_top = inset_draw(level_seed, stream + 2, config);
    let inset_bottom = inset_draw(level_seed, stream + 3, config);

    let min = config.min_room_size;
    let width_after = bounds.width.saturating_sub(inset_left + inset_right);
    let height_after = bounds.height.saturating_sub(inset_top + inset_bottom);

    if width_after < min || height_after < min {
        return centered_minimum_room(bounds, min);
    }

    Rect::new(bounds.x + inset_left, bounds.y + inset_top, width_after, height_after)
}

fn inset_draw(level_seed: u64, stream: u64, config: &GenerationConfig) -> usize {
    seed::random_usize(level_seed, stream, config.room_inset_min, config.room_inset_max)
}

fn centered_minimum_room(bounds: Rect, min: usize) -> Rect {
    let width = min.min(bounds.width);
    let height = min.min(bounds.height);
    Rect::new(
        bounds.x + (bounds.width - width) / 2,
        bounds.y + (bounds.height - height) / 2,
        width,
        height,
    )
}
