//! Tunable generation parameters with validation and clamping.

use serde::{Deserialize, Serialize};

use crate::types::GenerationError;

/// Knobs controlling partitioning, room carving, and room-type quotas.
///
/// Deserializable from JSON with every field optional; missing fields take
/// the defaults below. Call [`GenerationConfig::validated`] before handing a
/// config to the generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Total grid width in tiles.
    pub width: usize,
    /// Total grid height in tiles.
    pub height: usize,
    /// Partitions are never split below this extent on either axis.
    pub min_partition_size: usize,
    /// Lower bound on the split position as a fraction of the split axis.
    pub split_ratio_min: f32,
    /// Upper bound on the split position as a fraction of the split axis.
    pub split_ratio_max: f32,
    /// Smallest gap left between a room edge and its partition edge.
    pub room_inset_min: usize,
    /// Largest gap left between a room edge and its partition edge.
    pub room_inset_max: usize,
    /// Rooms never shrink below this extent on either axis.
    pub min_room_size: usize,
    pub shop_rooms_per_floor: usize,
    pub treasure_rooms_per_floor: usize,
    pub boss_rooms_per_floor: usize,
    /// Chance (0..=100) that an untyped room becomes a combat room.
    pub combat_room_percent: u8,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            min_partition_size: 8,
            split_ratio_min: 0.35,
            split_ratio_max: 0.65,
            room_inset_min: 1,
            room_inset_max: 2,
            min_room_size: 4,
            shop_rooms_per_floor: 1,
            treasure_rooms_per_floor: 1,
            boss_rooms_per_floor: 1,
            combat_room_percent: 70,
        }
    }
}

impl GenerationConfig {
    /// Returns a config with out-of-range knobs clamped into their working
    /// ranges, or an error when the grid cannot hold a single partition.
    pub fn validated(&self) -> Result<GenerationConfig, GenerationError> {
        let mut config = self.clone();

        if config.min_room_size == 0 {
            log::warn!("min_room_size 0 raised to 1");
            config.min_room_size = 1;
        }
        // A minimum-size room centered in a minimum-size partition must
        // keep at least one tile of margin on every side.
        if config.min_partition_size < config.min_room_size + 2 {
            log::warn!(
                "min_partition_size {} raised to {} (min_room_size {} plus margins)",
                config.min_partition_size,
                config.min_room_size + 2,
                config.min_room_size
            );
            config.min_partition_size = config.min_room_size + 2;
        }
        if config.split_ratio_min > config.split_ratio_max {
            log::warn!(
                "split ratio bounds swapped: {} > {}",
                config.split_ratio_min,
                config.split_ratio_max
            );
            std::mem::swap(&mut config.split_ratio_min, &mut config.split_ratio_max);
        }
        if config.split_ratio_min < 0.05 || config.split_ratio_max > 0.95 {
            log::warn!(
                "split ratios [{}, {}] clamped to [0.05, 0.95]",
                config.split_ratio_min,
                config.split_ratio_max
            );
            config.split_ratio_min = config.split_ratio_min.max(0.05);
            config.split_ratio_max = config.split_ratio_max.min(0.95);
        }
        // Rooms must stay strictly inside their partitions so corridor
        // margins exist on every side.
        if config.room_inset_min == 0 {
            log::warn!("room_inset_min 0 raised to 1");
            config.room_inset_min = 1;
        }
        if config.room_inset_max == 0 {
            log::warn!("room_inset_max 0 raised to 1");
            config.room_inset_max = 1;
        }
        if config.room_inset_min > config.room_inset_max {
            log::warn!(
                "room inset bounds swapped: {} > {}",
                config.room_inset_min,
                config.room_inset_max
            );
            std::mem::swap(&mut config.room_inset_min, &mut config.room_inset_max);
        }
        if config.combat_room_percent > 100 {
            log::warn!("combat_room_percent {} clamped to 100", config.combat_room_percent);
            config.combat_room_percent = 100;
        }

        // One tile of outer border on every side must survive around the
        // root partition.
        let needed = config.min_partition_size + 2;
        if config.width < needed || config.height < needed {
            return Err(GenerationError::Config {
                reason: format!(
                    "grid {}x{} cannot hold a {}-tile partition with a border",
                    config.width, config.height, config.min_partition_size
                ),
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation_unchanged() {
        let config = GenerationConfig::default();
        let validated = config.validated().unwrap();
        assert_eq!(config, validated);
    }

    #[test]
    fn swapped_ratio_bounds_are_reordered() {
        let config =
            GenerationConfig { split_ratio_min: 0.7, split_ratio_max: 0.3, ..Default::default() };
        let validated = config.validated().unwrap();
        assert_eq!(validated.split_ratio_min, 0.3);
        assert_eq!(validated.split_ratio_max, 0.7);
    }

    #[test]
    fn extreme_ratios_are_clamped() {
        let config =
            GenerationConfig { split_ratio_min: 0.0, split_ratio_max: 1.0, ..Default::default() };
        let validated = config.validated().unwrap();
        assert_eq!(validated.split_ratio_min, 0.05);
        assert_eq!(validated.split_ratio_max, 0.95);
    }

    #[test]
    fn grid_too_small_for_one_partition_is_rejected() {
        let config = GenerationConfig {
            width: 6,
            height: 40,
            min_partition_size: 8,
            ..Default::default()
        };
        assert!(config.validated().is_err());
    }

    #[test]
    fn partition_floor_keeps_room_margin() {
        let config = GenerationConfig {
            min_partition_size: 2,
            min_room_size: 4,
            ..Default::default()
        };
        let validated = config.validated().unwrap();
        assert_eq!(validated.min_partition_size, 6);
    }

    #[test]
    fn zero_insets_are_raised_to_one() {
        let config = GenerationConfig {
            room_inset_min: 0,
            room_inset_max: 0,
            ..Default::default()
        };
        let validated = config.validated().unwrap();
        assert_eq!(validated.room_inset_min, 1);
        assert_eq!(validated.room_inset_max, 1);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{"width": 80, "boss_rooms_per_floor": 2}"#).unwrap();
        assert_eq!(config.width, 80);
        assert_eq!(config.boss_rooms_per_floor, 2);
        assert_eq!(config.height, GenerationConfig::default().height);
        assert_eq!(config.combat_room_percent, 70);
    }
}
