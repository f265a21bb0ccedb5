//! Procedural level generation domain split into coherent submodules.

pub mod config;
pub mod model;
pub mod progression;

mod adjacency;
mod assign;
mod corridors;
mod generator;
mod geometry;
mod grid;
mod index;
mod partition;
mod rooms;
mod seed;
mod walls;

pub use generator::LevelGenerator;
pub use index::SpatialIndex;
pub use progression::{MAX_FLOORS, STARTING_FLOOR_INDEX};

use crate::types::GenerationError;
use config::GenerationConfig;
use model::Level;

pub fn generate_level(
    base_seed: u64,
    floor_index: u8,
    config: &GenerationConfig,
) -> Result<Level, GenerationError> {
    LevelGenerator::new(base_seed, config.clone())?.generate(floor_index)
}

#[cfg(test)]
mod tests {
    use super::config::GenerationConfig;
    use super::generator::LevelGenerator;

    #[test]
    fn generate_level_matches_level_generator_output() {
        let seed = 123_u64;
        let floor_index = 2_u8;
        let config = GenerationConfig::default();

        let from_helper = super::generate_level(seed, floor_index, &config).unwrap();
        let from_generator =
            LevelGenerator::new(seed, config).unwrap().generate(floor_index).unwrap();

        assert_eq!(from_helper.fingerprint(), from_generator.fingerprint());
    }
}
