pub mod mapgen;
pub mod types;

pub use mapgen::config::GenerationConfig;
pub use mapgen::model::{Corridor, Level, Room};
pub use mapgen::{LevelGenerator, generate_level};
pub use types::*;
