use std::collections::{BTreeSet, VecDeque};

use anyhow::Result;
use clap::Parser;
use delve_core::mapgen::{MAX_FLOORS, STARTING_FLOOR_INDEX};
use delve_core::{GenerationConfig, Level, LevelGenerator, Pos, RoomType};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the sweep RNG that draws base seeds
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of base seeds to sweep
    #[arg(short, long, default_value_t = 100)]
    count: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Sweeping {} base seeds drawn from RNG seed {}...", args.count, args.seed);
    let config = GenerationConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for checked in 0..args.count {
        let base_seed = rng.next_u64();
        let generator = LevelGenerator::new(base_seed, config.clone())?;

        for floor_index in STARTING_FLOOR_INDEX..=MAX_FLOORS {
            let level = generator.generate(floor_index)?;
            check_level(&level, base_seed, floor_index);

            let regenerated = generator.generate(floor_index)?;
            assert_eq!(
                level.fingerprint(),
                regenerated.fingerprint(),
                "Invariant failed: regeneration diverged for seed {base_seed} floor {floor_index}"
            );
        }

        if (checked + 1) % 10 == 0 {
            println!("checked {} seeds", checked + 1);
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}

fn check_level(level: &Level, base_seed: u64, floor_index: u8) {
    assert!(
        all_floor_tiles_connected(level),
        "Invariant failed: disconnected walkable area for seed {base_seed} floor {floor_index}"
    );

    let count = |t: RoomType| level.rooms().filter(|r| r.room_type == t).count();
    assert_eq!(
        count(RoomType::Entrance),
        1,
        "Invariant failed: entrance count for seed {base_seed} floor {floor_index}"
    );
    assert_eq!(
        count(RoomType::Exit),
        1,
        "Invariant failed: exit count for seed {base_seed} floor {floor_index}"
    );

    let loops = level.corridors().filter(|c| c.is_loop).count();
    assert_eq!(
        level.corridor_count() - loops,
        level.room_count() - 1,
        "Invariant failed: spanning corridor count for seed {base_seed} floor {floor_index}"
    );

    for pos in level.floor_tiles() {
        let in_room = level.room_at(*pos).is_some();
        let in_corridor = level.corridor_at(*pos).is_some();
        assert!(
            in_room ^ in_corridor,
            "Invariant failed: tile {pos:?} ownership for seed {base_seed} floor {floor_index}"
        );
    }

    for corridor in level.corridors() {
        let start = level.room(corridor.start_room).expect("corridor references a live room");
        let end = level.room(corridor.end_room).expect("corridor references a live room");
        let last = *corridor.path.last().expect("corridor path is never empty");
        assert!(
            start.bounds.contains(corridor.path[0]),
            "Invariant failed: corridor start for seed {base_seed} floor {floor_index}"
        );
        assert!(
            end.bounds.contains(last),
            "Invariant failed: corridor end for seed {base_seed} floor {floor_index}"
        );
    }

    assert_eq!(
        level.wall_types().len(),
        level.wall_tiles().len() + level.door_tiles().len(),
        "Invariant failed: wall classification coverage for seed {base_seed} floor {floor_index}"
    );
}

fn all_floor_tiles_connected(level: &Level) -> bool {
    let floor = level.floor_tiles();
    let Some(&start) = floor.iter().next() else {
        return true;
    };
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for next in [
            Pos::new(pos.y - 1, pos.x),
            Pos::new(pos.y + 1, pos.x),
            Pos::new(pos.y, pos.x - 1),
            Pos::new(pos.y, pos.x + 1),
        ] {
            if floor.contains(&next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len() == floor.len()
}
