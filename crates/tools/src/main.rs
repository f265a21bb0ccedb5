use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use delve_core::{GenerationConfig, Level, LevelGenerator, Pos, TileKind};
use serde::Serialize;

/// Generate one floor and print it as ASCII art or a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base seed for the run
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Floor to generate
    #[arg(short, long, default_value_t = 1)]
    floor: u8,
    /// Path to a JSON generation config; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Emit a JSON summary instead of the rendering and room table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct LevelSummary {
    base_seed: u64,
    floor_index: u8,
    level_seed: u64,
    fingerprint: String,
    room_count: usize,
    corridor_count: usize,
    loop_corridors: usize,
    rooms: Vec<RoomSummary>,
}

#[derive(Serialize)]
struct RoomSummary {
    index: usize,
    room_type: String,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    corridor_neighbors: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let level = LevelGenerator::new(args.seed, config)?
        .generate(args.floor)
        .with_context(|| format!("failed to generate floor {}", args.floor))?;

    if args.json {
        let summary = summarize(&level, args.seed);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print!("{}", render_ascii(&level));
    println!();
    let loops = level.corridors().filter(|c| c.is_loop).count();
    println!(
        "floor {} of seed {}: {} rooms, {} corridors ({} loops)",
        args.floor,
        args.seed,
        level.room_count(),
        level.corridor_count(),
        loops
    );
    println!("fingerprint: {:016x}", level.fingerprint());
    println!();
    println!("{:>4}  {:<9} {:>7}  {}", "room", "type", "size", "at");
    for room in level.rooms() {
        println!(
            "{:>4}  {:<9} {:>3}x{:<3}  ({}, {})",
            room.index,
            format!("{:?}", room.room_type),
            room.bounds.width,
            room.bounds.height,
            room.bounds.x,
            room.bounds.y
        );
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GenerationConfig> {
    let Some(path) = path else {
        return Ok(GenerationConfig::default());
    };
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    serde_json::from_str(&data).context("failed to deserialize config JSON")
}

fn render_ascii(level: &Level) -> String {
    let bounds = level.bounds();
    let mut out = String::with_capacity((bounds.width + 1) * bounds.height);
    for y in 0..bounds.height {
        for x in 0..bounds.width {
            out.push(match level.tile_at(Pos::new(y as i32, x as i32)) {
                TileKind::Wall => '#',
                TileKind::Floor => '.',
                TileKind::Door => '+',
            });
        }
        out.push('\n');
    }
    out
}

fn summarize(level: &Level, base_seed: u64) -> LevelSummary {
    LevelSummary {
        base_seed,
        floor_index: level.floor_index(),
        level_seed: level.seed(),
        fingerprint: format!("{:016x}", level.fingerprint()),
        room_count: level.room_count(),
        corridor_count: level.corridor_count(),
        loop_corridors: level.corridors().filter(|c| c.is_loop).count(),
        rooms: level
            .rooms()
            .map(|room| RoomSummary {
                index: room.index,
                room_type: format!("{:?}", room.room_type),
                x: room.bounds.x,
                y: room.bounds.y,
                width: room.bounds.width,
                height: room.bounds.height,
                corridor_neighbors: level.neighbors(room.id).len(),
            })
            .collect(),
    }
}
