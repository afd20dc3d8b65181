//! Lava Run headless runner
//!
//! Usage: `lava-run [settings.json] [levels.json]`
//!
//! Parses each level and advances it at a fixed timestep with no player
//! input until it finishes or hits the tick cap, logging the outcome.
//! Set `RUST_LOG=debug` to see parsing and collection details.

use lava_run::consts::{MAX_TICKS, SIM_DT};
use lava_run::sim::{LevelParser, LevelStatus, tick};
use lava_run::{ConfigError, LevelPack, Settings};

fn main() {
    env_logger::init();
    log::info!("Lava Run (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ConfigError> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let pack = match args.next() {
        Some(path) => LevelPack::load(path)?,
        None => LevelPack::builtin(),
    };

    let parser = LevelParser::from_settings(&settings)?;
    log::info!("Running {} levels with seed {}", pack.len(), settings.seed);

    for (index, rows) in pack.iter().enumerate() {
        let mut level = parser.parse(rows);
        let mut ticks = 0;
        while !level.is_finished() && ticks < MAX_TICKS {
            tick(&mut level, SIM_DT);
            ticks += 1;
        }

        let seconds = ticks as f32 * SIM_DT;
        match level.status() {
            LevelStatus::InProgress => {
                log::warn!("Level {}: unfinished after {:.1}s", index + 1, seconds)
            }
            status => log::info!("Level {}: {:?} after {:.1}s", index + 1, status, seconds),
        }
    }

    Ok(())
}
