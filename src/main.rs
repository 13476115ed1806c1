//! Agar Arena headless runner
//!
//! Runs a bot-only match at the fixed timestep and reports the leaderboard.

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use agar_arena::bots::{AggressiveShyBot, HungryBot, HungryShyBot, RandomBot};
use agar_arena::consts::SIM_DT;
use agar_arena::{Engine, EngineConfig};

/// Log the leaderboard this often (in ticks)
const REPORT_INTERVAL: u64 = 600;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    /// Number of bots, cycling through the reference policies
    #[arg(long, default_value_t = 8)]
    bots: usize,
    /// Overrides the config seed
    #[arg(long)]
    seed: Option<u64>,
    /// JSON engine config; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the final snapshot as JSON
    #[arg(long)]
    snapshot_out: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let seed = config.seed;
    let mut engine = Engine::new(config)?;
    for i in 0..cli.bots {
        let name = format!("bot{i}");
        match i % 4 {
            0 => engine.add_player::<HungryBot>(name),
            1 => engine.add_player::<HungryShyBot>(name),
            2 => engine.add_player::<AggressiveShyBot>(name),
            _ => engine.add_player_with(name, RandomBot::new(seed.wrapping_add(i as u64))),
        };
    }
    log::info!("Agar Arena (headless) starting: {} bots, {} ticks", cli.bots, cli.ticks);

    for _ in 0..cli.ticks {
        engine.tick(SIM_DT);

        let dead: Vec<_> = engine
            .players()
            .filter(|player| player.is_dead())
            .map(|player| player.id())
            .collect();
        for id in dead {
            engine.respawn(id)?;
        }

        if engine.ticks() % REPORT_INTERVAL == 0 {
            log::info!("Tick {} leaderboard:\n{}", engine.ticks(), engine.state());
        }
    }

    let snapshot = engine.snapshot();
    println!(
        "Final leaderboard after {} ticks ({} mass held by players):",
        snapshot.tick,
        snapshot.player_mass()
    );
    print!("{}", engine.state());

    if let Some(path) = &cli.snapshot_out {
        fs::write(path, snapshot.to_json()?)?;
        log::info!("Snapshot written to {}", path.display());
    }
    Ok(())
}
