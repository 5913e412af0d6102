use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use csdefense_app::autoplay::AutoPlayer;
use csdefense_app::game_loop::spawn_game_loop;
use csdefense_app::state::LoopSettings;
use csdefense_core::config::GameConfig;
use csdefense_sim::SimulationEngine;

/// Run a tower-defense session driven by the seeded autoplayer.
#[derive(Debug, Parser)]
#[command(name = "csdefense", version)]
struct Args {
    /// JSON game config. Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Autoplayer seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many waves have completed.
    #[arg(long)]
    waves: Option<u32>,

    /// Simulation speed multiplier.
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Run as fast as possible instead of at the nominal tick rate.
    #[arg(long)]
    headless: bool,

    /// Stop after this many ticks.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log: String,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log)),
        )
        .init();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let mut engine = SimulationEngine::new(config).context("failed to build simulation")?;
    engine.set_speed_multiplier(args.speed);
    let player = AutoPlayer::new(args.seed, &engine);

    let settings = LoopSettings {
        paced: !args.headless,
        max_ticks: args.max_ticks,
        stop_after_wave: args.waves,
    };
    let handle = spawn_game_loop(engine, player, settings).context("failed to spawn game loop")?;

    if settings.paced {
        while !handle.is_finished() {
            std::thread::sleep(Duration::from_secs(1));
            if let Some(snapshot) = handle.latest_snapshot() {
                tracing::info!(
                    tick = snapshot.time.tick,
                    wave = snapshot.wave.number,
                    enemies = snapshot.enemies.len(),
                    towers = snapshot.towers.len(),
                    money = snapshot.money,
                    lives = snapshot.lives,
                    "progress"
                );
            }
        }
    }

    let summary = handle
        .join()
        .ok_or_else(|| anyhow!("game loop thread panicked"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{:?} after {} ticks ({:.1}s): {} waves, {} killed, {} leaked, money {}, lives {}",
            summary.stop_reason,
            summary.ticks,
            summary.sim_secs,
            summary.waves_completed,
            summary.enemies_killed,
            summary.enemies_leaked,
            summary.money,
            summary.lives,
        );
    }
    Ok(())
}
