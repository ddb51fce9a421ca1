use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skypatrol_app::city::{generate_city, CityLayout};
use skypatrol_app::game_loop::TICK_DURATION;
use skypatrol_app::state::HostState;
use skypatrol_app::{host, logging};
use skypatrol_core::commands::PlayerCommand;
use skypatrol_core::config::SimConfig;
use skypatrol_core::state::GameStateSnapshot;
use skypatrol_core::types::ObstacleSnapshot;
use skypatrol_sim::SimulationEngine;

/// Headless SkyPatrol flight simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// JSON file with configuration overrides
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run on the game loop thread at wall-clock speed
    #[arg(long)]
    realtime: bool,
    /// Log a summary every N ticks (0 disables)
    #[arg(long, default_value_t = 60)]
    snapshot_every: u64,
    /// Start with the autopilot disengaged
    #[arg(long)]
    no_autopilot: bool,
    /// Fire every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    fire_every: u64,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.no_autopilot {
        config.autopilot = false;
    }
    config.validate().context("invalid configuration")?;

    let mut city_rng = ChaCha8Rng::seed_from_u64(config.seed);
    let obstacles = generate_city(&mut city_rng, &CityLayout::default());
    log::info!("generated city with {} buildings", obstacles.len());

    let snapshot = if args.realtime {
        run_realtime(config, obstacles, &args)?
    } else {
        run_batch(config, obstacles, &args)
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("serializing final snapshot")?
    );
    Ok(())
}

/// Tick the engine on this thread as fast as possible.
fn run_batch(config: SimConfig, obstacles: Vec<ObstacleSnapshot>, args: &Args) -> GameStateSnapshot {
    let mut engine = SimulationEngine::new(config);
    engine.set_obstacles(obstacles);
    engine.queue_command(PlayerCommand::Start);
    let mut snapshot = engine.advance(0.0);

    for tick in 1..=args.ticks {
        if is_due(tick, args.fire_every) {
            engine.queue_command(PlayerCommand::Fire);
        }
        snapshot = engine.tick();
        if is_due(tick, args.snapshot_every) {
            log_summary(&snapshot);
        }
    }
    snapshot
}

/// Drive the game loop thread through the host API at wall-clock speed.
fn run_realtime(
    config: SimConfig,
    obstacles: Vec<ObstacleSnapshot>,
    args: &Args,
) -> Result<GameStateSnapshot> {
    let state = HostState::new();
    host::start_simulation(&state, config, obstacles)?;
    host::send_command(&state, PlayerCommand::Start)?;

    for tick in 1..=args.ticks {
        thread::sleep(TICK_DURATION);
        if is_due(tick, args.fire_every) {
            host::send_command(&state, PlayerCommand::Fire)?;
        }
        if is_due(tick, args.snapshot_every) {
            if let Some(snapshot) = host::get_snapshot(&state)? {
                log_summary(&snapshot);
            }
        }
    }

    host::stop_simulation(&state)?;
    host::get_snapshot(&state)?.context("game loop produced no snapshot")
}

fn is_due(tick: u64, every: u64) -> bool {
    every > 0 && tick % every == 0
}

fn log_summary(snapshot: &GameStateSnapshot) {
    let player = &snapshot.player;
    let p = player.pose.position;
    log::info!(
        "t={:.1}s tick {} player ({:.1}, {:.1}, {:.1}) speed {:.2} {:?}, hits {}/{} shots, {} live projectiles",
        snapshot.time.elapsed_secs,
        snapshot.time.tick,
        p.x,
        p.y,
        p.z,
        player.speed,
        player.speed_band,
        snapshot.score.agents_hit,
        snapshot.score.shots_fired,
        snapshot.projectiles.len(),
    );
}
