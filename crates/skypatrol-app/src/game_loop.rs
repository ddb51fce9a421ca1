//! Fixed-rate game loop thread driving the simulation engine.
//!
//! The engine is created and owned by the loop thread.
//! Commands arrive via `mpsc` channel. The latest snapshot is stored in shared
//! state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skypatrol_core::config::SimConfig;
use skypatrol_core::constants::TICK_RATE;
use skypatrol_core::state::GameStateSnapshot;
use skypatrol_core::types::ObstacleSnapshot;
use skypatrol_sim::engine::SimulationEngine;

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the host API to use and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    obstacles: Vec<ObstacleSnapshot>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skypatrol-game-loop".into())
        .spawn(move || {
            let mut engine = SimulationEngine::new(config);
            engine.set_obstacles(obstacles);
            run_game_loop(&mut engine, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    engine: &mut SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut next_tick_time = Instant::now();
    log::debug!("game loop running at {TICK_RATE} Hz");

    loop {
        // 1. Drain all pending commands
        if !drain_commands(engine, &cmd_rx) {
            log::debug!("game loop stopping at tick {}", engine.time().tick);
            return;
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Store latest snapshot for synchronous polling
        publish_snapshot(latest_snapshot, snapshot);

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, resync instead of bursting ticks
            log::warn!("game loop fell behind by {:?}", now - next_tick_time);
            next_tick_time = now;
        }
    }
}

/// Replace the published snapshot. A poisoned lock is recovered so pollers
/// keep seeing fresh state.
fn publish_snapshot(latest_snapshot: &Mutex<Option<GameStateSnapshot>>, snapshot: GameStateSnapshot) {
    let mut lock = latest_snapshot.lock().unwrap_or_else(|poisoned| {
        log::warn!("snapshot lock poisoned, recovering");
        latest_snapshot.clear_poison();
        poisoned.into_inner()
    });
    *lock = Some(snapshot);
}

/// Forward every pending command to the engine. Returns `false` once the loop
/// should stop.
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                engine.queue_command(cmd);
            }
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skypatrol_core::commands::PlayerCommand;
    use skypatrol_core::enums::GamePhase;

    #[test]
    fn test_drain_stops_on_shutdown() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Start))
            .unwrap();
        assert!(drain_commands(&mut engine, &rx));
        assert_eq!(engine.tick().phase, GamePhase::Active);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&mut engine, &rx));

        drop(tx);
        assert!(!drain_commands(&mut engine, &rx));
    }

    #[test]
    fn test_publish_recovers_poisoned_lock() {
        let latest = Arc::new(Mutex::new(None));
        let poisoner = latest.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the snapshot lock");
        })
        .join();
        assert!(latest.is_poisoned());

        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::Start);
        engine.tick();
        publish_snapshot(&latest, engine.tick());

        assert!(!latest.is_poisoned());
        let snap = latest.lock().unwrap().clone().expect("snapshot published");
        assert_eq!(snap.time.tick, 2);
    }

    #[test]
    fn test_loop_publishes_snapshots_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) =
            spawn_game_loop(SimConfig::default(), Vec::new(), latest.clone()).unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Start))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let ticked = latest
                .lock()
                .unwrap()
                .as_ref()
                .map(|s: &GameStateSnapshot| s.time.tick > 2)
                .unwrap_or(false);
            if ticked || Instant::now() > deadline {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let snap = latest.lock().unwrap().clone().expect("snapshot published");
        assert_eq!(snap.phase, GamePhase::Active);
        assert!(snap.time.tick > 2);
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::Start);
        for _ in 0..50 {
            engine.queue_command(PlayerCommand::Fire);
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
