//! Host API used by front ends (and the CLI) to drive a running simulation.
//!
//! These functions bridge caller requests to the game loop thread via channels.

use skypatrol_core::commands::PlayerCommand;
use skypatrol_core::config::SimConfig;
use skypatrol_core::state::GameStateSnapshot;
use skypatrol_core::types::ObstacleSnapshot;

use crate::game_loop;
use crate::state::{GameLoopCommand, HostState};

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop is no longer receiving commands")]
    ChannelClosed,
    #[error("host state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("game loop thread panicked")]
    LoopPanicked,
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(
    state: &HostState,
    config: SimConfig,
    obstacles: Vec<ObstacleSnapshot>,
) -> Result<(), HostError> {
    let mut tx_lock = state.command_tx.lock().map_err(|_| HostError::Poisoned)?;
    if tx_lock.is_some() {
        return Err(HostError::AlreadyRunning);
    }

    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(config, obstacles, state.latest_snapshot.clone())?;

    *tx_lock = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|_| HostError::Poisoned)? = Some(handle);
    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &HostState, command: PlayerCommand) -> Result<(), HostError> {
    let tx_lock = state.command_tx.lock().map_err(|_| HostError::Poisoned)?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|_| HostError::ChannelClosed),
        None => Err(HostError::NotStarted),
    }
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &HostState) -> Result<Option<GameStateSnapshot>, HostError> {
    let lock = state.latest_snapshot.lock().map_err(|_| HostError::Poisoned)?;
    Ok(lock.clone())
}

/// Ask the game loop to stop and wait for it to finish.
pub fn stop_simulation(state: &HostState) -> Result<(), HostError> {
    let tx = state
        .command_tx
        .lock()
        .map_err(|_| HostError::Poisoned)?
        .take()
        .ok_or(HostError::NotStarted)?;
    // The loop may already have exited; joining below still succeeds.
    let _ = tx.send(GameLoopCommand::Shutdown);

    let handle = state
        .loop_handle
        .lock()
        .map_err(|_| HostError::Poisoned)?
        .take();
    if let Some(handle) = handle {
        handle.join().map_err(|_| HostError::LoopPanicked)?;
    }
    Ok(())
}
