//! Host state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use skypatrol_core::commands::PlayerCommand;
use skypatrol_core::state::GameStateSnapshot;

/// Commands sent from the host API to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared host state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` so the state is `Sync`
/// - `Option` marks state that only exists once the loop is running
/// - the latest snapshot is `Arc`-shared with the game loop thread
#[derive(Default)]
pub struct HostState {
    /// Channel sender to forward commands to the game loop thread.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Handle of the running game loop thread.
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl HostState {
    pub fn new() -> Self {
        Self::default()
    }
}
