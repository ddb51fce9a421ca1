//! Events emitted by the simulation for renderer and UI feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::CameraMode;

/// One-shot notifications drained into the snapshot of the tick that raised them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A projectile left the muzzle.
    ProjectileFired { position: DVec3 },
    /// A projectile struck an agent. Renderers spawn the explosion here.
    AgentDestroyed { agent_id: u32, position: DVec3 },
    /// A struck agent reappeared elsewhere.
    AgentRelocated { agent_id: u32, position: DVec3 },
    CameraModeChanged { mode: CameraMode },
}
