//! Game state snapshot: the complete visible state handed to the renderer each tick.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{ControlInput, Pose, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub agents: Vec<AgentView>,
    pub projectiles: Vec<ProjectileView>,
    pub camera: CameraView,
    pub score: ScoreView,
    pub events: Vec<GameEvent>,
}

/// Player craft status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub pose: Pose,
    /// Units per tick.
    pub speed: f64,
    /// Speed mapped onto [0, 1] between min and max speed.
    pub speed_normalized: f64,
    pub speed_band: SpeedBand,
    pub throttle: f64,
    pub auto_pitch: f64,
    pub auto_bank: f64,
    pub controls: ControlInput,
    pub autopilot: bool,
    pub propeller_angle: f64,
}

/// One agent as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentView {
    pub id: u32,
    pub pose: Pose,
    pub behavior: BehaviorState,
    pub pattern: PatrolPattern,
    pub patrol_angle: f64,
}

/// One live projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: DVec3,
    pub direction: DVec3,
    pub lifetime_secs: f64,
}

/// Camera viewpoint for this tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraView {
    pub mode: CameraMode,
    pub position: DVec3,
    pub look_at: DVec3,
    /// Derived each tick from position and look-at.
    pub orientation: DQuat,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            mode: CameraMode::default(),
            position: DVec3::ZERO,
            look_at: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }
}

/// Running score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub agents_hit: u32,
    pub shots_fired: u32,
    pub mission_time_secs: f64,
}
