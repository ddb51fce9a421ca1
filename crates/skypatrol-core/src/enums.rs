//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::{SPEED_BAND_HIGH, SPEED_BAND_LOW};

/// Deterministic path an agent follows when nothing needs avoiding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatrolPattern {
    #[default]
    Circle,
    /// Lemniscate-like loop through the patrol centre.
    Figure8,
}

/// Which branch of the agent state machine ran this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorState {
    #[default]
    Patrolling,
    /// Fleeing the player craft; takes priority over everything else.
    AvoidingPlayer,
    /// Pushing away from obstacles or correcting altitude.
    AvoidingObstacle,
}

/// Camera rig viewpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    /// Chase position behind and above the craft.
    #[default]
    Follow,
    /// Circle the craft from above.
    Orbit,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Follow => CameraMode::Orbit,
            CameraMode::Orbit => CameraMode::Follow,
        }
    }
}

/// Time source for the cosmetic agent hover bob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverClock {
    /// Accumulated simulation seconds. Deterministic.
    #[default]
    Simulation,
    /// Seconds since the engine was created.
    Wall,
}

/// Coarse speed reading for HUD colouring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedBand {
    Low,
    #[default]
    Medium,
    High,
}

impl SpeedBand {
    /// Classify a speed already normalized to [0, 1].
    pub fn from_normalized(normalized: f64) -> Self {
        if normalized < SPEED_BAND_LOW {
            SpeedBand::Low
        } else if normalized > SPEED_BAND_HIGH {
            SpeedBand::High
        } else {
            SpeedBand::Medium
        }
    }
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// World spawned, waiting for `Start`.
    #[default]
    Ready,
    Active,
    Paused,
}
