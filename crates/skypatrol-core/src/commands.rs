//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary. Setters are
//! latest-value-wins; out-of-range values are clamped, never rejected.

use serde::{Deserialize, Serialize};

use crate::enums::CameraMode;
use crate::types::InputSnapshot;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Flight ---
    /// Throttle target, clamped to [0, 1].
    SetThrottle { amount: f64 },
    /// Autopilot pitch contribution, clamped to [-1, 1].
    SetAutoPitch { amount: f64 },
    /// Autopilot bank contribution, clamped to [-1, 1].
    SetAutoBanking { amount: f64 },
    /// Latest key-state sample.
    SetInput { input: InputSnapshot },
    /// Engage or disengage the city-circling autopilot.
    SetAutopilot { enabled: bool },

    // --- Weapons ---
    /// Fire one projectile from the nose (subject to cooldown).
    Fire,

    // --- Camera ---
    ToggleCameraMode,
    SetCameraMode { mode: CameraMode },

    // --- Simulation control ---
    Start,
    Pause,
    Resume,
}
