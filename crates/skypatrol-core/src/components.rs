//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior.
//! Game logic lives in systems and the agent-ai crate, not components.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::{BehaviorState, PatrolPattern};

/// Marks the player-controlled craft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks an autonomous patrolling agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Stable identifier, survives relocation.
    pub id: u32,
}

/// Per-agent behavior record.
///
/// `avoidance_vector`, `target_position` and `target_rotation` are transient:
/// recomputed every tick by whichever branch ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// Radians, increases monotonically while patrolling.
    pub patrol_angle: f64,
    /// Radians per second.
    pub patrol_speed: f64,
    pub patrol_height: f64,
    pub patrol_radius: f64,
    /// Ground-plane centre of the patrol path (y ignored).
    pub patrol_center: DVec3,
    pub patrol_pattern: PatrolPattern,
    /// Hover-oscillation offset (radians).
    pub phase: f64,
    pub behavior: BehaviorState,
    pub is_avoiding: bool,
    pub avoidance_vector: DVec3,
    pub target_position: DVec3,
    pub target_rotation: DQuat,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            patrol_angle: 0.0,
            patrol_speed: 0.0,
            patrol_height: 0.0,
            patrol_radius: 0.0,
            patrol_center: DVec3::ZERO,
            patrol_pattern: PatrolPattern::default(),
            phase: 0.0,
            behavior: BehaviorState::default(),
            is_avoiding: false,
            avoidance_vector: DVec3::ZERO,
            target_position: DVec3::ZERO,
            target_rotation: DQuat::IDENTITY,
        }
    }
}

/// A simple ballistic mover. Owned and mutated only by the projectile manager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: DVec3,
    /// Expected unit length; not re-normalized.
    pub direction: DVec3,
    /// Units per second.
    pub speed: f64,
    /// Counts down to zero, then the projectile is removed.
    pub lifetime_secs: f64,
}

/// Cosmetic propeller state on the player craft.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Propeller {
    /// Accumulated spin (radians).
    pub angle: f64,
}
