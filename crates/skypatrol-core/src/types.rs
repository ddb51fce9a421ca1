//! Fundamental geometric and simulation types.
//!
//! World frame is right-handed with +Y up. A body's local forward axis is -Z,
//! its lateral (right) axis +X.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::math::{FORWARD, WORLD_UP};

/// Position and orientation of a rigid body. Owned by the entity it describes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    /// Unit quaternion. Kept normalized by every system that writes it.
    pub orientation: DQuat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            orientation: DQuat::IDENTITY,
        }
    }

    /// Direction the body's nose points in world space.
    pub fn forward(&self) -> DVec3 {
        self.orientation * FORWARD
    }

    /// The body's local up axis in world space.
    pub fn up(&self) -> DVec3 {
        self.orientation * WORLD_UP
    }

    /// Transform a point from the body's local frame into world space.
    pub fn transform_point(&self, local: DVec3) -> DVec3 {
        self.position + self.orientation * local
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Read-only obstacle description supplied by the scene each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSnapshot {
    pub position: DVec3,
    /// Roof height above the ground plane.
    pub approximate_height: f64,
}

impl ObstacleSnapshot {
    pub fn new(position: DVec3, approximate_height: f64) -> Self {
        Self {
            position,
            approximate_height,
        }
    }

    /// Distance to `point` in the ground plane (ignoring altitude).
    pub fn planar_distance_to(&self, point: DVec3) -> f64 {
        let dx = point.x - self.position.x;
        let dz = point.z - self.position.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Immutable key-state sample taken by the input layer between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub roll_left: bool,
    pub roll_right: bool,
    pub throttle_up: bool,
    pub throttle_down: bool,
}

/// Normalized control deflections, each in [-1, 1] (yaw is a per-tick angle).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    /// Positive raises the nose.
    pub pitch: f64,
    /// Positive rolls right (right wing down).
    pub roll: f64,
    /// Coupled turn derived from roll. Reported, not applied to orientation.
    pub yaw: f64,
    /// Manual throttle request: -1 slower, +1 faster.
    pub throttle_delta: f64,
}
