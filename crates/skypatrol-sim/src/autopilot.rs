//! City-circling autopilot.
//!
//! Flies the craft around a circle centred on the city: holds a bank angle
//! proportional to the heading error toward a point slightly ahead on the
//! circle, pitches toward the cruise altitude, and adds power in turns.

use glam::DVec3;

use skypatrol_core::config::AutopilotTuning;
use skypatrol_core::math::{is_positive, safe_normalize};
use skypatrol_core::types::Pose;

/// Roll-rate command per radian of bank-angle error.
const BANK_HOLD_GAIN: f64 = 2.0;

/// Control targets for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AutopilotCommand {
    /// Roll input in [-1, 1]; positive rolls right.
    pub bank: f64,
    /// Pitch input in [-max_pitch, max_pitch]; positive raises the nose.
    pub pitch: f64,
    pub throttle: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    tuning: AutopilotTuning,
}

impl Autopilot {
    pub fn new(tuning: AutopilotTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &AutopilotTuning {
        &self.tuning
    }

    /// Compute control targets for the craft at `pose`.
    pub fn steer(&self, pose: &Pose, dt: f64) -> AutopilotCommand {
        let t = &self.tuning;
        let lead = if is_positive(dt) { t.turn_rate * dt } else { 0.0 };

        let rel = pose.position - t.center;
        let angle = rel.x.atan2(rel.z);
        let aim = DVec3::new(
            t.center.x + (angle + lead).sin() * t.target_radius,
            0.0,
            t.center.z + (angle + lead).cos() * t.target_radius,
        );
        let desired = safe_normalize(DVec3::new(
            aim.x - pose.position.x,
            0.0,
            aim.z - pose.position.z,
        ));

        let forward = pose.forward();
        let desired_bank = (-2.0 * forward.cross(desired).y).clamp(-t.max_bank, t.max_bank);
        let right = pose.orientation * DVec3::X;
        let current_bank = -right.y.clamp(-1.0, 1.0).asin();
        let bank = ((desired_bank - current_bank) * BANK_HOLD_GAIN).clamp(-1.0, 1.0);

        let height_error = t.target_height - pose.position.y;
        let pitch = (height_error * t.height_correction_rate).clamp(-t.max_pitch, t.max_pitch);

        let throttle = (t.base_throttle + bank.abs() * t.bank_compensation).clamp(0.0, 1.0);

        AutopilotCommand {
            bank,
            pitch,
            throttle,
        }
    }
}
