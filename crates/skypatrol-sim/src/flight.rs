//! Flight model for the player craft.
//!
//! Turns normalized control deflections into an orientation change and a
//! per-tick forward displacement. Orientation is composed from small body-axis
//! rotations (pitch about local +X, then roll about local +Z) and renormalized
//! on a fixed cadence so the quaternion never drifts off unit length.

use glam::{DQuat, DVec3};

use skypatrol_core::config::FlightTuning;
use skypatrol_core::enums::SpeedBand;
use skypatrol_core::math::{is_positive, FORWARD};
use skypatrol_core::types::{ControlInput, InputSnapshot};

/// Result of one physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightOutput {
    /// Displacement for this tick (`forward * speed`).
    pub velocity: DVec3,
    pub orientation: DQuat,
    pub speed: f64,
}

/// Flight state and control targets for one craft.
#[derive(Debug, Clone)]
pub struct FlightController {
    tuning: FlightTuning,
    speed: f64,
    orientation: DQuat,
    throttle: f64,
    auto_pitch: f64,
    auto_bank: f64,
    input: ControlInput,
    updates_since_renormalize: u32,
}

impl FlightController {
    pub fn new(tuning: FlightTuning) -> Self {
        Self::with_orientation(tuning, DQuat::IDENTITY)
    }

    /// Start from a given attitude, at minimum speed and the configured throttle.
    pub fn with_orientation(tuning: FlightTuning, orientation: DQuat) -> Self {
        let orientation = if orientation.is_finite() && orientation.length_squared() > 0.0 {
            orientation.normalize()
        } else {
            DQuat::IDENTITY
        };
        Self {
            speed: tuning.min_speed,
            throttle: tuning.initial_throttle.clamp(0.0, 1.0),
            orientation,
            auto_pitch: 0.0,
            auto_bank: 0.0,
            input: ControlInput::default(),
            updates_since_renormalize: 0,
            tuning,
        }
    }

    /// Throttle target in [0, 1]. Non-finite values are ignored.
    pub fn set_throttle(&mut self, amount: f64) {
        if amount.is_finite() {
            self.throttle = amount.clamp(0.0, 1.0);
        }
    }

    /// Autopilot pitch contribution in [-1, 1].
    pub fn set_auto_pitch(&mut self, amount: f64) {
        if amount.is_finite() {
            self.auto_pitch = amount.clamp(-1.0, 1.0);
        }
    }

    /// Autopilot roll contribution in [-1, 1].
    pub fn set_auto_banking(&mut self, amount: f64) {
        if amount.is_finite() {
            self.auto_bank = amount.clamp(-1.0, 1.0);
        }
    }

    /// Derive normalized control deflections from a key-state sample and keep
    /// them for the next physics step.
    pub fn update_inputs(&mut self, keys: &InputSnapshot, dt: f64) -> ControlInput {
        let pitch = axis(keys.pitch_up, keys.pitch_down);
        let roll = axis(keys.roll_right, keys.roll_left);
        let throttle_delta = axis(keys.throttle_up, keys.throttle_down);
        let yaw = if is_positive(dt) {
            -roll * self.tuning.turn_sensitivity * dt
        } else {
            0.0
        };

        self.input = ControlInput {
            pitch,
            roll,
            yaw,
            throttle_delta,
        };
        self.input
    }

    /// Accept an already-normalized control vector (e.g. from a gamepad layer).
    pub fn set_control_input(&mut self, input: ControlInput) {
        let clean = |v: f64| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        self.input = ControlInput {
            pitch: clean(input.pitch),
            roll: clean(input.roll),
            yaw: if input.yaw.is_finite() { input.yaw } else { 0.0 },
            throttle_delta: clean(input.throttle_delta),
        };
    }

    /// Move the throttle target by the held manual throttle input.
    pub fn apply_manual_throttle(&mut self, dt: f64) {
        if !is_positive(dt) || self.input.throttle_delta == 0.0 {
            return;
        }
        let delta = self.input.throttle_delta * self.tuning.throttle_rate * dt;
        self.throttle = (self.throttle + delta).clamp(0.0, 1.0);
    }

    /// Advance attitude and speed by `dt` seconds.
    ///
    /// A non-positive or non-finite `dt` changes nothing and reports zero
    /// displacement.
    pub fn update_physics(&mut self, dt: f64) -> FlightOutput {
        if !is_positive(dt) {
            return FlightOutput {
                velocity: DVec3::ZERO,
                orientation: self.orientation,
                speed: self.speed,
            };
        }

        let pitch = (self.input.pitch + self.auto_pitch).clamp(-1.0, 1.0);
        let roll = (self.input.roll + self.auto_bank).clamp(-1.0, 1.0);

        let pitch_q = DQuat::from_axis_angle(DVec3::X, pitch * self.tuning.pitch_sensitivity * dt);
        let roll_q = DQuat::from_axis_angle(DVec3::Z, -roll * self.tuning.roll_sensitivity * dt);
        self.orientation = self.orientation * pitch_q * roll_q;

        self.updates_since_renormalize += 1;
        if self.updates_since_renormalize >= self.tuning.renormalize_interval.max(1) {
            self.orientation = self.orientation.normalize();
            self.updates_since_renormalize = 0;
        }

        let target = self.target_speed();
        if self.speed < target {
            self.speed = (self.speed + self.tuning.acceleration * dt).min(target);
        } else if self.speed > target {
            self.speed = (self.speed - self.tuning.deceleration * dt).max(target);
        }
        self.speed = self.speed.clamp(self.tuning.min_speed, self.tuning.max_speed);

        let forward = self.orientation * FORWARD;
        FlightOutput {
            velocity: forward * self.speed,
            orientation: self.orientation,
            speed: self.speed,
        }
    }

    /// Cruise speed the throttle is asking for.
    pub fn target_speed(&self) -> f64 {
        self.tuning.min_speed + (self.tuning.max_speed - self.tuning.min_speed) * self.throttle
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Speed mapped onto [0, 1] between min and max speed.
    pub fn speed_normalized(&self) -> f64 {
        let span = self.tuning.max_speed - self.tuning.min_speed;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.speed - self.tuning.min_speed) / span).clamp(0.0, 1.0)
    }

    pub fn speed_band(&self) -> SpeedBand {
        SpeedBand::from_normalized(self.speed_normalized())
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    pub fn auto_pitch(&self) -> f64 {
        self.auto_pitch
    }

    pub fn auto_bank(&self) -> f64 {
        self.auto_bank
    }

    pub fn orientation(&self) -> DQuat {
        self.orientation
    }

    pub fn input(&self) -> ControlInput {
        self.input
    }

    pub fn tuning(&self) -> &FlightTuning {
        &self.tuning
    }
}

fn axis(positive: bool, negative: bool) -> f64 {
    f64::from(u8::from(positive)) - f64::from(u8::from(negative))
}
