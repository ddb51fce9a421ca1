//! Chase and orbit camera rig.
//!
//! Only positions are stored. The orientation is rebuilt from the current
//! position and look-at point whenever it is asked for, so it cannot drift.

use glam::{DQuat, DVec3};

use skypatrol_core::config::CameraTuning;
use skypatrol_core::enums::CameraMode;
use skypatrol_core::math::{is_positive, look_rotation, FrameRateMode, WORLD_UP};
use skypatrol_core::state::CameraView;
use skypatrol_core::types::Pose;

#[derive(Debug, Clone)]
pub struct CameraRig {
    tuning: CameraTuning,
    frame: FrameRateMode,
    mode: CameraMode,
    current_position: DVec3,
    target_position: DVec3,
    current_look_at: DVec3,
    target_look_at: DVec3,
    orbit_angle: f64,
}

impl CameraRig {
    pub fn new(tuning: CameraTuning, frame: FrameRateMode) -> Self {
        Self {
            tuning,
            frame,
            mode: CameraMode::default(),
            current_position: DVec3::ZERO,
            target_position: DVec3::ZERO,
            current_look_at: DVec3::ZERO,
            target_look_at: DVec3::ZERO,
            orbit_angle: 0.0,
        }
    }

    /// Retarget on the followed body and ease toward the new target.
    pub fn update(&mut self, body: &Pose, dt: f64) {
        if !is_positive(dt) {
            return;
        }

        match self.mode {
            CameraMode::Follow => {
                let offset = DVec3::new(0.0, self.tuning.follow_height, self.tuning.follow_distance);
                self.target_position = body.position + body.orientation * offset;
            }
            CameraMode::Orbit => {
                self.orbit_angle += self.tuning.orbit_speed * self.frame.tick_fraction(dt);
                self.target_position = body.position
                    + DVec3::new(
                        self.tuning.orbit_radius * self.orbit_angle.cos(),
                        self.tuning.orbit_height,
                        self.tuning.orbit_radius * self.orbit_angle.sin(),
                    );
            }
        }
        self.target_look_at = body.position;

        let ease = self.frame.ease_factor(self.tuning.follow_lerp, dt);
        self.current_position = self.current_position.lerp(self.target_position, ease);
        self.current_look_at = self.current_look_at.lerp(self.target_look_at, ease);
    }

    /// Switch between follow and orbit. Returns the new mode.
    pub fn toggle_mode(&mut self) -> CameraMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn position(&self) -> DVec3 {
        self.current_position
    }

    pub fn look_at(&self) -> DVec3 {
        self.current_look_at
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    pub fn orientation(&self) -> DQuat {
        look_rotation(self.current_position, self.current_look_at, WORLD_UP)
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.current_position, self.orientation())
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            mode: self.mode,
            position: self.current_position,
            look_at: self.current_look_at,
            orientation: self.orientation(),
        }
    }
}
