//! Tuning blocks and simulation configuration.
//!
//! Defaults come from `constants.rs`. Every block is serde-deserializable with
//! per-field defaults, so a JSON file only needs to name what it overrides.
//! Validation happens once, at load time; the tick path never fails.

use std::path::{Path, PathBuf};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::HoverClock;
use crate::math::FrameRateMode;

/// Errors raised while loading or validating a [`SimConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn require_unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must lie in [0, 1], got {value}")))
    }
}

/// Flight model parameters for the player craft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub min_speed: f64,
    pub max_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    pub pitch_sensitivity: f64,
    pub turn_sensitivity: f64,
    pub roll_sensitivity: f64,
    pub initial_throttle: f64,
    pub throttle_rate: f64,
    /// Renormalize the orientation every N physics updates.
    pub renormalize_interval: u32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            min_speed: FLIGHT_MIN_SPEED,
            max_speed: FLIGHT_MAX_SPEED,
            acceleration: FLIGHT_ACCELERATION,
            deceleration: FLIGHT_DECELERATION,
            pitch_sensitivity: FLIGHT_PITCH_SENSITIVITY,
            turn_sensitivity: FLIGHT_TURN_SENSITIVITY,
            roll_sensitivity: FLIGHT_ROLL_SENSITIVITY,
            initial_throttle: FLIGHT_INITIAL_THROTTLE,
            throttle_rate: FLIGHT_THROTTLE_RATE,
            renormalize_interval: 1,
        }
    }
}

impl FlightTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_speed.is_finite() && self.min_speed >= 0.0) {
            return Err(invalid("flight.min_speed", "must be finite and non-negative"));
        }
        if !(self.max_speed.is_finite() && self.max_speed > self.min_speed) {
            return Err(invalid(
                "flight.max_speed",
                format!(
                    "must exceed min_speed ({} <= {})",
                    self.max_speed, self.min_speed
                ),
            ));
        }
        require_positive("flight.acceleration", self.acceleration)?;
        require_positive("flight.deceleration", self.deceleration)?;
        require_unit_interval("flight.initial_throttle", self.initial_throttle)?;
        if self.renormalize_interval == 0 {
            return Err(invalid("flight.renormalize_interval", "must be at least 1"));
        }
        Ok(())
    }
}

/// City-circling autopilot parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotTuning {
    pub center: DVec3,
    pub target_radius: f64,
    pub target_height: f64,
    pub turn_rate: f64,
    pub max_bank: f64,
    pub height_correction_rate: f64,
    pub max_pitch: f64,
    pub base_throttle: f64,
    pub bank_compensation: f64,
}

impl Default for AutopilotTuning {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            target_radius: AUTOPILOT_TARGET_RADIUS,
            target_height: AUTOPILOT_TARGET_HEIGHT,
            turn_rate: AUTOPILOT_TURN_RATE,
            max_bank: AUTOPILOT_MAX_BANK,
            height_correction_rate: AUTOPILOT_HEIGHT_CORRECTION_RATE,
            max_pitch: AUTOPILOT_MAX_PITCH,
            base_throttle: AUTOPILOT_BASE_THROTTLE,
            bank_compensation: AUTOPILOT_BANK_COMPENSATION,
        }
    }
}

/// Agent patrol and avoidance parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentTuning {
    pub count: usize,
    pub patrol_center: DVec3,
    pub patrol_radius: f64,
    pub patrol_radius_spread: f64,
    pub patrol_speed_min: f64,
    pub patrol_speed_spread: f64,
    pub player_avoidance_radius: f64,
    pub obstacle_avoidance_radius: f64,
    pub obstacle_clearance: f64,
    pub obstacle_push: f64,
    pub min_height: f64,
    pub max_height: f64,
    pub smoothing_factor: f64,
    pub hover_amplitude: f64,
    pub hover_frequency: f64,
    pub relocate_min: DVec3,
    pub relocate_max: DVec3,
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            count: AGENT_COUNT,
            patrol_center: DVec3::ZERO,
            patrol_radius: AGENT_PATROL_RADIUS,
            patrol_radius_spread: AGENT_PATROL_RADIUS_SPREAD,
            patrol_speed_min: AGENT_PATROL_SPEED_MIN,
            patrol_speed_spread: AGENT_PATROL_SPEED_SPREAD,
            player_avoidance_radius: AGENT_PLAYER_AVOIDANCE_RADIUS,
            obstacle_avoidance_radius: AGENT_OBSTACLE_AVOIDANCE_RADIUS,
            obstacle_clearance: AGENT_OBSTACLE_CLEARANCE,
            obstacle_push: AGENT_OBSTACLE_PUSH,
            min_height: AGENT_MIN_HEIGHT,
            max_height: AGENT_MAX_HEIGHT,
            smoothing_factor: AGENT_SMOOTHING_FACTOR,
            hover_amplitude: AGENT_HOVER_AMPLITUDE,
            hover_frequency: AGENT_HOVER_FREQUENCY,
            relocate_min: DVec3::from_array(AGENT_RELOCATE_MIN),
            relocate_max: DVec3::from_array(AGENT_RELOCATE_MAX),
        }
    }
}

impl AgentTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("agents.patrol_radius", self.patrol_radius)?;
        require_positive("agents.player_avoidance_radius", self.player_avoidance_radius)?;
        require_positive(
            "agents.obstacle_avoidance_radius",
            self.obstacle_avoidance_radius,
        )?;
        require_unit_interval("agents.smoothing_factor", self.smoothing_factor)?;
        if !(self.patrol_radius_spread >= 0.0 && self.patrol_radius_spread < 2.0 * self.patrol_radius)
        {
            return Err(invalid(
                "agents.patrol_radius_spread",
                "must be non-negative and keep the radius positive",
            ));
        }
        if !(self.patrol_speed_min >= 0.0 && self.patrol_speed_spread >= 0.0) {
            return Err(invalid("agents.patrol_speed_min", "patrol speeds must be non-negative"));
        }
        if !(self.min_height <= self.max_height) {
            return Err(invalid(
                "agents.min_height",
                format!(
                    "must not exceed max_height ({} > {})",
                    self.min_height, self.max_height
                ),
            ));
        }
        if !self.relocate_min.cmplt(self.relocate_max).all() {
            return Err(invalid(
                "agents.relocate_min",
                "every component must be below relocate_max",
            ));
        }
        Ok(())
    }
}

/// Projectile parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f64,
    pub lifetime_secs: f64,
    pub hit_radius: f64,
    pub max_live: usize,
    pub fire_cooldown_secs: f64,
    pub muzzle_offset: DVec3,
    pub muzzle_lift: f64,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            lifetime_secs: PROJECTILE_LIFETIME_SECS,
            hit_radius: PROJECTILE_HIT_RADIUS,
            max_live: PROJECTILE_MAX_LIVE,
            fire_cooldown_secs: FIRE_COOLDOWN_SECS,
            muzzle_offset: DVec3::from_array(MUZZLE_OFFSET),
            muzzle_lift: MUZZLE_LIFT,
        }
    }
}

impl ProjectileTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("projectiles.speed", self.speed)?;
        require_positive("projectiles.lifetime_secs", self.lifetime_secs)?;
        require_positive("projectiles.hit_radius", self.hit_radius)?;
        if !(self.fire_cooldown_secs >= 0.0) {
            return Err(invalid("projectiles.fire_cooldown_secs", "must be non-negative"));
        }
        Ok(())
    }
}

/// Camera rig parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub follow_distance: f64,
    pub follow_height: f64,
    pub follow_lerp: f64,
    pub orbit_radius: f64,
    pub orbit_height: f64,
    /// Radians per tick.
    pub orbit_speed: f64,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            follow_distance: CAMERA_FOLLOW_DISTANCE,
            follow_height: CAMERA_FOLLOW_HEIGHT,
            follow_lerp: CAMERA_FOLLOW_LERP,
            orbit_radius: CAMERA_ORBIT_RADIUS,
            orbit_height: CAMERA_ORBIT_HEIGHT,
            orbit_speed: CAMERA_ORBIT_SPEED,
        }
    }
}

impl CameraTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_unit_interval("camera.follow_lerp", self.follow_lerp)?;
        require_positive("camera.orbit_radius", self.orbit_radius)?;
        Ok(())
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub frame_rate: FrameRateMode,
    pub hover_clock: HoverClock,
    /// Start with the autopilot flying the craft.
    pub autopilot: bool,
    pub flight: FlightTuning,
    pub autopilot_tuning: AutopilotTuning,
    pub agents: AgentTuning,
    pub projectiles: ProjectileTuning,
    pub camera: CameraTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frame_rate: FrameRateMode::default(),
            hover_clock: HoverClock::default(),
            autopilot: true,
            flight: FlightTuning::default(),
            autopilot_tuning: AutopilotTuning::default(),
            agents: AgentTuning::default(),
            projectiles: ProjectileTuning::default(),
            camera: CameraTuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let FrameRateMode::DtScaled { reference_dt } = self.frame_rate {
            require_positive("frame_rate.reference_dt", reference_dt)?;
        }
        self.flight.validate()?;
        self.agents.validate()?;
        self.projectiles.validate()?;
        self.camera.validate()?;
        Ok(())
    }
}
