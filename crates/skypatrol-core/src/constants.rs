//! Simulation constants and default tuning parameters.
//!
//! Units are abstract world units. The player craft's speed is expressed in
//! units per tick, agent patrol speed in radians per second.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Flight ---

/// Slowest cruise speed (units per tick).
pub const FLIGHT_MIN_SPEED: f64 = 0.2;

/// Fastest cruise speed (units per tick).
pub const FLIGHT_MAX_SPEED: f64 = 2.0;

/// Speed gained per second when below the throttle target.
pub const FLIGHT_ACCELERATION: f64 = 0.5;

/// Speed lost per second when above the throttle target.
pub const FLIGHT_DECELERATION: f64 = 0.3;

/// Pitch rate at full deflection (rad/s).
pub const FLIGHT_PITCH_SENSITIVITY: f64 = 0.8;

/// Coupled yaw factor reported alongside roll input.
pub const FLIGHT_TURN_SENSITIVITY: f64 = 1.5;

/// Roll rate at full deflection (rad/s).
pub const FLIGHT_ROLL_SENSITIVITY: f64 = 2.0;

/// Throttle at spawn.
pub const FLIGHT_INITIAL_THROTTLE: f64 = 0.5;

/// Throttle change per second while a manual throttle key is held.
pub const FLIGHT_THROTTLE_RATE: f64 = 0.5;

/// Player spawn position.
pub const PLAYER_SPAWN_POSITION: [f64; 3] = [0.0, 30.0, 100.0];

/// Player spawn pitch (radians, nose slightly down).
pub const PLAYER_SPAWN_PITCH: f64 = -5.0 * std::f64::consts::PI / 180.0;

/// Propeller spin per tick at rest (radians).
pub const PROPELLER_BASE_SPIN: f64 = 0.2;

// --- Autopilot ---

/// Radius of the circuit flown around the city centre.
pub const AUTOPILOT_TARGET_RADIUS: f64 = 80.0;

/// Cruise altitude held by the autopilot.
pub const AUTOPILOT_TARGET_HEIGHT: f64 = 30.0;

/// Angular lead along the circuit (rad/s).
pub const AUTOPILOT_TURN_RATE: f64 = 0.4;

/// Largest bank command issued by the autopilot.
pub const AUTOPILOT_MAX_BANK: f64 = 0.4;

/// Pitch command per unit of altitude error.
pub const AUTOPILOT_HEIGHT_CORRECTION_RATE: f64 = 0.02;

/// Largest pitch command issued by the autopilot.
pub const AUTOPILOT_MAX_PITCH: f64 = 0.3;

/// Throttle held in level flight.
pub const AUTOPILOT_BASE_THROTTLE: f64 = 0.6;

/// Extra throttle per unit of bank.
pub const AUTOPILOT_BANK_COMPENSATION: f64 = 0.2;

// --- Agents ---

/// Number of patrolling agents spawned at start.
pub const AGENT_COUNT: usize = 5;

/// Nominal patrol radius around the patrol centre.
pub const AGENT_PATROL_RADIUS: f64 = 60.0;

/// Full width of the random spread applied to the patrol radius.
pub const AGENT_PATROL_RADIUS_SPREAD: f64 = 20.0;

/// Slowest patrol angular speed (rad/s).
pub const AGENT_PATROL_SPEED_MIN: f64 = 0.1;

/// Width of the random patrol speed range (rad/s).
pub const AGENT_PATROL_SPEED_SPREAD: f64 = 0.15;

/// Agents flee the player inside this distance.
pub const AGENT_PLAYER_AVOIDANCE_RADIUS: f64 = 40.0;

/// Agents push away from obstacles inside this planar distance.
pub const AGENT_OBSTACLE_AVOIDANCE_RADIUS: f64 = 20.0;

/// Vertical clearance above an obstacle's roof that still triggers avoidance.
pub const AGENT_OBSTACLE_CLEARANCE: f64 = 10.0;

/// Magnitude of the blended obstacle push.
pub const AGENT_OBSTACLE_PUSH: f64 = 2.0;

/// Lowest allowed cruising altitude.
pub const AGENT_MIN_HEIGHT: f64 = 25.0;

/// Highest allowed cruising altitude.
pub const AGENT_MAX_HEIGHT: f64 = 45.0;

/// Fraction of the remaining distance closed per tick.
pub const AGENT_SMOOTHING_FACTOR: f64 = 0.1;

/// Hover bob amplitude added every tick.
pub const AGENT_HOVER_AMPLITUDE: f64 = 0.05;

/// Hover bob frequency (rad/s).
pub const AGENT_HOVER_FREQUENCY: f64 = 1.0;

/// Long axis of the figure-8 path as a fraction of the patrol radius.
pub const FIGURE8_LONG_AXIS: f64 = 0.7;

/// Short axis of the figure-8 path as a fraction of the patrol radius.
pub const FIGURE8_SHORT_AXIS: f64 = 0.35;

/// Lower corner of the volume agents are relocated into after a hit.
pub const AGENT_RELOCATE_MIN: [f64; 3] = [-100.0, 30.0, -100.0];

/// Upper corner of the volume agents are relocated into after a hit.
pub const AGENT_RELOCATE_MAX: [f64; 3] = [100.0, 50.0, 100.0];

// --- Projectiles ---

/// Projectile speed (units/s).
pub const PROJECTILE_SPEED: f64 = 50.0;

/// Projectile lifetime (seconds).
pub const PROJECTILE_LIFETIME_SECS: f64 = 5.0;

/// Distance below which a projectile hits an agent.
pub const PROJECTILE_HIT_RADIUS: f64 = 3.0;

/// Maximum simultaneously live projectiles.
pub const PROJECTILE_MAX_LIVE: usize = 64;

/// Minimum time between shots (seconds).
pub const FIRE_COOLDOWN_SECS: f64 = 0.2;

/// Muzzle offset from the craft origin, in the craft's local frame.
pub const MUZZLE_OFFSET: [f64; 3] = [0.0, 0.0, -2.0];

/// Upward bias added to the firing direction before normalizing.
pub const MUZZLE_LIFT: f64 = 0.1;

// --- Camera ---

/// Chase distance behind the craft.
pub const CAMERA_FOLLOW_DISTANCE: f64 = 15.0;

/// Chase height above the craft.
pub const CAMERA_FOLLOW_HEIGHT: f64 = 5.0;

/// Fraction of the remaining camera offset closed per tick.
pub const CAMERA_FOLLOW_LERP: f64 = 0.1;

/// Orbit radius around the craft.
pub const CAMERA_ORBIT_RADIUS: f64 = 50.0;

/// Orbit height above the craft.
pub const CAMERA_ORBIT_HEIGHT: f64 = 40.0;

/// Orbit advance per tick (radians).
pub const CAMERA_ORBIT_SPEED: f64 = 0.015;

// --- Speed bands (HUD) ---

/// Normalized speed below which the craft is considered slow.
pub const SPEED_BAND_LOW: f64 = 0.3;

/// Normalized speed above which the craft is considered fast.
pub const SPEED_BAND_HIGH: f64 = 0.7;
