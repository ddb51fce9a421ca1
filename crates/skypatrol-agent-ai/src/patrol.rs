//! Patrol path generators and the cosmetic hover bob.

use glam::DVec3;

use skypatrol_core::constants::{FIGURE8_LONG_AXIS, FIGURE8_SHORT_AXIS};
use skypatrol_core::enums::PatrolPattern;

/// Point on the patrol path at `angle`, at the fixed patrol `height`.
///
/// Circle: `center + r·(cos a, 0, sin a)`.
/// Figure-8: `center + (sin a · 0.7r, 0, sin 2a · 0.35r)`, a lemniscate-like
/// loop that crosses the centre twice per revolution.
pub fn patrol_target(
    pattern: PatrolPattern,
    center: DVec3,
    radius: f64,
    height: f64,
    angle: f64,
) -> DVec3 {
    let (dx, dz) = match pattern {
        PatrolPattern::Circle => (angle.cos() * radius, angle.sin() * radius),
        PatrolPattern::Figure8 => (
            angle.sin() * radius * FIGURE8_LONG_AXIS,
            (angle * 2.0).sin() * radius * FIGURE8_SHORT_AXIS,
        ),
    };
    DVec3::new(center.x + dx, height, center.z + dz)
}

/// Vertical hover offset applied after the state machine each tick.
pub fn hover_offset(time_secs: f64, phase: f64, amplitude: f64, frequency: f64) -> f64 {
    (time_secs * frequency + phase).sin() * amplitude
}
