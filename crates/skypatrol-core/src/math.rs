//! Small geometric helpers layered on top of `glam`.
//!
//! Every helper here is total: zero-length or non-finite input yields a
//! well-defined result instead of NaN.

use glam::{DMat3, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// World up axis.
pub const WORLD_UP: DVec3 = DVec3::Y;

/// Canonical body forward axis.
pub const FORWARD: DVec3 = DVec3::NEG_Z;

/// Squared lengths below this are treated as zero.
const DEGENERATE_LENGTH_SQ: f64 = 1e-18;

/// Normalize `v`, returning the zero vector when `v` has no usable direction.
pub fn safe_normalize(v: DVec3) -> DVec3 {
    let len_sq = v.length_squared();
    if !len_sq.is_finite() || len_sq <= DEGENERATE_LENGTH_SQ {
        return DVec3::ZERO;
    }
    v / len_sq.sqrt()
}

/// Orientation whose local -Z axis points from `eye` toward `target`.
///
/// Mirrors a right-handed look-at matrix: back = eye - target,
/// right = up × back, up' = back × right. When `eye == target` the back axis
/// defaults to +Z; when `up` is parallel to the view direction the back axis
/// is nudged so the cross product stays defined.
pub fn look_rotation(eye: DVec3, target: DVec3, up: DVec3) -> DQuat {
    if !eye.is_finite() || !target.is_finite() || !up.is_finite() {
        return DQuat::IDENTITY;
    }

    let mut back = eye - target;
    if back.length_squared() <= DEGENERATE_LENGTH_SQ {
        back = DVec3::Z;
    }
    back = back.normalize();

    let mut right = up.cross(back);
    if right.length_squared() <= DEGENERATE_LENGTH_SQ {
        if (up.z.abs() - 1.0).abs() <= f64::EPSILON {
            back.x += 1e-4;
        } else {
            back.z += 1e-4;
        }
        back = back.normalize();
        right = up.cross(back);
        if right.length_squared() <= DEGENERATE_LENGTH_SQ {
            return DQuat::IDENTITY;
        }
    }
    right = right.normalize();
    let true_up = back.cross(right);

    DQuat::from_mat3(&DMat3::from_cols(right, true_up, back)).normalize()
}

/// How per-tick easing and per-tick motion relate to the frame time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FrameRateMode {
    /// Easing factors and per-tick constants apply once per tick regardless
    /// of frame time. Matches the arcade feel at the nominal tick rate.
    #[default]
    PerTick,
    /// Easing and per-tick constants are rescaled by `dt / reference_dt`.
    DtScaled { reference_dt: f64 },
}

impl FrameRateMode {
    /// Effective interpolation factor for this tick.
    ///
    /// `DtScaled` uses `1 - (1 - factor)^(dt / reference_dt)` so that two
    /// half-length ticks close the same distance as one full tick.
    pub fn ease_factor(&self, factor: f64, dt: f64) -> f64 {
        match *self {
            FrameRateMode::PerTick => factor,
            FrameRateMode::DtScaled { reference_dt } => {
                if !is_positive(dt) || !is_positive(reference_dt) {
                    return 0.0;
                }
                1.0 - (1.0 - factor).powf(dt / reference_dt)
            }
        }
    }

    /// Multiplier for quantities specified "per tick".
    pub fn tick_fraction(&self, dt: f64) -> f64 {
        match *self {
            FrameRateMode::PerTick => 1.0,
            FrameRateMode::DtScaled { reference_dt } => {
                if !is_positive(dt) || !is_positive(reference_dt) {
                    return 0.0;
                }
                dt / reference_dt
            }
        }
    }
}

/// True for finite values strictly greater than zero.
pub fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}
