//! Player craft integration.
//!
//! Applies the flight model's per-tick displacement to the player's pose
//! (one Euler step per tick) and spins the cosmetic propeller.

use hecs::World;

use skypatrol_core::components::{Player, Propeller};
use skypatrol_core::constants::PROPELLER_BASE_SPIN;
use skypatrol_core::types::Pose;

use crate::flight::FlightOutput;

/// Move the player craft: position += velocity * tick_fraction.
pub fn run(world: &mut World, output: &FlightOutput, tick_fraction: f64) {
    for (_entity, (_player, pose)) in world.query_mut::<(&Player, &mut Pose)>() {
        pose.position += output.velocity * tick_fraction;
        pose.orientation = output.orientation;
    }
}

/// Spin the propeller faster with speed and in turns.
pub fn spin_propeller(world: &mut World, speed: f64, bank: f64, tick_fraction: f64) {
    let spin = (PROPELLER_BASE_SPIN + speed * 0.01 + bank.abs() * 0.1) * tick_fraction;
    for (_entity, (_player, propeller)) in world.query_mut::<(&Player, &mut Propeller)>() {
        propeller.angle += spin;
    }
}
