//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player craft and the patrolling agents with their component
//! bundles. All randomness comes from the engine's seeded RNG.

use std::f64::consts::TAU;

use glam::{DQuat, DVec3};
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skypatrol_core::components::{Agent, AgentState, Player, Propeller};
use skypatrol_core::config::AgentTuning;
use skypatrol_core::constants::{PLAYER_SPAWN_PITCH, PLAYER_SPAWN_POSITION};
use skypatrol_core::enums::PatrolPattern;
use skypatrol_core::types::Pose;

/// Pose the player craft starts in: outside the city, nose slightly down.
pub fn player_spawn_pose() -> Pose {
    Pose::new(
        DVec3::from_array(PLAYER_SPAWN_POSITION),
        DQuat::from_rotation_x(PLAYER_SPAWN_PITCH),
    )
}

/// Spawn the player craft.
pub fn spawn_player(world: &mut World) -> Entity {
    world.spawn((Player, player_spawn_pose(), Propeller::default()))
}

/// Spawn `tuning.count` agents on their patrol paths.
pub fn spawn_agents(world: &mut World, rng: &mut ChaCha8Rng, tuning: &AgentTuning) -> Vec<Entity> {
    (0..tuning.count)
        .map(|id| {
            let state = new_agent_state(rng, tuning);
            let position = DVec3::new(
                state.patrol_center.x + state.patrol_angle.cos() * state.patrol_radius,
                state.patrol_height,
                state.patrol_center.z + state.patrol_angle.sin() * state.patrol_radius,
            );
            world.spawn((Agent { id: id as u32 }, Pose::at(position), state))
        })
        .collect()
}

/// Draw a fresh behavior record.
pub fn new_agent_state(rng: &mut ChaCha8Rng, tuning: &AgentTuning) -> AgentState {
    let patrol_angle = rng.gen::<f64>() * TAU;
    let patrol_speed = tuning.patrol_speed_min + rng.gen::<f64>() * tuning.patrol_speed_spread;
    let patrol_height =
        tuning.min_height + rng.gen::<f64>() * (tuning.max_height - tuning.min_height);
    let patrol_radius = tuning.patrol_radius + (rng.gen::<f64>() - 0.5) * tuning.patrol_radius_spread;
    let patrol_pattern = if rng.gen_bool(0.5) {
        PatrolPattern::Circle
    } else {
        PatrolPattern::Figure8
    };
    let phase = rng.gen::<f64>() * TAU;

    AgentState {
        patrol_angle,
        patrol_speed,
        patrol_height,
        patrol_radius,
        patrol_center: tuning.patrol_center,
        patrol_pattern,
        phase,
        ..Default::default()
    }
}

/// Uniform point inside the axis-aligned box `[min, max)`.
pub fn random_point_in(rng: &mut ChaCha8Rng, min: DVec3, max: DVec3) -> DVec3 {
    DVec3::new(
        min.x + rng.gen::<f64>() * (max.x - min.x),
        min.y + rng.gen::<f64>() * (max.y - min.y),
        min.z + rng.gen::<f64>() * (max.z - min.z),
    )
}
