//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only: never modifies the world.

use hecs::{Entity, World};

use skypatrol_core::components::{Agent, AgentState, Player, Projectile, Propeller};
use skypatrol_core::enums::GamePhase;
use skypatrol_core::events::GameEvent;
use skypatrol_core::state::*;
use skypatrol_core::types::{Pose, SimTime};

use crate::camera::CameraRig;
use crate::flight::FlightController;

/// Everything outside the ECS world that the snapshot reports.
pub struct SnapshotSources<'a> {
    pub time: &'a SimTime,
    pub phase: GamePhase,
    pub player: Entity,
    pub flight: &'a FlightController,
    pub autopilot: bool,
    pub camera: &'a CameraRig,
    pub score: &'a ScoreView,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    sources: &SnapshotSources<'_>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *sources.time,
        phase: sources.phase,
        player: build_player(world, sources),
        agents: build_agents(world),
        projectiles: build_projectiles(world),
        camera: sources.camera.view(),
        score: ScoreView {
            mission_time_secs: sources.time.elapsed_secs,
            ..sources.score.clone()
        },
        events,
    }
}

fn build_player(world: &World, sources: &SnapshotSources<'_>) -> PlayerView {
    let flight = sources.flight;
    let (pose, propeller_angle) = world
        .query_one::<(&Player, &Pose, &Propeller)>(sources.player)
        .ok()
        .and_then(|mut q| q.get().map(|(_, pose, prop)| (*pose, prop.angle)))
        .unwrap_or_default();

    PlayerView {
        pose,
        speed: flight.speed(),
        speed_normalized: flight.speed_normalized(),
        speed_band: flight.speed_band(),
        throttle: flight.throttle(),
        auto_pitch: flight.auto_pitch(),
        auto_bank: flight.auto_bank(),
        controls: flight.input(),
        autopilot: sources.autopilot,
        propeller_angle,
    }
}

fn build_agents(world: &World) -> Vec<AgentView> {
    let mut agents: Vec<AgentView> = world
        .query::<(&Agent, &Pose, &AgentState)>()
        .iter()
        .map(|(_, (agent, pose, state))| AgentView {
            id: agent.id,
            pose: *pose,
            behavior: state.behavior,
            pattern: state.patrol_pattern,
            patrol_angle: state.patrol_angle,
        })
        .collect();

    agents.sort_by_key(|a| a.id);
    agents
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| ProjectileView {
            position: p.position,
            direction: p.direction,
            lifetime_secs: p.lifetime_secs,
        })
        .collect()
}
