//! Agent behavior system: runs the agent state machine for every agent each
//! tick and handles relocation after a hit.
//!
//! Decisions come from `skypatrol-agent-ai`; this module only reads and writes
//! ECS components around it.

use std::f64::consts::TAU;

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skypatrol_core::components::{Agent, AgentState};
use skypatrol_core::config::AgentTuning;
use skypatrol_core::enums::BehaviorState;
use skypatrol_core::math::{is_positive, FrameRateMode};
use skypatrol_core::types::{ObstacleSnapshot, Pose};

use skypatrol_agent_ai::fsm::{evaluate, AgentContext};
use skypatrol_agent_ai::patrol::hover_offset;

use crate::world_setup::random_point_in;

#[derive(Debug, Clone)]
pub struct AgentBehavior {
    tuning: AgentTuning,
    frame: FrameRateMode,
}

impl AgentBehavior {
    pub fn new(tuning: AgentTuning, frame: FrameRateMode) -> Self {
        Self { tuning, frame }
    }

    pub fn tuning(&self) -> &AgentTuning {
        &self.tuning
    }

    /// Step every agent. `player_position` and `obstacles` are snapshots taken
    /// at tick start; `hover_time` is the clock driving the hover bob.
    pub fn update(
        &self,
        world: &mut World,
        player_position: DVec3,
        obstacles: &[ObstacleSnapshot],
        dt: f64,
        hover_time: f64,
    ) {
        if !is_positive(dt) {
            return;
        }

        for (_entity, (agent, pose, state)) in
            world.query_mut::<(&Agent, &mut Pose, &mut AgentState)>()
        {
            let ctx = AgentContext {
                pose: *pose,
                state: &*state,
                player_position,
                obstacles,
                dt,
            };
            let update = evaluate(&ctx, &self.tuning, self.frame);

            if update.state_changed {
                log::debug!(
                    "agent {} {:?} -> {:?}",
                    agent.id,
                    state.behavior,
                    update.state.behavior
                );
            }

            *pose = update.pose;
            *state = update.state;

            pose.position.y += hover_offset(
                hover_time,
                state.phase,
                self.tuning.hover_amplitude,
                self.tuning.hover_frequency,
            );
        }
    }

    /// Teleport a struck agent to a random point in the relocation volume and
    /// restart its patrol at a random angle. Returns the new position, or
    /// `None` if `entity` is not an agent.
    pub fn relocate(&self, world: &mut World, entity: Entity, rng: &mut ChaCha8Rng) -> Option<DVec3> {
        let (pose, state) = world
            .query_one_mut::<(&mut Pose, &mut AgentState)>(entity)
            .ok()?;

        let position = random_point_in(rng, self.tuning.relocate_min, self.tuning.relocate_max);
        pose.position = position;
        state.patrol_angle = rng.gen::<f64>() * TAU;
        state.behavior = BehaviorState::Patrolling;
        state.is_avoiding = false;
        state.avoidance_vector = DVec3::ZERO;
        state.target_position = position;

        Some(position)
    }
}
