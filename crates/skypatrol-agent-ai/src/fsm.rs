//! Agent behavior finite state machine.
//!
//! Pure functions that pick one branch per agent per tick, in strict priority
//! order (avoid player, else avoid obstacles, else patrol), and compute the
//! resulting pose and behavior record. Branches are mutually exclusive; only
//! the obstacle branch blends several repulsion vectors.
//! Operates on plain data with no ECS dependency.

use glam::DVec3;

use skypatrol_core::components::AgentState;
use skypatrol_core::config::AgentTuning;
use skypatrol_core::enums::BehaviorState;
use skypatrol_core::math::{is_positive, look_rotation, safe_normalize, FrameRateMode, WORLD_UP};
use skypatrol_core::types::{ObstacleSnapshot, Pose};

use crate::patrol::patrol_target;

/// Input to the agent FSM for a single agent. All references are read-only
/// snapshots taken at tick start.
pub struct AgentContext<'a> {
    pub pose: Pose,
    pub state: &'a AgentState,
    pub player_position: DVec3,
    pub obstacles: &'a [ObstacleSnapshot],
    pub dt: f64,
}

/// Output from the agent FSM.
#[derive(Debug, Clone)]
pub struct AgentUpdate {
    pub pose: Pose,
    pub state: AgentState,
    /// The branch differs from the one that ran last tick.
    pub state_changed: bool,
}

/// Branch selected for this tick, with the data it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    AvoidPlayer {
        push: DVec3,
    },
    AvoidObstacles {
        /// Blended obstacle push, already scaled to its fixed magnitude.
        push: Option<DVec3>,
        /// Altitude band edge to ease toward.
        altitude_bound: Option<f64>,
    },
    Patrol,
}

impl Decision {
    pub fn behavior(&self) -> BehaviorState {
        match self {
            Decision::AvoidPlayer { .. } => BehaviorState::AvoidingPlayer,
            Decision::AvoidObstacles { .. } => BehaviorState::AvoidingObstacle,
            Decision::Patrol => BehaviorState::Patrolling,
        }
    }
}

/// Pick the branch for one agent.
pub fn decide(ctx: &AgentContext<'_>, tuning: &AgentTuning) -> Decision {
    let position = ctx.pose.position;

    if let Some(push) = player_repulsion(position, ctx.player_position, tuning.player_avoidance_radius)
    {
        return Decision::AvoidPlayer { push };
    }

    let push = obstacle_repulsion(position, ctx.obstacles, tuning);
    let altitude_bound = altitude_correction(position.y, tuning.min_height, tuning.max_height);
    if push.is_some() || altitude_bound.is_some() {
        return Decision::AvoidObstacles {
            push,
            altitude_bound,
        };
    }

    Decision::Patrol
}

/// Linear repulsion away from the player: zero at the radius edge, growing
/// toward the centre. `None` outside the radius.
pub fn player_repulsion(agent: DVec3, player: DVec3, radius: f64) -> Option<DVec3> {
    let offset = agent - player;
    let distance = offset.length();
    if distance < radius {
        Some(safe_normalize(offset) * (radius - distance))
    } else {
        None
    }
}

/// Summed planar repulsion from every obstacle the agent is too close to and
/// not safely above, normalized to the fixed push magnitude.
pub fn obstacle_repulsion(
    agent: DVec3,
    obstacles: &[ObstacleSnapshot],
    tuning: &AgentTuning,
) -> Option<DVec3> {
    let radius = tuning.obstacle_avoidance_radius;
    let mut sum = DVec3::ZERO;
    let mut triggered = false;

    for obstacle in obstacles {
        let distance = obstacle.planar_distance_to(agent);
        if distance < radius && agent.y < obstacle.approximate_height + tuning.obstacle_clearance {
            let away = DVec3::new(agent.x - obstacle.position.x, 0.0, agent.z - obstacle.position.z);
            sum += safe_normalize(away) * (radius - distance);
            triggered = true;
        }
    }

    triggered.then(|| safe_normalize(sum) * tuning.obstacle_push)
}

/// Altitude band edge the agent should return to, if it has left the band.
pub fn altitude_correction(altitude: f64, min_height: f64, max_height: f64) -> Option<f64> {
    if altitude < min_height {
        Some(min_height)
    } else if altitude > max_height {
        Some(max_height)
    } else {
        None
    }
}

/// Evaluate the FSM for one agent. Returns the updated pose and record.
pub fn evaluate(ctx: &AgentContext<'_>, tuning: &AgentTuning, frame: FrameRateMode) -> AgentUpdate {
    let decision = decide(ctx, tuning);
    let ease = frame.ease_factor(tuning.smoothing_factor, ctx.dt);

    let mut pose = ctx.pose;
    let mut state = ctx.state.clone();
    state.avoidance_vector = DVec3::ZERO;

    match decision {
        Decision::AvoidPlayer { push } => {
            state.avoidance_vector = push;
            state.target_position = pose.position + push;
            pose.position = pose.position.lerp(state.target_position, ease);

            // Keep facing the threat while backing off.
            state.target_rotation = look_rotation(pose.position, ctx.player_position, WORLD_UP);
            pose.orientation = pose.orientation.slerp(state.target_rotation, ease).normalize();
        }
        Decision::AvoidObstacles {
            push,
            altitude_bound,
        } => {
            state.target_position = pose.position;
            if let Some(push) = push {
                state.avoidance_vector = push;
                state.target_position = pose.position + push;
                pose.position = pose.position.lerp(state.target_position, ease);
            }
            if let Some(bound) = altitude_bound {
                state.target_position.y = bound;
                pose.position.y += (bound - pose.position.y) * ease;
            }
        }
        Decision::Patrol => {
            if is_positive(ctx.dt) {
                state.patrol_angle += state.patrol_speed * ctx.dt;
            }
            let target = patrol_target(
                state.patrol_pattern,
                state.patrol_center,
                state.patrol_radius,
                state.patrol_height,
                state.patrol_angle,
            );
            state.target_position = target;
            pose.position = pose.position.lerp(target, ease);

            let heading = safe_normalize(target - pose.position);
            if heading != DVec3::ZERO {
                state.target_rotation =
                    look_rotation(pose.position, pose.position + heading, WORLD_UP);
                pose.orientation = pose.orientation.slerp(state.target_rotation, ease).normalize();
            }
        }
    }

    let behavior = decision.behavior();
    let state_changed = behavior != ctx.state.behavior;
    state.behavior = behavior;
    state.is_avoiding = behavior != BehaviorState::Patrolling;

    AgentUpdate {
        pose,
        state,
        state_changed,
    }
}
