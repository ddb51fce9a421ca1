//! Projectile system: spawning, ballistic advance, expiry and agent hits.
//!
//! The manager is the only code that creates, moves or despawns `Projectile`
//! entities.

use glam::DVec3;
use hecs::{Entity, World};

use skypatrol_core::components::{Agent, Projectile};
use skypatrol_core::config::ProjectileTuning;
use skypatrol_core::math::is_positive;
use skypatrol_core::types::Pose;

/// Squared direction lengths below this are refused.
const MIN_DIRECTION_LENGTH_SQ: f64 = 1e-12;

/// Remaining lifetimes at or below this count as expired.
const LIFETIME_EPSILON: f64 = 1e-9;

/// A projectile struck an agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileHit {
    pub agent: Entity,
    pub agent_id: u32,
    /// Where the projectile was when it hit.
    pub position: DVec3,
}

#[derive(Debug, Clone)]
pub struct ProjectileManager {
    tuning: ProjectileTuning,
}

impl ProjectileManager {
    pub fn new(tuning: ProjectileTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &ProjectileTuning {
        &self.tuning
    }

    /// Spawn one projectile at `origin` heading along `direction`.
    ///
    /// `direction` is expected to be unit length and is stored as given. A
    /// zero or non-finite direction, or a full magazine, refuses the shot.
    pub fn fire(&self, world: &mut World, origin: DVec3, direction: DVec3) -> Option<Entity> {
        if !origin.is_finite()
            || !direction.is_finite()
            || direction.length_squared() < MIN_DIRECTION_LENGTH_SQ
        {
            log::warn!("refusing to fire with degenerate direction {direction}");
            return None;
        }
        if self.count(world) >= self.tuning.max_live {
            log::debug!("projectile cap {} reached", self.tuning.max_live);
            return None;
        }

        Some(world.spawn((Projectile {
            position: origin,
            direction,
            speed: self.tuning.speed,
            lifetime_secs: self.tuning.lifetime_secs,
        },)))
    }

    /// Advance every projectile by `dt` and remove the expired ones.
    /// Uses a pre-allocated buffer to avoid per-tick allocation.
    pub fn update(&self, world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) {
        if !is_positive(dt) {
            return;
        }
        despawn_buffer.clear();

        for (entity, projectile) in world.query_mut::<&mut Projectile>() {
            projectile.position += projectile.direction * projectile.speed * dt;
            projectile.lifetime_secs -= dt;
            if projectile.lifetime_secs <= LIFETIME_EPSILON {
                despawn_buffer.push(entity);
            }
        }

        for entity in despawn_buffer.drain(..) {
            let _ = world.despawn(entity);
        }
    }

    /// Find the first projectile within the hit radius of any agent, remove
    /// it, and report the agent. At most one hit is resolved per call.
    pub fn check_collisions(&self, world: &mut World) -> Option<ProjectileHit> {
        let hit = {
            let mut agents = world.query::<(&Agent, &Pose)>();
            let agents: Vec<(Entity, u32, DVec3)> = agents
                .iter()
                .map(|(entity, (agent, pose))| (entity, agent.id, pose.position))
                .collect();

            let mut projectiles = world.query::<&Projectile>();
            let found = projectiles.iter().find_map(|(projectile_entity, projectile)| {
                agents
                    .iter()
                    .find(|(_, _, agent_pos)| {
                        projectile.position.distance(*agent_pos) < self.tuning.hit_radius
                    })
                    .map(|&(agent, agent_id, _)| {
                        (
                            projectile_entity,
                            ProjectileHit {
                                agent,
                                agent_id,
                                position: projectile.position,
                            },
                        )
                    })
            });
            found
        };

        let (projectile_entity, hit) = hit?;
        let _ = world.despawn(projectile_entity);
        Some(hit)
    }

    /// Number of live projectiles.
    pub fn count(&self, world: &World) -> usize {
        world.query::<&Projectile>().iter().count()
    }
}
