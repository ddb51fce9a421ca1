//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless
//! (no renderer dependency), enabling deterministic testing.

use std::collections::VecDeque;
use std::time::Instant;

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skypatrol_core::commands::PlayerCommand;
use skypatrol_core::config::SimConfig;
use skypatrol_core::constants::DT;
use skypatrol_core::enums::{GamePhase, HoverClock};
use skypatrol_core::events::GameEvent;
use skypatrol_core::math::{is_positive, safe_normalize, WORLD_UP};
use skypatrol_core::state::{GameStateSnapshot, ScoreView};
use skypatrol_core::types::{InputSnapshot, ObstacleSnapshot, Pose, SimTime};

use crate::autopilot::Autopilot;
use crate::camera::CameraRig;
use crate::flight::FlightController;
use crate::systems;
use crate::systems::agent_ai::AgentBehavior;
use crate::systems::projectiles::ProjectileManager;
use crate::systems::snapshot::SnapshotSources;
use crate::world_setup;

/// Cooldown remainders below this count as elapsed.
const COOLDOWN_EPSILON: f64 = 1e-9;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    started: Instant,

    player: Entity,
    flight: FlightController,
    autopilot: Autopilot,
    autopilot_enabled: bool,
    keys: InputSnapshot,

    agents: AgentBehavior,
    projectiles: ProjectileManager,
    camera: CameraRig,
    obstacles: Vec<ObstacleSnapshot>,

    fire_cooldown_remaining: f64,
    score: ScoreView,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The world is
    /// populated immediately; systems run once `Start` is processed.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let player = world_setup::spawn_player(&mut world);
        let spawn = world_setup::player_spawn_pose();
        world_setup::spawn_agents(&mut world, &mut rng, &config.agents);

        let flight = FlightController::with_orientation(config.flight.clone(), spawn.orientation);

        Self {
            player,
            flight,
            autopilot: Autopilot::new(config.autopilot_tuning.clone()),
            autopilot_enabled: config.autopilot,
            keys: InputSnapshot::default(),
            agents: AgentBehavior::new(config.agents.clone(), config.frame_rate),
            projectiles: ProjectileManager::new(config.projectiles.clone()),
            camera: CameraRig::new(config.camera.clone(), config.frame_rate),
            obstacles: Vec::new(),
            fire_cooldown_remaining: 0.0,
            score: ScoreView::default(),
            world,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            started: Instant::now(),
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Replace the obstacle list the agents avoid.
    pub fn set_obstacles(&mut self, obstacles: Vec<ObstacleSnapshot>) {
        self.obstacles = obstacles;
    }

    /// Advance the simulation by one fixed tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.advance(DT)
    }

    /// Advance the simulation by `dt` seconds. A non-positive or non-finite
    /// `dt` only applies queued commands.
    pub fn advance(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active && is_positive(dt) {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        self.snapshot()
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn player_pose(&self) -> Pose {
        self.world
            .get::<&Pose>(self.player)
            .map(|pose| *pose)
            .unwrap_or_default()
    }

    pub fn flight(&self) -> &FlightController {
        &self.flight
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn obstacles(&self) -> &[ObstacleSnapshot] {
        &self.obstacles
    }

    pub fn autopilot_enabled(&self) -> bool {
        self.autopilot_enabled
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.count(&self.world)
    }

    pub fn fire_cooldown_remaining(&self) -> f64 {
        self.fire_cooldown_remaining
    }

    pub fn score(&self) -> &ScoreView {
        &self.score
    }

    /// Mutable world access for tests that stage entities directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Place the player craft (tests only).
    #[cfg(test)]
    pub fn set_player_pose(&mut self, pose: Pose) {
        if let Ok(mut current) = self.world.get::<&mut Pose>(self.player) {
            *current = pose;
        }
        self.flight = FlightController::with_orientation(self.config.flight.clone(), pose.orientation);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Start => {
                if self.phase == GamePhase::Ready {
                    log::info!(
                        "mission start: seed {}, {} agents, {} obstacles",
                        self.config.seed,
                        self.config.agents.count,
                        self.obstacles.len()
                    );
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetThrottle { amount } => self.flight.set_throttle(amount),
            PlayerCommand::SetAutoPitch { amount } => self.flight.set_auto_pitch(amount),
            PlayerCommand::SetAutoBanking { amount } => self.flight.set_auto_banking(amount),
            PlayerCommand::SetInput { input } => self.keys = input,
            PlayerCommand::SetAutopilot { enabled } => {
                if enabled != self.autopilot_enabled {
                    log::info!("autopilot {}", if enabled { "engaged" } else { "disengaged" });
                }
                self.autopilot_enabled = enabled;
                if !enabled {
                    self.flight.set_auto_banking(0.0);
                    self.flight.set_auto_pitch(0.0);
                }
            }
            PlayerCommand::Fire => self.try_fire(),
            PlayerCommand::ToggleCameraMode => {
                let mode = self.camera.toggle_mode();
                self.events.push(GameEvent::CameraModeChanged { mode });
            }
            PlayerCommand::SetCameraMode { mode } => {
                if mode != self.camera.mode() {
                    self.camera.set_mode(mode);
                    self.events.push(GameEvent::CameraModeChanged { mode });
                }
            }
        }
    }

    /// Fire from the nose if the gun is ready.
    fn try_fire(&mut self) {
        if self.phase != GamePhase::Active {
            return;
        }
        if self.fire_cooldown_remaining > COOLDOWN_EPSILON {
            log::trace!("fire dropped, cooldown {:.3}s", self.fire_cooldown_remaining);
            return;
        }

        let tuning = self.projectiles.tuning();
        let pose = self.player_pose();
        let origin = pose.transform_point(tuning.muzzle_offset);
        let direction = safe_normalize(pose.forward() + WORLD_UP * tuning.muzzle_lift);

        if self.projectiles.fire(&mut self.world, origin, direction).is_some() {
            self.fire_cooldown_remaining = self.projectiles.tuning().fire_cooldown_secs;
            self.score.shots_fired += 1;
            self.events.push(GameEvent::ProjectileFired { position: origin });
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let fraction = self.config.frame_rate.tick_fraction(dt);

        // 1. Inputs + autopilot
        self.flight.update_inputs(&self.keys, dt);
        if self.autopilot_enabled {
            let command = self.autopilot.steer(&self.player_pose(), dt);
            self.flight.set_auto_banking(command.bank);
            self.flight.set_auto_pitch(command.pitch);
            self.flight.set_throttle(command.throttle);
        } else {
            self.flight.apply_manual_throttle(dt);
        }

        // 2. Flight physics
        let output = self.flight.update_physics(dt);

        // 3. Player movement
        systems::movement::run(&mut self.world, &output, fraction);
        let bank = (self.flight.input().roll + self.flight.auto_bank()).clamp(-1.0, 1.0);
        systems::movement::spin_propeller(&mut self.world, output.speed, bank, fraction);
        let player_position = self.player_pose().position;

        // 4. Agents
        let hover_time = match self.config.hover_clock {
            HoverClock::Simulation => self.time.elapsed_secs + dt,
            HoverClock::Wall => self.started.elapsed().as_secs_f64(),
        };
        self.agents.update(
            &mut self.world,
            player_position,
            &self.obstacles,
            dt,
            hover_time,
        );

        // 5. Projectiles
        self.projectiles
            .update(&mut self.world, dt, &mut self.despawn_buffer);

        // 6. Collisions (first hit only) + relocation
        if let Some(hit) = self.projectiles.check_collisions(&mut self.world) {
            self.handle_hit(hit.agent, hit.agent_id, hit.position);
        }

        // 7. Camera
        let pose = self.player_pose();
        self.camera.update(&pose, dt);

        // 8. Gun cooldown
        self.fire_cooldown_remaining = (self.fire_cooldown_remaining - dt).max(0.0);
    }

    fn handle_hit(&mut self, agent: Entity, agent_id: u32, position: DVec3) {
        self.score.agents_hit += 1;
        self.events
            .push(GameEvent::AgentDestroyed { agent_id, position });
        log::info!("agent {agent_id} hit at {position}");

        if let Some(new_position) = self.agents.relocate(&mut self.world, agent, &mut self.rng) {
            log::info!("agent {agent_id} relocated to {new_position}");
            self.events.push(GameEvent::AgentRelocated {
                agent_id,
                position: new_position,
            });
        }
    }

    fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        let sources = SnapshotSources {
            time: &self.time,
            phase: self.phase,
            player: self.player,
            flight: &self.flight,
            autopilot: self.autopilot_enabled,
            camera: &self.camera,
            score: &self.score,
        };
        systems::snapshot::build_snapshot(&self.world, &sources, events)
    }
}
