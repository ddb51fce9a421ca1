//! Simulation engine for SkyPatrol.
//!
//! Owns the hecs ECS world, runs the flight, agent, projectile and camera
//! systems at a fixed tick rate, and produces GameStateSnapshots for the
//! renderer.

pub mod autopilot;
pub mod camera;
pub mod engine;
pub mod flight;
pub mod systems;
pub mod world_setup;

pub use skypatrol_core as core;
pub use engine::SimulationEngine;
