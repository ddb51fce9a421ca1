//! SkyPatrol headless host.
//!
//! Wires the simulation engine to a game-loop thread, a procedural city that
//! supplies obstacles, and a small command/snapshot API for front ends.

pub mod city;
pub mod game_loop;
pub mod host;
pub mod logging;
pub mod state;

pub use skypatrol_core as core;
