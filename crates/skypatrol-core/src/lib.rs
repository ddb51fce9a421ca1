//! Core types and definitions for the SKYPATROL simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! poses, components, commands, state snapshots, events, tuning and
//! the small amount of 3D math the simulation needs on top of `glam`.
//! It has no dependency on an ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod math;
pub mod state;
pub mod types;
