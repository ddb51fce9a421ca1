//! Agent AI for SKYPATROL.
//!
//! Implements the per-agent patrol/avoidance state machine and the patrol
//! path generators as pure functions over plain data.

pub mod fsm;
pub mod patrol;

pub use skypatrol_core as core;

#[cfg(test)]
mod tests;
