//! ECS systems that operate on the simulation world each tick.
//!
//! Player movement and snapshot building are free functions over the world.
//! Agent behavior and projectiles are small structs holding their tuning.

pub mod agent_ai;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
