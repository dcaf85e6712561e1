//! Systems run by the engine each frame.
//!
//! Systems are free functions over the arena and the vehicle state. They do
//! not own state; collaborators are passed in by the engine.

pub mod aim;
pub mod cleanup;
pub mod flight;
pub mod projectiles;
pub mod snapshot;
pub mod weapons;
