//! Flight and weapon control for HOVERSTRIKE.
//!
//! Hover lift, tilt stabilization, drive thrust, aim smoothing, the weapon
//! salvo state machine, projectile steering and health pools.
//! No ECS dependency: operates on plain data and is generic over entity handles.

pub mod aim;
pub mod drive;
pub mod health;
pub mod hover;
pub mod math;
pub mod projectile;
pub mod salvo;
pub mod stabilizer;

pub use hoverstrike_core as core;
