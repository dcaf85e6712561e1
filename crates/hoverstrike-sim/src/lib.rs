//! Simulation engine for HOVERSTRIKE.
//!
//! Owns the hecs entity store, runs the flight and weapon systems in a fixed
//! order each frame, and produces `ArenaSnapshot`s. Physics, spatial queries,
//! assets and UI are reached through the collaborator traits in [`interfaces`];
//! [`sandbox`] provides headless implementations for tests and the runner.

pub mod arena;
pub mod assets;
pub mod components;
pub mod engine;
pub mod interfaces;
pub mod sandbox;
pub mod systems;
pub mod vehicle;
pub mod world_setup;

pub use engine::{SandboxEngine, SimulationEngine};
pub use hoverstrike_control as control;
pub use hoverstrike_core as core;

#[cfg(test)]
mod tests;
