//! Pilot input and simulation commands.
//!
//! `InputFrame` is sampled once per frame; `SimCommand`s are queued and
//! processed at the next tick boundary.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Movement keys held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldDirections {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    /// Input vector with x = right and y = forward, each in -1..1.
    /// Left wins over right and forward over back when both are held.
    pub fn input_vector(&self) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.forward {
            1.0
        } else if self.back {
            -1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}

/// Everything the pilot did during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Pointer movement since the last frame (degrees of yaw / pitch).
    pub pointer_delta: Vec2,
    pub held: HeldDirections,
    /// Fire button held.
    pub fire: bool,
    /// Reload key pressed this frame.
    pub reload: bool,
}

/// Simulation-level commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = frozen).
    SetTimeScale { scale: f32 },
    /// Zero the vehicle's linear and angular velocity.
    StopVehicle,
    /// Spawn a prefab by name at a world position.
    SpawnPrefab { prefab: String, position: Vec3 },
}
