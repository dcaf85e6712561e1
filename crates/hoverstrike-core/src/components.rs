//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior.
//! Game logic lives in controllers and systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Collision shape used by spatial queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Collider {
    /// Sphere centred on the entity position.
    Sphere { radius: f32 },
    /// Axis-aligned box centred on the entity position. Rotation is ignored.
    Box { half_extents: Vec3 },
}

/// Marks a surface the hover controller can push against.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Floor;

/// Marks the player's vehicle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerVehicle;

/// Marks a hostile entity that can be locked on to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Enemy;

/// Human-readable entity name (the prefab it was spawned from).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

/// Flag set on entities whose destruction has been requested.
/// The cleanup system despawns them at the end of the tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingDestroy;

/// Position recorded at the previous fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LastPosition(pub Vec3);
