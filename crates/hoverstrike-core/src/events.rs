//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

/// Something noteworthy that happened during a tick.
/// Entity ids are the entity store's stable bit representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Weapon mount query started hitting an enemy.
    TargetLocked { entity: u64 },
    /// Weapon mount query stopped hitting the previous target.
    TargetLost,
    /// A missile left its slot.
    MissileFired {
        projectile: u64,
        mount: usize,
        slot: usize,
    },
    /// Reload timer started.
    ReloadStarted { duration_secs: f32 },
    /// Empty slots were refilled.
    ReloadComplete { loaded: usize },
    /// A projectile resolved a hit against one or more entities.
    ProjectileHit { projectile: u64, damaged: usize },
    /// A projectile ran out of lifetime.
    ProjectileExpired { projectile: u64 },
    /// A health pool was modified.
    HealthChanged { entity: u64, value: i32, max: i32 },
    /// An entity was destroyed.
    EntityDestroyed { entity: u64 },
}
