//! Arena state snapshot: the complete visible state produced after each tick.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::{HudIndicator, SalvoPhase, SimPhase};
use crate::events::GameEvent;
use crate::types::SimTime;

/// Complete arena state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub vehicle: VehicleView,
    pub camera: CameraView,
    pub salvo: SalvoView,
    pub hud: Option<HudIndicator>,
    /// Locked target, if any.
    pub target: Option<u64>,
    pub projectiles: Vec<ProjectileView>,
    /// Every entity with a health pool other than the vehicle.
    pub combatants: Vec<CombatantView>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleView {
    pub position: Vec3,
    /// Position at the start of the last fixed step.
    pub last_position: Vec3,
    pub rotation: Quat,
    /// Angle between the vehicle's up axis and world up (degrees).
    pub tilt_degrees: f32,
    pub health: i32,
    pub max_health: i32,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Vec3,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalvoView {
    pub phase: SalvoPhase,
    pub loaded: usize,
    pub capacity: usize,
    pub cooldown_remaining: Option<f32>,
    pub reload_remaining: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub entity: u64,
    pub position: Vec3,
    pub target: Option<u64>,
    pub lifetime_remaining: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantView {
    pub entity: u64,
    pub name: String,
    pub position: Vec3,
    pub health: i32,
    pub max_health: i32,
}
