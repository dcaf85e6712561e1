//! Player vehicle state that lives outside the entity store.
//!
//! The vehicle entity carries its transform, collider and health pool. The
//! controller state (aim rig, salvo, lock target, geometry) is held here by
//! the engine and handed to the systems each frame.

use glam::{Vec2, Vec3};
use hecs::Entity;

use hoverstrike_control::aim::AimRig;
use hoverstrike_control::salvo::{Salvo, SlotId};
use hoverstrike_core::commands::HeldDirections;
use hoverstrike_core::config::{HoverPointLayout, MountLayout};
use hoverstrike_core::types::Transform;

/// One weapon mount: its entity and where it hangs from the aim pivot.
#[derive(Debug, Clone)]
pub struct MountRig {
    pub entity: Entity,
    /// Offset from the aim pivot, in weapon-mount space.
    pub offset: Vec3,
    /// Slot offsets in the mount's local space.
    pub slots: Vec<Vec3>,
}

/// The player's vehicle.
#[derive(Debug)]
pub struct Vehicle {
    pub entity: Entity,
    pub hover_points: Vec<HoverPointLayout>,
    /// Local offset of the aim pivot the mounts hang from.
    pub aim_pivot: Vec3,
    pub mounts: Vec<MountRig>,
    pub aim: AimRig,
    pub salvo: Salvo<Entity>,
    /// Locked target. Weak: validate with `is_alive` before use.
    pub target: Option<Entity>,
    /// Input vector sampled this frame (x = right, y = forward).
    pub input: Vec2,
    pub held: HeldDirections,
    /// Starting health, reported once the entity is gone.
    pub max_health: i32,
}

impl Vehicle {
    /// Slot counts per mount, in layout order.
    pub fn slot_counts(layout: &[MountLayout]) -> Vec<usize> {
        layout.iter().map(|mount| mount.slots.len()).collect()
    }

    /// World pose of the weapon mount aim pivot for a vehicle at `vehicle`.
    pub fn pivot_transform(&self, vehicle: &Transform) -> Transform {
        Transform::new(vehicle.transform_point(self.aim_pivot), self.aim.weapon_mount)
    }

    /// World pose of mount `index`.
    pub fn mount_transform(&self, vehicle: &Transform, index: usize) -> Option<Transform> {
        let mount = self.mounts.get(index)?;
        Some(self.pivot_transform(vehicle).mul_transform(&Transform::from_position(mount.offset)))
    }

    /// World pose of a slot, facing along the mount.
    pub fn slot_transform(&self, vehicle: &Transform, id: SlotId) -> Option<Transform> {
        let offset = *self.mounts.get(id.mount)?.slots.get(id.slot)?;
        Some(self.mount_transform(vehicle, id.mount)?.mul_transform(&Transform::from_position(offset)))
    }
}
