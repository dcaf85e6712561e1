//! Collaborator contracts the simulation calls into.
//!
//! A host engine implements these for its own physics, asset and UI layers.
//! The simulation owns one value of each and passes it to the systems that
//! need it; nothing is reached through globals.

use glam::{Quat, Vec2, Vec3};
use hecs::{Entity, World};

use hoverstrike_core::config::Prefab;
use hoverstrike_core::enums::LayerMask;
use hoverstrike_core::types::Transform;

/// Result of a ray or sphere cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub entity: Entity,
    /// World-space contact point.
    pub point: Vec3,
    /// Distance travelled along the cast direction.
    pub distance: f32,
}

/// The vehicle's physical body.
pub trait RigidBody {
    /// Current world transform.
    fn transform(&self) -> Transform;
    /// Force through the centre of mass.
    fn apply_force(&mut self, force: Vec3);
    /// Force at a world point; produces torque about the centre of mass.
    fn apply_force_at(&mut self, force: Vec3, point: Vec3);
    fn apply_torque(&mut self, torque: Vec3);
    /// Zero linear and angular velocity.
    fn stop(&mut self);
    /// Advance the body by one fixed step. Hosts that integrate physics
    /// themselves keep this empty.
    fn step(&mut self, _dt: f32) {}
}

/// Collision queries against the scene.
///
/// `scene` is the simulation's entity store; backends that mirror the scene in
/// their own structures may ignore it.
pub trait SpatialQuery {
    /// Every hit along the ray, nearest first.
    fn raycast_all(
        &self,
        scene: &World,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<Hit>;

    /// First hit of a sphere swept along the ray.
    fn spherecast(
        &self,
        scene: &World,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<Hit>;

    /// Entities overlapping the sphere, nearest first.
    fn overlap_sphere(&self, scene: &World, center: Vec3, radius: f32, mask: LayerMask) -> Vec<Entity>;
}

/// Named spawn templates.
pub trait AssetProvider {
    fn get_prefab(&self, name: &str) -> Option<&Prefab>;
}

/// HUD presentation.
pub trait UiSink {
    /// Show the lock-on marker at a screen point.
    fn show_lock(&mut self, screen_point: Vec2);
    /// Show the free-aim reticle at a screen point.
    fn show_reticle(&mut self, screen_point: Vec2);
}

/// Entity creation and destruction.
pub trait EntityLifecycle {
    fn spawn(&mut self, prefab: &Prefab, position: Vec3, rotation: Quat) -> Entity;
    /// Request destruction. Repeated requests are ignored.
    fn destroy(&mut self, entity: Entity);
    /// Attach to `parent` keeping the current world pose, or detach with `None`.
    fn reparent(&mut self, entity: Entity, parent: Option<Entity>);
    /// Exists and has not been destroyed.
    fn is_alive(&self, entity: Entity) -> bool;
}
