//! Headless collaborator implementations.
//!
//! `SandboxBody` is a semi-implicit Euler rigid body with scalar inertia and
//! linear drag. `ColliderQuery` answers spatial queries by brute force over
//! the `Collider` components in the entity store. `HudRecorder` remembers what
//! the HUD was told to show. None of this is meant to be a physics engine.

use glam::{Quat, Vec2, Vec3};
use hecs::{Entity, World};

use hoverstrike_core::components::{Collider, PendingDestroy};
use hoverstrike_core::constants::GRAVITY;
use hoverstrike_core::enums::{HudIndicator, Layer, LayerMask};
use hoverstrike_core::types::Transform;

use crate::interfaces::{Hit, RigidBody, SpatialQuery, UiSink};

/// Minimal rigid body.
#[derive(Debug, Clone)]
pub struct SandboxBody {
    pub transform: Transform,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub mass: f32,
    /// Scalar moment of inertia.
    pub inertia: f32,
    /// Velocity fraction lost per second.
    pub linear_drag: f32,
    pub angular_drag: f32,
    pub use_gravity: bool,
    /// Ignores forces and never moves on its own.
    pub kinematic: bool,
    force: Vec3,
    torque: Vec3,
}

impl SandboxBody {
    pub fn new(transform: Transform, mass: f32) -> Self {
        Self {
            transform,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass,
            inertia: mass,
            linear_drag: 1.0,
            angular_drag: 2.0,
            use_gravity: true,
            kinematic: false,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
        }
    }

    pub fn kinematic(transform: Transform) -> Self {
        Self {
            kinematic: true,
            use_gravity: false,
            ..Self::new(transform, 1.0)
        }
    }

    /// Forces accumulated since the last step.
    pub fn pending_force(&self) -> Vec3 {
        self.force
    }

    /// Torque accumulated since the last step.
    pub fn pending_torque(&self) -> Vec3 {
        self.torque
    }
}

impl RigidBody for SandboxBody {
    fn transform(&self) -> Transform {
        self.transform
    }

    fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    fn apply_force_at(&mut self, force: Vec3, point: Vec3) {
        self.force += force;
        self.torque += (point - self.transform.position).cross(force);
    }

    fn apply_torque(&mut self, torque: Vec3) {
        self.torque += torque;
    }

    fn stop(&mut self) {
        self.linear_velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    fn step(&mut self, dt: f32) {
        let force = std::mem::take(&mut self.force);
        let torque = std::mem::take(&mut self.torque);
        if self.kinematic {
            return;
        }

        let mut acceleration = force / self.mass;
        if self.use_gravity {
            acceleration.y -= GRAVITY;
        }
        self.linear_velocity += acceleration * dt;
        self.linear_velocity /= 1.0 + self.linear_drag * dt;
        self.transform.position += self.linear_velocity * dt;

        self.angular_velocity += torque / self.inertia * dt;
        self.angular_velocity /= 1.0 + self.angular_drag * dt;
        let spin = Quat::from_scaled_axis(self.angular_velocity * dt);
        self.transform.rotation = (spin * self.transform.rotation).normalize();
    }
}

/// Brute-force queries over `(Transform, Collider, Layer)` entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColliderQuery;

impl ColliderQuery {
    fn colliders(scene: &World, mask: LayerMask) -> Vec<(Entity, Vec3, Collider)> {
        let mut query = scene.query::<(&Transform, &Collider, &Layer, Option<&PendingDestroy>)>();
        query
            .iter()
            .filter(|(_, (_, _, layer, destroyed))| mask.contains(**layer) && destroyed.is_none())
            .map(|(entity, (transform, collider, _, _))| (entity, transform.position, *collider))
            .collect()
    }
}

impl SpatialQuery for ColliderQuery {
    fn raycast_all(
        &self,
        scene: &World,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<Hit> {
        let Some(direction) = direction.try_normalize() else {
            return Vec::new();
        };
        let mut hits: Vec<Hit> = Self::colliders(scene, mask)
            .into_iter()
            .filter_map(|(entity, center, collider)| {
                let distance = ray_entry(origin, direction, center, collider, 0.0)?;
                (distance <= max_distance).then(|| Hit {
                    entity,
                    point: origin + direction * distance,
                    distance,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn spherecast(
        &self,
        scene: &World,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<Hit> {
        let direction = direction.try_normalize()?;
        Self::colliders(scene, mask)
            .into_iter()
            .filter_map(|(entity, center, collider)| {
                let distance = ray_entry(origin, direction, center, collider, radius)?;
                if distance > max_distance {
                    return None;
                }
                let sweep_center = origin + direction * distance;
                Some(Hit {
                    entity,
                    point: closest_point(center, collider, sweep_center),
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn overlap_sphere(&self, scene: &World, center: Vec3, radius: f32, mask: LayerMask) -> Vec<Entity> {
        let mut overlaps: Vec<(f32, Entity)> = Self::colliders(scene, mask)
            .into_iter()
            .filter_map(|(entity, position, collider)| {
                let distance = closest_point(position, collider, center).distance(center);
                (distance <= radius).then_some((position.distance(center), entity))
            })
            .collect();
        overlaps.sort_by(|a, b| a.0.total_cmp(&b.0));
        overlaps.into_iter().map(|(_, entity)| entity).collect()
    }
}

/// Distance along a unit ray to the collider inflated by `inflate`.
/// Rays starting inside the shape report nothing.
fn ray_entry(origin: Vec3, direction: Vec3, center: Vec3, collider: Collider, inflate: f32) -> Option<f32> {
    match collider {
        Collider::Sphere { radius } => {
            let radius = radius + inflate;
            let offset = origin - center;
            let c = offset.length_squared() - radius * radius;
            if c <= 0.0 {
                return None;
            }
            let b = offset.dot(direction);
            let discriminant = b * b - c;
            if b > 0.0 || discriminant < 0.0 {
                return None;
            }
            Some(-b - discriminant.sqrt())
        }
        Collider::Box { half_extents } => {
            let half = half_extents + Vec3::splat(inflate);
            let min = center - half;
            let max = center + half;
            if origin.cmpge(min).all() && origin.cmple(max).all() {
                return None;
            }
            let mut near = f32::NEG_INFINITY;
            let mut far = f32::INFINITY;
            for axis in 0..3 {
                if direction[axis].abs() < f32::EPSILON {
                    if origin[axis] < min[axis] || origin[axis] > max[axis] {
                        return None;
                    }
                    continue;
                }
                let t1 = (min[axis] - origin[axis]) / direction[axis];
                let t2 = (max[axis] - origin[axis]) / direction[axis];
                near = near.max(t1.min(t2));
                far = far.min(t1.max(t2));
            }
            (near <= far && near >= 0.0).then_some(near)
        }
    }
}

/// Point on the collider surface (or inside it) closest to `point`.
fn closest_point(center: Vec3, collider: Collider, point: Vec3) -> Vec3 {
    match collider {
        Collider::Sphere { radius } => {
            let offset = point - center;
            if offset.length() <= radius {
                point
            } else {
                center + offset.normalize() * radius
            }
        }
        Collider::Box { half_extents } => point.clamp(center - half_extents, center + half_extents),
    }
}

/// Records what the HUD was told to show.
#[derive(Debug, Clone, Default)]
pub struct HudRecorder {
    pub indicator: Option<HudIndicator>,
    pub locks_shown: usize,
    pub reticles_shown: usize,
}

impl UiSink for HudRecorder {
    fn show_lock(&mut self, screen_point: Vec2) {
        self.indicator = Some(HudIndicator::Lock {
            x: screen_point.x,
            y: screen_point.y,
        });
        self.locks_shown += 1;
    }

    fn show_reticle(&mut self, screen_point: Vec2) {
        self.indicator = Some(HudIndicator::Reticle {
            x: screen_point.x,
            y: screen_point.y,
        });
        self.reticles_shown += 1;
    }
}
