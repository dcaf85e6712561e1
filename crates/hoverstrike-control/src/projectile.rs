//! Projectile state and pursuit steering.

use glam::Vec3;

use hoverstrike_core::config::ProjectileTuning;
use hoverstrike_core::enums::Layer;
use hoverstrike_core::types::Transform;

use crate::math::{look_rotation, rotate_towards};

/// A missile or bullet. Inactive while it sits in a weapon slot.
/// Generic over the entity handle `E` used for targets.
#[derive(Debug, Clone, Copy)]
pub struct Projectile<E> {
    pub tuning: ProjectileTuning,
    /// Weak target handle; the owner validates it before every use.
    pub target: Option<E>,
    /// Layer that overlap queries test against.
    pub hit_layer: Layer,
    pub lifetime_remaining: f32,
    pub active: bool,
}

/// How a projectile applies damage once something overlaps its hit radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    /// Only the first overlapping entity.
    Single,
    /// Every entity within the given radius.
    Splash(f32),
}

impl<E: Copy> Projectile<E> {
    pub fn new(tuning: ProjectileTuning) -> Self {
        Self {
            tuning,
            target: None,
            hit_layer: Layer::Default,
            lifetime_remaining: tuning.lifetime,
            active: false,
        }
    }

    /// Launch untargeted, detecting hits on `hit_layer`.
    pub fn arm(&mut self, hit_layer: Layer) {
        self.hit_layer = hit_layer;
        self.lifetime_remaining = self.tuning.lifetime;
        self.active = true;
    }

    /// Launch at a target; hits are detected on the target's layer.
    pub fn arm_at(&mut self, target: E, target_layer: Layer) {
        self.target = Some(target);
        self.arm(target_layer);
    }

    /// Count down the lifetime. Returns true once it has run out.
    pub fn age(&mut self, dt: f32) -> bool {
        self.lifetime_remaining -= dt;
        self.lifetime_remaining <= 0.0
    }

    pub fn impact(&self) -> Impact {
        if self.tuning.splash_size > self.tuning.hit_size {
            Impact::Splash(self.tuning.splash_size)
        } else {
            Impact::Single
        }
    }
}

/// Pure pursuit with a turn-rate cap: turn toward `target` by at most
/// `speed * dt` degrees, then advance `speed * dt` along the new heading.
pub fn steer(transform: &Transform, target: Option<Vec3>, speed: f32, dt: f32) -> Transform {
    let step = speed * dt;
    let rotation = match target {
        Some(target) => rotate_towards(
            transform.rotation,
            look_rotation(target - transform.position, Vec3::Y),
            step,
        ),
        None => transform.rotation,
    };
    Transform::new(transform.position + rotation * Vec3::Z * step, rotation)
}
