//! Components that refer to other entities.

use hecs::Entity;

use hoverstrike_core::types::Transform;

/// Attachment to a parent entity. The child's `Transform` is recomputed from
/// the parent's each frame.
#[derive(Debug, Clone, Copy)]
pub struct Parent {
    pub entity: Entity,
    pub local: Transform,
}

/// Projectile targeting other entities.
pub type Missile = hoverstrike_control::projectile::Projectile<Entity>;
