//! Projectile system: pursuit, hit detection and damage resolution.

use hecs::Entity;

use hoverstrike_control::projectile::{self, Impact};
use hoverstrike_core::components::PendingDestroy;
use hoverstrike_core::events::GameEvent;
use hoverstrike_core::types::Transform;

use crate::arena::{entity_id, Arena};
use crate::components::{Missile, Parent};
use crate::interfaces::{EntityLifecycle, SpatialQuery};

/// Advance every launched projectile by `dt`.
pub fn run(arena: &mut Arena, query: &impl SpatialQuery, dt: f32) {
    let launched: Vec<(Entity, Missile, Transform)> = arena
        .world()
        .query::<(&Missile, &Transform, Option<&Parent>, Option<&PendingDestroy>)>()
        .iter()
        .filter(|(_, (missile, _, parent, destroyed))| missile.active && parent.is_none() && destroyed.is_none())
        .map(|(entity, (missile, transform, _, _))| (entity, *missile, *transform))
        .collect();

    for (entity, mut missile, transform) in launched {
        // A projectile may have been destroyed earlier in this pass.
        if !arena.is_alive(entity) {
            continue;
        }

        let target_position = match missile.target {
            Some(target) if arena.is_alive(target) => arena.transform(target).map(|t| t.position),
            _ => None,
        };
        if target_position.is_none() {
            missile.target = None;
        }

        let moved = projectile::steer(&transform, target_position, missile.tuning.speed, dt);
        arena.set_transform(entity, moved);

        let hits = overlapping(arena, query, entity, moved, missile.tuning.hit_size, &missile);
        if !hits.is_empty() {
            let damaged = match missile.impact() {
                Impact::Splash(radius) => {
                    let mut damaged = 0;
                    for victim in overlapping(arena, query, entity, moved, radius, &missile) {
                        if arena.modify_health(victim, -missile.tuning.damage).is_some() {
                            damaged += 1;
                        }
                    }
                    damaged
                }
                Impact::Single => usize::from(arena.modify_health(hits[0], -missile.tuning.damage).is_some()),
            };
            tracing::debug!(projectile = entity_id(entity), damaged, "projectile hit");
            arena.push_event(GameEvent::ProjectileHit {
                projectile: entity_id(entity),
                damaged,
            });
            arena.destroy(entity);
            continue;
        }

        if missile.age(dt) {
            tracing::trace!(projectile = entity_id(entity), "projectile expired");
            arena.push_event(GameEvent::ProjectileExpired {
                projectile: entity_id(entity),
            });
            arena.destroy(entity);
            continue;
        }

        if let Ok(mut state) = arena.world_mut().get::<&mut Missile>(entity) {
            *state = missile;
        }
    }
}

/// Living entities on the projectile's hit layer within `radius`, nearest first.
fn overlapping(
    arena: &Arena,
    query: &impl SpatialQuery,
    projectile: Entity,
    transform: Transform,
    radius: f32,
    missile: &Missile,
) -> Vec<Entity> {
    query
        .overlap_sphere(arena.world(), transform.position, radius, missile.hit_layer.into())
        .into_iter()
        .filter(|&entity| entity != projectile && arena.is_alive(entity))
        .collect()
}
