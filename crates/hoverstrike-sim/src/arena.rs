//! Entity store: the hecs world plus deferred destruction and event capture.

use glam::{Quat, Vec3};
use hecs::{Entity, EntityBuilder, World};

use hoverstrike_control::health::{HealthOutcome, HealthPool};
use hoverstrike_core::components::{Enemy, Floor, Name, PendingDestroy};
use hoverstrike_core::config::Prefab;
use hoverstrike_core::enums::Layer;
use hoverstrike_core::events::GameEvent;
use hoverstrike_core::types::Transform;

use crate::components::{Missile, Parent};
use crate::interfaces::EntityLifecycle;

/// Stable id used in events and snapshots.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// The simulation's entity store.
pub struct Arena {
    world: World,
    events: Vec<GameEvent>,
    despawn_buffer: Vec<Entity>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn transform(&self, entity: Entity) -> Option<Transform> {
        self.world.get::<&Transform>(entity).ok().map(|t| *t)
    }

    pub fn set_transform(&mut self, entity: Entity, transform: Transform) {
        if let Ok(mut t) = self.world.get::<&mut Transform>(entity) {
            *t = transform;
        }
    }

    pub fn layer(&self, entity: Entity) -> Option<Layer> {
        self.world.get::<&Layer>(entity).ok().map(|l| *l)
    }

    pub fn health(&self, entity: Entity) -> Option<(i32, i32)> {
        self.world
            .get::<&HealthPool>(entity)
            .ok()
            .map(|pool| (pool.value(), pool.max()))
    }

    /// Modify an entity's health pool. Destroys the entity the first time it
    /// reaches zero. Returns `None` if the entity has no pool.
    pub fn modify_health(&mut self, entity: Entity, amount: i32) -> Option<HealthOutcome> {
        let outcome = {
            let mut pool = self.world.get::<&mut HealthPool>(entity).ok()?;
            let outcome = pool.modify(amount);
            self.events.push(GameEvent::HealthChanged {
                entity: entity_id(entity),
                value: pool.value(),
                max: pool.max(),
            });
            outcome
        };

        if outcome == HealthOutcome::ReachedZero {
            self.destroy(entity);
        }
        Some(outcome)
    }

    /// Recompute the world transform of every attached entity from its parent.
    /// One level deep: parents are expected to be positioned already.
    pub fn propagate_transforms(&mut self) {
        let attached: Vec<(Entity, Parent)> = self
            .world
            .query::<&Parent>()
            .iter()
            .map(|(entity, parent)| (entity, *parent))
            .collect();

        for (entity, parent) in attached {
            if let Some(parent_transform) = self.transform(parent.entity) {
                self.set_transform(entity, parent_transform.mul_transform(&parent.local));
            }
        }
    }

    /// Despawn every destroyed entity and everything attached to one.
    /// Returns the number of entities removed.
    pub fn despawn_destroyed(&mut self) -> usize {
        self.despawn_buffer.clear();
        for (entity, _) in self.world.query_mut::<&PendingDestroy>() {
            self.despawn_buffer.push(entity);
        }

        // Children go with their parents, however deep.
        let mut frontier = 0;
        while frontier < self.despawn_buffer.len() {
            let parents = self.despawn_buffer[frontier..].to_vec();
            frontier = self.despawn_buffer.len();
            for (entity, parent) in self.world.query_mut::<&Parent>() {
                if parents.contains(&parent.entity) && !self.despawn_buffer.contains(&entity) {
                    self.despawn_buffer.push(entity);
                }
            }
        }

        let count = self.despawn_buffer.len();
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
        count
    }
}

impl EntityLifecycle for Arena {
    fn spawn(&mut self, prefab: &Prefab, position: Vec3, rotation: Quat) -> Entity {
        let mut builder = EntityBuilder::new();
        builder
            .add(Transform::new(position, rotation))
            .add(Name(prefab.name.clone()))
            .add(prefab.layer);
        if let Some(collider) = prefab.collider {
            builder.add(collider);
        }
        if let Some(health) = prefab.health {
            builder.add(HealthPool::new(health));
        }
        if let Some(tuning) = prefab.projectile {
            builder.add(Missile::new(tuning));
        }
        if prefab.floor {
            builder.add(Floor);
        }
        if prefab.enemy {
            builder.add(Enemy);
        }
        self.world.spawn(builder.build())
    }

    fn destroy(&mut self, entity: Entity) {
        if !self.is_alive(entity) {
            return;
        }
        if self.world.insert_one(entity, PendingDestroy).is_ok() {
            self.events.push(GameEvent::EntityDestroyed {
                entity: entity_id(entity),
            });
        }
    }

    fn reparent(&mut self, entity: Entity, parent: Option<Entity>) {
        let Some(world_transform) = self.transform(entity) else {
            return;
        };
        let parent_transform = parent.and_then(|p| self.transform(p).map(|t| (p, t)));
        match parent_transform {
            Some((parent, parent_transform)) => {
                let inverse = parent_transform.rotation.inverse();
                let local = Transform::new(
                    inverse * (world_transform.position - parent_transform.position),
                    (inverse * world_transform.rotation).normalize(),
                );
                let _ = self.world.insert_one(entity, Parent { entity: parent, local });
            }
            None => {
                let _ = self.world.remove_one::<Parent>(entity);
            }
        }
    }

    fn is_alive(&self, entity: Entity) -> bool {
        self.world.contains(entity) && self.world.get::<&PendingDestroy>(entity).is_err()
    }
}
