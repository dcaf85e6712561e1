//! Entity spawn factories for setting up the arena.
//!
//! Places the configured static and hostile entities and builds the player
//! vehicle with its weapon mounts.

use glam::{Quat, Vec2, Vec3};
use hecs::Entity;

use hoverstrike_control::aim::AimRig;
use hoverstrike_control::health::HealthPool;
use hoverstrike_control::salvo::Salvo;
use hoverstrike_core::commands::HeldDirections;
use hoverstrike_core::components::{Collider, LastPosition, Name, PlayerVehicle};
use hoverstrike_core::config::ArenaConfig;
use hoverstrike_core::enums::Layer;
use hoverstrike_core::types::Transform;

use crate::arena::Arena;
use crate::interfaces::{AssetProvider, EntityLifecycle};
use crate::vehicle::{MountRig, Vehicle};

/// Name given to the player vehicle entity.
pub const VEHICLE_NAME: &str = "Player";

/// Place every configured spawn point.
pub fn setup_arena(arena: &mut Arena, assets: &impl AssetProvider, config: &ArenaConfig) {
    for spawn in &config.spawns {
        spawn_prefab(arena, assets, &spawn.prefab, spawn.position);
    }
}

/// Spawn a prefab by name. Unknown names are logged and skipped.
pub fn spawn_prefab(
    arena: &mut Arena,
    assets: &impl AssetProvider,
    prefab: &str,
    position: Vec3,
) -> Option<Entity> {
    let Some(template) = assets.get_prefab(prefab) else {
        tracing::warn!(prefab, "unknown prefab, nothing spawned");
        return None;
    };
    let entity = arena.spawn(template, position, Quat::IDENTITY);
    tracing::debug!(prefab, ?position, "spawned prefab");
    Some(entity)
}

/// Spawn the player vehicle at the body's pose with empty slots.
pub fn spawn_vehicle(arena: &mut Arena, config: &ArenaConfig, transform: Transform) -> Vehicle {
    let mut health = HealthPool::new(config.vehicle.health);
    health.subscribe_zero(|change| {
        tracing::info!(previous = change.previous, value = change.value, "vehicle destroyed");
    });

    let entity = arena.world_mut().spawn((
        transform,
        Name(VEHICLE_NAME.to_string()),
        Layer::Player,
        Collider::Sphere {
            radius: config.layout.hull_radius,
        },
        health,
        PlayerVehicle,
        LastPosition(transform.position),
    ));

    let mounts = config
        .layout
        .mounts
        .iter()
        .map(|layout| MountRig {
            entity: arena
                .world_mut()
                .spawn((Transform::IDENTITY, Name(layout.name.clone()))),
            offset: layout.offset,
            slots: layout.slots.clone(),
        })
        .collect();

    let aim = AimRig::new(&transform, config.layout.hover_skates, &config.camera);
    let vehicle = Vehicle {
        entity,
        hover_points: config.layout.hover_points.clone(),
        aim_pivot: config.layout.aim_pivot,
        mounts,
        aim,
        salvo: Salvo::new(
            &Vehicle::slot_counts(&config.layout.mounts),
            config.weapons.shoot_interval,
            config.weapons.reload_time,
            config.weapons.volley,
        ),
        target: None,
        input: Vec2::ZERO,
        held: HeldDirections::default(),
        max_health: config.vehicle.health,
    };
    place_mounts(arena, &vehicle, &transform);
    vehicle
}

/// Move every mount entity to its pose for a vehicle at `transform`.
pub fn place_mounts(arena: &mut Arena, vehicle: &Vehicle, transform: &Transform) {
    for (index, mount) in vehicle.mounts.iter().enumerate() {
        if let Some(pose) = vehicle.mount_transform(transform, index) {
            arena.set_transform(mount.entity, pose);
        }
    }
}
