//! Weapons system: salvo timers, reload spawning and the fire command.

use hecs::Entity;
use rand_chacha::ChaCha8Rng;

use hoverstrike_control::salvo::{launch_spread, SlotId};
use hoverstrike_core::commands::InputFrame;
use hoverstrike_core::config::WeaponConfig;
use hoverstrike_core::enums::Layer;
use hoverstrike_core::events::GameEvent;
use hoverstrike_core::types::Transform;

use crate::arena::{entity_id, Arena};
use crate::components::Missile;
use crate::interfaces::{AssetProvider, EntityLifecycle};
use crate::vehicle::Vehicle;

/// Run the weapon salvo for one variable tick.
pub fn run(
    arena: &mut Arena,
    vehicle: &mut Vehicle,
    assets: &impl AssetProvider,
    rng: &mut ChaCha8Rng,
    weapons: &WeaponConfig,
    input: &InputFrame,
    dt: f32,
) {
    let Some(vehicle_transform) = arena.transform(vehicle.entity) else {
        return;
    };

    // Step 1: advance the pending timer, refilling slots when a reload ends.
    let slot_poses = slot_poses(vehicle, &vehicle_transform);
    let outcome = vehicle.salvo.tick(dt, |id| {
        load_missile(arena, assets, rng, weapons, &slot_poses, id)
    });
    if outcome.reload_started {
        reload_started(arena, weapons);
    }
    if let Some(loaded) = outcome.reloaded {
        tracing::debug!(loaded, "reload complete");
        arena.push_event(GameEvent::ReloadComplete { loaded });
    }

    // Step 2: manual reload.
    if input.reload && vehicle.salvo.request_reload() {
        reload_started(arena, weapons);
    }

    // Step 3: fire at the locked target.
    if !input.fire {
        return;
    }
    let target = vehicle.target.filter(|&target| arena.is_alive(target));
    let fired = vehicle.salvo.fire(target.is_some());
    if fired.reload_started {
        reload_started(arena, weapons);
    }
    let Some(target) = target else {
        return;
    };
    let target_layer = arena.layer(target).unwrap_or(Layer::Enemy);

    for shot in fired.shots {
        if !arena.is_alive(shot.missile) {
            tracing::debug!(mount = shot.slot.mount, slot = shot.slot.slot, "slot held a destroyed missile");
            continue;
        }
        if let Ok(mut missile) = arena.world_mut().get::<&mut Missile>(shot.missile) {
            missile.arm_at(target, target_layer);
        }
        arena.reparent(shot.missile, None);
        arena.push_event(GameEvent::MissileFired {
            projectile: entity_id(shot.missile),
            mount: shot.slot.mount,
            slot: shot.slot.slot,
        });
    }
}

/// Spawn a missile for every empty slot right away. Used when the vehicle spawns.
pub fn fill_salvo(
    arena: &mut Arena,
    vehicle: &mut Vehicle,
    assets: &impl AssetProvider,
    rng: &mut ChaCha8Rng,
    weapons: &WeaponConfig,
) -> usize {
    let Some(vehicle_transform) = arena.transform(vehicle.entity) else {
        return 0;
    };
    let slot_poses = slot_poses(vehicle, &vehicle_transform);
    vehicle
        .salvo
        .fill_empty(|id| load_missile(arena, assets, rng, weapons, &slot_poses, id))
}

/// World pose and mount entity of every slot, indexed by mount then slot.
fn slot_poses(vehicle: &Vehicle, vehicle_transform: &Transform) -> Vec<Vec<(Entity, Transform)>> {
    vehicle
        .mounts
        .iter()
        .enumerate()
        .map(|(mount, rig)| {
            (0..rig.slots.len())
                .filter_map(|slot| {
                    vehicle
                        .slot_transform(vehicle_transform, SlotId { mount, slot })
                        .map(|pose| (rig.entity, pose))
                })
                .collect()
        })
        .collect()
}

/// Spawn one inactive missile into a slot, attached to the slot's mount.
fn load_missile(
    arena: &mut Arena,
    assets: &impl AssetProvider,
    rng: &mut ChaCha8Rng,
    weapons: &WeaponConfig,
    slot_poses: &[Vec<(Entity, Transform)>],
    id: SlotId,
) -> Option<Entity> {
    let (mount, pose) = *slot_poses.get(id.mount)?.get(id.slot)?;
    let Some(prefab) = assets.get_prefab(&weapons.missile_prefab) else {
        tracing::warn!(prefab = %weapons.missile_prefab, "missile prefab not found");
        return None;
    };
    if prefab.projectile.is_none() {
        tracing::warn!(prefab = %prefab.name, "missile prefab has no projectile tuning");
        return None;
    }

    let rotation = (pose.rotation * launch_spread(rng, weapons.missile_spread)).normalize();
    let missile = arena.spawn(prefab, pose.position, rotation);
    arena.reparent(missile, Some(mount));
    Some(missile)
}

fn reload_started(arena: &mut Arena, weapons: &WeaponConfig) {
    tracing::debug!(duration_secs = weapons.reload_time, "reload started");
    arena.push_event(GameEvent::ReloadStarted {
        duration_secs: weapons.reload_time,
    });
}
