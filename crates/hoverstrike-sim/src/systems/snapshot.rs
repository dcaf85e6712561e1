//! Snapshot system: reads the arena and builds a complete ArenaSnapshot.
//!
//! Read-only; never modifies the world.

use hoverstrike_control::health::HealthPool;
use hoverstrike_control::stabilizer::tilt_degrees;
use hoverstrike_core::components::{LastPosition, Name, PendingDestroy, PlayerVehicle};
use hoverstrike_core::enums::{HudIndicator, SimPhase};
use hoverstrike_core::events::GameEvent;
use hoverstrike_core::state::*;
use hoverstrike_core::types::{SimTime, Transform};

use crate::arena::{entity_id, Arena};
use crate::components::{Missile, Parent};
use crate::interfaces::EntityLifecycle;
use crate::vehicle::Vehicle;

/// Build a complete snapshot of the arena.
pub fn build_snapshot(
    arena: &Arena,
    vehicle: &Vehicle,
    vehicle_transform: Transform,
    time: &SimTime,
    phase: SimPhase,
    hud: Option<HudIndicator>,
    events: Vec<GameEvent>,
) -> ArenaSnapshot {
    ArenaSnapshot {
        time: *time,
        phase,
        vehicle: build_vehicle(arena, vehicle, vehicle_transform),
        camera: build_camera(vehicle),
        salvo: build_salvo(vehicle),
        hud,
        target: vehicle
            .target
            .filter(|&target| arena.is_alive(target))
            .map(entity_id),
        projectiles: build_projectiles(arena),
        combatants: build_combatants(arena),
        events,
    }
}

fn build_vehicle(arena: &Arena, vehicle: &Vehicle, transform: Transform) -> VehicleView {
    let (health, max_health) = arena.health(vehicle.entity).unwrap_or((0, vehicle.max_health));
    let last_position = arena
        .world()
        .get::<&LastPosition>(vehicle.entity)
        .map(|last| last.0)
        .unwrap_or(transform.position);
    VehicleView {
        position: transform.position,
        last_position,
        rotation: transform.rotation,
        tilt_degrees: tilt_degrees(transform.up()),
        health,
        max_health,
        destroyed: !arena.is_alive(vehicle.entity),
    }
}

fn build_camera(vehicle: &Vehicle) -> CameraView {
    CameraView {
        position: vehicle.aim.camera_transform().position,
        yaw_degrees: vehicle.aim.yaw_degrees(),
        pitch_degrees: vehicle.aim.pitch_degrees(),
    }
}

fn build_salvo(vehicle: &Vehicle) -> SalvoView {
    let salvo = &vehicle.salvo;
    SalvoView {
        phase: salvo.phase(),
        loaded: salvo.loaded_count(),
        capacity: salvo.capacity(),
        cooldown_remaining: salvo.cooldown_remaining(),
        reload_remaining: salvo.reload_remaining(),
    }
}

/// Launched projectiles, in entity order.
fn build_projectiles(arena: &Arena) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = arena
        .world()
        .query::<(&Missile, &Transform, Option<&Parent>, Option<&PendingDestroy>)>()
        .iter()
        .filter(|(_, (missile, _, parent, destroyed))| missile.active && parent.is_none() && destroyed.is_none())
        .map(|(entity, (missile, transform, _, _))| ProjectileView {
            entity: entity_id(entity),
            position: transform.position,
            target: missile.target.map(entity_id),
            lifetime_remaining: missile.lifetime_remaining,
        })
        .collect();
    projectiles.sort_by_key(|p| p.entity);
    projectiles
}

/// Health-bearing entities other than the player vehicle, in entity order.
fn build_combatants(arena: &Arena) -> Vec<CombatantView> {
    let mut combatants: Vec<CombatantView> = arena
        .world()
        .query::<(&HealthPool, &Transform, &Name, Option<&PlayerVehicle>, Option<&PendingDestroy>)>()
        .iter()
        .filter(|(_, (_, _, _, player, destroyed))| player.is_none() && destroyed.is_none())
        .map(|(entity, (pool, transform, name, _, _))| CombatantView {
            entity: entity_id(entity),
            name: name.0.clone(),
            position: transform.position,
            health: pool.value(),
            max_health: pool.max(),
        })
        .collect();
    combatants.sort_by_key(|c| c.entity);
    combatants
}
