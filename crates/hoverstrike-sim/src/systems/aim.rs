//! Aim system: camera rig, weapon mounts, hover skates and target lock.

use glam::{Vec2, Vec3};

use hoverstrike_control::aim::CameraLens;
use hoverstrike_core::config::{CameraConfig, VehicleTuning};
use hoverstrike_core::constants::{LOCK_CAST_RADIUS, LOCK_RANGE, RETICLE_DISTANCE};
use hoverstrike_core::enums::{HudIndicator, Layer};
use hoverstrike_core::events::GameEvent;

use crate::arena::{entity_id, Arena};
use crate::interfaces::{SpatialQuery, UiSink};
use crate::vehicle::Vehicle;
use crate::world_setup;

/// Run the aim controller for one variable tick and update the HUD.
#[allow(clippy::too_many_arguments)]
pub fn run(
    arena: &mut Arena,
    vehicle: &mut Vehicle,
    query: &impl SpatialQuery,
    ui: &mut impl UiSink,
    lens: &CameraLens,
    tuning: &VehicleTuning,
    camera: &CameraConfig,
    pointer_delta: Vec2,
    dt: f32,
) -> Option<HudIndicator> {
    let vehicle_transform = arena.transform(vehicle.entity)?;

    vehicle.aim.follow(vehicle_transform.position, camera.damping);
    vehicle.aim.steer(pointer_delta, tuning.aim_sensitivity, dt);
    vehicle.aim.aim_weapons(&vehicle_transform, dt);
    vehicle.aim.tilt_skates(vehicle.input, dt);

    world_setup::place_mounts(arena, vehicle, &vehicle_transform);
    arena.propagate_transforms();

    let pivot = vehicle.pivot_transform(&vehicle_transform);
    let forward = vehicle.aim.aim_forward();
    let camera_transform = vehicle.aim.camera_transform();
    let project = |point: Vec3| {
        lens.world_to_screen(&camera_transform, point)
            .unwrap_or_else(|| lens.center())
    };

    let hit = query.spherecast(
        arena.world(),
        pivot.position,
        LOCK_CAST_RADIUS,
        forward,
        LOCK_RANGE,
        Layer::Enemy.into(),
    );

    let indicator = match hit {
        Some(hit) => {
            if vehicle.target != Some(hit.entity) {
                tracing::debug!(target = entity_id(hit.entity), "target locked");
                arena.push_event(GameEvent::TargetLocked {
                    entity: entity_id(hit.entity),
                });
            }
            vehicle.target = Some(hit.entity);
            let screen = project(hit.point);
            ui.show_lock(screen);
            HudIndicator::Lock {
                x: screen.x,
                y: screen.y,
            }
        }
        None => {
            if vehicle.target.take().is_some() {
                tracing::debug!("target lost");
                arena.push_event(GameEvent::TargetLost);
            }
            let screen = project(vehicle.aim.pivot_position() + forward * RETICLE_DISTANCE);
            ui.show_reticle(screen);
            HudIndicator::Reticle {
                x: screen.x,
                y: screen.y,
            }
        }
    };

    Some(indicator)
}
