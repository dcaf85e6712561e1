//! Flight system: hover lift, tilt stabilizer and drive forces.
//!
//! Runs once per fixed step, before the body is integrated.

use glam::Vec3;

use hoverstrike_control::drive;
use hoverstrike_control::hover::{self, HoverParams};
use hoverstrike_control::stabilizer;
use hoverstrike_core::components::{Floor, LastPosition};
use hoverstrike_core::config::VehicleTuning;
use hoverstrike_core::enums::Layer;

use crate::arena::Arena;
use crate::interfaces::{RigidBody, SpatialQuery};
use crate::vehicle::Vehicle;

/// Apply every flight force for one fixed step.
pub fn run(
    arena: &mut Arena,
    vehicle: &Vehicle,
    body: &mut impl RigidBody,
    query: &impl SpatialQuery,
    tuning: &VehicleTuning,
) {
    let transform = body.transform();
    if let Ok(mut last) = arena.world_mut().get::<&mut LastPosition>(vehicle.entity) {
        last.0 = transform.position;
    }

    // Hover: one ray straight down per point, every floor hit pushes.
    let params = HoverParams {
        hover_force: tuning.hover_force,
        hover_distance: tuning.hover_distance,
    };
    for point in &vehicle.hover_points {
        let origin = transform.transform_point(point.offset);
        let hits = query.raycast_all(
            arena.world(),
            origin,
            Vec3::NEG_Y,
            tuning.hover_distance,
            Layer::Environment.into(),
        );
        for hit in hits {
            if arena.world().get::<&Floor>(hit.entity).is_err() {
                continue;
            }
            let force = hover::lift_force(&params, point.offset, vehicle.input, hit.distance);
            body.apply_force_at(force, origin);
        }
    }

    // Drive: thrust from held keys, then yaw toward the camera heading.
    body.apply_force(drive::thrust(&transform, vehicle.held, tuning.move_force));
    let camera_forward = vehicle.aim.yaw * Vec3::Z;
    if let Some(torque) = drive::turn_torque(camera_forward, &transform, tuning.turn_force) {
        body.apply_torque(torque);
    }

    if let Some(torque) =
        stabilizer::corrective_torque(transform.up(), tuning.max_tilt_degrees, tuning.stability_force)
    {
        body.apply_torque(torque);
    }
}
