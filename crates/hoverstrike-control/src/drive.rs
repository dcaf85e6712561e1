//! Planar thrust and heading steering.

use glam::Vec3;

use hoverstrike_core::commands::HeldDirections;
use hoverstrike_core::constants::TURN_DEADZONE;
use hoverstrike_core::types::Transform;

use crate::math::signed_angle;

/// Sum of the thrust forces for the held directions.
pub fn thrust(vehicle: &Transform, held: HeldDirections, move_force: f32) -> Vec3 {
    let forward = vehicle.forward();
    let right = vehicle.right();
    let mut force = Vec3::ZERO;
    if held.forward {
        force += forward * move_force;
    }
    if held.back {
        force -= forward * move_force;
    }
    if held.left {
        force -= right * move_force;
    }
    if held.right {
        force += right * move_force;
    }
    force
}

/// Yaw torque turning the vehicle toward the camera heading.
///
/// The heading error is normalized to -1..1 over ±180°; errors inside the
/// dead zone produce no torque.
pub fn turn_torque(camera_forward: Vec3, vehicle: &Transform, turn_force: f32) -> Option<Vec3> {
    let error = signed_angle(camera_forward, vehicle.forward(), Vec3::Y);
    let turn = (error / 180.0).clamp(-1.0, 1.0);
    if turn.abs() <= TURN_DEADZONE {
        return None;
    }
    Some(vehicle.up() * (-turn * turn_force))
}
