//! Tilt stabilizer: hard-cutoff corrective torque.

use glam::Vec3;

use crate::math::angle_degrees;

/// Angle between the vehicle's up axis and world up, in degrees.
pub fn tilt_degrees(vehicle_up: Vec3) -> f32 {
    angle_degrees(vehicle_up, Vec3::Y)
}

/// Torque pulling `vehicle_up` back toward world up, or `None` while the tilt
/// is at or below `max_tilt_degrees`. The magnitude is always `stability_force`.
pub fn corrective_torque(vehicle_up: Vec3, max_tilt_degrees: f32, stability_force: f32) -> Option<Vec3> {
    if tilt_degrees(vehicle_up) <= max_tilt_degrees {
        return None;
    }
    // Fully inverted: no unique axis, roll about x.
    let axis = vehicle_up.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
    Some(axis * stability_force)
}
