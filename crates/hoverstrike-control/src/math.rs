//! Rotation helpers shared by the controllers.

use glam::{EulerRot, Mat3, Quat, Vec3};

/// Rotation whose forward (+z) axis points along `direction` with `up` as the
/// preferred up axis. Falls back to an arbitrary perpendicular up when the two
/// are parallel. Returns identity for a zero direction.
pub fn look_rotation(direction: Vec3, up: Vec3) -> Quat {
    let Some(forward) = direction.try_normalize() else {
        return Quat::IDENTITY;
    };
    let right = match up.cross(forward).try_normalize() {
        Some(right) => right,
        None => forward.any_orthonormal_vector(),
    };
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize()
}

/// Rotate `from` toward `to` by at most `max_degrees`.
pub fn rotate_towards(from: Quat, to: Quat, max_degrees: f32) -> Quat {
    let angle = from.angle_between(to);
    let max_angle = max_degrees.to_radians();
    if angle <= max_angle || angle <= f32::EPSILON {
        return to;
    }
    from.slerp(to, max_angle / angle).normalize()
}

/// Slerp with the interpolation factor clamped to 0..1.
pub fn slerp_clamped(from: Quat, to: Quat, t: f32) -> Quat {
    from.slerp(to, t.clamp(0.0, 1.0)).normalize()
}

/// Unsigned angle between two vectors in degrees.
pub fn angle_degrees(a: Vec3, b: Vec3) -> f32 {
    a.angle_between(b).to_degrees()
}

/// Angle from `from` to `to` in degrees, signed by the rotation sense about `axis`.
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let angle = angle_degrees(from, to);
    if axis.dot(from.cross(to)) < 0.0 {
        -angle
    } else {
        angle
    }
}

/// True if `direction` points at `other` within `threshold` (1 - cosine).
pub fn is_looking_at(direction: Vec3, other: Vec3, threshold: f32) -> bool {
    direction.normalize_or_zero().dot(other.normalize_or_zero()) > 1.0 - threshold
}

/// Yaw, pitch and roll in degrees (yaw about y, then pitch about x, then roll about z).
pub fn euler_degrees(rotation: Quat) -> (f32, f32, f32) {
    let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    (yaw.to_degrees(), pitch.to_degrees(), roll.to_degrees())
}

/// Inverse of [`euler_degrees`].
pub fn from_euler_degrees(yaw: f32, pitch: f32, roll: f32) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        yaw.to_radians(),
        pitch.to_radians(),
        roll.to_radians(),
    )
}
