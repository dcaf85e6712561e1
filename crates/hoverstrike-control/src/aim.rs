//! Camera rig and weapon-mount aiming.
//!
//! The rig is a yaw root that follows the vehicle, a pitch pivot above it, and
//! a camera on a boom behind the pivot. Pointer input drives yaw and pitch
//! targets that the rig approaches by slerp every frame, so convergence is
//! exponential rather than a fixed step.

use glam::{Quat, Vec2, Vec3};

use hoverstrike_core::config::CameraConfig;
use hoverstrike_core::constants::{SKATE_SMOOTHING, SKATE_TILT_DEGREES, WEAPON_MOUNT_SMOOTHING};
use hoverstrike_core::types::Transform;

use crate::math::{euler_degrees, from_euler_degrees, slerp_clamped};

/// Perspective projection used to place HUD markers.
#[derive(Debug, Clone, Copy)]
pub struct CameraLens {
    pub fov_y_degrees: f32,
    /// Screen size in pixels; origin at the bottom-left corner.
    pub viewport: Vec2,
}

impl CameraLens {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            fov_y_degrees: config.fov_y_degrees,
            viewport: config.viewport,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    /// Screen position of a world point, or `None` if it is behind the camera.
    pub fn world_to_screen(&self, camera: &Transform, point: Vec3) -> Option<Vec2> {
        let local = camera.rotation.inverse() * (point - camera.position);
        if local.z <= f32::EPSILON {
            return None;
        }
        let tan = (self.fov_y_degrees.to_radians() * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;
        let ndc = Vec2::new(local.x / (local.z * tan * aspect), local.y / (local.z * tan));
        Some((ndc + Vec2::ONE) * 0.5 * self.viewport)
    }
}

/// Smoothed camera and weapon orientation state.
#[derive(Debug, Clone)]
pub struct AimRig {
    /// Rig root position (follows the vehicle).
    pub position: Vec3,
    /// Rig root rotation, yaw only.
    pub yaw: Quat,
    /// Pitch pivot rotation relative to the root.
    pub pitch: Quat,
    /// World rotation of the weapon mounts' aim pivot.
    pub weapon_mount: Quat,
    /// Local rotation of each hover skate.
    pub skates: Vec<Quat>,
    pivot_height: f32,
    boom_length: f32,
}

impl AimRig {
    /// Rig centred on the vehicle and looking along its heading.
    pub fn new(vehicle: &Transform, skates: usize, config: &CameraConfig) -> Self {
        let (yaw, _, _) = euler_degrees(vehicle.rotation);
        Self {
            position: vehicle.position,
            yaw: from_euler_degrees(yaw, 0.0, 0.0),
            pitch: Quat::IDENTITY,
            weapon_mount: vehicle.rotation,
            skates: vec![Quat::IDENTITY; skates],
            pivot_height: config.pivot_height,
            boom_length: config.boom_length,
        }
    }

    /// Move the rig root toward `target` with `damping` in 0..1.
    pub fn follow(&mut self, target: Vec3, damping: f32) {
        self.position = self.position.lerp(target, 1.0 - damping);
    }

    /// Approach the yaw / pitch targets given by the pointer delta (degrees).
    pub fn steer(&mut self, pointer_delta: Vec2, sensitivity: f32, dt: f32) {
        let t = sensitivity * dt;

        let (yaw, _, _) = euler_degrees(self.yaw);
        let yaw_target = Quat::from_axis_angle(Vec3::Y, (yaw + pointer_delta.x).to_radians());
        self.yaw = slerp_clamped(self.yaw, yaw_target, t);

        let (_, pitch, _) = euler_degrees(self.pitch);
        let pitch_target = Quat::from_axis_angle(Vec3::X, (pitch - pointer_delta.y).to_radians());
        self.pitch = slerp_clamped(self.pitch, pitch_target, t);
    }

    /// Turn the weapon mounts toward the camera pitch at the vehicle's heading.
    pub fn aim_weapons(&mut self, vehicle: &Transform, dt: f32) {
        let (yaw, _, roll) = euler_degrees(vehicle.rotation);
        let target = from_euler_degrees(yaw, self.pitch_degrees(), roll);
        self.weapon_mount = slerp_clamped(self.weapon_mount, target, WEAPON_MOUNT_SMOOTHING * dt);
    }

    /// Bank the hover skates away from the input direction.
    pub fn tilt_skates(&mut self, input: Vec2, dt: f32) {
        let target = from_euler_degrees(
            0.0,
            input.y * SKATE_TILT_DEGREES,
            input.x * -SKATE_TILT_DEGREES,
        );
        for skate in &mut self.skates {
            *skate = slerp_clamped(*skate, target, SKATE_SMOOTHING * dt);
        }
    }

    pub fn yaw_degrees(&self) -> f32 {
        euler_degrees(self.yaw).0
    }

    /// Camera pitch in degrees; positive looks down.
    pub fn pitch_degrees(&self) -> f32 {
        euler_degrees(self.pitch).1
    }

    pub fn pivot_position(&self) -> Vec3 {
        self.position + self.yaw * Vec3::new(0.0, self.pivot_height, 0.0)
    }

    pub fn pivot_rotation(&self) -> Quat {
        (self.yaw * self.pitch).normalize()
    }

    /// World transform of the camera at the end of the boom.
    pub fn camera_transform(&self) -> Transform {
        let rotation = self.pivot_rotation();
        Transform::new(
            self.pivot_position() + rotation * Vec3::new(0.0, 0.0, -self.boom_length),
            rotation,
        )
    }

    /// Direction the weapon mounts point.
    pub fn aim_forward(&self) -> Vec3 {
        self.weapon_mount * Vec3::Z
    }
}
