//! Hover lift: per-point upward force from downward proximity rays.

use glam::{Vec2, Vec3};

use hoverstrike_core::constants::MIN_HOVER_FORCE_MOD;

/// Lift tuning.
#[derive(Debug, Clone, Copy)]
pub struct HoverParams {
    pub hover_force: f32,
    /// Ray length. Must be positive.
    pub hover_distance: f32,
}

/// Lift for a ray hit at `distance`: `hover_force * hover_distance / distance`.
///
/// Grows without bound as the distance approaches zero (infinite at zero). The
/// physics step is the only limit; callers that want a cap must add one.
pub fn lift_magnitude(params: &HoverParams, distance: f32) -> f32 {
    params.hover_force * (params.hover_distance / distance)
}

/// Directional lift modifier for a hover point at local `offset`.
///
/// Points on the side the input leans toward get [`MIN_HOVER_FORCE_MOD`] so the
/// vehicle pitches / rolls into the commanded direction. Forward is +z and right
/// is +x. The lateral axis is evaluated last and wins when both are non-zero.
pub fn force_modifier(offset: Vec3, input: Vec2) -> f32 {
    let mut modifier = 1.0;

    if input.y != 0.0 {
        let front = offset.z > 0.0;
        modifier = if (input.y > 0.0) == front {
            MIN_HOVER_FORCE_MOD
        } else {
            1.0
        };
    }

    if input.x != 0.0 {
        let right = offset.x > 0.0;
        modifier = if (input.x > 0.0) == right {
            MIN_HOVER_FORCE_MOD
        } else {
            1.0
        };
    }

    modifier
}

/// World-space lift for one ray hit.
pub fn lift_force(params: &HoverParams, offset: Vec3, input: Vec2, distance: f32) -> Vec3 {
    Vec3::Y * (lift_magnitude(params, distance) * force_modifier(offset, input))
}
