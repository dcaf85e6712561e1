//! Simulation constants and tuning parameters.

/// Fixed physics step (seconds), 50 Hz.
pub const FIXED_DT: f32 = 1.0 / 50.0;

/// Default variable frame step used by the runner (seconds), 60 Hz.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Upper bound of fixed steps run per frame before the accumulator is dropped.
pub const MAX_FIXED_STEPS_PER_FRAME: u32 = 8;

/// Maximum time scale accepted by `SetTimeScale`.
pub const MAX_TIME_SCALE: f32 = 4.0;

// --- Flight ---

/// Tilt beyond which the stabilizer pushes back (degrees).
pub const MAX_TILT_DEGREES: f32 = 45.0;

/// Lift multiplier on the side of the vehicle that leans into the input.
pub const MIN_HOVER_FORCE_MOD: f32 = 0.8;

/// Turn input below this magnitude applies no steering torque.
pub const TURN_DEADZONE: f32 = 0.01;

/// Gravity acceleration used by the sandbox body (m/s²).
pub const GRAVITY: f32 = 9.81;

// --- Aim ---

/// Radius of the lock-on sphere cast.
pub const LOCK_CAST_RADIUS: f32 = 5.0;

/// Maximum lock-on range.
pub const LOCK_RANGE: f32 = 100.0;

/// Distance ahead of the pitch pivot at which the free-aim reticle is projected.
pub const RETICLE_DISTANCE: f32 = 10.0;

/// Weapon mount slerp rate (per second, multiplied by dt).
pub const WEAPON_MOUNT_SMOOTHING: f32 = 5.0;

/// Hover skate slerp rate (per second, multiplied by dt).
pub const SKATE_SMOOTHING: f32 = 5.0;

/// Hover skate tilt at full input (degrees).
pub const SKATE_TILT_DEGREES: f32 = 15.0;

// --- Prefab names ---

pub const MISSILE_PREFAB: &str = "Missile";
pub const DRONE_PREFAB: &str = "Drone";
pub const FLOOR_PREFAB: &str = "Floor";
