//! Arena configuration: vehicle tuning, layout, weapons, camera and spawns.
//!
//! Every struct deserializes with `#[serde(default)]` so a JSON file only
//! needs to name the values it overrides.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::components::Collider;
use crate::constants::*;
use crate::enums::{Layer, VolleyMode};

/// Flight and aim tuning for the player vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    /// How quickly the camera follows pointer input (slerp rate per second).
    pub aim_sensitivity: f32,
    /// Ray length below each hover point. Must be positive.
    pub hover_distance: f32,
    /// Lift applied at exactly `hover_distance` from the floor.
    pub hover_force: f32,
    /// Planar thrust per held direction.
    pub move_force: f32,
    /// Yaw torque at a full 180° heading error.
    pub turn_force: f32,
    /// Corrective torque applied beyond `max_tilt_degrees`.
    pub stability_force: f32,
    pub max_tilt_degrees: f32,
    /// Starting (and maximum) health.
    pub health: i32,
    /// Body mass for the sandbox integrator.
    pub mass: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            aim_sensitivity: 10.0,
            hover_distance: 2.0,
            hover_force: 30.0,
            move_force: 40.0,
            turn_force: 20.0,
            stability_force: 50.0,
            max_tilt_degrees: MAX_TILT_DEGREES,
            health: 100,
            mass: 10.0,
        }
    }
}

/// A hover point: a named local offset from which a downward ray starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverPointLayout {
    pub name: String,
    pub offset: Vec3,
}

/// A weapon mount: offset from the aim pivot plus the local offsets of its slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountLayout {
    pub name: String,
    pub offset: Vec3,
    pub slots: Vec<Vec3>,
}

/// Geometry of the vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleLayout {
    pub hover_points: Vec<HoverPointLayout>,
    /// Local offset of the aim pivot the weapon mounts hang from.
    pub aim_pivot: Vec3,
    pub mounts: Vec<MountLayout>,
    /// Number of visual hover skates.
    pub hover_skates: usize,
    /// Collision radius of the vehicle hull.
    pub hull_radius: f32,
}

impl Default for VehicleLayout {
    fn default() -> Self {
        let point = |name: &str, x: f32, z: f32| HoverPointLayout {
            name: name.to_string(),
            offset: Vec3::new(x, 0.0, z),
        };
        let mount = |name: &str, x: f32| MountLayout {
            name: name.to_string(),
            offset: Vec3::new(x, 0.0, 0.0),
            slots: vec![Vec3::new(0.0, 0.15, 0.5), Vec3::new(0.0, -0.15, 0.5)],
        };
        Self {
            hover_points: vec![
                point("front_left", -1.0, 1.5),
                point("front_right", 1.0, 1.5),
                point("rear_left", -1.0, -1.5),
                point("rear_right", 1.0, -1.5),
            ],
            aim_pivot: Vec3::new(0.0, 0.6, 0.0),
            mounts: vec![mount("left_pod", -1.2), mount("right_pod", 1.2)],
            hover_skates: 4,
            hull_radius: 1.5,
        }
    }
}

/// Salvo timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Seconds between shots of a salvo. Must be positive.
    pub shoot_interval: f32,
    /// Seconds to refill empty slots. Must be positive.
    pub reload_time: f32,
    /// Random launch spread (degrees, ± on pitch and yaw).
    pub missile_spread: f32,
    pub volley: VolleyMode,
    /// Prefab spawned into empty slots on reload.
    pub missile_prefab: String,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            shoot_interval: 0.25,
            reload_time: 2.0,
            missile_spread: 5.0,
            volley: VolleyMode::Single,
            missile_prefab: MISSILE_PREFAB.to_string(),
        }
    }
}

/// Projectile tuning carried by a prefab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Seconds from launch until the projectile expires.
    pub lifetime: f32,
    /// Forward speed (units/s) and turn rate (degrees/s).
    pub speed: f32,
    pub damage: i32,
    /// Area-of-effect radius; only used when larger than `hit_size`.
    pub splash_size: f32,
    /// Hit detection radius.
    pub hit_size: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            lifetime: 5.0,
            speed: 40.0,
            damage: 25,
            splash_size: 3.0,
            hit_size: 1.0,
        }
    }
}

/// Camera rig geometry and projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Follow damping in 0..1; 0 snaps to the vehicle each frame.
    pub damping: f32,
    /// Height of the pitch pivot above the rig root.
    pub pivot_height: f32,
    /// Distance of the camera behind the pitch pivot.
    pub boom_length: f32,
    pub fov_y_degrees: f32,
    pub viewport: Vec2,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            damping: 0.8,
            pivot_height: 2.0,
            boom_length: 8.0,
            fov_y_degrees: 60.0,
            viewport: Vec2::new(1920.0, 1080.0),
        }
    }
}

/// Named spawn template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prefab {
    pub name: String,
    #[serde(default)]
    pub layer: Layer,
    #[serde(default)]
    pub collider: Option<Collider>,
    /// Starting health; entities without it cannot be damaged.
    #[serde(default)]
    pub health: Option<i32>,
    /// Present on missile templates.
    #[serde(default)]
    pub projectile: Option<ProjectileTuning>,
    /// Surfaces the hover controller can push against.
    #[serde(default)]
    pub floor: bool,
    /// Hostile entities that can be locked on to.
    #[serde(default)]
    pub enemy: bool,
}

/// Named audio clip reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioClip {
    pub name: String,
    pub path: String,
}

/// Asset manifest: every template and clip the catalog should register.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    pub prefabs: Vec<Prefab>,
    pub sounds: Vec<AudioClip>,
    pub music: Vec<AudioClip>,
}

impl AssetManifest {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Something to place in the arena at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub prefab: String,
    pub position: Vec3,
}

/// Configuration for starting a new arena simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f32,
    pub vehicle: VehicleTuning,
    pub layout: VehicleLayout,
    pub weapons: WeaponConfig,
    pub camera: CameraConfig,
    /// Where the vehicle starts.
    pub spawn_position: Vec3,
    /// Static and hostile entities placed at startup.
    pub spawns: Vec<SpawnPoint>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            vehicle: VehicleTuning::default(),
            layout: VehicleLayout::default(),
            weapons: WeaponConfig::default(),
            camera: CameraConfig::default(),
            spawn_position: Vec3::new(0.0, 1.5, 0.0),
            spawns: vec![SpawnPoint {
                prefab: FLOOR_PREFAB.to_string(),
                position: Vec3::new(0.0, -0.5, 0.0),
            }],
        }
    }
}

impl ArenaConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
