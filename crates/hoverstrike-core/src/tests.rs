#[cfg(test)]
mod tests {
    use glam::{Quat, Vec2, Vec3};

    use crate::commands::{HeldDirections, SimCommand};
    use crate::components::Collider;
    use crate::config::{ArenaConfig, AssetManifest};
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::types::{SimTime, Transform};

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "seed": 7, "vehicle": { "hover_force": 12.5 }, "weapons": { "volley": "per_mount" } }"#;
        let config = ArenaConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.vehicle.hover_force, 12.5);
        assert_eq!(config.vehicle.hover_distance, 2.0);
        assert_eq!(config.weapons.volley, VolleyMode::PerMount);
        assert_eq!(config.layout.hover_points.len(), 4);
        assert_eq!(config.layout.mounts.len(), 2);
    }

    #[test]
    fn test_config_round_trip() {
        let config = ArenaConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = ArenaConfig::from_json(&json).unwrap();
        assert_eq!(back.seed, config.seed);
        assert_eq!(back.spawns, config.spawns);
        assert_eq!(back.layout.mounts, config.layout.mounts);
    }

    #[test]
    fn test_manifest_parses_colliders() {
        let json = r#"{
            "prefabs": [
                { "name": "Crate", "layer": "Enemy", "collider": { "shape": "sphere", "radius": 0.5 }, "health": 10, "enemy": true },
                { "name": "Ground", "layer": "Environment", "collider": { "shape": "box", "half_extents": [10.0, 0.5, 10.0] }, "floor": true }
            ],
            "sounds": [ { "name": "boom", "path": "audio/boom.ogg" } ]
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.prefabs.len(), 2);
        assert_eq!(manifest.prefabs[0].health, Some(10));
        assert!(manifest.prefabs[1].floor);
        assert_eq!(
            manifest.prefabs[1].collider,
            Some(Collider::Box {
                half_extents: Vec3::new(10.0, 0.5, 10.0)
            })
        );
        assert_eq!(manifest.sounds.len(), 1);
        assert!(manifest.music.is_empty());
    }

    #[test]
    fn test_layer_mask() {
        let mask = LayerMask::of(&[Layer::Enemy, Layer::Environment]);
        assert!(mask.contains(Layer::Enemy));
        assert!(mask.contains(Layer::Environment));
        assert!(!mask.contains(Layer::Player));
        assert!(!LayerMask::NONE.contains(Layer::Default));
        assert!(LayerMask::ALL.contains(Layer::Projectile));
        assert_eq!(LayerMask::from(Layer::Player), LayerMask::of(&[Layer::Player]));
    }

    #[test]
    fn test_input_vector() {
        let none = HeldDirections::default();
        assert_eq!(none.input_vector(), Vec2::ZERO);

        let forward_right = HeldDirections {
            forward: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(forward_right.input_vector(), Vec2::new(1.0, 1.0));

        let all = HeldDirections {
            forward: true,
            back: true,
            left: true,
            right: true,
        };
        assert_eq!(all.input_vector(), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_transform_axes_and_composition() {
        let yaw = Quat::from_rotation_y(90f32.to_radians());
        let parent = Transform::new(Vec3::new(1.0, 0.0, 0.0), yaw);
        assert!((parent.forward() - Vec3::X).length() < 1e-5);
        assert!((parent.right() - Vec3::NEG_Z).length() < 1e-5);

        let child = Transform::from_position(Vec3::new(0.0, 0.0, 2.0));
        let world = parent.mul_transform(&child);
        assert!((world.position - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(1.0 / 60.0);
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_command_and_event_tags() {
        let json = serde_json::to_string(&SimCommand::SetTimeScale { scale: 2.0 }).unwrap();
        assert!(json.contains(r#""type":"SetTimeScale""#));

        let event = GameEvent::ReloadComplete { loaded: 4 };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
