//! Tests for the arena engine, the sandbox collaborators and the systems.

use glam::{Quat, Vec2, Vec3};

use hoverstrike_core::commands::{HeldDirections, InputFrame, SimCommand};
use hoverstrike_core::components::Collider;
use hoverstrike_core::config::{ArenaConfig, Prefab, ProjectileTuning, SpawnPoint, VehicleTuning, WeaponConfig};
use hoverstrike_core::constants::{DRONE_PREFAB, FLOOR_PREFAB, MISSILE_PREFAB};
use hoverstrike_core::enums::{HudIndicator, Layer, LayerMask, SalvoPhase, SimPhase, VolleyMode};
use hoverstrike_core::events::GameEvent;
use hoverstrike_core::state::ArenaSnapshot;
use hoverstrike_core::types::Transform;

use crate::arena::{entity_id, Arena};
use crate::assets::AssetCatalog;
use crate::engine::{SandboxEngine, SimulationEngine};
use crate::interfaces::{AssetProvider, EntityLifecycle, RigidBody, SpatialQuery, UiSink};
use crate::sandbox::{ColliderQuery, HudRecorder, SandboxBody};
use crate::systems::flight;
use crate::world_setup;

const DT: f32 = 1.0 / 60.0;
const DUMMY: &str = "Dummy";

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn dummy_prefab(health: i32) -> Prefab {
    Prefab {
        name: DUMMY.to_string(),
        layer: Layer::Enemy,
        collider: Some(Collider::Sphere { radius: 1.0 }),
        health: Some(health),
        projectile: None,
        floor: false,
        enemy: true,
    }
}

/// Built-in prefabs plus a sturdy target.
fn catalog_with_dummy(health: i32) -> AssetCatalog {
    let mut catalog = AssetCatalog::builtin();
    catalog.register_prefab(dummy_prefab(health));
    catalog
}

/// Default arena without launch spread.
fn steady_config() -> ArenaConfig {
    ArenaConfig {
        weapons: WeaponConfig {
            missile_spread: 0.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Engine whose vehicle never moves, so aim and weapons see a fixed geometry.
fn kinematic_engine(config: ArenaConfig, assets: AssetCatalog) -> SandboxEngine {
    let body = SandboxBody::kinematic(Transform::from_position(config.spawn_position));
    SimulationEngine::new(config, assets, body, ColliderQuery, HudRecorder::default())
}

/// Straight ahead of the weapon pivot.
fn ahead(z: f32) -> Vec3 {
    Vec3::new(0.0, 2.1, z)
}

fn firing() -> InputFrame {
    InputFrame {
        fire: true,
        ..Default::default()
    }
}

fn count_events(snapshot: &ArenaSnapshot, matches: impl Fn(&GameEvent) -> bool) -> usize {
    snapshot.events.iter().filter(|event| matches(event)).count()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = ArenaConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SandboxEngine::sandbox(config.clone());
    let mut engine_b = SandboxEngine::sandbox(config);
    engine_a.spawn_prefab(DRONE_PREFAB, ahead(30.0));
    engine_b.spawn_prefab(DRONE_PREFAB, ahead(30.0));

    for i in 0..300 {
        let input = InputFrame {
            pointer_delta: Vec2::new((i % 7) as f32 * 0.1, 0.0),
            held: HeldDirections {
                forward: i % 50 < 25,
                ..Default::default()
            },
            fire: true,
            reload: false,
        };
        let json_a = serde_json::to_string(&engine_a.tick(&input, DT)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(&input, DT)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds_diverge() {
    let mut engine_a = kinematic_engine(ArenaConfig { seed: 111, ..Default::default() }, catalog_with_dummy(1000));
    let mut engine_b = kinematic_engine(ArenaConfig { seed: 222, ..Default::default() }, catalog_with_dummy(1000));
    engine_a.spawn_prefab(DUMMY, ahead(30.0));
    engine_b.spawn_prefab(DUMMY, ahead(30.0));

    // Launch spread is the only random input; it shows once missiles fly.
    let mut diverged = false;
    for _ in 0..60 {
        let json_a = serde_json::to_string(&engine_a.tick(&firing(), DT)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(&firing(), DT)).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce different launch spreads");
}

// ---- Setup ----

#[test]
fn test_vehicle_spawns_with_full_salvo() {
    let mut engine = SandboxEngine::sandbox(ArenaConfig::default());
    let snapshot = engine.tick(&InputFrame::default(), DT);

    assert_eq!(snapshot.salvo.capacity, 4);
    assert_eq!(snapshot.salvo.loaded, 4);
    assert_eq!(snapshot.salvo.phase, SalvoPhase::Ready);
    assert_eq!(snapshot.vehicle.health, 100);
    assert_eq!(snapshot.vehicle.max_health, 100);
    assert!(!snapshot.vehicle.destroyed);
    // Loaded missiles are not in flight.
    assert!(snapshot.projectiles.is_empty());
}

#[test]
fn test_loaded_missiles_follow_their_mount() {
    let mut engine = SandboxEngine::sandbox(steady_config());
    for _ in 0..30 {
        engine.tick(&InputFrame::default(), DT);
    }

    let vehicle = engine.body().transform();
    let pivot = engine.vehicle().pivot_transform(&vehicle);
    for (id, &missile) in engine.vehicle().salvo.loaded_slots() {
        let expected = engine.vehicle().slot_transform(&vehicle, id).unwrap();
        let actual = engine.arena().transform(missile).unwrap();
        assert!(
            actual.position.distance(expected.position) < 1e-3,
            "missile in {id:?} drifted from its slot"
        );
        assert!(actual.position.distance(pivot.position) < 2.0);
    }
}

#[test]
fn test_configured_spawns_are_placed() {
    let config = ArenaConfig {
        spawns: vec![
            SpawnPoint {
                prefab: FLOOR_PREFAB.to_string(),
                position: Vec3::new(0.0, -0.5, 0.0),
            },
            SpawnPoint {
                prefab: DRONE_PREFAB.to_string(),
                position: Vec3::new(10.0, 2.0, 40.0),
            },
            SpawnPoint {
                prefab: "Nonexistent".to_string(),
                position: Vec3::ZERO,
            },
        ],
        ..Default::default()
    };
    let mut engine = SandboxEngine::sandbox(config);
    let snapshot = engine.tick(&InputFrame::default(), DT);

    assert_eq!(snapshot.combatants.len(), 1);
    assert_eq!(snapshot.combatants[0].name, DRONE_PREFAB);
    assert_eq!(snapshot.combatants[0].health, 50);
}

// ---- Aim and lock ----

#[test]
fn test_reticle_without_enemies() {
    let mut engine = kinematic_engine(steady_config(), AssetCatalog::builtin());
    let snapshot = engine.tick(&InputFrame::default(), DT);

    assert_eq!(snapshot.target, None);
    assert_eq!(engine.ui().reticles_shown, 1);
    assert_eq!(engine.ui().locks_shown, 0);
    match snapshot.hud {
        Some(HudIndicator::Reticle { x, y }) => {
            // Straight ahead of an unrotated camera.
            assert!(approx(x, 960.0), "x = {x}");
            assert!(approx(y, 540.0), "y = {y}");
        }
        other => panic!("Expected reticle, got {other:?}"),
    }
}

#[test]
fn test_lock_on_enemy_ahead() {
    let mut engine = kinematic_engine(steady_config(), AssetCatalog::builtin());
    let drone = engine.spawn_prefab(DRONE_PREFAB, ahead(30.0)).unwrap();

    let snapshot = engine.tick(&InputFrame::default(), DT);
    assert_eq!(snapshot.target, Some(entity_id(drone)));
    assert!(matches!(snapshot.hud, Some(HudIndicator::Lock { .. })));
    assert_eq!(engine.ui().locks_shown, 1);
    assert_eq!(
        count_events(&snapshot, |e| *e == GameEvent::TargetLocked { entity: entity_id(drone) }),
        1
    );

    // Holding the lock does not repeat the event.
    let snapshot = engine.tick(&InputFrame::default(), DT);
    assert_eq!(count_events(&snapshot, |e| matches!(e, GameEvent::TargetLocked { .. })), 0);
}

#[test]
fn test_lock_ignores_enemies_out_of_range_or_behind() {
    let mut engine = kinematic_engine(steady_config(), AssetCatalog::builtin());
    engine.spawn_prefab(DRONE_PREFAB, ahead(150.0));
    engine.spawn_prefab(DRONE_PREFAB, ahead(-20.0));

    let snapshot = engine.tick(&InputFrame::default(), DT);
    assert_eq!(snapshot.target, None);
    assert!(matches!(snapshot.hud, Some(HudIndicator::Reticle { .. })));
}

#[test]
fn test_target_lost_when_destroyed() {
    let mut engine = kinematic_engine(steady_config(), AssetCatalog::builtin());
    let drone = engine.spawn_prefab(DRONE_PREFAB, ahead(30.0)).unwrap();
    engine.tick(&InputFrame::default(), DT);

    engine.arena_mut().destroy(drone);
    let snapshot = engine.tick(&InputFrame::default(), DT);
    assert_eq!(snapshot.target, None);
    assert_eq!(count_events(&snapshot, |e| *e == GameEvent::TargetLost), 1);
    assert!(!engine.arena().is_alive(drone));
}

#[test]
fn test_pointer_turns_camera() {
    let mut engine = kinematic_engine(steady_config(), AssetCatalog::builtin());
    let input = InputFrame {
        pointer_delta: Vec2::new(30.0, 0.0),
        ..Default::default()
    };
    let snapshot = engine.tick(&input, DT);
    assert!(snapshot.camera.yaw_degrees > 0.0);
    assert!(snapshot.camera.yaw_degrees < 30.0);
}

// ---- Weapons ----

#[test]
fn test_fire_consumes_slots_then_reloads() {
    let mut engine = kinematic_engine(steady_config(), catalog_with_dummy(1000));
    engine.spawn_prefab(DUMMY, ahead(30.0));

    let snapshot = engine.tick(&firing(), DT);
    assert_eq!(
        count_events(&snapshot, |e| matches!(e, GameEvent::MissileFired { mount: 0, slot: 0, .. })),
        1
    );
    assert_eq!(snapshot.salvo.loaded, 3);
    assert_eq!(snapshot.salvo.phase, SalvoPhase::Firing);
    assert_eq!(snapshot.projectiles.len(), 1);

    // Keep the trigger held until the salvo is spent.
    let mut fired = 1;
    let mut last = snapshot;
    for _ in 0..200 {
        if last.salvo.loaded == 0 {
            break;
        }
        last = engine.tick(&firing(), DT);
        fired += count_events(&last, |e| matches!(e, GameEvent::MissileFired { .. }));
    }
    assert_eq!(fired, 4);
    assert_eq!(last.salvo.loaded, 0);
    assert_eq!(last.salvo.phase, SalvoPhase::Reloading);
    assert!(last.salvo.reload_remaining.is_some());
    assert_eq!(count_events(&last, |e| matches!(e, GameEvent::ReloadStarted { .. })), 1);

    // Release the trigger and wait for the reload.
    let mut reloaded = None;
    for _ in 0..200 {
        let snapshot = engine.tick(&InputFrame::default(), DT);
        if snapshot.events.iter().any(|e| *e == GameEvent::ReloadComplete { loaded: 4 }) {
            reloaded = Some(snapshot);
            break;
        }
    }
    let reloaded = reloaded.expect("reload should complete");
    assert_eq!(reloaded.salvo.loaded, 4);
    assert_eq!(reloaded.salvo.phase, SalvoPhase::Ready);
}

#[test]
fn test_fire_without_target_is_noop() {
    let mut engine = kinematic_engine(steady_config(), AssetCatalog::builtin());
    let snapshot = engine.tick(&firing(), DT);

    assert_eq!(snapshot.salvo.loaded, 4);
    assert_eq!(snapshot.salvo.phase, SalvoPhase::Ready);
    assert!(snapshot.events.is_empty());
}

#[test]
fn test_per_mount_volley_fires_both_pods() {
    let mut config = steady_config();
    config.weapons.volley = VolleyMode::PerMount;
    let mut engine = kinematic_engine(config, catalog_with_dummy(1000));
    engine.spawn_prefab(DUMMY, ahead(30.0));

    let snapshot = engine.tick(&firing(), DT);
    let mounts: Vec<usize> = snapshot
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::MissileFired { mount, .. } => Some(*mount),
            _ => None,
        })
        .collect();
    assert_eq!(mounts, vec![0, 1]);
    assert_eq!(snapshot.salvo.loaded, 2);
}

#[test]
fn test_manual_reload() {
    let mut engine = kinematic_engine(steady_config(), catalog_with_dummy(1000));
    engine.spawn_prefab(DUMMY, ahead(30.0));
    let reload = InputFrame {
        reload: true,
        ..Default::default()
    };

    // Full salvo: nothing to do.
    let snapshot = engine.tick(&reload, DT);
    assert_eq!(snapshot.salvo.phase, SalvoPhase::Ready);
    assert_eq!(count_events(&snapshot, |e| matches!(e, GameEvent::ReloadStarted { .. })), 0);

    // One shot, then reload during the cooldown.
    let snapshot = engine.tick(&firing(), DT);
    assert!(snapshot.salvo.cooldown_remaining.is_some());
    let snapshot = engine.tick(&reload, DT);
    assert_eq!(snapshot.salvo.phase, SalvoPhase::Reloading);
    assert_eq!(snapshot.salvo.cooldown_remaining, None);
    assert!(snapshot.salvo.reload_remaining.is_some());
    assert_eq!(count_events(&snapshot, |e| matches!(e, GameEvent::ReloadStarted { .. })), 1);
}

#[test]
fn test_missing_missile_prefab_leaves_slots_empty() {
    let mut config = steady_config();
    config.weapons.missile_prefab = "Nonexistent".to_string();
    let mut engine = kinematic_engine(config, AssetCatalog::builtin());
    let snapshot = engine.tick(&InputFrame::default(), DT);

    assert_eq!(snapshot.salvo.capacity, 4);
    assert_eq!(snapshot.salvo.loaded, 0);
}

// ---- Projectiles ----

/// Fire a single shot at the locked target and run until it resolves.
fn fire_once_until_hit(engine: &mut SandboxEngine) -> ArenaSnapshot {
    engine.tick(&firing(), DT);
    for _ in 0..180 {
        let snapshot = engine.tick(&InputFrame::default(), DT);
        if snapshot.events.iter().any(|e| matches!(e, GameEvent::ProjectileHit { .. })) {
            return snapshot;
        }
    }
    panic!("missile never hit");
}

#[test]
fn test_splash_damages_everything_in_radius() {
    let mut engine = kinematic_engine(steady_config(), catalog_with_dummy(100));
    engine.spawn_prefab(DUMMY, ahead(30.0));
    engine.spawn_prefab(DUMMY, ahead(30.0) + Vec3::new(1.5, 0.0, 0.0));

    let snapshot = fire_once_until_hit(&mut engine);
    assert_eq!(count_events(&snapshot, |e| matches!(e, GameEvent::ProjectileHit { damaged: 2, .. })), 1);
    let health: Vec<i32> = snapshot.combatants.iter().map(|c| c.health).collect();
    assert_eq!(health, vec![75, 75]);
    assert!(snapshot.projectiles.is_empty());
}

#[test]
fn test_direct_hit_damages_one() {
    let mut assets = catalog_with_dummy(100);
    assets.register_prefab(Prefab {
        name: "Dart".to_string(),
        layer: Layer::Projectile,
        collider: Some(Collider::Sphere { radius: 0.2 }),
        health: None,
        projectile: Some(ProjectileTuning {
            splash_size: 0.5,
            hit_size: 1.0,
            ..Default::default()
        }),
        floor: false,
        enemy: false,
    });
    let mut config = steady_config();
    config.weapons.missile_prefab = "Dart".to_string();
    let mut engine = kinematic_engine(config, assets);
    engine.spawn_prefab(DUMMY, ahead(30.0));
    engine.spawn_prefab(DUMMY, ahead(30.0) + Vec3::new(1.5, 0.0, 0.0));

    let snapshot = fire_once_until_hit(&mut engine);
    assert_eq!(count_events(&snapshot, |e| matches!(e, GameEvent::ProjectileHit { damaged: 1, .. })), 1);
    let mut health: Vec<i32> = snapshot.combatants.iter().map(|c| c.health).collect();
    health.sort();
    assert_eq!(health, vec![75, 100]);
}

#[test]
fn test_two_hits_destroy_drone() {
    let mut engine = kinematic_engine(steady_config(), AssetCatalog::builtin());
    let drone = engine.spawn_prefab(DRONE_PREFAB, ahead(30.0)).unwrap();

    fire_once_until_hit(&mut engine);
    for _ in 0..30 {
        engine.tick(&InputFrame::default(), DT);
    }
    let snapshot = fire_once_until_hit(&mut engine);

    assert_eq!(
        count_events(&snapshot, |e| *e == GameEvent::EntityDestroyed { entity: entity_id(drone) }),
        1
    );
    assert!(snapshot.combatants.is_empty());
    assert!(!engine.arena().is_alive(drone));
    assert!(engine.world().get::<&Transform>(drone).is_err());
}

#[test]
fn test_dead_target_makes_missile_fly_straight() {
    let mut engine = kinematic_engine(steady_config(), catalog_with_dummy(1000));
    let dummy = engine.spawn_prefab(DUMMY, ahead(30.0)).unwrap();

    let snapshot = engine.tick(&firing(), DT);
    assert_eq!(snapshot.projectiles[0].target, Some(entity_id(dummy)));

    engine.arena_mut().destroy(dummy);
    let first = engine.tick(&InputFrame::default(), DT);
    assert_eq!(first.projectiles.len(), 1);
    assert_eq!(first.projectiles[0].target, None);

    let second = engine.tick(&InputFrame::default(), DT);
    let third = engine.tick(&InputFrame::default(), DT);
    let step_a = second.projectiles[0].position - first.projectiles[0].position;
    let step_b = third.projectiles[0].position - second.projectiles[0].position;
    assert!(step_a.distance(step_b) < 1e-3, "missile should keep its heading");

    // Nothing to hit: it runs out of lifetime.
    let mut expired = false;
    for _ in 0..400 {
        let snapshot = engine.tick(&InputFrame::default(), DT);
        if snapshot.events.iter().any(|e| matches!(e, GameEvent::ProjectileExpired { .. })) {
            expired = true;
            assert!(snapshot.projectiles.is_empty());
            break;
        }
    }
    assert!(expired);
}

// ---- Health ----

#[test]
fn test_vehicle_destroyed_exactly_once() {
    let mut engine = kinematic_engine(steady_config(), AssetCatalog::builtin());
    let vehicle = engine.vehicle().entity;

    engine.arena_mut().modify_health(vehicle, -150);
    engine.arena_mut().modify_health(vehicle, -10);
    let snapshot = engine.tick(&InputFrame::default(), DT);

    let destroyed = |s: &ArenaSnapshot| count_events(s, |e| *e == GameEvent::EntityDestroyed { entity: entity_id(vehicle) });
    assert_eq!(destroyed(&snapshot), 1);
    assert_eq!(count_events(&snapshot, |e| matches!(e, GameEvent::HealthChanged { .. })), 2);
    assert!(snapshot.vehicle.destroyed);
    assert_eq!(snapshot.vehicle.max_health, 100);

    // The engine keeps running without a vehicle; mounts and loaded missiles are gone.
    for _ in 0..5 {
        let snapshot = engine.tick(&firing(), DT);
        assert_eq!(destroyed(&snapshot), 0);
    }
    for mount in &engine.vehicle().mounts {
        assert!(!engine.arena().is_alive(mount.entity));
    }
    for (_, &missile) in engine.vehicle().salvo.loaded_slots() {
        assert!(!engine.arena().is_alive(missile));
    }
}

#[test]
fn test_health_reported_for_combatants() {
    let mut engine = kinematic_engine(steady_config(), AssetCatalog::builtin());
    let drone = engine.spawn_prefab(DRONE_PREFAB, Vec3::new(20.0, 1.0, 20.0)).unwrap();
    engine.arena_mut().modify_health(drone, -20);
    engine.arena_mut().modify_health(drone, 5);

    let snapshot = engine.tick(&InputFrame::default(), DT);
    assert_eq!(snapshot.combatants[0].health, 35);
    assert_eq!(snapshot.combatants[0].max_health, 50);
    assert_eq!(
        count_events(&snapshot, |e| *e == GameEvent::HealthChanged { entity: entity_id(drone), value: 35, max: 50 }),
        1
    );
}

// ---- Flight ----

/// Arena with the vehicle placed at `position`, plus its sandbox body.
fn flight_rig(config: &ArenaConfig, position: Vec3) -> (Arena, crate::vehicle::Vehicle, SandboxBody) {
    let mut arena = Arena::new();
    let assets = catalog_with_dummy(100);
    world_setup::setup_arena(&mut arena, &assets, config);
    let transform = Transform::from_position(position);
    let vehicle = world_setup::spawn_vehicle(&mut arena, config, transform);
    (arena, vehicle, SandboxBody::new(transform, config.vehicle.mass))
}

fn hover_tuning() -> VehicleTuning {
    VehicleTuning {
        hover_force: 10.0,
        hover_distance: 2.0,
        ..Default::default()
    }
}

#[test]
fn test_hover_lift_at_half_distance() {
    let config = ArenaConfig {
        vehicle: hover_tuning(),
        ..Default::default()
    };
    // Floor top at y = 0, hover points one unit above it.
    let (mut arena, vehicle, mut body) = flight_rig(&config, Vec3::new(0.0, 1.0, 0.0));
    flight::run(&mut arena, &vehicle, &mut body, &ColliderQuery, &config.vehicle);

    let force = body.pending_force();
    assert!(approx(force.y, 4.0 * 20.0), "force = {force}");
    assert!(approx(force.x, 0.0));
    assert!(approx(force.z, 0.0));
    assert!(body.pending_torque().length() < 1e-3);
}

#[test]
fn test_overlapping_floors_add_lift() {
    let floor = SpawnPoint {
        prefab: FLOOR_PREFAB.to_string(),
        position: Vec3::new(0.0, -0.5, 0.0),
    };
    let config = ArenaConfig {
        vehicle: hover_tuning(),
        spawns: vec![floor.clone(), floor],
        ..Default::default()
    };
    let (mut arena, vehicle, mut body) = flight_rig(&config, Vec3::new(0.0, 1.0, 0.0));
    flight::run(&mut arena, &vehicle, &mut body, &ColliderQuery, &config.vehicle);

    // Every floor hit under a hover point adds its own lift.
    let force = body.pending_force();
    assert!(approx(force.y, 2.0 * 4.0 * 20.0), "force = {force}");
    assert!(approx(force.x, 0.0));
    assert!(approx(force.z, 0.0));
}

#[test]
fn test_no_floor_no_lift() {
    let config = ArenaConfig {
        vehicle: hover_tuning(),
        spawns: Vec::new(),
        ..Default::default()
    };
    let (mut arena, vehicle, mut body) = flight_rig(&config, Vec3::new(0.0, 1.0, 0.0));
    flight::run(&mut arena, &vehicle, &mut body, &ColliderQuery, &config.vehicle);

    assert_eq!(body.pending_force(), Vec3::ZERO);
    assert_eq!(body.pending_torque(), Vec3::ZERO);
}

#[test]
fn test_non_floor_environment_gives_no_lift() {
    let mut config = ArenaConfig {
        vehicle: hover_tuning(),
        spawns: Vec::new(),
        ..Default::default()
    };
    config.spawns.push(SpawnPoint {
        prefab: "Crate".to_string(),
        position: Vec3::new(0.0, -0.5, 0.0),
    });
    let mut arena = Arena::new();
    let mut assets = AssetCatalog::builtin();
    assets.register_prefab(Prefab {
        name: "Crate".to_string(),
        layer: Layer::Environment,
        collider: Some(Collider::Box {
            half_extents: Vec3::new(10.0, 0.5, 10.0),
        }),
        health: None,
        projectile: None,
        floor: false,
        enemy: false,
    });
    world_setup::setup_arena(&mut arena, &assets, &config);
    let transform = Transform::from_position(Vec3::new(0.0, 1.0, 0.0));
    let vehicle = world_setup::spawn_vehicle(&mut arena, &config, transform);
    let mut body = SandboxBody::new(transform, config.vehicle.mass);

    flight::run(&mut arena, &vehicle, &mut body, &ColliderQuery, &config.vehicle);
    assert_eq!(body.pending_force(), Vec3::ZERO);
}

#[test]
fn test_forward_input_thrusts_and_lightens_front() {
    let config = ArenaConfig {
        vehicle: hover_tuning(),
        ..Default::default()
    };
    let (mut arena, mut vehicle, mut body) = flight_rig(&config, Vec3::new(0.0, 1.0, 0.0));
    vehicle.held = HeldDirections {
        forward: true,
        ..Default::default()
    };
    vehicle.input = vehicle.held.input_vector();
    flight::run(&mut arena, &vehicle, &mut body, &ColliderQuery, &config.vehicle);

    let force = body.pending_force();
    // Front points at 0.8, rear at 1.0.
    assert!(approx(force.y, 2.0 * 16.0 + 2.0 * 20.0), "force = {force}");
    assert!(approx(force.z, config.vehicle.move_force));
    // Less lift in front pitches the nose down (positive rotation about +x).
    assert!(body.pending_torque().x > 0.0);
}

#[test]
fn test_camera_heading_turns_vehicle() {
    let config = ArenaConfig {
        spawns: Vec::new(),
        ..Default::default()
    };
    let (mut arena, mut vehicle, mut body) = flight_rig(&config, Vec3::new(0.0, 1.0, 0.0));
    vehicle.aim.yaw = Quat::from_rotation_y(90f32.to_radians());
    flight::run(&mut arena, &vehicle, &mut body, &ColliderQuery, &config.vehicle);

    // Camera to the right: yaw toward +x, i.e. positive torque about +y.
    let torque = body.pending_torque();
    assert!(approx(torque.y, 0.5 * config.vehicle.turn_force), "torque = {torque}");
}

#[test]
fn test_stabilizer_pushes_back_past_max_tilt() {
    let config = ArenaConfig {
        spawns: Vec::new(),
        ..Default::default()
    };
    let (mut arena, vehicle, _) = flight_rig(&config, Vec3::new(0.0, 1.0, 0.0));
    let tilted = Transform::new(Vec3::new(0.0, 1.0, 0.0), Quat::from_rotation_z(-50f32.to_radians()));
    let mut body = SandboxBody::new(tilted, config.vehicle.mass);
    flight::run(&mut arena, &vehicle, &mut body, &ColliderQuery, &config.vehicle);

    let torque = body.pending_torque();
    assert!(approx(torque.length(), config.vehicle.stability_force), "torque = {torque}");
    // Rolled right (up toward +x): correct with positive roll about +z.
    assert!(torque.z > 0.0);
}

#[test]
fn test_sandbox_vehicle_hovers() {
    let mut engine = SandboxEngine::sandbox(ArenaConfig::default());
    let mut snapshot = engine.tick(&InputFrame::default(), DT);
    for _ in 0..600 {
        snapshot = engine.tick(&InputFrame::default(), DT);
    }
    let position = snapshot.vehicle.position;
    assert!(position.is_finite());
    assert!(position.y > 0.5 && position.y < 4.0, "y = {}", position.y);
    assert!(snapshot.vehicle.tilt_degrees < 5.0);
}

#[test]
fn test_vehicle_drives_forward() {
    let config = ArenaConfig {
        spawns: Vec::new(),
        ..Default::default()
    };
    let mut engine = SandboxEngine::sandbox(config);
    engine.body_mut().use_gravity = false;
    let input = InputFrame {
        held: HeldDirections {
            forward: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut snapshot = engine.tick(&input, DT);
    for _ in 0..120 {
        snapshot = engine.tick(&input, DT);
    }
    assert!(snapshot.vehicle.position.z > 1.0, "z = {}", snapshot.vehicle.position.z);
    assert!(snapshot.vehicle.last_position.z < snapshot.vehicle.position.z);
}

// ---- Commands ----

#[test]
fn test_pause_and_resume() {
    let mut engine = SandboxEngine::sandbox(ArenaConfig::default());
    engine.tick(&InputFrame::default(), DT);

    engine.queue_command(SimCommand::Pause);
    let paused = engine.tick(&InputFrame::default(), DT);
    assert_eq!(paused.phase, SimPhase::Paused);
    let frozen = engine.tick(&InputFrame::default(), DT);
    assert_eq!(frozen.time.tick, paused.time.tick);
    assert_eq!(frozen.vehicle.position, paused.vehicle.position);

    engine.queue_command(SimCommand::Resume);
    let resumed = engine.tick(&InputFrame::default(), DT);
    assert_eq!(resumed.phase, SimPhase::Active);
    assert_eq!(resumed.time.tick, paused.time.tick + 1);
}

#[test]
fn test_time_scale_clamped() {
    let mut engine = SandboxEngine::sandbox(ArenaConfig::default());
    engine.queue_command(SimCommand::SetTimeScale { scale: 10.0 });
    engine.tick(&InputFrame::default(), DT);
    assert_eq!(engine.time_scale(), 4.0);

    engine.queue_command(SimCommand::SetTimeScale { scale: -1.0 });
    let before = engine.time();
    engine.tick(&InputFrame::default(), DT);
    assert_eq!(engine.time_scale(), 0.0);
    assert_eq!(engine.time().elapsed_secs, before.elapsed_secs);
}

#[test]
fn test_stop_vehicle_zeroes_velocity() {
    let mut engine = SandboxEngine::sandbox(ArenaConfig::default());
    engine.body_mut().linear_velocity = Vec3::new(5.0, 0.0, 5.0);
    engine.body_mut().angular_velocity = Vec3::new(0.0, 1.0, 0.0);

    engine.queue_commands([SimCommand::Pause, SimCommand::StopVehicle]);
    engine.tick(&InputFrame::default(), DT);
    assert_eq!(engine.body().linear_velocity, Vec3::ZERO);
    assert_eq!(engine.body().angular_velocity, Vec3::ZERO);
}

#[test]
fn test_spawn_prefab_command() {
    let mut engine = SandboxEngine::sandbox(ArenaConfig::default());
    engine.queue_commands([
        SimCommand::SpawnPrefab {
            prefab: DRONE_PREFAB.to_string(),
            position: Vec3::new(5.0, 2.0, 5.0),
        },
        SimCommand::SpawnPrefab {
            prefab: "Nonexistent".to_string(),
            position: Vec3::ZERO,
        },
    ]);
    let snapshot = engine.tick(&InputFrame::default(), DT);
    assert_eq!(snapshot.combatants.len(), 1);
    assert_eq!(snapshot.combatants[0].position, Vec3::new(5.0, 2.0, 5.0));
}

// ---- Arena ----

#[test]
fn test_reparent_keeps_world_pose_and_follows_parent() {
    let assets = AssetCatalog::builtin();
    let prefab = assets.get_prefab(DRONE_PREFAB).unwrap().clone();
    let mut arena = Arena::new();
    let parent = arena.spawn(&prefab, Vec3::new(1.0, 0.0, 0.0), Quat::from_rotation_y(90f32.to_radians()));
    let child = arena.spawn(&prefab, Vec3::new(1.0, 0.0, 2.0), Quat::IDENTITY);

    arena.reparent(child, Some(parent));
    arena.propagate_transforms();
    let pose = arena.transform(child).unwrap();
    assert!(pose.position.distance(Vec3::new(1.0, 0.0, 2.0)) < 1e-4);

    arena.set_transform(parent, Transform::new(Vec3::new(4.0, 0.0, 0.0), Quat::from_rotation_y(90f32.to_radians())));
    arena.propagate_transforms();
    let pose = arena.transform(child).unwrap();
    assert!(pose.position.distance(Vec3::new(4.0, 0.0, 2.0)) < 1e-4);

    arena.reparent(child, None);
    arena.set_transform(parent, Transform::from_position(Vec3::ZERO));
    arena.propagate_transforms();
    let pose = arena.transform(child).unwrap();
    assert!(pose.position.distance(Vec3::new(4.0, 0.0, 2.0)) < 1e-4);
}

#[test]
fn test_destroy_is_deferred_and_takes_children() {
    let assets = AssetCatalog::builtin();
    let prefab = assets.get_prefab(DRONE_PREFAB).unwrap().clone();
    let mut arena = Arena::new();
    let parent = arena.spawn(&prefab, Vec3::ZERO, Quat::IDENTITY);
    let child = arena.spawn(&prefab, Vec3::X, Quat::IDENTITY);
    let grandchild = arena.spawn(&prefab, Vec3::Y, Quat::IDENTITY);
    let bystander = arena.spawn(&prefab, Vec3::Z, Quat::IDENTITY);
    arena.reparent(child, Some(parent));
    arena.reparent(grandchild, Some(child));

    arena.destroy(parent);
    arena.destroy(parent);
    assert!(!arena.is_alive(parent));
    assert!(arena.world().contains(parent));
    let destroyed: Vec<GameEvent> = arena.drain_events();
    assert_eq!(destroyed, vec![GameEvent::EntityDestroyed { entity: entity_id(parent) }]);

    assert_eq!(arena.despawn_destroyed(), 3);
    assert!(!arena.world().contains(child));
    assert!(!arena.world().contains(grandchild));
    assert!(arena.is_alive(bystander));
}

#[test]
fn test_health_zero_requests_destruction_once() {
    let assets = AssetCatalog::builtin();
    let prefab = assets.get_prefab(DRONE_PREFAB).unwrap().clone();
    let mut arena = Arena::new();
    let drone = arena.spawn(&prefab, Vec3::ZERO, Quat::IDENTITY);

    arena.modify_health(drone, -50);
    arena.modify_health(drone, -10);
    let destroyed = arena
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::EntityDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
    assert_eq!(arena.health(drone), Some((-10, 50)));
}

// ---- Sandbox collaborators ----

fn query_arena() -> (Arena, hecs::Entity, hecs::Entity) {
    let assets = AssetCatalog::builtin();
    let mut arena = Arena::new();
    let floor = arena.spawn(assets.get_prefab(FLOOR_PREFAB).unwrap(), Vec3::new(0.0, -0.5, 0.0), Quat::IDENTITY);
    let drone = arena.spawn(assets.get_prefab(DRONE_PREFAB).unwrap(), Vec3::new(0.0, 2.0, 10.0), Quat::IDENTITY);
    (arena, floor, drone)
}

#[test]
fn test_raycast_respects_mask_and_range() {
    let (arena, floor, _) = query_arena();
    let query = ColliderQuery;

    let hits = query.raycast_all(arena.world(), Vec3::new(0.0, 1.5, 0.0), Vec3::NEG_Y, 2.0, Layer::Environment.into());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entity, floor);
    assert!(approx(hits[0].distance, 1.5));
    assert!(approx(hits[0].point.y, 0.0));

    assert!(query
        .raycast_all(arena.world(), Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, 2.0, Layer::Environment.into())
        .is_empty());
    assert!(query
        .raycast_all(arena.world(), Vec3::new(0.0, 1.5, 0.0), Vec3::NEG_Y, 2.0, Layer::Enemy.into())
        .is_empty());
}

#[test]
fn test_spherecast_and_overlap() {
    let (arena, floor, drone) = query_arena();
    let query = ColliderQuery;

    let hit = query
        .spherecast(arena.world(), Vec3::new(3.0, 2.0, 0.0), 5.0, Vec3::Z, 100.0, Layer::Enemy.into())
        .unwrap();
    assert_eq!(hit.entity, drone);
    assert!(hit.distance < 10.0);

    assert!(query
        .spherecast(arena.world(), Vec3::new(20.0, 2.0, 0.0), 5.0, Vec3::Z, 100.0, Layer::Enemy.into())
        .is_none());

    let near = query.overlap_sphere(arena.world(), Vec3::new(0.0, 2.0, 8.5), 1.0, LayerMask::ALL);
    assert_eq!(near, vec![drone]);
    let both = query.overlap_sphere(arena.world(), Vec3::new(0.0, 1.0, 9.0), 2.0, LayerMask::ALL);
    assert_eq!(both, vec![drone, floor]);
}

#[test]
fn test_hud_recorder() {
    let mut hud = HudRecorder::default();
    hud.show_lock(Vec2::new(10.0, 20.0));
    hud.show_reticle(Vec2::new(1.0, 2.0));
    assert_eq!(hud.locks_shown, 1);
    assert_eq!(hud.reticles_shown, 1);
    assert_eq!(hud.indicator, Some(HudIndicator::Reticle { x: 1.0, y: 2.0 }));
}

#[test]
fn test_sandbox_body_integrates_forces() {
    let mut body = SandboxBody::new(Transform::IDENTITY, 2.0);
    body.use_gravity = false;
    body.linear_drag = 0.0;
    body.apply_force(Vec3::new(0.0, 0.0, 4.0));
    body.step(0.5);
    assert!(approx(body.linear_velocity.z, 1.0));
    assert!(approx(body.transform().position.z, 0.5));
    assert_eq!(body.pending_force(), Vec3::ZERO);

    let mut kinematic = SandboxBody::kinematic(Transform::IDENTITY);
    kinematic.apply_force(Vec3::ONE * 100.0);
    kinematic.step(1.0);
    assert_eq!(kinematic.transform(), Transform::IDENTITY);
}

// ---- Assets ----

#[test]
fn test_duplicate_prefab_keeps_first() {
    let mut catalog = AssetCatalog::builtin();
    let duplicate = Prefab {
        name: MISSILE_PREFAB.to_string(),
        layer: Layer::Enemy,
        collider: None,
        health: Some(1),
        projectile: None,
        floor: false,
        enemy: true,
    };
    assert!(!catalog.register_prefab(duplicate));
    let missile = catalog.get_prefab(MISSILE_PREFAB).unwrap();
    assert_eq!(missile.layer, Layer::Projectile);
    assert!(missile.projectile.is_some());
}

#[test]
fn test_manifest_loading() {
    let json = r#"{
        "prefabs": [
            { "name": "Turret", "layer": "Enemy", "collider": { "shape": "sphere", "radius": 2.0 }, "health": 200, "enemy": true },
            { "name": "Floor", "layer": "Default" }
        ],
        "sounds": [
            { "name": "launch", "path": "audio/launch.ogg" },
            { "name": "launch", "path": "audio/other.ogg" }
        ],
        "music": [ { "name": "theme", "path": "music/theme.ogg" } ]
    }"#;
    let manifest = hoverstrike_core::config::AssetManifest::from_json(json).unwrap();
    let mut catalog = AssetCatalog::builtin();
    catalog.load_manifest(manifest);

    assert_eq!(catalog.get_prefab("Turret").unwrap().health, Some(200));
    assert!(catalog.get_prefab(FLOOR_PREFAB).unwrap().floor);
    assert_eq!(catalog.get_sound("launch").unwrap().path, "audio/launch.ogg");
    assert_eq!(catalog.get_song("theme").unwrap().path, "music/theme.ogg");
    assert_eq!(catalog.prefab_names().count(), 4);
}
