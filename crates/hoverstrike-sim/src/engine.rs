//! Simulation engine: the frame loop of the arena.
//!
//! `SimulationEngine` owns the entity store, the collaborators and the
//! vehicle state, processes queued commands, runs every system in a fixed
//! order and produces `ArenaSnapshot`s. Headless, so it can be driven from
//! tests and the arena runner as easily as from a game engine.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hoverstrike_control::aim::CameraLens;
use hoverstrike_core::commands::{HeldDirections, InputFrame, SimCommand};
use hoverstrike_core::config::ArenaConfig;
use hoverstrike_core::constants::{FIXED_DT, MAX_FIXED_STEPS_PER_FRAME, MAX_TIME_SCALE};
use hoverstrike_core::enums::{HudIndicator, SimPhase};
use hoverstrike_core::state::ArenaSnapshot;
use hoverstrike_core::types::{SimTime, Transform};

use crate::arena::Arena;
use crate::assets::AssetCatalog;
use crate::interfaces::{EntityLifecycle, RigidBody, SpatialQuery, UiSink};
use crate::sandbox::{ColliderQuery, HudRecorder, SandboxBody};
use crate::systems;
use crate::vehicle::Vehicle;
use crate::world_setup;

/// The simulation engine. Owns the arena, the collaborators and all sim state.
pub struct SimulationEngine<B, Q, U> {
    arena: Arena,
    body: B,
    query: Q,
    ui: U,
    assets: AssetCatalog,
    vehicle: Vehicle,
    config: ArenaConfig,
    lens: CameraLens,
    time: SimTime,
    phase: SimPhase,
    time_scale: f32,
    fixed_accumulator: f32,
    rng: ChaCha8Rng,
    command_queue: VecDeque<SimCommand>,
    hud: Option<HudIndicator>,
}

/// Engine wired to the headless sandbox collaborators.
pub type SandboxEngine = SimulationEngine<SandboxBody, ColliderQuery, HudRecorder>;

impl SandboxEngine {
    /// Sandbox engine with the built-in prefabs.
    pub fn sandbox(config: ArenaConfig) -> Self {
        Self::sandbox_with_assets(config, AssetCatalog::builtin())
    }

    pub fn sandbox_with_assets(config: ArenaConfig, assets: AssetCatalog) -> Self {
        let body = SandboxBody::new(
            Transform::from_position(config.spawn_position),
            config.vehicle.mass,
        );
        Self::new(config, assets, body, ColliderQuery, HudRecorder::default())
    }
}

impl<B: RigidBody, Q: SpatialQuery, U: UiSink> SimulationEngine<B, Q, U> {
    /// Build the arena: configured spawns, then the vehicle at the body's pose
    /// with every slot loaded.
    pub fn new(config: ArenaConfig, assets: AssetCatalog, body: B, query: Q, ui: U) -> Self {
        let mut arena = Arena::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        world_setup::setup_arena(&mut arena, &assets, &config);
        let mut vehicle = world_setup::spawn_vehicle(&mut arena, &config, body.transform());
        let loaded = systems::weapons::fill_salvo(&mut arena, &mut vehicle, &assets, &mut rng, &config.weapons);
        arena.propagate_transforms();
        // Spawn-time events are not part of any tick.
        arena.drain_events();

        tracing::info!(
            seed = config.seed,
            spawns = config.spawns.len(),
            loaded,
            capacity = vehicle.salvo.capacity(),
            "arena ready"
        );

        Self {
            arena,
            body,
            query,
            ui,
            assets,
            vehicle,
            lens: CameraLens::from_config(&config.camera),
            time: SimTime::default(),
            phase: SimPhase::Active,
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            fixed_accumulator: 0.0,
            rng,
            command_queue: VecDeque::new(),
            hud: None,
            config,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame of `dt` seconds and return the
    /// resulting snapshot.
    pub fn tick(&mut self, input: &InputFrame, dt: f32) -> ArenaSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Active {
            let dt = dt * self.time_scale;
            self.run_systems(input, dt);
            self.time.advance(dt);
        }

        let events = self.arena.drain_events();
        systems::snapshot::build_snapshot(
            &self.arena,
            &self.vehicle,
            self.body.transform(),
            &self.time,
            self.phase,
            self.hud,
            events,
        )
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable access for hosts that place or damage entities directly.
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Read-only reference to the entity store.
    pub fn world(&self) -> &World {
        self.arena.world()
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn assets(&self) -> &AssetCatalog {
        &self.assets
    }

    /// HUD indicator shown on the last active frame.
    pub fn hud(&self) -> Option<HudIndicator> {
        self.hud
    }

    /// Spawn a prefab immediately, outside the command queue.
    pub fn spawn_prefab(&mut self, prefab: &str, position: glam::Vec3) -> Option<Entity> {
        world_setup::spawn_prefab(&mut self.arena, &self.assets, prefab, position)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::Pause => {
                if self.phase == SimPhase::Active {
                    self.phase = SimPhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Active;
                }
            }
            SimCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
            }
            SimCommand::StopVehicle => {
                self.body.stop();
            }
            SimCommand::SpawnPrefab { prefab, position } => {
                self.spawn_prefab(&prefab, position);
            }
        }
    }

    /// Run every system in order for one frame.
    fn run_systems(&mut self, input: &InputFrame, dt: f32) {
        let alive = self.arena.is_alive(self.vehicle.entity);
        if alive {
            self.vehicle.input = input.held.input_vector();
            self.vehicle.held = input.held;

            self.hud = systems::aim::run(
                &mut self.arena,
                &mut self.vehicle,
                &self.query,
                &mut self.ui,
                &self.lens,
                &self.config.vehicle,
                &self.config.camera,
                input.pointer_delta,
                dt,
            );
            systems::weapons::run(
                &mut self.arena,
                &mut self.vehicle,
                &self.assets,
                &mut self.rng,
                &self.config.weapons,
                input,
                dt,
            );
            self.run_fixed_steps(dt);
        } else {
            self.vehicle.input = Vec2::ZERO;
            self.vehicle.held = HeldDirections::default();
            self.vehicle.target = None;
            for mount in &self.vehicle.mounts {
                self.arena.destroy(mount.entity);
            }
        }

        systems::projectiles::run(&mut self.arena, &self.query, dt);
        systems::cleanup::run(&mut self.arena);
    }

    /// Flight forces and body integration at the fixed rate. Backlog beyond
    /// `MAX_FIXED_STEPS_PER_FRAME` is dropped.
    fn run_fixed_steps(&mut self, dt: f32) {
        self.fixed_accumulator += dt;
        let mut steps = 0;
        while self.fixed_accumulator >= FIXED_DT && steps < MAX_FIXED_STEPS_PER_FRAME {
            systems::flight::run(
                &mut self.arena,
                &self.vehicle,
                &mut self.body,
                &self.query,
                &self.config.vehicle,
            );
            self.body.step(FIXED_DT);
            self.sync_vehicle();
            self.fixed_accumulator -= FIXED_DT;
            steps += 1;
        }
        if steps == MAX_FIXED_STEPS_PER_FRAME {
            self.fixed_accumulator = self.fixed_accumulator.min(FIXED_DT);
        }
    }

    /// Copy the body pose onto the vehicle entity and everything it carries.
    fn sync_vehicle(&mut self) {
        let transform = self.body.transform();
        self.arena.set_transform(self.vehicle.entity, transform);
        world_setup::place_mounts(&mut self.arena, &self.vehicle, &transform);
        self.arena.propagate_transforms();
    }
}
