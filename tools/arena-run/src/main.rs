//! arena-run: headless HOVERSTRIKE arena runner.
//!
//! Usage:
//!   arena-run run --config arena.json --ticks 600 --every 60
//!   arena-run run --config arena.json --manifest assets.json --output run.jsonl
//!   arena-run defaults > arena.json

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, Context, Result};
use glam::{Vec2, Vec3};

use hoverstrike_core::commands::{HeldDirections, InputFrame};
use hoverstrike_core::config::{ArenaConfig, AssetManifest};
use hoverstrike_core::constants::FRAME_DT;
use hoverstrike_core::state::ArenaSnapshot;
use hoverstrike_sim::assets::AssetCatalog;
use hoverstrike_sim::control::math::{from_euler_degrees, is_looking_at, signed_angle};
use hoverstrike_sim::SandboxEngine;

/// Largest pointer movement the pilot makes in one frame (degrees).
const PILOT_MAX_TURN: f32 = 10.0;
/// The pilot closes in until this far from its target.
const PILOT_STANDOFF: f32 = 25.0;
/// Aim tolerance for pulling the trigger (1 - cosine).
const PILOT_FIRE_THRESHOLD: f32 = 0.02;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "defaults" => cmd_defaults(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "arena-run: HOVERSTRIKE headless arena runner\n\
         \n\
         Commands:\n\
         \n\
         run       Fly the scripted pilot through an arena and print snapshots\n\
         \n\
           --config <path>    Arena description (JSON); defaults when omitted\n\
           --manifest <path>  Asset manifest (JSON) merged into the built-in prefabs\n\
           --ticks <N>        Frames to simulate (default: 600)\n\
           --every <N>        Print every Nth snapshot (default: 60)\n\
           --output <path>    Write JSON lines here instead of stdout\n\
         \n\
         defaults  Print the default arena description\n\
         \n\
         Logging is controlled by RUST_LOG, e.g. RUST_LOG=hoverstrike_sim=debug\n"
    );
}

fn parse_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_count(args: &[String], flag: &str, default: u64) -> Result<u64> {
    match parse_value(args, flag) {
        Some(value) => value
            .parse()
            .with_context(|| format!("{flag} expects a whole number, got {value:?}")),
        None => Ok(default),
    }
}

fn read_json_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

// --- Run command ---

fn cmd_run(args: &[String]) -> Result<()> {
    let config = match parse_value(args, "--config") {
        Some(path) => {
            let path = PathBuf::from(path);
            ArenaConfig::from_json(&read_json_file(&path)?)
                .with_context(|| format!("invalid arena description in {}", path.display()))?
        }
        None => ArenaConfig::default(),
    };

    let mut assets = AssetCatalog::builtin();
    if let Some(path) = parse_value(args, "--manifest") {
        let path = PathBuf::from(path);
        let manifest = AssetManifest::from_json(&read_json_file(&path)?)
            .with_context(|| format!("invalid asset manifest in {}", path.display()))?;
        assets.load_manifest(manifest);
    }

    let ticks = parse_count(args, "--ticks", 600)?;
    let every = parse_count(args, "--every", 60)?;
    if every == 0 {
        return Err(anyhow!("--every must be at least 1"));
    }

    let mut out: Box<dyn Write> = match parse_value(args, "--output") {
        Some(path) => Box::new(BufWriter::new(
            fs::File::create(path).with_context(|| format!("failed to create {path}"))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut engine = SandboxEngine::sandbox_with_assets(config, assets);
    let mut input = InputFrame::default();
    let mut kills = 0;
    for tick in 0..ticks {
        let snapshot = engine.tick(&input, FRAME_DT);
        kills += snapshot
            .events
            .iter()
            .filter(|event| matches!(event, hoverstrike_core::events::GameEvent::EntityDestroyed { .. }))
            .count();

        if tick % every == 0 || tick + 1 == ticks {
            serde_json::to_writer(&mut out, &snapshot).context("failed to serialize snapshot")?;
            writeln!(out)?;
        }
        if snapshot.vehicle.destroyed {
            tracing::info!(tick, "vehicle destroyed, stopping");
            break;
        }
        input = pilot(&snapshot);
    }
    out.flush()?;

    tracing::info!(ticks, destroyed = kills, "run finished");
    Ok(())
}

fn cmd_defaults() -> Result<()> {
    let json = serde_json::to_string_pretty(&ArenaConfig::default()).context("failed to serialize defaults")?;
    println!("{json}");
    Ok(())
}

/// Scripted pilot: turn toward the nearest combatant, close in, and fire
/// once the weapons are lined up.
fn pilot(snapshot: &ArenaSnapshot) -> InputFrame {
    let vehicle = snapshot.vehicle.position;
    let Some(target) = snapshot
        .combatants
        .iter()
        .min_by(|a, b| a.position.distance(vehicle).total_cmp(&b.position.distance(vehicle)))
    else {
        return InputFrame::default();
    };

    let to_target = target.position - vehicle;
    let flat = Vec3::new(to_target.x, 0.0, to_target.z);
    let camera_forward = from_euler_degrees(snapshot.camera.yaw_degrees, 0.0, 0.0) * Vec3::Z;
    let yaw_error = signed_angle(camera_forward, flat, Vec3::Y);

    InputFrame {
        pointer_delta: Vec2::new(yaw_error.clamp(-PILOT_MAX_TURN, PILOT_MAX_TURN), 0.0),
        held: HeldDirections {
            forward: flat.length() > PILOT_STANDOFF,
            ..Default::default()
        },
        fire: snapshot.target.is_some() && is_looking_at(camera_forward, flat, PILOT_FIRE_THRESHOLD),
        reload: false,
    }
}
