//! headless-runner: drive a BROADSIDE round without a renderer.
//!
//! Loads an optional JSON game config, holds the charge input around a
//! hover level (releasing after each fire), and prints a JSON summary of
//! the combat events.
//!
//! Usage:
//!   headless-runner --ticks 1800 --hover 0.9
//!   headless-runner --config round.json --snapshots

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use broadside_core::commands::PlayerCommand;
use broadside_core::config::GameConfig;
use broadside_core::enums::{InputSource, RetireReason, ShotKind};
use broadside_core::events::CombatEvent;
use broadside_core::state::TargetView;
use broadside_sim::SimulationEngine;

#[derive(Parser, Debug)]
#[command(name = "headless-runner")]
#[command(about = "Run a BROADSIDE round headless and summarize it")]
struct Args {
    /// JSON game config (missing fields take defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value = "1800")]
    ticks: u64,

    /// Charge level the scripted input hovers at
    #[arg(long, default_value = "0.9")]
    hover: f64,

    /// Override the config seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print every snapshot as a JSON line before the summary
    #[arg(long)]
    snapshots: bool,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    elapsed_secs: f64,
    shots: BTreeMap<ShotKind, u32>,
    hits: u32,
    redirects: u32,
    kills: u32,
    respawns: u32,
    expired: u32,
    targets: Vec<TargetView>,
}

impl Summary {
    fn record(&mut self, event: &CombatEvent) {
        match event {
            CombatEvent::ShotFired { kind, .. } => *self.shots.entry(*kind).or_default() += 1,
            CombatEvent::TargetHit { .. } => self.hits += 1,
            CombatEvent::ProjectileRedirected { .. } => self.redirects += 1,
            CombatEvent::TargetKilled { .. } => self.kills += 1,
            CombatEvent::TargetRespawned { .. } => self.respawns += 1,
            CombatEvent::ProjectileRetired { reason, .. } => {
                if *reason == RetireReason::Expired {
                    self.expired += 1;
                }
            }
            CombatEvent::HealthChanged { .. } => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut engine = SimulationEngine::new(config)?;
    engine.queue_command(PlayerCommand::StartRound);

    let mut summary = Summary {
        seed: engine.config().seed,
        ..Summary::default()
    };
    let mut pressed = false;

    for _ in 0..args.ticks {
        let charge = engine.charge();
        let want = !charge.fired_this_cycle() && charge.charge() < args.hover;
        if want != pressed {
            engine.queue_command(PlayerCommand::SetChargeInput {
                source: InputSource::Keyboard,
                pressed: want,
            });
            pressed = want;
        }

        let snapshot = engine.tick();
        for event in &snapshot.events {
            summary.record(event);
        }
        if args.snapshots {
            println!("{}", serde_json::to_string(&snapshot)?);
        }
        summary.ticks = snapshot.time.tick;
        summary.elapsed_secs = snapshot.time.elapsed_secs;
        summary.targets = snapshot.targets;
    }

    tracing::info!(
        ticks = summary.ticks,
        hits = summary.hits,
        kills = summary.kills,
        "run complete"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
