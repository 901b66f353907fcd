//! End-to-end engine scenarios: charge-driven firing, chain shots,
//! target rotation, respawn, expiry, and determinism.

use broadside_sim::core::commands::PlayerCommand;
use broadside_sim::core::components::Target;
use broadside_sim::core::config::{GameConfig, ShipSpec};
use broadside_sim::core::constants::DT;
use broadside_sim::core::enums::*;
use broadside_sim::core::events::CombatEvent;
use broadside_sim::core::types::Position;
use broadside_sim::health::DamageOutcome;
use broadside_sim::SimulationEngine;

fn stationary(x: f64, y: f64) -> ShipSpec {
    ShipSpec {
        position: Position::new(x, y, 0.0),
        reach_point: Position::new(x, y, 0.0),
        move_speed: 0.0,
        ..ShipSpec::default()
    }
}

fn config_with(ships: Vec<ShipSpec>) -> GameConfig {
    let mut config = GameConfig::default();
    config.fleet.ships = ships;
    config
}

fn started(config: GameConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config).unwrap();
    engine.queue_command(PlayerCommand::StartRound);
    engine.tick();
    engine
}

/// Tick until no projectile is in flight, collecting every event.
fn run_until_clear(engine: &mut SimulationEngine, max_ticks: usize) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    for _ in 0..max_ticks {
        events.extend(engine.tick().events);
        if engine.projectile_count() == 0 && engine.pending_actions() == 0 {
            break;
        }
    }
    events
}

fn set_pressed(engine: &mut SimulationEngine, pressed: bool) {
    engine.queue_command(PlayerCommand::SetChargeInput {
        source: InputSource::Keyboard,
        pressed,
    });
}

#[test]
fn test_round_start_spawns_fleet_and_selects_target() {
    let mut engine = SimulationEngine::new(GameConfig::default()).unwrap();
    assert_eq!(engine.phase(), GamePhase::Setup);

    engine.queue_command(PlayerCommand::StartRound);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.targets.len(), 3);
    assert_eq!(engine.world().query::<&Target>().iter().count(), 3);
    assert_eq!(engine.config().fleet.generated_count, 3);
    assert_eq!(snap.current_target, Some(0));
    assert!(snap.targets.iter().all(|t| t.alive && t.health_fill == 1.0));

    let kinds: Vec<ShotKind> = snap.bands.iter().map(|b| b.kind).collect();
    assert_eq!(kinds, vec![ShotKind::High, ShotKind::Mid, ShotKind::Low]);
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = GameConfig::default();
    config.bands.high.hold_secs = -1.0;
    assert!(SimulationEngine::new(config).is_err());
}

#[test]
fn test_zero_time_multiplier_fires_on_floor() {
    let mut config = config_with(vec![stationary(15.0, 0.0)]);
    config.shots.high.time_multiplier = 0.0;
    let mut engine = started(config);

    assert!(engine.fire(ShotKind::High));
    let events = run_until_clear(&mut engine, 300);
    let hits = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::TargetHit { target_id: 0, .. }))
        .count();
    assert_eq!(hits, 2);
    assert_eq!(engine.target_health(0).unwrap().health, 40.0);
}

#[test]
fn test_chain_shot_hits_two_targets() {
    let mut engine = started(config_with(vec![
        stationary(15.0, 0.0),
        stationary(15.0, 6.0),
        stationary(-20.0, 0.0),
    ]));
    assert_eq!(engine.current_target(), Some(0));

    assert!(engine.fire(ShotKind::Mid));
    let events = run_until_clear(&mut engine, 300);

    assert_eq!(engine.target_health(0).unwrap().health, 82.0);
    assert_eq!(engine.target_health(1).unwrap().health, 82.0);
    assert_eq!(engine.target_health(2).unwrap().health, 100.0);

    let hits: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::TargetHit { target_id, damage, .. } => {
                assert_eq!(*damage, 18.0);
                Some(*target_id)
            }
            _ => None,
        })
        .collect();
    assert_eq!(hits, vec![0, 1]);

    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::ProjectileRedirected { target_id: 1, .. }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::ProjectileRetired {
            reason: RetireReason::ChainComplete,
            ..
        }
    )));
    assert_eq!(engine.projectile_count(), 0);
}

#[test]
fn test_chain_shot_alone_retires_after_first_hit() {
    let mut engine = started(config_with(vec![stationary(15.0, 0.0)]));

    engine.fire(ShotKind::Mid);
    let events = run_until_clear(&mut engine, 300);

    assert_eq!(engine.target_health(0).unwrap().health, 82.0);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::ProjectileRetired {
            reason: RetireReason::NoChainTarget,
            ..
        }
    )));
}

#[test]
fn test_low_shot_lands_single_hit() {
    let mut engine = started(config_with(vec![stationary(10.0, -8.0), stationary(10.0, -4.0)]));

    engine.fire(ShotKind::Low);
    let events = run_until_clear(&mut engine, 300);

    assert_eq!(engine.target_health(0).unwrap().health, 90.0);
    assert_eq!(engine.target_health(1).unwrap().health, 100.0);
    let hits = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::TargetHit { .. }))
        .count();
    assert_eq!(hits, 1);
}

#[test]
fn test_held_high_band_fires_double_shot() {
    let mut engine = started(config_with(vec![stationary(15.0, 0.0)]));

    let mut shots: Vec<(u64, ShotKind, u32)> = Vec::new();
    let mut pressed = false;
    for _ in 0..900 {
        let want = shots.is_empty() && engine.charge().charge() < 0.9;
        if want != pressed {
            set_pressed(&mut engine, want);
            pressed = want;
        }
        let snap = engine.tick();
        for event in &snap.events {
            if let CombatEvent::ShotFired { kind, target_id, .. } = event {
                shots.push((snap.time.tick, *kind, *target_id));
            }
        }
        if shots.len() >= 2 && engine.projectile_count() == 0 {
            break;
        }
    }

    assert_eq!(shots.len(), 2, "shots: {shots:?}");
    assert!(shots.iter().all(|&(_, kind, target)| kind == ShotKind::High && target == 0));

    let gap = (shots[1].0 - shots[0].0) as f64 * DT;
    assert!(gap >= 0.12 && gap < 0.12 + DT, "gap {gap}");
    assert_eq!(engine.target_health(0).unwrap().health, 40.0);
}

#[test]
fn test_follow_up_shot_reads_current_target() {
    let mut engine = started(config_with(vec![stationary(15.0, 0.0), stationary(-15.0, 0.0)]));

    engine.fire(ShotKind::High);
    let mut events = engine.tick().events;
    assert_eq!(engine.apply_damage(0, 1000.0), Some(DamageOutcome::Killed));
    assert_eq!(engine.current_target(), Some(1));

    for _ in 0..20 {
        events.extend(engine.tick().events);
    }

    let targets: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::ShotFired { target_id, .. } => Some(*target_id),
            _ => None,
        })
        .collect();
    assert_eq!(targets, vec![0, 1]);
}

#[test]
fn test_follow_up_dropped_when_all_dead() {
    let mut engine = started(config_with(vec![stationary(15.0, 0.0)]));

    engine.fire(ShotKind::High);
    engine.apply_damage(0, 1000.0);
    let mut fired = 0;
    for _ in 0..20 {
        fired += engine
            .tick()
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::ShotFired { .. }))
            .count();
    }
    assert_eq!(fired, 1);
    assert_eq!(engine.projectile_count(), 1);
}

#[test]
fn test_round_robin_through_kills() {
    let mut engine = started(config_with(vec![
        stationary(10.0, 0.0),
        stationary(0.0, 10.0),
        stationary(-10.0, 0.0),
    ]));
    assert_eq!(engine.current_target(), Some(0));

    engine.apply_damage(0, 1000.0);
    assert_eq!(engine.current_target(), Some(1));

    // Killing a non-current target leaves the selection alone.
    engine.apply_damage(2, 1000.0);
    assert_eq!(engine.current_target(), Some(1));

    // Damage to a dead target is ignored.
    assert_eq!(engine.apply_damage(2, 5.0), Some(DamageOutcome::Ignored));

    engine.apply_damage(1, 1000.0);
    assert_eq!(engine.current_target(), None);
    assert!(!engine.fire(ShotKind::Low));
    assert_eq!(engine.projectile_count(), 0);
    assert_eq!(engine.apply_damage(99, 1.0), None);
}

#[test]
fn test_killed_ship_respawns_at_spawn_point() {
    let mut config = GameConfig::default();
    config.fleet.ships = vec![ShipSpec {
        position: Position::new(20.0, 0.0, 0.0),
        reach_point: Position::new(10.0, 0.0, 0.0),
        respawn_delay_secs: 0.5,
        ..ShipSpec::default()
    }];
    let mut engine = started(config);

    for _ in 0..60 {
        engine.tick();
    }
    let moved = engine.target_position(0).unwrap();
    assert!(moved.x < 19.0, "ship should have advanced, x = {}", moved.x);

    let snap_kill = {
        engine.apply_damage(0, 1000.0);
        engine.tick()
    };
    assert!(snap_kill
        .events
        .iter()
        .any(|e| matches!(e, CombatEvent::TargetKilled { target_id: 0, .. })));
    assert_eq!(snap_kill.current_target, None);

    // Hidden ships hold still.
    let hidden_at = engine.target_position(0).unwrap();
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.target_position(0).unwrap(), hidden_at);

    let mut respawned = None;
    for _ in 0..60 {
        let snap = engine.tick();
        if let Some(CombatEvent::TargetRespawned { position, .. }) = snap
            .events
            .iter()
            .find(|e| matches!(e, CombatEvent::TargetRespawned { .. }))
        {
            respawned = Some((*position, snap.current_target));
            break;
        }
    }

    let (position, current) = respawned.expect("ship never respawned");
    assert_eq!(position, Position::new(20.0, 0.0, 0.0));
    assert_eq!(current, Some(0));
    assert_eq!(engine.target_health(0).unwrap().health, 100.0);
}

#[test]
fn test_unhit_projectile_expires() {
    let mut config = config_with(vec![ShipSpec {
        respawn_delay_secs: 60.0,
        ..stationary(15.0, 0.0)
    }]);
    config.projectile.max_lifetime_secs = 3.0;
    let mut engine = started(config);

    engine.fire(ShotKind::Low);
    engine.apply_damage(0, 1000.0);

    let mut expired_at = None;
    for _ in 0..400 {
        let snap = engine.tick();
        if snap.events.iter().any(|e| {
            matches!(
                e,
                CombatEvent::ProjectileRetired {
                    reason: RetireReason::Expired,
                    ..
                }
            )
        }) {
            expired_at = Some(snap.time.elapsed_secs);
            break;
        }
    }

    let t = expired_at.expect("projectile never expired");
    assert!((3.0..3.0 + 4.0 * DT).contains(&t), "expired at {t}");
    assert_eq!(engine.projectile_count(), 0);
}

#[test]
fn test_pause_freezes_simulation() {
    let mut engine = started(config_with(vec![stationary(15.0, 0.0)]));
    engine.fire(ShotKind::Low);
    engine.tick();

    engine.queue_command(PlayerCommand::Pause);
    let paused = engine.tick();
    assert_eq!(paused.phase, GamePhase::Paused);
    let frozen = serde_json::to_string(&paused.projectiles).unwrap();

    for _ in 0..30 {
        let snap = engine.tick();
        assert_eq!(snap.time.tick, paused.time.tick);
        assert_eq!(engine.time().tick, paused.time.tick);
        assert_eq!(serde_json::to_string(&snap.projectiles).unwrap(), frozen);
    }

    engine.queue_command(PlayerCommand::Resume);
    let resumed = engine.tick();
    assert_eq!(resumed.phase, GamePhase::Active);
    assert_eq!(resumed.time.tick, paused.time.tick + 1);
}

#[test]
fn test_charge_signal_is_or_of_sources() {
    let mut engine = started(config_with(vec![stationary(15.0, 0.0)]));

    engine.queue_commands([
        PlayerCommand::SetChargeInput {
            source: InputSource::Keyboard,
            pressed: true,
        },
        PlayerCommand::SetChargeInput {
            source: InputSource::Controller,
            pressed: true,
        },
        PlayerCommand::SetChargeInput {
            source: InputSource::Keyboard,
            pressed: false,
        },
    ]);
    engine.tick();
    assert!(engine.charge_pressed());
    assert!(engine.charge().charge() > 0.0);

    engine.queue_command(PlayerCommand::SetChargeInput {
        source: InputSource::Controller,
        pressed: false,
    });
    engine.tick();
    assert!(!engine.charge_pressed());
}

// ---- Determinism ----

fn scripted_run(seed: u64, ticks: usize) -> Vec<String> {
    let config = GameConfig {
        seed,
        ..GameConfig::default()
    };
    let mut engine = SimulationEngine::new(config).unwrap();
    engine.queue_command(PlayerCommand::StartRound);

    (0..ticks)
        .map(|i| {
            match i % 120 {
                0 => set_pressed(&mut engine, true),
                70 => set_pressed(&mut engine, false),
                _ => {}
            }
            serde_json::to_string(&engine.tick()).unwrap()
        })
        .collect()
}

#[test]
fn test_determinism_same_seed() {
    let a = scripted_run(12345, 900);
    let b = scripted_run(12345, 900);
    for (i, (snap_a, snap_b)) in a.iter().zip(&b).enumerate() {
        assert_eq!(snap_a, snap_b, "Snapshots diverged at tick {i}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let a = scripted_run(111, 1);
    let b = scripted_run(222, 1);
    assert_ne!(a[0], b[0], "generated fleets should differ by seed");
}
