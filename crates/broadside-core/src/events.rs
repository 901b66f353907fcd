//! Events emitted by the simulation for VFX and UI collaborators.

use serde::{Deserialize, Serialize};

use crate::enums::{RetireReason, ShotKind};
use crate::types::{Position, Velocity};

/// Combat feedback produced during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A projectile left the muzzle toward the current target.
    ShotFired {
        projectile_id: u32,
        kind: ShotKind,
        target_id: u32,
        velocity: Velocity,
    },
    /// A projectile damaged a target.
    TargetHit {
        projectile_id: u32,
        target_id: u32,
        damage: f64,
        remaining_health: f64,
    },
    /// A target's health changed (damage or reset). `fill` is in [0, 1].
    HealthChanged {
        target_id: u32,
        health: f64,
        fill: f64,
    },
    /// A target's health reached zero.
    TargetKilled { target_id: u32, position: Position },
    /// A dead target came back at its spawn point with full health.
    TargetRespawned { target_id: u32, position: Position },
    /// A chain projectile retargeted after its first hit.
    ProjectileRedirected {
        projectile_id: u32,
        target_id: u32,
        velocity: Velocity,
    },
    /// A projectile was removed from the world.
    ProjectileRetired {
        projectile_id: u32,
        reason: RetireReason,
    },
}
