//! Game state snapshot: the complete visible state handed to display collaborators each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, ShotKind};
use crate::events::CombatEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub charge: ChargeView,
    pub bands: Vec<BandView>,
    /// Pool id of the target the cannon is aiming at, if any is alive.
    pub current_target: Option<u32>,
    pub targets: Vec<TargetView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<CombatEvent>,
}

/// Charge bar state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChargeView {
    /// Fill ratio in [0, 1].
    pub fill: f64,
    /// Band the fill is currently inside (if any).
    pub band: Option<ShotKind>,
    /// Seconds held continuously inside the locked band.
    pub hold_elapsed: f64,
    pub fired_this_cycle: bool,
}

/// Normalized band range for laying out band markers on the charge bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BandView {
    pub kind: ShotKind,
    pub min: f64,
    pub max: f64,
    pub hold_secs: f64,
}

/// A target as seen by health bars and VFX.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub id: u32,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    /// Health fill ratio in [0, 1].
    pub health_fill: f64,
    pub alive: bool,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub kind: ShotKind,
    pub position: Position,
    pub velocity: Velocity,
    pub hits: u32,
}
