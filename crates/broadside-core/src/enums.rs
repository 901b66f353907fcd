//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Weapon behavior fired when a charge band is held long enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShotKind {
    /// Slow, low-damage single shot.
    Low,
    /// Chain shot: hits the locked target, then retargets the nearest other one.
    Mid,
    /// Fast double shot.
    High,
}

impl ShotKind {
    /// All kinds in band-evaluation priority order (highest first).
    pub const PRIORITY: [ShotKind; 3] = [ShotKind::High, ShotKind::Mid, ShotKind::Low];
}

/// Raw input device feeding the charge signal. The signal is the OR of all sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSource {
    Keyboard,
    UiButton,
    Controller,
}

impl InputSource {
    pub const ALL: [InputSource; 3] = [
        InputSource::Keyboard,
        InputSource::UiButton,
        InputSource::Controller,
    ];

    pub fn index(self) -> usize {
        match self {
            InputSource::Keyboard => 0,
            InputSource::UiButton => 1,
            InputSource::Controller => 2,
        }
    }
}

/// Why a projectile left the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetireReason {
    /// Non-chaining projectile landed its single hit.
    Hit,
    /// Chaining projectile landed its second hit.
    ChainComplete,
    /// Chaining projectile found no untouched alive target after its first hit.
    NoChainTarget,
    /// Maximum lifetime elapsed.
    Expired,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Setup,
    Active,
    Paused,
}
