//! Target health operations.
//!
//! Damage reports its outcome to the caller instead of firing callbacks;
//! the engine forwards a kill to the target pool and the respawn
//! choreography, in that order.

use broadside_core::components::TargetHealth;

/// What a damage application did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// The target was already dead; nothing changed.
    Ignored,
    /// Health dropped but stayed above zero.
    Damaged { remaining: f64 },
    /// This hit took health to zero.
    Killed,
}

pub fn new_health(max_health: f64, respawn_delay_secs: f64) -> TargetHealth {
    TargetHealth {
        max_health,
        health: max_health,
        respawn_delay_secs,
    }
}

pub fn is_alive(health: &TargetHealth) -> bool {
    health.health > 0.0
}

pub fn apply_damage(health: &mut TargetHealth, amount: f64) -> DamageOutcome {
    if !is_alive(health) {
        return DamageOutcome::Ignored;
    }

    health.health = (health.health - amount).max(0.0);

    if health.health <= 0.0 {
        DamageOutcome::Killed
    } else {
        DamageOutcome::Damaged {
            remaining: health.health,
        }
    }
}

pub fn reset(health: &mut TargetHealth) {
    health.health = health.max_health;
}

/// Display fill ratio in [0, 1].
pub fn fill(health: &TargetHealth) -> f64 {
    if health.max_health <= 0.0 {
        0.0
    } else {
        (health.health / health.max_health).clamp(0.0, 1.0)
    }
}
