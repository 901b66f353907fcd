//! Contact resolution for projectiles.
//!
//! A contact is one projectile touching one target during a tick. The
//! resolver decides whether it counts as a hit, applies damage, and then
//! either retires the projectile or (for chain shots) redirects it once
//! toward the nearest other alive target.

use hecs::{Entity, World};

use broadside_core::components::{Orientation, Projectile, Target, TargetHealth};
use broadside_core::constants::ORIENT_EPSILON_SQ;
use broadside_core::enums::RetireReason;
use broadside_core::events::CombatEvent;
use broadside_core::types::{Position, Velocity};

use crate::ballistics::BallisticsSolver;
use crate::health::{self, DamageOutcome};
use crate::target_pool::TargetPool;

/// Flight-time multiplier used for the chain bounce.
pub const CHAIN_TIME_MULTIPLIER: f64 = 1.0;

/// Hits a chain projectile lands before it retires.
pub const CHAIN_MAX_HITS: usize = 2;

/// Why a contact was not counted as a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    ProjectileGone,
    Cooldown,
    NotATarget,
    TargetDead,
    AlreadyHit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    Ignored(IgnoreReason),
    /// Hit accepted; the projectile was removed.
    Retired(RetireReason),
    /// Hit accepted; the projectile now flies toward `next`.
    Redirected { next: Entity },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactResolution {
    pub outcome: ContactOutcome,
    /// Target this contact killed, for kill notification.
    pub killed: Option<Entity>,
}

impl ContactResolution {
    fn ignored(reason: IgnoreReason) -> Self {
        Self {
            outcome: ContactOutcome::Ignored(reason),
            killed: None,
        }
    }
}

/// Resolver tuning copied out of the game config.
#[derive(Debug, Clone, Copy)]
pub struct ContactRules {
    pub hit_cooldown_secs: f64,
}

#[allow(clippy::too_many_arguments)]
pub fn resolve_contact(
    world: &mut World,
    pool: &TargetPool,
    solver: &BallisticsSolver,
    rules: ContactRules,
    projectile: Entity,
    target: Entity,
    now: f64,
    events: &mut Vec<CombatEvent>,
) -> ContactResolution {
    let (projectile_id, damage, chain, last_hit, already_hit) = {
        let Ok(p) = world.get::<&Projectile>(projectile) else {
            return ContactResolution::ignored(IgnoreReason::ProjectileGone);
        };
        let target_id = world.get::<&Target>(target).ok().map(|t| t.id);
        let already_hit = target_id.is_some_and(|id| p.hit_targets.contains(&id));
        (p.id, p.damage, p.chain, p.last_hit_secs, already_hit)
    };

    if last_hit.is_some_and(|t| now - t < rules.hit_cooldown_secs) {
        return ContactResolution::ignored(IgnoreReason::Cooldown);
    }

    let Ok(target_id) = world.get::<&Target>(target).map(|t| t.id) else {
        return ContactResolution::ignored(IgnoreReason::NotATarget);
    };

    if already_hit {
        return ContactResolution::ignored(IgnoreReason::AlreadyHit);
    }

    let (outcome, remaining, fill) = {
        let Ok(mut h) = world.get::<&mut TargetHealth>(target) else {
            return ContactResolution::ignored(IgnoreReason::NotATarget);
        };
        let outcome = health::apply_damage(&mut h, damage);
        (outcome, h.health, health::fill(&h))
    };

    if outcome == DamageOutcome::Ignored {
        return ContactResolution::ignored(IgnoreReason::TargetDead);
    }

    tracing::debug!(projectile_id, target_id, damage, remaining, "projectile hit");
    events.push(CombatEvent::TargetHit {
        projectile_id,
        target_id,
        damage,
        remaining_health: remaining,
    });
    events.push(CombatEvent::HealthChanged {
        target_id,
        health: remaining,
        fill,
    });

    let killed = (outcome == DamageOutcome::Killed).then_some(target);

    let hits = {
        let Ok(mut p) = world.get::<&mut Projectile>(projectile) else {
            return ContactResolution {
                outcome: ContactOutcome::Retired(RetireReason::Hit),
                killed,
            };
        };
        p.hit_targets.push(target_id);
        p.last_hit_secs = Some(now);
        p.hit_targets.len()
    };

    let outcome = if !chain {
        retire(world, projectile, projectile_id, RetireReason::Hit, events)
    } else if hits >= CHAIN_MAX_HITS {
        retire(world, projectile, projectile_id, RetireReason::ChainComplete, events)
    } else {
        redirect(world, pool, solver, projectile, projectile_id, target, events)
    };

    ContactResolution { outcome, killed }
}

fn redirect(
    world: &mut World,
    pool: &TargetPool,
    solver: &BallisticsSolver,
    projectile: Entity,
    projectile_id: u32,
    hit: Entity,
    events: &mut Vec<CombatEvent>,
) -> ContactOutcome {
    let Ok(from) = world.get::<&Position>(projectile).map(|p| *p) else {
        return retire(world, projectile, projectile_id, RetireReason::NoChainTarget, events);
    };

    let next = pool.nearest_alive(world, &from, Some(hit));
    let destination = next.and_then(|e| {
        let pos = world.get::<&Position>(e).ok().map(|p| *p)?;
        let id = world.get::<&Target>(e).ok().map(|t| t.id)?;
        Some((e, pos, id))
    });

    let Some((next, destination, target_id)) = destination else {
        return retire(world, projectile, projectile_id, RetireReason::NoChainTarget, events);
    };

    let velocity = solver.solve(&from, &destination, CHAIN_TIME_MULTIPLIER);
    if let Ok(mut v) = world.get::<&mut Velocity>(projectile) {
        *v = velocity;
    }
    orient_along(world, projectile, &velocity);

    tracing::debug!(projectile_id, target_id, "chain redirected");
    events.push(CombatEvent::ProjectileRedirected {
        projectile_id,
        target_id,
        velocity,
    });

    ContactOutcome::Redirected { next }
}

fn retire(
    world: &mut World,
    projectile: Entity,
    projectile_id: u32,
    reason: RetireReason,
    events: &mut Vec<CombatEvent>,
) -> ContactOutcome {
    let _ = world.despawn(projectile);
    tracing::debug!(projectile_id, ?reason, "projectile retired");
    events.push(CombatEvent::ProjectileRetired {
        projectile_id,
        reason,
    });
    ContactOutcome::Retired(reason)
}

/// Point the projectile's facing along `velocity` when it is not negligible.
pub fn orient_along(world: &mut World, entity: Entity, velocity: &Velocity) {
    let v = velocity.as_dvec3();
    if v.length_squared() <= ORIENT_EPSILON_SQ {
        return;
    }
    if let Ok(mut orientation) = world.get::<&mut Orientation>(entity) {
        orientation.forward = v.normalize();
    }
}
