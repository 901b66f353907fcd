//! Shot dispatch: turns a fire request into projectiles.
//!
//! Each projectile is aimed at the pool's current target at the moment it
//! leaves the muzzle. Multi-shot volleys schedule their follow-ups in the
//! engine scheduler, and each follow-up re-reads the current target on
//! resume, so a kill between shots redirects the rest of the volley.

use glam::DVec3;
use hecs::{Entity, World};

use broadside_core::components::{Ballistic, Orientation, Projectile, Target};
use broadside_core::config::ShotTable;
use broadside_core::constants::ORIENT_EPSILON_SQ;
use broadside_core::enums::ShotKind;
use broadside_core::events::CombatEvent;
use broadside_core::types::{Position, Velocity};

use crate::ballistics::BallisticsSolver;
use crate::scheduler::{DelayedAction, Scheduler};
use crate::target_pool::TargetPool;

#[derive(Debug)]
pub struct ShotDispatcher {
    shots: ShotTable,
    solver: BallisticsSolver,
    muzzle: Position,
    next_projectile_id: u32,
}

impl ShotDispatcher {
    pub fn new(shots: ShotTable, solver: BallisticsSolver, muzzle: Position) -> Self {
        Self {
            shots,
            solver,
            muzzle,
            next_projectile_id: 0,
        }
    }

    /// Fire `kind` at the current target. Returns the first projectile,
    /// or `None` (and schedules nothing) when no target is alive.
    pub fn fire(
        &mut self,
        kind: ShotKind,
        world: &mut World,
        pool: &mut TargetPool,
        scheduler: &mut Scheduler,
        events: &mut Vec<CombatEvent>,
        now: f64,
    ) -> Option<Entity> {
        let Some(projectile) = self.launch(kind, world, pool, events, now) else {
            tracing::debug!(?kind, "fire requested with no alive target");
            return None;
        };

        let profile = self.shots.profile(kind);
        for i in 1..profile.shot_count {
            scheduler.schedule(
                DelayedAction::FollowUpShot { kind },
                profile.follow_up_delay_secs * i as f64,
                now,
            );
        }

        Some(projectile)
    }

    /// Launch one follow-up projectile of a volley. No-op when no target is alive.
    pub fn fire_follow_up(
        &mut self,
        kind: ShotKind,
        world: &mut World,
        pool: &mut TargetPool,
        events: &mut Vec<CombatEvent>,
        now: f64,
    ) -> Option<Entity> {
        let projectile = self.launch(kind, world, pool, events, now);
        if projectile.is_none() {
            tracing::debug!(?kind, "follow-up shot dropped, no alive target");
        }
        projectile
    }

    fn launch(
        &mut self,
        kind: ShotKind,
        world: &mut World,
        pool: &mut TargetPool,
        events: &mut Vec<CombatEvent>,
        now: f64,
    ) -> Option<Entity> {
        let target = pool.current_target(world)?;
        let target_id = world.get::<&Target>(target).ok()?.id;
        let destination = *world.get::<&Position>(target).ok()?;

        let profile = self.shots.profile(kind);
        let velocity = self
            .solver
            .solve(&self.muzzle, &destination, profile.time_multiplier);

        let projectile_id = self.next_projectile_id;
        self.next_projectile_id += 1;

        let entity = world.spawn((
            Projectile {
                id: projectile_id,
                kind,
                damage: profile.damage,
                chain: profile.chain,
                hit_targets: Vec::new(),
                last_hit_secs: None,
                spawned_at_secs: now,
            },
            Ballistic,
            self.muzzle,
            velocity,
            Orientation {
                forward: forward_from(&velocity),
            },
        ));

        tracing::info!(projectile_id, ?kind, target_id, "shot fired");
        events.push(CombatEvent::ShotFired {
            projectile_id,
            kind,
            target_id,
            velocity,
        });

        Some(entity)
    }
}

/// Unit facing along `velocity`, or +x when the velocity is negligible.
/// Uses the same threshold as redirect and in-flight orientation updates.
pub fn forward_from(velocity: &Velocity) -> DVec3 {
    let v = velocity.as_dvec3();
    if v.length_squared() > ORIENT_EPSILON_SQ {
        v.normalize()
    } else {
        DVec3::X
    }
}
