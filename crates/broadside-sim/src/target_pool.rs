//! Ordered pool of shootable targets.
//!
//! Keeps a round-robin "current" target for the cannon and answers
//! nearest-alive queries for chain retargeting. Membership is the pool's
//! ordered entity list; liveness is always read from the world.

use hecs::{Entity, World};

use broadside_core::components::TargetHealth;
use broadside_core::types::Position;

use crate::health;

#[derive(Debug, Default)]
pub struct TargetPool {
    targets: Vec<Entity>,
    current_index: usize,
    current: Option<Entity>,
}

impl TargetPool {
    /// Build a pool over `targets` in order, selecting the first alive
    /// target at or after `start_index` (clamped into range).
    pub fn new(targets: Vec<Entity>, start_index: usize, world: &World) -> Self {
        let mut pool = Self {
            current_index: start_index.min(targets.len().saturating_sub(1)),
            targets,
            current: None,
        };
        pool.select_from(pool.current_index, world);
        pool
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Pool members in order.
    pub fn targets(&self) -> &[Entity] {
        &self.targets
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Append a target. Acquires it as current if nothing alive was selected.
    pub fn push(&mut self, entity: Entity, world: &World) {
        self.targets.push(entity);
        if self.current.is_none() {
            self.select_from(self.current_index, world);
        }
    }

    /// The target the cannon should aim at, or `None` when every member is dead.
    ///
    /// A cached selection that has since died is replaced by scanning
    /// forward from the current index.
    pub fn current_target(&mut self, world: &World) -> Option<Entity> {
        match self.current {
            Some(entity) if is_alive(world, entity) => Some(entity),
            _ => {
                self.select_from(self.current_index, world);
                self.current
            }
        }
    }

    /// Kill notification. Advances only when the current target died.
    pub fn on_killed(&mut self, killed: Entity, world: &World) {
        if self.current != Some(killed) || self.targets.is_empty() {
            return;
        }
        let next = (self.current_index + 1) % self.targets.len();
        self.select_from(next, world);
        tracing::debug!(
            index = self.current_index,
            acquired = self.current.is_some(),
            "current target killed, advanced"
        );
    }

    /// Respawn notification. Reacquires a target when none was alive.
    pub fn on_respawned(&mut self, entity: Entity, world: &World) {
        if self.current.is_none() && self.targets.contains(&entity) {
            self.select_from(self.current_index, world);
        }
    }

    /// Closest alive member to `from` (full 3D distance), skipping `exclude`.
    /// Ties resolve to the earliest member in pool order.
    pub fn nearest_alive(&self, world: &World, from: &Position, exclude: Option<Entity>) -> Option<Entity> {
        let mut best: Option<(Entity, f64)> = None;

        for &entity in &self.targets {
            if Some(entity) == exclude || !is_alive(world, entity) {
                continue;
            }
            let Ok(pos) = world.get::<&Position>(entity) else {
                continue;
            };
            let d = from.range_to(&pos);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((entity, d));
            }
        }

        best.map(|(entity, _)| entity)
    }

    /// Scan circularly from `start` for the first alive member.
    fn select_from(&mut self, start: usize, world: &World) {
        let n = self.targets.len();
        self.current = None;
        if n == 0 {
            self.current_index = 0;
            return;
        }

        for offset in 0..n {
            let idx = (start + offset) % n;
            let entity = self.targets[idx];
            if is_alive(world, entity) {
                self.current_index = idx;
                self.current = Some(entity);
                return;
            }
        }
    }
}

/// Whether `entity` is a target with health above zero. Missing entities are dead.
pub fn is_alive(world: &World, entity: Entity) -> bool {
    world
        .get::<&TargetHealth>(entity)
        .map(|h| health::is_alive(&h))
        .unwrap_or(false)
}
