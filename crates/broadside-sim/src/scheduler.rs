//! Delayed actions resumed by the simulation loop.
//!
//! Actions carry only identities (a shot kind, a target entity), never
//! resolved state: whoever runs a due action re-reads the live world.

use broadside_core::enums::ShotKind;

/// Tolerance when comparing deadlines against accumulated tick time.
const DEADLINE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelayedAction {
    /// Next projectile of a multi-shot volley, aimed at whatever is current at resume time.
    FollowUpShot { kind: ShotKind },
    /// Bring a dead ship back.
    Respawn { target: hecs::Entity },
}

#[derive(Debug, Clone)]
struct Scheduled {
    due_secs: f64,
    seq: u64,
    action: DelayedAction,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to run at the first tick at or after `now + delay_secs`.
    pub fn schedule(&mut self, action: DelayedAction, delay_secs: f64, now: f64) {
        let due_secs = now + delay_secs.max(0.0);
        tracing::debug!(?action, due_secs, "scheduled delayed action");
        self.pending.push(Scheduled {
            due_secs,
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    /// Remove and return every action due by `now`, earliest deadline first,
    /// ties in scheduling order.
    pub fn take_due(&mut self, now: f64) -> Vec<DelayedAction> {
        let (mut due, pending): (Vec<Scheduled>, Vec<Scheduled>) = self
            .pending
            .drain(..)
            .partition(|s| s.due_secs <= now + DEADLINE_EPSILON);
        self.pending = pending;

        due.sort_by(|a, b| a.due_secs.total_cmp(&b.due_secs).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.action).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
