//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::{HashMap, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use broadside_charge::ChargeBandController;
use broadside_core::commands::PlayerCommand;
use broadside_core::components::{Projectile, Target, TargetHealth};
use broadside_core::config::{GameConfig, ShipSpec};
use broadside_core::constants::DT;
use broadside_core::enums::{GamePhase, InputSource, ShotKind};
use broadside_core::error::ConfigError;
use broadside_core::events::CombatEvent;
use broadside_core::state::GameStateSnapshot;
use broadside_core::types::{Position, SimTime};

use crate::ballistics::BallisticsSolver;
use crate::dispatcher::ShotDispatcher;
use crate::health::{self, DamageOutcome};
use crate::projectile::{self, ContactRules};
use crate::scheduler::{DelayedAction, Scheduler};
use crate::systems;
use crate::systems::contact::Contact;
use crate::target_pool::TargetPool;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: GameConfig,
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    inputs: [bool; InputSource::ALL.len()],
    charge: ChargeBandController,
    solver: BallisticsSolver,
    dispatcher: ShotDispatcher,
    pool: TargetPool,
    scheduler: Scheduler,
    target_entities: HashMap<u32, Entity>,
    next_target_id: u32,
    contact_buffer: Vec<Contact>,
    despawn_buffer: Vec<Entity>,
    events: Vec<CombatEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine. Fails if the config does not validate.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        for (higher, lower) in config.bands.overlapping() {
            tracing::warn!(?higher, ?lower, "charge bands overlap, higher priority wins");
        }

        let solver = BallisticsSolver::new(config.ballistics);
        let dispatcher = ShotDispatcher::new(config.shots, solver, config.cannon.muzzle);

        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            inputs: [false; InputSource::ALL.len()],
            charge: ChargeBandController::new(config.charge, config.bands),
            solver,
            dispatcher,
            pool: TargetPool::default(),
            scheduler: Scheduler::new(),
            target_entities: HashMap::new(),
            next_target_id: 0,
            contact_buffer: Vec::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config,
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        let current_target = self.current_target();
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.charge.view(),
            self.charge.bands(),
            current_target,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn charge(&self) -> &ChargeBandController {
        &self.charge
    }

    /// Whether any raw input source is currently held.
    pub fn charge_pressed(&self) -> bool {
        self.inputs.iter().any(|&pressed| pressed)
    }

    /// Id of the target the cannon is aiming at, if any is alive.
    pub fn current_target(&mut self) -> Option<u32> {
        let entity = self.pool.current_target(&self.world)?;
        self.target_id(entity)
    }

    /// Spawn a ship and append it to the target pool. Returns its id.
    pub fn add_target(&mut self, spec: ShipSpec) -> u32 {
        let id = self.next_target_id;
        self.next_target_id += 1;
        let entity = world_setup::spawn_ship(&mut self.world, &spec, id);
        self.target_entities.insert(id, entity);
        self.pool.push(entity, &self.world);
        tracing::debug!(target_id = id, "target added");
        id
    }

    /// Fire `kind` immediately, bypassing the charge bar.
    /// Returns `false` when no target is alive.
    pub fn fire(&mut self, kind: ShotKind) -> bool {
        let now = self.time.elapsed_secs;
        self.dispatcher
            .fire(
                kind,
                &mut self.world,
                &mut self.pool,
                &mut self.scheduler,
                &mut self.events,
                now,
            )
            .is_some()
    }

    /// Damage a target by id. `None` when no such target exists.
    pub fn apply_damage(&mut self, target_id: u32, amount: f64) -> Option<DamageOutcome> {
        let entity = *self.target_entities.get(&target_id)?;
        let (outcome, health, fill) = {
            let mut h = self.world.get::<&mut TargetHealth>(entity).ok()?;
            let outcome = health::apply_damage(&mut h, amount);
            (outcome, h.health, health::fill(&h))
        };

        if outcome != DamageOutcome::Ignored {
            self.events.push(CombatEvent::HealthChanged {
                target_id,
                health,
                fill,
            });
        }
        if outcome == DamageOutcome::Killed {
            self.notify_killed(entity);
        }
        Some(outcome)
    }

    pub fn target_health(&self, target_id: u32) -> Option<TargetHealth> {
        let entity = self.target_entities.get(&target_id)?;
        self.world.get::<&TargetHealth>(*entity).ok().map(|h| *h)
    }

    pub fn target_position(&self, target_id: u32) -> Option<Position> {
        let entity = self.target_entities.get(&target_id)?;
        self.world.get::<&Position>(*entity).ok().map(|p| *p)
    }

    /// Number of projectiles in flight.
    pub fn projectile_count(&self) -> usize {
        self.world.query::<&Projectile>().iter().count()
    }

    /// Number of delayed actions (follow-up shots, respawns) not yet run.
    pub fn pending_actions(&self) -> usize {
        self.scheduler.len()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetChargeInput { source, pressed } => {
                self.inputs[source.index()] = pressed;
            }
            PlayerCommand::StartRound => {
                if self.phase == GamePhase::Setup {
                    self.start_round();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    fn start_round(&mut self) {
        let center = self.config.cannon.muzzle;
        let spawned = world_setup::spawn_fleet(
            &mut self.world,
            &mut self.rng,
            &self.config.fleet,
            &center,
            &mut self.next_target_id,
        );

        // Ships added before the round keep their place at the front of the pool.
        let mut members = self.pool.targets().to_vec();
        for entity in spawned {
            if let Some(id) = self.target_id(entity) {
                self.target_entities.insert(id, entity);
            }
            members.push(entity);
        }

        self.pool = TargetPool::new(members, self.config.fleet.start_index, &self.world);
        self.phase = GamePhase::Active;
        tracing::info!(
            targets = self.pool.len(),
            seed = self.config.seed,
            "round started"
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.elapsed_secs;

        // 1. Due delayed actions (follow-up shots, respawns)
        self.run_due_actions(now);

        // 2. Charge bar and band firing
        let update = self.charge.tick(self.charge_pressed(), DT);
        if let Some(kind) = update.fire {
            tracing::info!(?kind, charge = update.charge, "band held, firing");
            self.dispatcher.fire(
                kind,
                &mut self.world,
                &mut self.pool,
                &mut self.scheduler,
                &mut self.events,
                now,
            );
        }

        // 3. Ship steering
        systems::navigation::run(&mut self.world);
        // 4. Movement integration
        systems::movement::run(&mut self.world, self.solver.gravity(), DT);
        // 5. Contacts and hit resolution
        self.resolve_contacts(now);
        // 6. Cleanup (expired projectiles)
        systems::cleanup::run(
            &mut self.world,
            now,
            self.config.projectile.max_lifetime_secs,
            &mut self.events,
            &mut self.despawn_buffer,
        );
    }

    fn run_due_actions(&mut self, now: f64) {
        for action in self.scheduler.take_due(now) {
            match action {
                DelayedAction::FollowUpShot { kind } => {
                    self.dispatcher.fire_follow_up(
                        kind,
                        &mut self.world,
                        &mut self.pool,
                        &mut self.events,
                        now,
                    );
                }
                DelayedAction::Respawn { target } => {
                    if systems::respawn::respawn(&mut self.world, target, &mut self.events) {
                        self.pool.on_respawned(target, &self.world);
                    }
                }
            }
        }
    }

    fn resolve_contacts(&mut self, now: f64) {
        let mut contacts = std::mem::take(&mut self.contact_buffer);
        systems::contact::detect(
            &self.world,
            self.config.projectile.contact_radius,
            &mut contacts,
        );

        let rules = ContactRules {
            hit_cooldown_secs: self.config.projectile.hit_cooldown_secs,
        };

        for contact in &contacts {
            let resolution = projectile::resolve_contact(
                &mut self.world,
                &self.pool,
                &self.solver,
                rules,
                contact.projectile,
                contact.target,
                now,
                &mut self.events,
            );
            if let Some(killed) = resolution.killed {
                self.notify_killed(killed);
            }
        }

        self.contact_buffer = contacts;
    }

    /// Deliver a kill to its observers: the `TargetKilled` event first, then
    /// the target pool, then the death/respawn choreography.
    fn notify_killed(&mut self, entity: Entity) {
        let now = self.time.elapsed_secs;

        if let (Some(target_id), Ok(position)) = (
            self.target_id(entity),
            self.world.get::<&Position>(entity).map(|p| *p),
        ) {
            tracing::info!(target_id, "target killed");
            self.events.push(CombatEvent::TargetKilled {
                target_id,
                position,
            });
        }

        self.pool.on_killed(entity, &self.world);
        systems::respawn::begin_death(&mut self.world, &mut self.scheduler, entity, now);
    }

    fn target_id(&self, entity: Entity) -> Option<u32> {
        self.world.get::<&Target>(entity).ok().map(|t| t.id)
    }
}
