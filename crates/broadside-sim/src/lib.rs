//! Simulation engine for BROADSIDE.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for display collaborators.

pub mod ballistics;
pub mod dispatcher;
pub mod engine;
pub mod health;
pub mod projectile;
pub mod scheduler;
pub mod systems;
pub mod target_pool;
pub mod world_setup;

pub use broadside_core as core;
pub use engine::SimulationEngine;
