//! Charge bar logic for BROADSIDE.
//!
//! Integrates a pressed/released signal into a bounded charge value,
//! classifies it into power bands, and decides when a held band fires.
//! No ECS dependency; operates on plain data.

pub mod bands;
pub mod controller;

pub use broadside_core as core;
pub use controller::{ChargeBandController, ChargeUpdate};

#[cfg(test)]
mod tests;
