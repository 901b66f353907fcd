//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::InputSource;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Press or release one raw charge input. The charge signal is the OR of all sources.
    SetChargeInput { source: InputSource, pressed: bool },
    /// Spawn the cannon and fleet and start simulating.
    StartRound,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
