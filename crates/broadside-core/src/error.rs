//! Configuration errors, reported at load time rather than at fire time.

use std::fmt;

/// A configuration value that the simulation cannot run with.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    Parse(serde_json::Error),
    /// A numeric field is NaN or infinite.
    NonFinite { field: String },
    /// A numeric field is outside its allowed range.
    OutOfRange {
        field: String,
        value: f64,
        expected: &'static str,
    },
    /// `min_flight_time` exceeds `max_flight_time`.
    FlightTimeOrder { min: f64, max: f64 },
    /// A shot profile requests zero projectiles.
    EmptyVolley { kind: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config document: {e}"),
            ConfigError::NonFinite { field } => write!(f, "{field} must be finite"),
            ConfigError::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "{field} = {value} is out of range (expected {expected})"),
            ConfigError::FlightTimeOrder { min, max } => write!(
                f,
                "min_flight_time ({min}) must not exceed max_flight_time ({max})"
            ),
            ConfigError::EmptyVolley { kind } => {
                write!(f, "shot profile {kind} must fire at least one projectile")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
