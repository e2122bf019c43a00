use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Altitude {altitude:.3} m is outside the modeled range [0, 100000] m")]
    AltitudeOutOfRange { altitude: f64 },

    #[error("Atmosphere undefined at {altitude:.3} m (no pressure data above 51 km geopotential)")]
    AtmosphereUndefined { altitude: f64 },

    #[error("Net force {net_force:.4} N cannot sustain ascent")]
    NonAscendingForce { net_force: f64 },

    #[error("Safety stop: exceeded {steps} integration steps")]
    SafetyStop { steps: u64 },

    #[error("No samples recorded")]
    NoSamples,

    #[error("Maximum helium mass {max_mass:.4} kg only reaches {best_rate:.4} m/s")]
    InfeasibleTarget { max_mass: f64, best_rate: f64 },

    #[error("Configuration error: {0}")]
    Config(String),
}
