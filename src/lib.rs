pub mod atmosphere_system;
pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod force_system;
pub mod telemetry_system;
pub mod trajectory_system;

pub use constants::*;
pub use config::SimulationConfig;
pub use errors::SimulationError;

// Re-export commonly used items from atmosphere_system
pub use atmosphere_system::{density, pressure, temperature, AtmosphericState, LayerTemperature};

// Re-export commonly used items from force_system
pub use force_system::{
    buoyant_force, descent_drag_force, drag_force, force_correction, gravity_acceleration,
    DescentProfile, ForceModel,
};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::{
    integrate, integrate_descent, AscentIntegrator, DescentIntegrator, KinematicState,
    SimulationResult,
};

pub use control::{find_helium_mass, MassSearch, SearchResult};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::FlightReport;
