// Physical Constants
pub const STANDARD_GRAVITY: f64 = 9.80665; // m/s²
pub const EARTH_MEAN_RADIUS: f64 = 6_371_009.0; // m, used for gravity
pub const EARTH_GEOPOTENTIAL_RADIUS: f64 = 6_356_766.0; // m, US Standard Atmosphere 1976

// Gas Constants
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.31432; // J/(mol·K)
pub const AIR_SPECIFIC_GAS_CONSTANT: f64 = 287.053; // J/(kg·K)
pub const AIR_MOLAR_MASS: f64 = 0.02897; // kg/mol
pub const HELIUM_MOLAR_MASS: f64 = 0.004_002_6; // kg/mol

// Atmosphere Model Limits
pub const MIN_MODEL_ALTITUDE: f64 = 0.0; // m, geometric
pub const MAX_MODEL_ALTITUDE: f64 = 100_000.0; // m, geometric

// Aerodynamic Constants
pub const SPHERE_DRAG_COEFFICIENT: f64 = 0.47;

// Payload and Recovery Constants
pub const DEFAULT_CONSTANT_MASS: f64 = 8.8; // kg, payload + structure
pub const DEFAULT_PARACHUTE_DRAG_COEFFICIENT: f64 = 0.75;
pub const DEFAULT_PARACHUTE_AREA: f64 = 1.767_145_9; // m², 1.5 m diameter canopy

// Simulation Parameters
pub const TIME_STEP: f64 = 0.1; // s
pub const MAX_INTEGRATION_STEPS: u64 = 10_000_000;

// Mass Search Parameters
pub const MAX_HELIUM_MASS: f64 = 50.0; // kg
pub const RATE_DECIMALS: u32 = 5;
pub const MAX_BINARY_ITERATIONS: u32 = 80;
