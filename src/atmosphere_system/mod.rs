pub mod layers;
pub mod standard_atmosphere;

pub use layers::{layer_at_geopotential, AtmosphereLayer, LayerKind, STANDARD_LAYERS};
pub use standard_atmosphere::{
    density, geometric_altitude, geopotential_altitude, pressure, temperature, AtmosphericState,
    LayerTemperature,
};
