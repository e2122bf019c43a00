// 1976 US Standard Atmosphere. Boundaries are geopotential metres; layers are
// half-open except the thermosphere, which is closed at the model top.

use crate::constants::EARTH_GEOPOTENTIAL_RADIUS;

pub const THERMOSPHERE_BASE_GEOMETRIC: f64 = 91_000.0; // m

// Elliptical profile coefficients (NOAA-S/T 76-1562)
pub const ELLIPSE_AMPLITUDE: f64 = -76.3232; // K
pub const ELLIPSE_SEMI_AXIS_KM: f64 = 19.9429; // km

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerKind {
    Gradient,
    Isothermal,
    Elliptical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereLayer {
    pub name: &'static str,
    pub base_altitude: f64,
    pub top_altitude: f64,
    pub base_temperature: f64,
    pub lapse_rate: f64,
    pub kind: LayerKind,
    pub base_pressure_mbar: Option<f64>, // mbar
}

impl AtmosphereLayer {
    pub fn contains(&self, geopotential_altitude: f64) -> bool {
        if self.kind == LayerKind::Elliptical {
            geopotential_altitude >= self.base_altitude
                && geopotential_altitude <= self.top_altitude
        } else {
            geopotential_altitude >= self.base_altitude && geopotential_altitude < self.top_altitude
        }
    }

    pub fn top_temperature(&self) -> f64 {
        match self.kind {
            LayerKind::Gradient => {
                self.base_temperature + self.lapse_rate * (self.top_altitude - self.base_altitude)
            }
            LayerKind::Isothermal => self.base_temperature,
            LayerKind::Elliptical => {
                elliptical_temperature(self.base_temperature, geometric_from(self.top_altitude))
            }
        }
    }
}

// Centre anchored so the curve starts at the mesopause temperature.
pub fn elliptical_temperature(mesopause_temperature: f64, z: f64) -> f64 {
    let centre_temperature = mesopause_temperature - ELLIPSE_AMPLITUDE;
    let x = (z - THERMOSPHERE_BASE_GEOMETRIC) / 1000.0 / ELLIPSE_SEMI_AXIS_KM;
    centre_temperature + ELLIPSE_AMPLITUDE * (1.0 - x * x).max(0.0).sqrt()
}

pub fn elliptical_lapse_rate(z: f64) -> f64 {
    let x = (z - THERMOSPHERE_BASE_GEOMETRIC) / 1000.0 / ELLIPSE_SEMI_AXIS_KM;
    let root = (1.0 - x * x).max(0.0).sqrt();
    if root <= f64::EPSILON {
        return 0.0;
    }
    -ELLIPSE_AMPLITUDE * x / (root * ELLIPSE_SEMI_AXIS_KM * 1000.0)
}

fn geometric_from(h: f64) -> f64 {
    h * EARTH_GEOPOTENTIAL_RADIUS / (EARTH_GEOPOTENTIAL_RADIUS - h)
}

const MESOPAUSE_TEMPERATURE: f64 = 186.946; // K
// Geopotential images of 91 km and 100 km geometric.
const THERMOSPHERE_BASE: f64 = 89_715.679_198_035_42;
pub const MODEL_TOP: f64 = 98_451.237_043_436_3;

pub static STANDARD_LAYERS: [AtmosphereLayer; 9] = [
    AtmosphereLayer {
        name: "troposphere",
        base_altitude: 0.0,
        top_altitude: 11_000.0,
        base_temperature: 288.15,
        lapse_rate: -0.0065,
        kind: LayerKind::Gradient,
        base_pressure_mbar: Some(1013.25),
    },
    AtmosphereLayer {
        name: "tropopause",
        base_altitude: 11_000.0,
        top_altitude: 20_000.0,
        base_temperature: 216.65,
        lapse_rate: 0.0,
        kind: LayerKind::Isothermal,
        base_pressure_mbar: Some(226.321),
    },
    AtmosphereLayer {
        name: "lower stratosphere",
        base_altitude: 20_000.0,
        top_altitude: 32_000.0,
        base_temperature: 216.65,
        lapse_rate: 0.001,
        kind: LayerKind::Gradient,
        base_pressure_mbar: Some(54.7489),
    },
    AtmosphereLayer {
        name: "upper stratosphere",
        base_altitude: 32_000.0,
        top_altitude: 47_000.0,
        base_temperature: 228.65,
        lapse_rate: 0.0028,
        kind: LayerKind::Gradient,
        base_pressure_mbar: Some(8.68019),
    },
    AtmosphereLayer {
        name: "stratopause",
        base_altitude: 47_000.0,
        top_altitude: 51_000.0,
        base_temperature: 270.65,
        lapse_rate: 0.0,
        kind: LayerKind::Isothermal,
        base_pressure_mbar: Some(1.10906),
    },
    AtmosphereLayer {
        name: "lower mesosphere",
        base_altitude: 51_000.0,
        top_altitude: 71_000.0,
        base_temperature: 270.65,
        lapse_rate: -0.0028,
        kind: LayerKind::Gradient,
        base_pressure_mbar: None,
    },
    AtmosphereLayer {
        name: "upper mesosphere",
        base_altitude: 71_000.0,
        top_altitude: 84_852.0,
        base_temperature: 214.65,
        lapse_rate: (MESOPAUSE_TEMPERATURE - 214.65) / (84_852.0 - 71_000.0),
        kind: LayerKind::Gradient,
        base_pressure_mbar: None,
    },
    AtmosphereLayer {
        name: "mesopause",
        base_altitude: 84_852.0,
        top_altitude: THERMOSPHERE_BASE,
        base_temperature: MESOPAUSE_TEMPERATURE,
        lapse_rate: 0.0,
        kind: LayerKind::Isothermal,
        base_pressure_mbar: None,
    },
    AtmosphereLayer {
        name: "thermosphere",
        base_altitude: THERMOSPHERE_BASE,
        top_altitude: MODEL_TOP,
        base_temperature: MESOPAUSE_TEMPERATURE,
        lapse_rate: 0.0,
        kind: LayerKind::Elliptical,
        base_pressure_mbar: None,
    },
];

pub fn layer_at_geopotential(geopotential_altitude: f64) -> Option<&'static AtmosphereLayer> {
    STANDARD_LAYERS
        .iter()
        .find(|layer| layer.contains(geopotential_altitude))
}
