use serde::{Deserialize, Serialize};

use crate::atmosphere_system::AtmosphericState;
use crate::constants::{
    DEFAULT_CONSTANT_MASS, DEFAULT_PARACHUTE_AREA, DEFAULT_PARACHUTE_DRAG_COEFFICIENT,
};

pub fn dynamic_pressure(density: f64, speed: f64) -> f64 {
    0.5 * density * speed.powi(2)
}

pub fn drag_magnitude(drag_coefficient: f64, density: f64, area: f64, speed: f64) -> f64 {
    dynamic_pressure(density, speed) * drag_coefficient * area
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescentProfile {
    pub mass_kg: f64,
    pub drag_coefficient: f64,
    pub reference_area_m2: f64,
}

impl DescentProfile {
    pub fn new(mass_kg: f64, drag_coefficient: f64, reference_area_m2: f64) -> Self {
        DescentProfile {
            mass_kg,
            drag_coefficient,
            reference_area_m2,
        }
    }

    pub fn drag(&self, velocity: f64, atmosphere: &AtmosphericState) -> f64 {
        drag_magnitude(
            self.drag_coefficient,
            atmosphere.density,
            self.reference_area_m2,
            velocity.abs(),
        )
    }

    pub fn terminal_velocity(&self, density: f64, gravity: f64) -> f64 {
        (2.0 * self.mass_kg * gravity / (density * self.drag_coefficient * self.reference_area_m2))
            .sqrt()
    }
}

impl Default for DescentProfile {
    fn default() -> Self {
        DescentProfile::new(
            DEFAULT_CONSTANT_MASS,
            DEFAULT_PARACHUTE_DRAG_COEFFICIENT,
            DEFAULT_PARACHUTE_AREA,
        )
    }
}
