use std::f64::consts::PI;

use crate::atmosphere_system::AtmosphericState;
use crate::constants::{HELIUM_MOLAR_MASS, UNIVERSAL_GAS_CONSTANT};

pub trait BalloonGeometry {
    fn volume(&self, gas_mass: f64, atmosphere: &AtmosphericState) -> f64;

    // Sphere of the same volume unless overridden.
    fn cross_sectional_area(&self, gas_mass: f64, atmosphere: &AtmosphericState) -> f64 {
        let radius = sphere_radius(self.volume(gas_mass, atmosphere));
        PI * radius * radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGasBalloon {
    pub gas_molar_mass: f64, // kg/mol
}

impl IdealGasBalloon {
    pub fn helium() -> Self {
        IdealGasBalloon {
            gas_molar_mass: HELIUM_MOLAR_MASS,
        }
    }
}

impl Default for IdealGasBalloon {
    fn default() -> Self {
        Self::helium()
    }
}

impl BalloonGeometry for IdealGasBalloon {
    fn volume(&self, gas_mass: f64, atmosphere: &AtmosphericState) -> f64 {
        let moles = gas_mass / self.gas_molar_mass;
        moles * UNIVERSAL_GAS_CONSTANT * atmosphere.temperature / atmosphere.pressure
    }
}

pub fn sphere_radius(volume: f64) -> f64 {
    (3.0 * volume / (4.0 * PI)).cbrt()
}
