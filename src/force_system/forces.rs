use serde::Serialize;

use super::aerodynamics::{drag_magnitude, DescentProfile};
use super::balloon::{BalloonGeometry, IdealGasBalloon};
use crate::atmosphere_system::AtmosphericState;
use crate::constants::{EARTH_MEAN_RADIUS, SPHERE_DRAG_COEFFICIENT, STANDARD_GRAVITY};
use crate::errors::SimulationError;

pub fn gravity_acceleration(altitude: f64) -> f64 {
    STANDARD_GRAVITY * (EARTH_MEAN_RADIUS / (EARTH_MEAN_RADIUS + altitude)).powi(2)
}

pub fn gravity_force(altitude: f64, total_mass: f64) -> f64 {
    total_mass * gravity_acceleration(altitude)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForceSet {
    pub buoyant: f64,
    pub drag: f64,
    pub gravity: f64,
    pub correction: f64,
}

impl ForceSet {
    pub fn net_force(&self) -> f64 {
        self.buoyant - self.drag - self.gravity
    }

    // Reported, never integrated.
    pub fn gage_force(&self) -> f64 {
        self.buoyant - self.correction
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForceModel<G: BalloonGeometry = IdealGasBalloon> {
    pub geometry: G,
    pub drag_coefficient: f64,
}

impl ForceModel<IdealGasBalloon> {
    pub fn helium() -> Self {
        ForceModel::new(IdealGasBalloon::helium())
    }
}

impl Default for ForceModel<IdealGasBalloon> {
    fn default() -> Self {
        Self::helium()
    }
}

impl<G: BalloonGeometry> ForceModel<G> {
    pub fn new(geometry: G) -> Self {
        ForceModel {
            geometry,
            drag_coefficient: SPHERE_DRAG_COEFFICIENT,
        }
    }

    // Archimedes: displaced air mass times local gravity.
    pub fn buoyant_force(
        &self,
        atmosphere: &AtmosphericState,
        altitude: f64,
        gas_mass: f64,
    ) -> f64 {
        let displaced = atmosphere.density * self.geometry.volume(gas_mass, atmosphere);
        displaced * gravity_acceleration(altitude)
    }

    pub fn drag_force(&self, atmosphere: &AtmosphericState, velocity: f64, gas_mass: f64) -> f64 {
        let area = self.geometry.cross_sectional_area(gas_mass, atmosphere);
        drag_magnitude(self.drag_coefficient, atmosphere.density, area, velocity.abs())
    }

    pub fn force_correction(&self, gas_mass: f64, altitude: f64) -> f64 {
        gravity_force(altitude, gas_mass)
    }

    pub fn forces_at(
        &self,
        altitude: f64,
        velocity: f64,
        gas_mass: f64,
        total_mass: f64,
    ) -> Result<ForceSet, SimulationError> {
        let atmosphere = AtmosphericState::at_altitude(altitude)?;
        Ok(ForceSet {
            buoyant: self.buoyant_force(&atmosphere, altitude, gas_mass),
            drag: self.drag_force(&atmosphere, velocity, gas_mass),
            gravity: gravity_force(altitude, total_mass),
            correction: self.force_correction(gas_mass, altitude),
        })
    }
}

pub fn buoyant_force(altitude: f64, helium_mass: f64) -> Result<f64, SimulationError> {
    let atmosphere = AtmosphericState::at_altitude(altitude)?;
    Ok(ForceModel::helium().buoyant_force(&atmosphere, altitude, helium_mass))
}

pub fn drag_force(velocity: f64, helium_mass: f64, altitude: f64) -> Result<f64, SimulationError> {
    let atmosphere = AtmosphericState::at_altitude(altitude)?;
    Ok(ForceModel::helium().drag_force(&atmosphere, velocity, helium_mass))
}

pub fn force_correction(helium_mass: f64, altitude: f64) -> f64 {
    ForceModel::helium().force_correction(helium_mass, altitude)
}

pub fn descent_drag_force(
    velocity: f64,
    altitude: f64,
    profile: &DescentProfile,
) -> Result<f64, SimulationError> {
    let atmosphere = AtmosphericState::at_altitude(altitude)?;
    Ok(profile.drag(velocity, &atmosphere))
}
