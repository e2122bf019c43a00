use serde::Serialize;

use super::layers::{
    elliptical_lapse_rate, elliptical_temperature, layer_at_geopotential, AtmosphereLayer,
    LayerKind, MODEL_TOP,
};
use crate::constants::{
    AIR_MOLAR_MASS, AIR_SPECIFIC_GAS_CONSTANT, EARTH_GEOPOTENTIAL_RADIUS, MAX_MODEL_ALTITUDE,
    MIN_MODEL_ALTITUDE, STANDARD_GRAVITY, UNIVERSAL_GAS_CONSTANT,
};
use crate::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerTemperature {
    pub temperature: f64,      // K
    pub base_temperature: f64, // K
    pub lapse_rate: f64,       // K/m
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmosphericState {
    pub layer: &'static str,
    pub geopotential_altitude: f64, // m
    pub temperature: f64,           // K
    pub base_temperature: f64,      // K
    pub lapse_rate: f64,            // K/m
    pub pressure: f64,              // Pa, NaN above 51 km geopotential
    pub density: f64,               // kg/m³
}

impl AtmosphericState {
    pub fn at_altitude(altitude: f64) -> Result<Self, SimulationError> {
        check_geometric_range(altitude)?;
        let geopotential = geopotential_altitude(altitude);
        Self::resolve(geopotential, altitude)
    }

    pub fn at_geopotential(geopotential: f64) -> Result<Self, SimulationError> {
        if !geopotential.is_finite() || !(0.0..=MODEL_TOP).contains(&geopotential) {
            return Err(SimulationError::AltitudeOutOfRange {
                altitude: geopotential,
            });
        }
        Self::resolve(geopotential, geometric_altitude(geopotential))
    }

    fn resolve(geopotential: f64, geometric: f64) -> Result<Self, SimulationError> {
        let layer = layer_at_geopotential(geopotential).ok_or(
            SimulationError::AltitudeOutOfRange {
                altitude: geometric,
            },
        )?;
        let t = layer_temperature(layer, geopotential, geometric);
        let pressure =
            pressure_in_layer(layer, geopotential, t.temperature, t.base_temperature, t.lapse_rate);

        Ok(AtmosphericState {
            layer: layer.name,
            geopotential_altitude: geopotential,
            temperature: t.temperature,
            base_temperature: t.base_temperature,
            lapse_rate: t.lapse_rate,
            pressure,
            density: ideal_gas_density(pressure, t.temperature),
        })
    }
}

pub fn geopotential_altitude(geometric: f64) -> f64 {
    geometric * EARTH_GEOPOTENTIAL_RADIUS / (EARTH_GEOPOTENTIAL_RADIUS + geometric)
}

pub fn geometric_altitude(geopotential: f64) -> f64 {
    geopotential * EARTH_GEOPOTENTIAL_RADIUS / (EARTH_GEOPOTENTIAL_RADIUS - geopotential)
}

fn check_geometric_range(altitude: f64) -> Result<(), SimulationError> {
    if altitude.is_finite() && (MIN_MODEL_ALTITUDE..=MAX_MODEL_ALTITUDE).contains(&altitude) {
        Ok(())
    } else {
        Err(SimulationError::AltitudeOutOfRange { altitude })
    }
}

pub fn temperature(altitude: f64) -> Result<LayerTemperature, SimulationError> {
    check_geometric_range(altitude)?;
    let geopotential = geopotential_altitude(altitude);
    let layer = layer_at_geopotential(geopotential)
        .ok_or(SimulationError::AltitudeOutOfRange { altitude })?;
    Ok(layer_temperature(layer, geopotential, altitude))
}

fn layer_temperature(
    layer: &AtmosphereLayer,
    geopotential: f64,
    geometric: f64,
) -> LayerTemperature {
    match layer.kind {
        LayerKind::Gradient => LayerTemperature {
            temperature: layer.base_temperature
                + layer.lapse_rate * (geopotential - layer.base_altitude),
            base_temperature: layer.base_temperature,
            lapse_rate: layer.lapse_rate,
        },
        LayerKind::Isothermal => LayerTemperature {
            temperature: layer.base_temperature,
            base_temperature: layer.base_temperature,
            lapse_rate: 0.0,
        },
        LayerKind::Elliptical => LayerTemperature {
            temperature: elliptical_temperature(layer.base_temperature, geometric),
            base_temperature: layer.base_temperature,
            lapse_rate: elliptical_lapse_rate(geometric),
        },
    }
}

// NaN above 51 km geopotential, where the table has no base pressures.
pub fn pressure(altitude: f64, temperature: f64, base_temperature: f64, lapse_rate: f64) -> f64 {
    let geopotential = geopotential_altitude(altitude);
    match layer_at_geopotential(geopotential) {
        Some(layer) => {
            pressure_in_layer(layer, geopotential, temperature, base_temperature, lapse_rate)
        }
        None => f64::NAN,
    }
}

fn pressure_in_layer(
    layer: &AtmosphereLayer,
    geopotential: f64,
    temperature: f64,
    base_temperature: f64,
    lapse_rate: f64,
) -> f64 {
    let base_pressure = match layer.base_pressure_mbar {
        Some(p) => p,
        None => return f64::NAN,
    };

    let pressure_mbar = match layer.kind {
        LayerKind::Gradient if lapse_rate != 0.0 => {
            let exponent = -STANDARD_GRAVITY / (lapse_rate * AIR_SPECIFIC_GAS_CONSTANT);
            base_pressure * (temperature / base_temperature).powf(exponent)
        }
        LayerKind::Gradient | LayerKind::Isothermal => {
            let scale = -STANDARD_GRAVITY / (AIR_SPECIFIC_GAS_CONSTANT * temperature);
            base_pressure * (scale * (geopotential - layer.base_altitude)).exp()
        }
        LayerKind::Elliptical => f64::NAN,
    };

    pressure_mbar * 100.0
}

pub fn density(altitude: f64) -> Result<f64, SimulationError> {
    let t = temperature(altitude)?;
    let p = pressure(altitude, t.temperature, t.base_temperature, t.lapse_rate);
    Ok(ideal_gas_density(p, t.temperature))
}

fn ideal_gas_density(pressure: f64, temperature: f64) -> f64 {
    pressure * AIR_MOLAR_MASS / (UNIVERSAL_GAS_CONSTANT * temperature)
}
