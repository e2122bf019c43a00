use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONSTANT_MASS, MAX_BINARY_ITERATIONS, MAX_HELIUM_MASS, MAX_INTEGRATION_STEPS,
    RATE_DECIMALS, TIME_STEP,
};
use crate::errors::SimulationError;
use crate::force_system::DescentProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub time_step_s: f64,
    pub constant_mass_kg: f64,
    pub max_helium_mass_kg: f64,
    pub rate_precision_decimals: u32,
    pub max_iterations: u32,
    pub max_steps: u64,
    pub hard_stop_on_nonpositive_net_force: bool,
    pub descent: DescentProfile,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            time_step_s: TIME_STEP,
            constant_mass_kg: DEFAULT_CONSTANT_MASS,
            max_helium_mass_kg: MAX_HELIUM_MASS,
            rate_precision_decimals: RATE_DECIMALS,
            max_iterations: MAX_BINARY_ITERATIONS,
            max_steps: MAX_INTEGRATION_STEPS,
            hard_stop_on_nonpositive_net_force: true,
            descent: DescentProfile::default(),
        }
    }
}

impl SimulationConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SimulationError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimulationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.time_step_s.is_finite() || self.time_step_s <= 0.0 {
            return Err(SimulationError::Config(format!(
                "time_step_s must be positive, got {}",
                self.time_step_s
            )));
        }
        if self.time_step_s > 10.0 {
            return Err(SimulationError::Config(format!(
                "time_step_s should not exceed 10 s, got {}",
                self.time_step_s
            )));
        }
        if !self.constant_mass_kg.is_finite() || self.constant_mass_kg < 0.0 {
            return Err(SimulationError::Config(format!(
                "constant_mass_kg must be >= 0, got {}",
                self.constant_mass_kg
            )));
        }
        if !self.max_helium_mass_kg.is_finite() || self.max_helium_mass_kg <= 0.0 {
            return Err(SimulationError::Config(format!(
                "max_helium_mass_kg must be positive, got {}",
                self.max_helium_mass_kg
            )));
        }
        if self.rate_precision_decimals > 12 {
            return Err(SimulationError::Config(format!(
                "rate_precision_decimals must be <= 12, got {}",
                self.rate_precision_decimals
            )));
        }
        if self.max_iterations == 0 {
            return Err(SimulationError::Config(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.max_steps == 0 {
            return Err(SimulationError::Config("max_steps must be at least 1".to_string()));
        }

        let descent = &self.descent;
        let descent_values = [
            descent.mass_kg,
            descent.drag_coefficient,
            descent.reference_area_m2,
        ];
        if descent_values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(SimulationError::Config(
                "descent mass, drag coefficient and area must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
