use serde::Serialize;

use crate::config::SimulationConfig;
use crate::constants::MAX_MODEL_ALTITUDE;
use crate::errors::SimulationError;
use crate::force_system::ForceModel;
use crate::trajectory_system::{AscentIntegrator, AscentRequest, SimulationResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub mass_kg: f64,       // kg, ceiling mass when infeasible
    pub achieved_rate: f64, // m/s
    pub gage_force: f64,    // N, at the first step
    pub feasible: bool,
    pub lower_bound_kg: f64, // kg, every mass tried below it fell short
    pub iterations: u32,
}

impl SearchResult {
    pub fn ensure_feasible(self) -> Result<Self, SimulationError> {
        if self.feasible {
            Ok(self)
        } else {
            Err(SimulationError::InfeasibleTarget {
                max_mass: self.mass_kg,
                best_rate: self.achieved_rate,
            })
        }
    }
}

#[derive(Debug, Clone)]
pub struct MassSearch {
    pub config: SimulationConfig,
    integrator: AscentIntegrator,
}

impl Default for MassSearch {
    fn default() -> Self {
        MassSearch::new(SimulationConfig::default())
    }
}

impl MassSearch {
    pub fn new(config: SimulationConfig) -> Self {
        let integrator = AscentIntegrator::new(ForceModel::helium(), config.max_steps);
        MassSearch { config, integrator }
    }

    pub fn ascent(
        &self,
        helium_mass: f64,
        start_altitude: f64,
        burst_altitude: f64,
    ) -> SimulationResult {
        self.integrator.run(&AscentRequest {
            helium_mass,
            start_altitude,
            target_altitude: burst_altitude,
            time_step: self.config.time_step_s,
            constant_mass: self.config.constant_mass_kg,
            hard_stop_on_nonpositive_net_force: self.config.hard_stop_on_nonpositive_net_force,
        })
    }

    pub fn find(
        &self,
        burst_altitude: f64,
        start_altitude: f64,
        target_rate: f64,
    ) -> Result<SearchResult, SimulationError> {
        self.config.validate()?;
        validate_search(
            burst_altitude,
            start_altitude,
            target_rate,
            self.config.max_helium_mass_kg,
        )?;

        let decimals = self.config.rate_precision_decimals;
        let max_mass = self.config.max_helium_mass_kg;

        let ceiling = self.ascent(max_mass, start_altitude, burst_altitude);
        let ceiling_gage = ceiling.first_step_net_force.unwrap_or(f64::NAN);
        if !reaches(&ceiling, target_rate) {
            return Ok(SearchResult {
                mass_kg: max_mass,
                achieved_rate: ceiling.mean_rate,
                gage_force: ceiling_gage,
                feasible: false,
                lower_bound_kg: max_mass,
                iterations: 0,
            });
        }

        let tolerance = 0.5 * 10f64.powi(-(decimals as i32));
        let target_rounded = round_to(target_rate, decimals);

        let mut low = 0.0;
        let mut high = max_mass;
        let mut best = (max_mass, ceiling.mean_rate, ceiling_gage);
        let mut iterations = 0;

        while iterations < self.config.max_iterations {
            iterations += 1;
            let mid = 0.5 * (low + high);
            let run = self.ascent(mid, start_altitude, burst_altitude);
            let gage = run.first_step_net_force.unwrap_or(f64::NAN);

            if reaches(&run, target_rate) {
                best = (mid, run.mean_rate, gage);
                high = mid;
                if round_to(run.mean_rate, decimals) == target_rounded {
                    break;
                }
            } else {
                low = mid;
            }

            if high - low < tolerance {
                break;
            }
        }

        let (mass_kg, achieved_rate, gage_force) = best;
        Ok(SearchResult {
            mass_kg,
            achieved_rate,
            gage_force,
            feasible: true,
            lower_bound_kg: low,
            iterations,
        })
    }
}

// Default time step and payload mass.
pub fn find_helium_mass(
    burst_altitude: f64,
    start_altitude: f64,
    target_rate: f64,
    max_helium_mass: f64,
    rate_precision_decimals: u32,
    max_iterations: u32,
) -> Result<SearchResult, SimulationError> {
    validate_search(burst_altitude, start_altitude, target_rate, max_helium_mass)?;
    let config = SimulationConfig {
        max_helium_mass_kg: max_helium_mass,
        rate_precision_decimals,
        max_iterations,
        ..SimulationConfig::default()
    };
    MassSearch::new(config).find(burst_altitude, start_altitude, target_rate)
}

fn validate_search(
    burst_altitude: f64,
    start_altitude: f64,
    target_rate: f64,
    max_helium_mass: f64,
) -> Result<(), SimulationError> {
    let values = [burst_altitude, start_altitude, target_rate, max_helium_mass];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(SimulationError::InvalidInput(
            "search inputs must be finite numbers".to_string(),
        ));
    }
    if start_altitude < 0.0 {
        return Err(SimulationError::InvalidInput(format!(
            "start altitude must be >= 0 m, got {}",
            start_altitude
        )));
    }
    if burst_altitude <= start_altitude {
        return Err(SimulationError::InvalidInput(format!(
            "burst altitude {} m must be above start altitude {} m",
            burst_altitude, start_altitude
        )));
    }
    if burst_altitude > MAX_MODEL_ALTITUDE {
        return Err(SimulationError::InvalidInput(format!(
            "burst altitude must be <= {} m, got {}",
            MAX_MODEL_ALTITUDE, burst_altitude
        )));
    }
    if target_rate <= 0.0 {
        return Err(SimulationError::InvalidInput(format!(
            "target ascent rate must be positive, got {}",
            target_rate
        )));
    }
    if max_helium_mass <= 0.0 {
        return Err(SimulationError::InvalidInput(format!(
            "maximum helium mass must be positive, got {}",
            max_helium_mass
        )));
    }
    Ok(())
}

fn reaches(run: &SimulationResult, target_rate: f64) -> bool {
    run.is_success() && run.mean_rate >= target_rate
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(4.999_996, 5), 5.0);
        assert_eq!(round_to(4.999_994, 5), 4.999_99);
        assert_eq!(round_to(1.25, 0), 1.0);
    }

    #[test]
    fn test_invalid_search_inputs() {
        let cases = [
            (1_000.0, -1.0, 5.0, 50.0),
            (1_000.0, 1_000.0, 5.0, 50.0),
            (100_001.0, 0.0, 5.0, 50.0),
            (1_000.0, 0.0, 0.0, 50.0),
            (1_000.0, 0.0, 5.0, 0.0),
            (f64::NAN, 0.0, 5.0, 50.0),
        ];
        for (burst, start, rate, max) in cases {
            assert!(matches!(
                find_helium_mass(burst, start, rate, max, 5, 80),
                Err(SimulationError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_short_flight_converges() {
        let result = find_helium_mass(2_000.0, 0.0, 4.0, 20.0, 3, 80).unwrap();
        assert!(result.feasible);
        assert!(result.mass_kg > 0.0 && result.mass_kg <= 20.0);
        assert!(result.achieved_rate >= 4.0 - 1e-3);
        assert_abs_diff_eq!(result.achieved_rate, 4.0, epsilon = 1e-2);
        assert!(result.lower_bound_kg <= result.mass_kg);
        assert!(result.gage_force > 0.0);
    }

    #[test]
    fn test_found_rate_never_below_target() {
        for (burst, target) in [(2_000.0, 3.0), (2_000.0, 4.5), (5_000.0, 6.0), (5_000.0, 7.5)] {
            let result = find_helium_mass(burst, 0.0, target, 50.0, 5, 80).unwrap();
            assert!(result.feasible);
            assert!(
                result.achieved_rate >= target,
                "burst {} target {} gave {}",
                burst,
                target,
                result.achieved_rate
            );
            assert!(result.lower_bound_kg < result.mass_kg);
        }
    }

    #[test]
    fn test_small_ceiling_is_infeasible() {
        let result = find_helium_mass(2_000.0, 0.0, 5.0, 0.5, 5, 80).unwrap();
        assert!(!result.feasible);
        assert_eq!(result.mass_kg, 0.5);
        assert_eq!(result.iterations, 0);
        assert_eq!(
            result.clone().ensure_feasible(),
            Err(SimulationError::InfeasibleTarget {
                max_mass: 0.5,
                best_rate: result.achieved_rate,
            })
        );
    }

    #[test]
    fn test_iteration_cap_respected() {
        let result = find_helium_mass(2_000.0, 0.0, 4.0, 20.0, 8, 3).unwrap();
        assert!(result.iterations <= 3);
        assert!(result.feasible);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = SimulationConfig {
            time_step_s: -1.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            MassSearch::new(config).find(2_000.0, 0.0, 4.0),
            Err(SimulationError::Config(_))
        ));
    }
}
