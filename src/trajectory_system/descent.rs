use super::kinematics::{KinematicState, SimulationResult};
use crate::atmosphere_system::AtmosphericState;
use crate::constants::{MAX_INTEGRATION_STEPS, MAX_MODEL_ALTITUDE};
use crate::errors::SimulationError;
use crate::force_system::{gravity_force, DescentProfile};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentRequest {
    pub burst_altitude: f64, // m
    pub ground_level: f64,   // m
    pub burst_velocity: f64, // m/s, positive up
    pub time_step: f64,      // s
}

impl DescentRequest {
    pub fn validate(&self) -> Result<(), SimulationError> {
        let values = [
            self.burst_altitude,
            self.ground_level,
            self.burst_velocity,
            self.time_step,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SimulationError::InvalidInput(
                "descent inputs must be finite numbers".to_string(),
            ));
        }
        if self.ground_level < 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "ground level must be >= 0 m, got {}",
                self.ground_level
            )));
        }
        if self.burst_altitude <= self.ground_level {
            return Err(SimulationError::InvalidInput(format!(
                "burst altitude {} m must be above ground level {} m",
                self.burst_altitude, self.ground_level
            )));
        }
        if self.burst_altitude > MAX_MODEL_ALTITUDE {
            return Err(SimulationError::InvalidInput(format!(
                "burst altitude must be <= {} m, got {}",
                MAX_MODEL_ALTITUDE, self.burst_altitude
            )));
        }
        if self.time_step <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescentIntegrator {
    pub profile: DescentProfile,
    pub max_steps: u64,
}

impl Default for DescentIntegrator {
    fn default() -> Self {
        DescentIntegrator::new(DescentProfile::default(), MAX_INTEGRATION_STEPS)
    }
}

impl DescentIntegrator {
    pub fn new(profile: DescentProfile, max_steps: u64) -> Self {
        DescentIntegrator { profile, max_steps }
    }

    pub fn run(&self, request: &DescentRequest) -> SimulationResult {
        if let Err(error) = request.validate() {
            return SimulationResult::rejected(error);
        }
        if !self.profile.mass_kg.is_finite() || self.profile.mass_kg <= 0.0 {
            return SimulationResult::rejected(SimulationError::InvalidInput(format!(
                "descent mass must be positive, got {}",
                self.profile.mass_kg
            )));
        }

        let dt = request.time_step;
        let mass = self.profile.mass_kg;
        let mut position = request.burst_altitude;
        let mut velocity = request.burst_velocity;
        let mut time = 0.0;
        let mut steps: u64 = 0;

        let mut trajectory = Vec::new();
        let mut error = None;

        while position > request.ground_level {
            if steps >= self.max_steps {
                error = Some(SimulationError::SafetyStop {
                    steps: self.max_steps,
                });
                break;
            }

            let atmosphere = match AtmosphericState::at_altitude(position) {
                Ok(atmosphere) => atmosphere,
                Err(e) => {
                    error = Some(e);
                    break;
                }
            };

            let drag = self.profile.drag(velocity, &atmosphere);
            let net_force = -velocity.signum() * drag - gravity_force(position, mass);
            if !net_force.is_finite() {
                error = Some(SimulationError::AtmosphereUndefined { altitude: position });
                break;
            }

            let acceleration = net_force / mass;
            velocity += acceleration * dt;
            position += velocity * dt;
            if position < request.ground_level {
                position = request.ground_level;
            }

            trajectory.push(KinematicState {
                time,
                position,
                velocity,
                acceleration,
            });
            time += dt;
            steps += 1;
        }

        SimulationResult::finish(trajectory, None, error)
    }
}

pub fn integrate_descent(
    burst_altitude_m: f64,
    ground_level_m: f64,
    burst_velocity_mps: f64,
    time_step_s: f64,
    profile: &DescentProfile,
) -> SimulationResult {
    DescentIntegrator::new(*profile, MAX_INTEGRATION_STEPS).run(&DescentRequest {
        burst_altitude: burst_altitude_m,
        ground_level: ground_level_m,
        burst_velocity: burst_velocity_mps,
        time_step: time_step_s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{STANDARD_GRAVITY, TIME_STEP};
    use approx::assert_relative_eq;

    #[test]
    fn test_descent_reaches_ground() {
        let profile = DescentProfile::default();
        let result = integrate_descent(5_000.0, 100.0, 0.0, TIME_STEP, &profile);
        assert!(result.is_success(), "{:?}", result.error);
        assert_eq!(result.final_state().unwrap().position, 100.0);
        assert!(result.mean_rate < 0.0);
        assert!(result.first_step_net_force.is_none());
    }

    #[test]
    fn test_lands_near_terminal_velocity() {
        let profile = DescentProfile::default();
        let result = integrate_descent(3_000.0, 0.0, 0.0, TIME_STEP, &profile);
        let last = result.final_state().unwrap();
        let ground = AtmosphericState::at_altitude(0.0).unwrap();
        let v_t = profile.terminal_velocity(ground.density, STANDARD_GRAVITY);
        assert_relative_eq!(-last.velocity, v_t, max_relative = 0.01);
    }

    #[test]
    fn test_upward_burst_velocity_is_decelerated() {
        let profile = DescentProfile::default();
        let result = integrate_descent(2_000.0, 0.0, 20.0, TIME_STEP, &profile);
        assert!(result.is_success());
        let first = result.trajectory[0];
        // Drag and gravity both act downward while still rising.
        assert!(first.acceleration < -STANDARD_GRAVITY);
        let peak = result
            .trajectory
            .iter()
            .map(|s| s.position)
            .fold(f64::MIN, f64::max);
        assert!(peak > 2_000.0);
    }

    #[test]
    fn test_invalid_descent_inputs() {
        let profile = DescentProfile::default();
        let cases = [
            (1_000.0, -1.0, 0.0, TIME_STEP),
            (1_000.0, 1_000.0, 0.0, TIME_STEP),
            (100_001.0, 0.0, 0.0, TIME_STEP),
            (1_000.0, 0.0, f64::INFINITY, TIME_STEP),
            (1_000.0, 0.0, 0.0, -0.1),
        ];
        for (burst, ground, velocity, dt) in cases {
            let result = integrate_descent(burst, ground, velocity, dt, &profile);
            assert!(matches!(result.error, Some(SimulationError::InvalidInput(_))));
            assert!(result.trajectory.is_empty());
        }
    }

    #[test]
    fn test_massless_profile_rejected() {
        let profile = DescentProfile::new(0.0, 0.75, 1.0);
        let result = integrate_descent(1_000.0, 0.0, 0.0, TIME_STEP, &profile);
        assert!(matches!(result.error, Some(SimulationError::InvalidInput(_))));
    }

    #[test]
    fn test_step_ceiling_is_safety_stop() {
        let integrator = DescentIntegrator::new(DescentProfile::default(), 5);
        let result = integrator.run(&DescentRequest {
            burst_altitude: 10_000.0,
            ground_level: 0.0,
            burst_velocity: 0.0,
            time_step: TIME_STEP,
        });
        assert_eq!(result.error, Some(SimulationError::SafetyStop { steps: 5 }));
        assert!(result.trajectory.is_empty());
    }

    #[test]
    fn test_burst_above_51km_is_undefined() {
        let result = integrate_descent(60_000.0, 0.0, 0.0, TIME_STEP, &DescentProfile::default());
        assert_eq!(
            result.error,
            Some(SimulationError::AtmosphereUndefined { altitude: 60_000.0 })
        );
    }
}
