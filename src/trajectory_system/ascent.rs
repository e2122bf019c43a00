use super::kinematics::{KinematicState, SimulationResult};
use crate::constants::MAX_INTEGRATION_STEPS;
use crate::errors::SimulationError;
use crate::force_system::{BalloonGeometry, ForceModel, IdealGasBalloon};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AscentRequest {
    pub helium_mass: f64,     // kg
    pub start_altitude: f64,  // m
    pub target_altitude: f64, // m, burst altitude
    pub time_step: f64,       // s
    pub constant_mass: f64,   // kg, payload + structure
    pub hard_stop_on_nonpositive_net_force: bool,
}

impl AscentRequest {
    pub fn validate(&self) -> Result<(), SimulationError> {
        let values = [
            self.helium_mass,
            self.start_altitude,
            self.target_altitude,
            self.time_step,
            self.constant_mass,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SimulationError::InvalidInput(
                "ascent inputs must be finite numbers".to_string(),
            ));
        }
        if self.start_altitude < 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "start altitude must be >= 0 m, got {}",
                self.start_altitude
            )));
        }
        if self.target_altitude <= self.start_altitude {
            return Err(SimulationError::InvalidInput(format!(
                "target altitude {} m must be above start altitude {} m",
                self.target_altitude, self.start_altitude
            )));
        }
        if self.helium_mass < 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "helium mass must be >= 0 kg, got {}",
                self.helium_mass
            )));
        }
        if self.time_step <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        if self.constant_mass < 0.0 || self.constant_mass + self.helium_mass <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "total mass must be positive (constant mass {} kg)",
                self.constant_mass
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AscentIntegrator<G: BalloonGeometry = IdealGasBalloon> {
    pub force_model: ForceModel<G>,
    pub max_steps: u64,
}

impl AscentIntegrator<IdealGasBalloon> {
    pub fn helium() -> Self {
        AscentIntegrator::new(ForceModel::helium(), MAX_INTEGRATION_STEPS)
    }
}

impl Default for AscentIntegrator<IdealGasBalloon> {
    fn default() -> Self {
        Self::helium()
    }
}

impl<G: BalloonGeometry> AscentIntegrator<G> {
    pub fn new(force_model: ForceModel<G>, max_steps: u64) -> Self {
        AscentIntegrator {
            force_model,
            max_steps,
        }
    }

    pub fn run(&self, request: &AscentRequest) -> SimulationResult {
        if let Err(error) = request.validate() {
            return SimulationResult::rejected(error);
        }

        let dt = request.time_step;
        let total_mass = request.constant_mass + request.helium_mass;
        let mut position = request.start_altitude;
        let mut velocity = 0.0;
        let mut time = 0.0;
        let mut steps: u64 = 0;

        let mut trajectory = Vec::new();
        let mut first_step_net_force = None;
        let mut error = None;

        while position < request.target_altitude {
            if steps >= self.max_steps {
                error = Some(SimulationError::SafetyStop {
                    steps: self.max_steps,
                });
                break;
            }

            let forces = match self.force_model.forces_at(
                position,
                velocity,
                request.helium_mass,
                total_mass,
            ) {
                Ok(forces) => forces,
                Err(e) => {
                    error = Some(e);
                    break;
                }
            };
            let net_force = forces.net_force();

            if !net_force.is_finite() {
                error = Some(SimulationError::AtmosphereUndefined { altitude: position });
                break;
            }
            if first_step_net_force.is_none() {
                first_step_net_force = Some(forces.gage_force());
            }
            if request.hard_stop_on_nonpositive_net_force && net_force <= 0.0 {
                error = Some(SimulationError::NonAscendingForce { net_force });
                break;
            }

            let acceleration = net_force / total_mass;
            velocity += acceleration * dt;
            position += velocity * dt;

            trajectory.push(KinematicState {
                time,
                position,
                velocity,
                acceleration,
            });
            time += dt;
            steps += 1;
        }

        SimulationResult::finish(trajectory, first_step_net_force, error)
    }
}

pub fn integrate(
    helium_mass_kg: f64,
    start_altitude_m: f64,
    target_altitude_m: f64,
    time_step_s: f64,
    constant_mass_kg: f64,
    hard_stop_on_nonpositive_net_force: bool,
) -> SimulationResult {
    AscentIntegrator::helium().run(&AscentRequest {
        helium_mass: helium_mass_kg,
        start_altitude: start_altitude_m,
        target_altitude: target_altitude_m,
        time_step: time_step_s,
        constant_mass: constant_mass_kg,
        hard_stop_on_nonpositive_net_force,
    })
}
