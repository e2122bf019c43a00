use serde::Serialize;

use crate::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KinematicState {
    pub time: f64,         // s, at the start of the step
    pub position: f64,     // m, geometric altitude after the step
    pub velocity: f64,     // m/s, positive up
    pub acceleration: f64, // m/s²
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub trajectory: Vec<KinematicState>,
    pub mean_rate: f64,
    pub first_step_net_force: Option<f64>,
    pub error: Option<SimulationError>,
}

impl SimulationResult {
    pub(crate) fn rejected(error: SimulationError) -> Self {
        SimulationResult {
            trajectory: Vec::new(),
            mean_rate: 0.0,
            first_step_net_force: None,
            error: Some(error),
        }
    }

    pub(crate) fn finish(
        mut trajectory: Vec<KinematicState>,
        first_step_net_force: Option<f64>,
        mut error: Option<SimulationError>,
    ) -> Self {
        if matches!(error, Some(SimulationError::SafetyStop { .. })) {
            trajectory.clear();
        }

        let mean_rate = mean_velocity(&trajectory);
        if trajectory.is_empty() && error.is_none() {
            error = Some(SimulationError::NoSamples);
        }

        SimulationResult {
            trajectory,
            mean_rate,
            first_step_net_force,
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn final_state(&self) -> Option<&KinematicState> {
        self.trajectory.last()
    }

    pub fn distance_time_rate(&self) -> Option<f64> {
        let first = self.trajectory.first()?;
        let last = self.trajectory.last()?;
        let elapsed = last.time - first.time;
        if elapsed > 0.0 {
            Some((last.position - first.position) / elapsed)
        } else {
            None
        }
    }

    pub fn elapsed_time(&self) -> f64 {
        match self.trajectory.as_slice() {
            [.., previous, last] => last.time + (last.time - previous.time),
            [only] => only.time,
            [] => 0.0,
        }
    }
}

fn mean_velocity(trajectory: &[KinematicState]) -> f64 {
    if trajectory.is_empty() {
        return 0.0;
    }
    trajectory.iter().map(|s| s.velocity).sum::<f64>() / trajectory.len() as f64
}
