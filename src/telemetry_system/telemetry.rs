use serde::Serialize;

use crate::trajectory_system::{KinematicState, SimulationResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightReport {
    pub samples: usize,
    pub max_velocity: f64,     // m/s, magnitude
    pub max_altitude: f64,     // m
    pub min_altitude: f64,     // m
    pub max_acceleration: f64, // m/s², magnitude
    pub final_altitude: f64,   // m
    pub final_velocity: f64,   // m/s
    pub flight_time: f64,      // s
    pub mean_rate: f64,        // m/s
}

impl FlightReport {
    pub fn new() -> Self {
        FlightReport {
            samples: 0,
            max_velocity: 0.0,
            max_altitude: f64::MIN,
            min_altitude: f64::MAX,
            max_acceleration: 0.0,
            final_altitude: 0.0,
            final_velocity: 0.0,
            flight_time: 0.0,
            mean_rate: 0.0,
        }
    }

    pub fn from_result(result: &SimulationResult) -> Self {
        let mut report = FlightReport::new();
        for state in &result.trajectory {
            report.collect_data(state);
        }
        if report.samples == 0 {
            report.max_altitude = 0.0;
            report.min_altitude = 0.0;
        }
        report.flight_time = result.elapsed_time();
        report.mean_rate = result.mean_rate;
        report
    }

    pub fn collect_data(&mut self, state: &KinematicState) {
        self.samples += 1;

        let speed = state.velocity.abs();
        if speed > self.max_velocity {
            self.max_velocity = speed;
        }
        if state.position > self.max_altitude {
            self.max_altitude = state.position;
        }
        if state.position < self.min_altitude {
            self.min_altitude = state.position;
        }
        if state.acceleration.abs() > self.max_acceleration {
            self.max_acceleration = state.acceleration.abs();
        }
        self.final_altitude = state.position;
        self.final_velocity = state.velocity;
    }

    pub fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    pub fn format_altitude(altitude: f64) -> String {
        if altitude.abs() >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn display_data(&self) {
        println!("\n--- Flight Summary ---");
        println!("Samples: {}", self.samples);
        println!("Flight Time: {}", Self::format_time(self.flight_time));
        println!("Max Altitude: {}", Self::format_altitude(self.max_altitude));
        println!("Final Altitude: {}", Self::format_altitude(self.final_altitude));
        println!("Max Velocity: {:.4} m/s", self.max_velocity);
        println!("Final Velocity: {:.4} m/s", self.final_velocity);
        println!("Max Acceleration: {:.4} m/s²", self.max_acceleration);
        println!("Mean Rate: {:.5} m/s", self.mean_rate);
    }
}

impl Default for FlightReport {
    fn default() -> Self {
        Self::new()
    }
}

pub fn sample_rows(trajectory: &[KinematicState], rows: usize) -> Vec<KinematicState> {
    if trajectory.is_empty() || rows == 0 {
        return Vec::new();
    }
    let stride = (trajectory.len() / rows).max(1);
    let mut sampled: Vec<KinematicState> = trajectory.iter().step_by(stride).copied().collect();
    if let (Some(last), Some(tail)) = (trajectory.last(), sampled.last()) {
        if last != tail {
            sampled.push(*last);
        }
    }
    sampled
}

pub fn display_trajectory(trajectory: &[KinematicState], rows: usize) {
    println!("\n--- Trajectory ---");
    println!(
        "{:>12} {:>14} {:>12} {:>14}",
        "Time", "Altitude [m]", "Vel [m/s]", "Acc [m/s²]"
    );
    for state in sample_rows(trajectory, rows) {
        println!(
            "{:>12} {:>14.4} {:>12.5} {:>14.5}",
            FlightReport::format_time(state.time),
            state.position,
            state.velocity,
            state.acceleration
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SimulationError;

    fn state(time: f64, position: f64, velocity: f64, acceleration: f64) -> KinematicState {
        KinematicState {
            time,
            position,
            velocity,
            acceleration,
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(FlightReport::format_time(12.5), "12.50s");
        assert_eq!(FlightReport::format_time(125.0), "2m 5.00s");
        assert_eq!(FlightReport::format_time(3_725.5), "1h 2m 5.50s");
    }

    #[test]
    fn test_format_altitude() {
        assert_eq!(FlightReport::format_altitude(850.0), "850.00 m");
        assert_eq!(FlightReport::format_altitude(30_000.0), "30.00 km");
    }

    #[test]
    fn test_report_tracks_extremes() {
        let result = SimulationResult {
            trajectory: vec![
                state(0.0, 1_000.0, -2.0, -9.0),
                state(1.0, 990.0, -12.0, -3.0),
                state(2.0, 980.0, -10.0, 1.5),
            ],
            mean_rate: -8.0,
            first_step_net_force: None,
            error: None,
        };
        let report = FlightReport::from_result(&result);
        assert_eq!(report.samples, 3);
        assert_eq!(report.max_velocity, 12.0);
        assert_eq!(report.max_altitude, 1_000.0);
        assert_eq!(report.min_altitude, 980.0);
        assert_eq!(report.max_acceleration, 9.0);
        assert_eq!(report.final_altitude, 980.0);
        assert_eq!(report.final_velocity, -10.0);
        assert_eq!(report.flight_time, 3.0);
        assert_eq!(report.mean_rate, -8.0);
    }

    #[test]
    fn test_empty_report() {
        let result = SimulationResult {
            trajectory: Vec::new(),
            mean_rate: 0.0,
            first_step_net_force: None,
            error: Some(SimulationError::NoSamples),
        };
        let report = FlightReport::from_result(&result);
        assert_eq!(report.samples, 0);
        assert_eq!(report.max_altitude, 0.0);
        assert_eq!(report.flight_time, 0.0);
    }

    #[test]
    fn test_sample_rows_keeps_last() {
        let trajectory: Vec<_> = (0..25)
            .map(|i| state(i as f64, i as f64 * 10.0, 10.0, 0.0))
            .collect();
        let rows = sample_rows(&trajectory, 10);
        assert_eq!(rows.first().unwrap().time, 0.0);
        assert_eq!(rows.last().unwrap().time, 24.0);
        assert!(rows.len() <= 14);
        assert!(sample_rows(&[], 10).is_empty());
    }
}
