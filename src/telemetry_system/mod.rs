pub mod csv;
pub mod telemetry;

pub use csv::{write_trajectory, write_trajectory_file};
pub use telemetry::{display_trajectory, sample_rows, FlightReport};
