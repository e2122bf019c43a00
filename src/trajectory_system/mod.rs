pub mod ascent;
pub mod descent;
pub mod kinematics;

pub use ascent::{integrate, AscentIntegrator, AscentRequest};
pub use descent::{integrate_descent, DescentIntegrator, DescentRequest};
pub use kinematics::{KinematicState, SimulationResult};
