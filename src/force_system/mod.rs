pub mod aerodynamics;
pub mod balloon;
pub mod forces;

pub use aerodynamics::DescentProfile;
pub use balloon::{BalloonGeometry, IdealGasBalloon};
pub use forces::{
    buoyant_force, descent_drag_force, drag_force, force_correction, gravity_acceleration,
    gravity_force, ForceModel, ForceSet,
};
