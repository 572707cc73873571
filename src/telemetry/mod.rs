// Telemetry module
//
// Provides:
// - Atomic pulse counter fed by the wheel sensor edge interrupt
// - Kinematics estimator (velocity, acceleration, power) consuming it

pub mod kinematics;
pub mod pulse;

pub use kinematics::{KinematicState, KinematicsEstimator};
pub use pulse::{PulseCounter, PulseHandle};
