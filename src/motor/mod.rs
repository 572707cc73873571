// Motor control module
//
// Two DC motors, each driven by a pair of digital outputs (direction-pair
// encoding into an H-bridge). `MotorDriver` maps discrete drive commands
// onto those pin pairs.

mod driver;

pub use driver::{MotorDirection, MotorDriver, MotorId};
