pub mod command;
pub mod config;
pub mod gamepad;
pub mod hal;
pub mod motor;
pub mod runtime;
pub mod sim;
pub mod status;
pub mod telemetry;
pub mod wifi;
