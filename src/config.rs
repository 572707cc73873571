// Pins, physical constants, access-point credentials, loop timing
use std::time::Duration;

// Runtime loop frequency
pub const LOOP_HZ: u64 = 50;

// Motor direction-pair pins: (input 1, input 2) per motor
pub const MOTOR1_PINS: (u8, u8) = (18, 17);
pub const MOTOR2_PINS: (u8, u8) = (8, 3);

// Wheel speed sensor (input, pull-up, rising-edge interrupt)
pub const PULSE_SENSOR_PIN: u8 = 9;

// Vehicle physical parameters
pub const WHEEL_DIAMETER_M: f32 = 0.06;
pub const VEHICLE_MASS_KG: f32 = 0.780;

// Samples closer together than this are skipped by the estimator
pub const MIN_SAMPLE_DT: Duration = Duration::from_millis(1);

// Access point configuration
pub const AP_SSID: &str = "CarroControl";
pub const AP_PASSPHRASE: &str = "12345678";
pub const AP_CHANNEL: u8 = 1;
pub const AP_HIDDEN: bool = false;
pub const AP_MAX_STATIONS: u8 = 4;
pub const AP_TX_POWER_DBM: f32 = 19.5;

// Minimum interval between access-point restart attempts
pub const AP_RESTART_BACKOFF: Duration = Duration::from_secs(5);

// Status page server
pub const HTTP_BIND_ADDR: &str = "0.0.0.0:8080";
pub const STATUS_REFRESH_MS: u32 = 500;

// Host simulation: synthetic wheel pulse period while a motor is energized
pub const SIM_WHEEL_PERIOD: Duration = Duration::from_millis(50);
