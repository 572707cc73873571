// Direction-pair motor driver
//
// Each motor has two input pins. Driving one high and the other low selects
// the rotation direction; both low coasts to a stop. Both high would short
// the bridge, so that combination is unrepresentable here.

use tracing::{debug, info};

use crate::command::DriveCommand;
use crate::config::{MOTOR1_PINS, MOTOR2_PINS};
use crate::hal::{DigitalIo, Level};

/// The two drive motors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorId {
    Motor1,
    Motor2,
}

/// Direction for a single motor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorDirection {
    Forward,
    Backward,
    Stop,
}

impl MotorDirection {
    /// Pin levels for this direction: (input 1, input 2)
    fn levels(self) -> (Level, Level) {
        match self {
            MotorDirection::Forward => (Level::High, Level::Low),
            MotorDirection::Backward => (Level::Low, Level::High),
            MotorDirection::Stop => (Level::Low, Level::Low),
        }
    }
}

/// Drives the two motors through the digital I/O boundary
pub struct MotorDriver<IO: DigitalIo> {
    io: IO,
    motor1_pins: (u8, u8),
    motor2_pins: (u8, u8),
}

impl<IO: DigitalIo> MotorDriver<IO> {
    pub fn new(io: IO) -> Self {
        Self::with_pins(io, MOTOR1_PINS, MOTOR2_PINS)
    }

    /// Create with custom pin assignments
    pub fn with_pins(io: IO, motor1_pins: (u8, u8), motor2_pins: (u8, u8)) -> Self {
        Self {
            io,
            motor1_pins,
            motor2_pins,
        }
    }

    /// Set one motor's direction pair
    pub fn drive(&mut self, motor: MotorId, direction: MotorDirection) {
        let pins = match motor {
            MotorId::Motor1 => self.motor1_pins,
            MotorId::Motor2 => self.motor2_pins,
        };
        let (in1, in2) = direction.levels();
        debug!("Motor {:?} -> {:?}", motor, direction);
        self.io.write(pins.0, in1);
        self.io.write(pins.1, in2);
    }

    /// Apply a vehicle-level drive command to both motors
    ///
    /// Turning spins the motors in opposite directions (skid steer).
    pub fn drive_vehicle(&mut self, command: DriveCommand) {
        let (m1, m2) = match command {
            DriveCommand::Forward => (MotorDirection::Forward, MotorDirection::Forward),
            DriveCommand::Backward => (MotorDirection::Backward, MotorDirection::Backward),
            DriveCommand::TurnRight => (MotorDirection::Backward, MotorDirection::Forward),
            DriveCommand::TurnLeft => (MotorDirection::Forward, MotorDirection::Backward),
            DriveCommand::Stop => (MotorDirection::Stop, MotorDirection::Stop),
        };
        self.drive(MotorId::Motor1, m1);
        self.drive(MotorId::Motor2, m2);
    }

    /// Stop both motors immediately
    pub fn stop(&mut self) {
        info!("Stopping both motors");
        self.drive_vehicle(DriveCommand::Stop);
    }
}

impl<IO: DigitalIo> Drop for MotorDriver<IO> {
    fn drop(&mut self) {
        // Leave the outputs safe when the driver goes away
        self.drive_vehicle(DriveCommand::Stop);
    }
}
