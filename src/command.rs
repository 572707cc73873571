// Gamepad state -> drive command translation

use crate::gamepad::{GamepadState, DPAD_LEFT, DPAD_RIGHT};

/// Discrete drive intent, derived fresh each control cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveCommand {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Stop,
}

/// Translate raw gamepad input into a drive command.
///
/// Fixed priority, first match wins: throttle, then brake, then d-pad.
/// A consequence is that turning is only expressible with both triggers
/// released.
pub fn translate(state: GamepadState) -> DriveCommand {
    if state.throttle > 0 {
        DriveCommand::Forward
    } else if state.brake > 0 {
        DriveCommand::Backward
    } else if state.dpad == DPAD_LEFT {
        DriveCommand::TurnLeft
    } else if state.dpad == DPAD_RIGHT {
        DriveCommand::TurnRight
    } else {
        DriveCommand::Stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(throttle: i16, brake: i16, dpad: u8) -> GamepadState {
        GamepadState {
            throttle,
            brake,
            dpad,
        }
    }

    #[test]
    fn test_idle_is_stop() {
        assert_eq!(translate(pad(0, 0, 0)), DriveCommand::Stop);
    }

    #[test]
    fn test_throttle_drives_forward() {
        assert_eq!(translate(pad(5, 0, 0)), DriveCommand::Forward);
        assert_eq!(translate(pad(1023, 0, 0)), DriveCommand::Forward);
    }

    #[test]
    fn test_brake_drives_backward() {
        assert_eq!(translate(pad(0, 3, 0)), DriveCommand::Backward);
    }

    #[test]
    fn test_dpad_turns() {
        assert_eq!(translate(pad(0, 0, DPAD_LEFT)), DriveCommand::TurnLeft);
        assert_eq!(translate(pad(0, 0, DPAD_RIGHT)), DriveCommand::TurnRight);
    }

    #[test]
    fn test_throttle_outranks_everything() {
        assert_eq!(translate(pad(5, 9, DPAD_LEFT)), DriveCommand::Forward);
    }

    #[test]
    fn test_brake_outranks_dpad() {
        assert_eq!(translate(pad(0, 3, DPAD_RIGHT)), DriveCommand::Backward);
    }

    #[test]
    fn test_negative_triggers_not_engaged() {
        // Some transports report negative magnitudes at rest
        assert_eq!(translate(pad(-1, -1, 0)), DriveCommand::Stop);
    }

    #[test]
    fn test_unknown_dpad_bits_are_stop() {
        assert_eq!(translate(pad(0, 0, 0x01)), DriveCommand::Stop);
        // Left and right held together match neither mask
        assert_eq!(
            translate(pad(0, 0, DPAD_LEFT | DPAD_RIGHT)),
            DriveCommand::Stop
        );
    }
}
