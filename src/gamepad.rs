// Gamepad transport boundary
//
// The pairing/transport stack lives behind `Gamepad`; the runtime only polls
// for the current input state once per control cycle.

/// D-pad bitmask values reported by the controller
pub const DPAD_LEFT: u8 = 0x08;
pub const DPAD_RIGHT: u8 = 0x04;

/// Raw input state read from a connected controller
///
/// Throttle and brake are signed magnitudes; positive means engaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadState {
    pub throttle: i16,
    pub brake: i16,
    pub dpad: u8,
}

/// Polled gamepad transport
pub trait Gamepad: Send {
    /// Pump the transport (pairing events, input reports). Must not block.
    fn update(&mut self);

    /// Current input state, or `None` while no controller is connected.
    fn state(&self) -> Option<GamepadState>;
}
