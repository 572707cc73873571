// Digital I/O boundary
//
// The runtime only needs pin writes; pin-mode setup and interrupt attachment
// happen in the platform layer that constructs the `DigitalIo` implementation
// (see `sim` for the host stand-in).

/// Logic level of a digital output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Write access to digital output pins, addressed by pin number
///
/// Writes are assumed infallible; a platform where they can fail should
/// handle that below this boundary.
pub trait DigitalIo: Send {
    fn write(&mut self, pin: u8, level: Level);
}
