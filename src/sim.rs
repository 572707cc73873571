// Host-run stand-ins for the hardware collaborators
//
// Lets the runtime run on a workstation with no car attached: pin writes go
// to the log, the keyboard acts as the gamepad, and a synthetic wheel emits
// pulses while a motor is energized.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal;
use tracing::{debug, info};

use crate::config::{MOTOR1_PINS, MOTOR2_PINS};
use crate::gamepad::{Gamepad, GamepadState, DPAD_LEFT, DPAD_RIGHT};
use crate::hal::{DigitalIo, Level};
use crate::telemetry::PulseHandle;
use crate::wifi::{AccessPoint, ApConfig, ApError};

/// Logs pin writes and remembers levels so the synthetic wheel can see
/// whether the car is "moving"
#[derive(Clone, Default)]
pub struct SimIo {
    levels: Arc<Mutex<HashMap<u8, Level>>>,
}

impl SimIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one pulse edge per `period` while any motor input is high
    pub fn spawn_wheel(&self, handle: PulseHandle, period: Duration) {
        let levels = Arc::clone(&self.levels);
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(period);
            loop {
                tick.tick().await;
                if any_motor_energized(&levels.lock().unwrap()) {
                    handle.record_edge();
                }
            }
        });
    }
}

fn any_motor_energized(levels: &HashMap<u8, Level>) -> bool {
    [MOTOR1_PINS.0, MOTOR1_PINS.1, MOTOR2_PINS.0, MOTOR2_PINS.1]
        .iter()
        .any(|pin| levels.get(pin) == Some(&Level::High))
}

impl DigitalIo for SimIo {
    fn write(&mut self, pin: u8, level: Level) {
        debug!("Pin {} -> {:?}", pin, level);
        self.levels.lock().unwrap().insert(pin, level);
    }
}

/// How long a key press counts as "held"; terminals only deliver repeats,
/// not release events, so each press engages the input briefly
const KEY_HOLD: Duration = Duration::from_millis(150);

/// Keyboard stand-in for the gamepad: W = throttle, S = brake, A/D = d-pad
pub struct KeyboardGamepad {
    throttle_until: Option<Instant>,
    brake_until: Option<Instant>,
    left_until: Option<Instant>,
    right_until: Option<Instant>,
}

impl KeyboardGamepad {
    pub fn new() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        info!("Keyboard gamepad ready (W/S = throttle/brake, A/D = turn)");
        Ok(Self {
            throttle_until: None,
            brake_until: None,
            left_until: None,
            right_until: None,
        })
    }
}

impl Gamepad for KeyboardGamepad {
    fn update(&mut self) {
        // Drain whatever key events arrived since the last cycle
        while let Ok(true) = event::poll(Duration::ZERO) {
            let Ok(Event::Key(key)) = event::read() else {
                continue;
            };
            let held_until = Some(Instant::now() + KEY_HOLD);
            match key.code {
                KeyCode::Char('w') => self.throttle_until = held_until,
                KeyCode::Char('s') => self.brake_until = held_until,
                KeyCode::Char('a') => self.left_until = held_until,
                KeyCode::Char('d') => self.right_until = held_until,
                _ => {}
            }
        }
    }

    fn state(&self) -> Option<GamepadState> {
        let now = Instant::now();
        let held = |until: Option<Instant>| until.is_some_and(|t| now < t);

        let mut dpad = 0;
        if held(self.left_until) {
            dpad |= DPAD_LEFT;
        }
        if held(self.right_until) {
            dpad |= DPAD_RIGHT;
        }
        Some(GamepadState {
            throttle: if held(self.throttle_until) { 255 } else { 0 },
            brake: if held(self.brake_until) { 255 } else { 0 },
            dpad,
        })
    }
}

impl Drop for KeyboardGamepad {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Fake radio stack: starts with no address so the supervisor performs the
/// initial bring-up on the first control cycle
pub struct SimAccessPoint {
    ip: Ipv4Addr,
}

impl SimAccessPoint {
    pub fn new() -> Self {
        Self {
            ip: Ipv4Addr::UNSPECIFIED,
        }
    }
}

impl Default for SimAccessPoint {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessPoint for SimAccessPoint {
    fn start(&mut self, config: &ApConfig) -> Result<(), ApError> {
        self.ip = Ipv4Addr::new(192, 168, 4, 1);
        info!(
            "Access point '{}' up on channel {} at {} dBm (max {} stations), ip={}",
            config.ssid, config.channel, config.tx_power_dbm, config.max_stations, self.ip
        );
        Ok(())
    }

    fn station_count(&self) -> u32 {
        0
    }

    fn ip(&self) -> Ipv4Addr {
        self.ip
    }
}
