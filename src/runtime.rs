// Fixed-rate control loop
//
// Each iteration: pump the gamepad transport and drive the motors, sample
// the kinematics estimator and publish the snapshot, then check access-point
// liveness. Nothing in an iteration blocks.

use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::time::interval;
use tracing::info;

use crate::command::{self, DriveCommand};
use crate::config::{
    HTTP_BIND_ADDR, LOOP_HZ, MOTOR1_PINS, MOTOR2_PINS, PULSE_SENSOR_PIN, SIM_WHEEL_PERIOD,
};
use crate::gamepad::Gamepad;
use crate::hal::DigitalIo;
use crate::motor::MotorDriver;
use crate::sim::{KeyboardGamepad, SimAccessPoint, SimIo};
use crate::status;
use crate::telemetry::{KinematicState, KinematicsEstimator, PulseCounter};
use crate::wifi::{AccessPoint, ApConfig, ApSupervisor};

pub struct Runtime<IO: DigitalIo, G: Gamepad, A: AccessPoint> {
    motors: MotorDriver<IO>,
    gamepad: G,
    ap: A,
    estimator: KinematicsEstimator,
    supervisor: ApSupervisor,
    snapshot_tx: watch::Sender<KinematicState>,
    last_command: Option<DriveCommand>,
    connected: bool,
}

impl<IO: DigitalIo, G: Gamepad, A: AccessPoint> Runtime<IO, G, A> {
    pub fn new(
        motors: MotorDriver<IO>,
        gamepad: G,
        ap: A,
        estimator: KinematicsEstimator,
        supervisor: ApSupervisor,
    ) -> (Self, watch::Receiver<KinematicState>) {
        let (snapshot_tx, snapshot_rx) = watch::channel(KinematicState::default());
        let runtime = Self {
            motors,
            gamepad,
            ap,
            estimator,
            supervisor,
            snapshot_tx,
            last_command: None,
            connected: false,
        };
        (runtime, snapshot_rx)
    }

    /// One control cycle
    fn tick(&mut self, now: Instant) {
        self.gamepad.update();
        match self.gamepad.state() {
            Some(state) => {
                if !self.connected {
                    info!("Gamepad connected");
                    self.connected = true;
                }
                let cmd = command::translate(state);
                if self.last_command != Some(cmd) {
                    info!("Drive command: {:?}", cmd);
                }
                self.motors.drive_vehicle(cmd);
                self.last_command = Some(cmd);
            }
            None => {
                // One explicit stop on the disconnect edge, so a stale
                // Forward can never stay latched on a dropped controller
                if self.connected {
                    info!("Gamepad disconnected, stopping motors");
                    self.motors.stop();
                    self.last_command = Some(DriveCommand::Stop);
                    self.connected = false;
                }
            }
        }

        let state = self.estimator.sample(now);
        self.snapshot_tx.send_replace(state);

        self.supervisor.ensure_up(&mut self.ap, now);
    }

    /// Run the loop at `LOOP_HZ` until the process exits
    pub async fn run(mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut tick = interval(Duration::from_millis(1000 / LOOP_HZ));
        info!("Control loop started at {} Hz", LOOP_HZ);
        loop {
            tick.tick().await;
            self.tick(Instant::now());
        }
    }
}

/// Wire up the host-simulation collaborators and run
pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!(
        "Motors on pins {:?}/{:?}, pulse sensor on pin {} (pull-up, rising edge)",
        MOTOR1_PINS, MOTOR2_PINS, PULSE_SENSOR_PIN
    );
    let pulses = PulseCounter::new();

    let io = SimIo::new();
    io.spawn_wheel(pulses.handle(), SIM_WHEEL_PERIOD);

    let gamepad = KeyboardGamepad::new()?;
    let ap = SimAccessPoint::new();

    let now = Instant::now();
    let estimator = KinematicsEstimator::new(pulses, now);
    let supervisor = ApSupervisor::new(ApConfig::default());
    let motors = MotorDriver::new(io);

    let (runtime, snapshot_rx) = Runtime::new(motors, gamepad, ap, estimator, supervisor);

    tokio::spawn(async move {
        if let Err(e) = status::serve(HTTP_BIND_ADDR, snapshot_rx).await {
            tracing::error!("Status server failed: {}", e);
        }
    });

    runtime.run().await
}
