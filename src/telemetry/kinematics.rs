// Kinematic estimation from wheel sensor pulses
//
// One pulse is treated as one full wheel revolution, so the distance per
// pulse is the whole circumference. That is the sensor's actual granularity
// (single magnet on the wheel), not a bug.
//
// Power is the kinetic proxy m * a * v, not true instantaneous power; it is
// what the status page has always displayed.

use std::f32::consts::PI;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::{MIN_SAMPLE_DT, VEHICLE_MASS_KG, WHEEL_DIAMETER_M};

use super::pulse::PulseCounter;

/// Snapshot of the estimated vehicle kinematics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KinematicState {
    /// Velocity in m/s
    pub velocity: f32,
    /// Acceleration in m/s^2
    pub acceleration: f32,
    /// Power in W
    pub power: f32,
}

/// Converts elapsed time and accumulated pulses into kinematics, once per
/// control cycle
pub struct KinematicsEstimator {
    pulses: PulseCounter,
    circumference: f32,
    mass: f32,
    min_dt: Duration,
    last_sample: Instant,
    last_velocity: f32,
    state: KinematicState,
}

impl KinematicsEstimator {
    pub fn new(pulses: PulseCounter, now: Instant) -> Self {
        Self::with_params(pulses, now, WHEEL_DIAMETER_M, VEHICLE_MASS_KG, MIN_SAMPLE_DT)
    }

    /// Create with custom physical parameters
    pub fn with_params(
        pulses: PulseCounter,
        now: Instant,
        wheel_diameter: f32,
        mass: f32,
        min_dt: Duration,
    ) -> Self {
        Self {
            pulses,
            circumference: wheel_diameter * PI,
            mass,
            min_dt,
            last_sample: now,
            last_velocity: 0.0,
            state: KinematicState::default(),
        }
    }

    /// Update the estimate from pulses accumulated since the last sample.
    ///
    /// Two samples inside the same timer tick would divide by ~zero, so
    /// anything closer than `min_dt` returns the previous state unchanged
    /// and leaves the pulse count accumulating for the next cycle.
    pub fn sample(&mut self, now: Instant) -> KinematicState {
        let elapsed = now.duration_since(self.last_sample);
        if elapsed < self.min_dt {
            return self.state;
        }
        let dt = elapsed.as_secs_f32();

        let pulses = self.pulses.take();
        let velocity = (pulses as f32 * self.circumference) / dt;
        let acceleration = (velocity - self.last_velocity) / dt;
        let power = self.mass * acceleration * velocity;

        self.last_velocity = velocity;
        self.last_sample = now;
        self.state = KinematicState {
            velocity,
            acceleration,
            power,
        };
        self.state
    }

    /// Most recent estimate without resampling
    pub fn state(&self) -> KinematicState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::PulseHandle;

    fn estimator(now: Instant) -> (KinematicsEstimator, PulseHandle) {
        let pulses = PulseCounter::new();
        let handle = pulses.handle();
        let est = KinematicsEstimator::with_params(
            pulses,
            now,
            0.06,
            0.780,
            Duration::from_millis(1),
        );
        (est, handle)
    }

    #[test]
    fn test_velocity_from_pulses() {
        let start = Instant::now();
        let (mut est, handle) = estimator(start);

        // 10 revolutions of a 0.06 m wheel over 0.5 s
        for _ in 0..10 {
            handle.record_edge();
        }
        let state = est.sample(start + Duration::from_millis(500));

        let expected = 10.0 * 0.06 * PI / 0.5;
        assert!((state.velocity - expected).abs() < 1e-4);
        assert!((state.velocity - 3.77).abs() < 0.01);
    }

    #[test]
    fn test_zero_pulses_gives_zero_velocity_and_deceleration() {
        let start = Instant::now();
        let (mut est, handle) = estimator(start);

        for _ in 0..10 {
            handle.record_edge();
        }
        let t1 = start + Duration::from_millis(500);
        let moving = est.sample(t1);
        assert!(moving.velocity > 0.0);

        // No pulses in the next window: velocity drops to zero and the
        // acceleration is the full negative delta over the window
        let t2 = t1 + Duration::from_millis(500);
        let stopped = est.sample(t2);
        assert_eq!(stopped.velocity, 0.0);
        let expected_accel = (0.0 - moving.velocity) / 0.5;
        assert!((stopped.acceleration - expected_accel).abs() < 1e-4);
    }

    #[test]
    fn test_power_is_mass_times_accel_times_velocity() {
        let start = Instant::now();
        let (mut est, handle) = estimator(start);

        for _ in 0..5 {
            handle.record_edge();
        }
        let state = est.sample(start + Duration::from_millis(250));
        let expected = 0.780 * state.acceleration * state.velocity;
        assert!((state.power - expected).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_dt_skips_update() {
        let start = Instant::now();
        let (mut est, handle) = estimator(start);

        handle.record_edge();
        let t1 = start + Duration::from_millis(100);
        let first = est.sample(t1);

        // Second sample lands inside the same millisecond: state unchanged,
        // pulse kept for the next real sample
        handle.record_edge();
        let second = est.sample(t1 + Duration::from_micros(200));
        assert_eq!(second, first);

        let t2 = t1 + Duration::from_millis(100);
        let third = est.sample(t2);
        let expected = 0.06 * PI / 0.1;
        assert!((third.velocity - expected).abs() < 1e-4);
    }

    #[test]
    fn test_values_stay_finite() {
        let start = Instant::now();
        let (mut est, handle) = estimator(start);

        for _ in 0..1000 {
            handle.record_edge();
        }
        let state = est.sample(start + Duration::from_millis(2));
        assert!(state.velocity.is_finite());
        assert!(state.acceleration.is_finite());
        assert!(state.power.is_finite());
    }
}
