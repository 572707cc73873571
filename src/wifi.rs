// Access-point liveness supervision
//
// The radio stack is behind the `AccessPoint` trait; the supervisor only
// observes station count and assigned address and triggers restarts.

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::{
    AP_CHANNEL, AP_HIDDEN, AP_MAX_STATIONS, AP_PASSPHRASE, AP_RESTART_BACKOFF, AP_SSID,
    AP_TX_POWER_DBM,
};

/// Compiled-in access point parameters
#[derive(Debug, Clone)]
pub struct ApConfig {
    pub ssid: &'static str,
    pub passphrase: &'static str,
    pub channel: u8,
    pub hidden: bool,
    pub max_stations: u8,
    pub tx_power_dbm: f32,
}

impl Default for ApConfig {
    fn default() -> Self {
        Self {
            ssid: AP_SSID,
            passphrase: AP_PASSPHRASE,
            channel: AP_CHANNEL,
            hidden: AP_HIDDEN,
            max_stations: AP_MAX_STATIONS,
            tx_power_dbm: AP_TX_POWER_DBM,
        }
    }
}

/// Errors from the radio stack
#[derive(Debug, thiserror::Error)]
pub enum ApError {
    #[error("access point failed to start: {0}")]
    StartFailed(String),
}

/// Wireless access-point stack boundary
pub trait AccessPoint: Send {
    /// Bring the access point up with the given parameters. Idempotent.
    fn start(&mut self, config: &ApConfig) -> Result<(), ApError>;

    /// Number of currently associated stations
    fn station_count(&self) -> u32;

    /// Address assigned to the access point; `0.0.0.0` while unassigned
    fn ip(&self) -> Ipv4Addr;
}

/// Restarts the access point when it looks dead.
///
/// Zero stations is also the normal idle state, so the AP only counts as
/// down when the address is unassigned too. Restart attempts are spaced at
/// least `backoff` apart; a stack that never assigns an address would
/// otherwise be restarted every loop iteration.
pub struct ApSupervisor {
    config: ApConfig,
    backoff: Duration,
    last_attempt: Option<Instant>,
    was_down: bool,
    restarts: u64,
}

impl ApSupervisor {
    pub fn new(config: ApConfig) -> Self {
        Self::with_backoff(config, AP_RESTART_BACKOFF)
    }

    pub fn with_backoff(config: ApConfig, backoff: Duration) -> Self {
        Self {
            config,
            backoff,
            last_attempt: None,
            was_down: false,
            restarts: 0,
        }
    }

    /// Check liveness and restart if due. Called once per control cycle.
    pub fn ensure_up<A: AccessPoint>(&mut self, ap: &mut A, now: Instant) {
        let down = ap.station_count() == 0 && ap.ip() == Ipv4Addr::UNSPECIFIED;
        if !down {
            if self.was_down {
                info!("Access point back up, ip={}", ap.ip());
            }
            self.was_down = false;
            return;
        }

        if !self.was_down {
            warn!("Access point down (no stations, no address)");
        }
        self.was_down = true;

        let due = match self.last_attempt {
            None => true,
            Some(at) => now.duration_since(at) >= self.backoff,
        };
        if !due {
            return;
        }

        self.last_attempt = Some(now);
        self.restarts += 1;
        info!(
            "Restarting access point '{}' (attempt {})",
            self.config.ssid, self.restarts
        );
        if let Err(e) = ap.start(&self.config) {
            warn!("Access point restart failed: {}", e);
        }
    }

    /// Total restart attempts so far
    pub fn restart_count(&self) -> u64 {
        self.restarts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeAp {
        stations: u32,
        ip: Ipv4Addr,
        starts: u32,
        fail_start: bool,
    }

    impl FakeAp {
        fn down() -> Self {
            Self {
                stations: 0,
                ip: Ipv4Addr::UNSPECIFIED,
                starts: 0,
                fail_start: false,
            }
        }

        fn idle_with_ip() -> Self {
            Self {
                ip: Ipv4Addr::new(192, 168, 4, 1),
                ..Self::down()
            }
        }
    }

    impl AccessPoint for FakeAp {
        fn start(&mut self, _config: &ApConfig) -> Result<(), ApError> {
            self.starts += 1;
            if self.fail_start {
                return Err(ApError::StartFailed("radio busy".into()));
            }
            self.ip = Ipv4Addr::new(192, 168, 4, 1);
            Ok(())
        }

        fn station_count(&self) -> u32 {
            self.stations
        }

        fn ip(&self) -> Ipv4Addr {
            self.ip
        }
    }

    fn supervisor() -> ApSupervisor {
        ApSupervisor::with_backoff(ApConfig::default(), Duration::from_secs(5))
    }

    #[test]
    fn test_idle_with_address_is_not_down() {
        let mut sup = supervisor();
        let mut ap = FakeAp::idle_with_ip();
        let now = Instant::now();

        for i in 0..10 {
            sup.ensure_up(&mut ap, now + Duration::from_millis(i * 20));
        }
        assert_eq!(ap.starts, 0);
    }

    #[test]
    fn test_stations_without_address_is_not_down() {
        let mut sup = supervisor();
        let mut ap = FakeAp::down();
        ap.stations = 1;

        sup.ensure_up(&mut ap, Instant::now());
        assert_eq!(ap.starts, 0);
    }

    #[test]
    fn test_down_triggers_restart() {
        let mut sup = supervisor();
        let mut ap = FakeAp::down();

        sup.ensure_up(&mut ap, Instant::now());
        assert_eq!(ap.starts, 1);
        assert_eq!(sup.restart_count(), 1);
    }

    #[test]
    fn test_restart_rate_limited_by_backoff() {
        let mut sup = supervisor();
        let mut ap = FakeAp::down();
        ap.fail_start = true; // stays down forever
        let start = Instant::now();

        // 4 seconds of 20 ms control cycles
        for i in 0..200 {
            sup.ensure_up(&mut ap, start + Duration::from_millis(i * 20));
        }
        assert_eq!(ap.starts, 1);

        // Past the backoff, exactly one more attempt
        sup.ensure_up(&mut ap, start + Duration::from_secs(5));
        assert_eq!(ap.starts, 2);
    }

    #[test]
    fn test_recovery_resets_nothing_but_logging_state() {
        let mut sup = supervisor();
        let mut ap = FakeAp::down();
        let start = Instant::now();

        sup.ensure_up(&mut ap, start);
        assert_eq!(ap.starts, 1);

        // Restart succeeded, now up; further cycles leave it alone
        sup.ensure_up(&mut ap, start + Duration::from_millis(20));
        sup.ensure_up(&mut ap, start + Duration::from_secs(10));
        assert_eq!(ap.starts, 1);
    }

    #[test]
    fn test_failed_restart_still_waits_out_backoff() {
        let mut sup = supervisor();
        let mut ap = FakeAp::down();
        ap.fail_start = true;
        let start = Instant::now();

        sup.ensure_up(&mut ap, start);
        sup.ensure_up(&mut ap, start + Duration::from_millis(20));
        assert_eq!(ap.starts, 1);
    }
}
