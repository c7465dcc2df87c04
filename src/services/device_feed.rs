//! Simulated Device Feed
//!
//! Stands in for an external sensor: while connected it produces one
//! pseudo-random reading in `[min_reading, max_reading]` per poll interval.
//! No I/O is performed.
//!
//! Two ways to drive it:
//!
//! - [`SimulatedSensor`] is pulled by the caller, advancing only when the
//!   interval has elapsed at the `Instant` it is polled with. The front-end
//!   uses it when `[device] mode = "pull"`, polling once per input line.
//! - [`DeviceTicker`] runs on tokio and pushes [`DeviceEvent`]s over a
//!   crossbeam channel. This is the default `mode = "ticker"`.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::Local;
use crossbeam_channel::Sender;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::domain::config::DeviceConfig;
use crate::domain::reading::DeviceReading;
use crate::error::{Error, Result};
use crate::services::events::{ConnectionState, DeviceEvent};
use crate::services::runtime::spawn_named;

fn validate(config: &DeviceConfig) -> Result<()> {
    let (min, max) = (config.min_reading, config.max_reading);
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(Error::Invalid {
            message: format!("device reading range [{min}, {max}] is empty"),
        });
    }
    if config.poll_interval_ms == 0 {
        return Err(Error::Invalid {
            message: "device poll interval must be positive".to_string(),
        });
    }
    Ok(())
}

fn sample<R: Rng>(rng: &mut R, config: &DeviceConfig) -> DeviceReading {
    let value = rng.gen_range(config.min_reading..=config.max_reading);
    DeviceReading::new(value, Local::now())
}

/// Pull-driven simulated sensor
#[derive(Debug)]
pub struct SimulatedSensor {
    config: DeviceConfig,
    state: ConnectionState,
    connecting_since: Option<Instant>,
    last_sample_at: Option<Instant>,
    last_reading: Option<DeviceReading>,
    rng: StdRng,
}

impl SimulatedSensor {
    pub fn new(config: DeviceConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic sensor for reproducible runs
    pub fn with_seed(config: DeviceConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: DeviceConfig, rng: StdRng) -> Result<Self> {
        validate(&config)?;
        Ok(Self {
            config,
            state: ConnectionState::Disconnected,
            connecting_since: None,
            last_sample_at: None,
            last_reading: None,
            rng,
        })
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn last_reading(&self) -> Option<&DeviceReading> {
        self.last_reading.as_ref()
    }

    /// Start the handshake; no-op unless disconnected
    pub fn connect(&mut self, now: Instant) {
        if self.state == ConnectionState::Disconnected {
            self.state = ConnectionState::Connecting;
            self.connecting_since = Some(now);
        }
    }

    pub fn disconnect(&mut self) {
        self.state = ConnectionState::Disconnected;
        self.connecting_since = None;
        self.last_sample_at = None;
    }

    /// Advance the sensor to `now`
    ///
    /// Returns a fresh reading when connected and at least one poll interval
    /// has passed since the previous one. The last reading is kept after a
    /// disconnect.
    pub fn poll(&mut self, now: Instant) -> Option<DeviceReading> {
        if let Some(since) = self.connecting_since {
            let latency = Duration::from_millis(self.config.connect_latency_ms);
            if now.saturating_duration_since(since) >= latency {
                self.state = ConnectionState::Connected;
                self.connecting_since = None;
            }
        }

        if self.state != ConnectionState::Connected {
            return None;
        }

        let interval = Duration::from_millis(self.config.poll_interval_ms);
        let due = match self.last_sample_at {
            Some(at) => now.saturating_duration_since(at) >= interval,
            None => true,
        };
        if !due {
            return None;
        }

        let reading = sample(&mut self.rng, &self.config);
        self.last_sample_at = Some(now);
        self.last_reading = Some(reading);
        Some(reading)
    }
}

struct TickerShared {
    config: DeviceConfig,
    state: AtomicU8,
    /// Handshake epoch, bumped on every connect and disconnect.
    /// Held while a state change and its notification are made.
    epoch: Mutex<u64>,
    tx: Sender<DeviceEvent>,
}

impl TickerShared {
    fn new(config: DeviceConfig, tx: Sender<DeviceEvent>) -> Self {
        Self {
            config,
            state: AtomicU8::new(ConnectionState::Disconnected as u8),
            epoch: Mutex::new(0),
            tx,
        }
    }

    fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::SeqCst))
    }

    fn lock_epoch(&self) -> MutexGuard<'_, u64> {
        self.epoch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn send(&self, event: DeviceEvent) -> Result<()> {
        self.tx.send(event).map_err(|e| Error::ChannelSend {
            message: e.to_string(),
        })
    }

    fn transition(&self, state: ConnectionState) {
        self.state.store(state as u8, Ordering::SeqCst);
        if let Err(e) = self.send(DeviceEvent::ConnectionChanged { state }) {
            debug!(error = %e, state = ?state, "Connection change not delivered");
        }
    }

    /// Enter `Connecting`, returning the new handshake epoch
    ///
    /// `None` unless currently disconnected.
    fn begin_connect(&self) -> Option<u64> {
        let mut epoch = self.lock_epoch();
        if self.state() != ConnectionState::Disconnected {
            return None;
        }
        *epoch += 1;
        self.transition(ConnectionState::Connecting);
        Some(*epoch)
    }

    /// Finish the handshake started at `epoch`
    ///
    /// Returns `false` when a later connect or disconnect superseded it.
    fn complete_handshake(&self, epoch: u64) -> bool {
        let current = self.lock_epoch();
        if *current != epoch || self.state() != ConnectionState::Connecting {
            return false;
        }
        self.transition(ConnectionState::Connected);
        true
    }

    /// Returns `false` when already disconnected
    fn disconnect(&self) -> bool {
        let mut epoch = self.lock_epoch();
        *epoch += 1;
        if self.state() == ConnectionState::Disconnected {
            return false;
        }
        self.transition(ConnectionState::Disconnected);
        true
    }
}

/// Background simulated sensor pushing readings over a channel
pub struct DeviceTicker {
    shared: Arc<TickerShared>,
    handle: Handle,
    task: JoinHandle<()>,
}

impl DeviceTicker {
    /// Spawn the ticker task on `handle`, initially disconnected
    pub fn start(handle: &Handle, config: DeviceConfig, tx: Sender<DeviceEvent>) -> Result<Self> {
        validate(&config)?;
        let shared = Arc::new(TickerShared::new(config, tx));
        let task = spawn_named(handle, "device-ticker", run_ticker(shared.clone()));
        Ok(Self {
            shared,
            handle: handle.clone(),
            task,
        })
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.state()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Whether the ticker task is still alive
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Begin the fake handshake; no-op unless disconnected
    pub fn connect(&self) {
        let Some(epoch) = self.shared.begin_connect() else {
            return;
        };
        debug!("Device handshake started");

        let shared = self.shared.clone();
        spawn_named(&self.handle, "device-handshake", async move {
            tokio::time::sleep(Duration::from_millis(shared.config.connect_latency_ms)).await;
            if shared.complete_handshake(epoch) {
                info!("Device connected");
            }
        });
    }

    pub fn disconnect(&self) {
        if self.shared.disconnect() {
            info!("Device disconnected");
        }
    }
}

impl Drop for DeviceTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for DeviceTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceTicker")
            .field("state", &self.state())
            .field("running", &self.is_running())
            .finish()
    }
}

async fn run_ticker(shared: Arc<TickerShared>) {
    let mut rng = StdRng::from_entropy();
    let mut interval = tokio::time::interval(Duration::from_millis(shared.config.poll_interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if shared.state() != ConnectionState::Connected {
            continue;
        }
        let reading = sample(&mut rng, &shared.config);
        if let Err(e) = shared.send(DeviceEvent::Reading(reading)) {
            debug!(error = %e, "Reading receiver dropped, stopping ticker");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> DeviceConfig {
        DeviceConfig {
            poll_interval_ms: 10,
            connect_latency_ms: 5,
            ..DeviceConfig::default()
        }
    }

    #[test]
    fn test_samples_stay_in_range() {
        let config = DeviceConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let value = sample(&mut rng, &config).value;
            assert!((350.0..=2000.0).contains(&value), "out of range: {value}");
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let inverted = DeviceConfig {
            min_reading: 2000.0,
            max_reading: 350.0,
            ..DeviceConfig::default()
        };
        assert!(SimulatedSensor::new(inverted).is_err());

        let no_interval = DeviceConfig {
            poll_interval_ms: 0,
            ..DeviceConfig::default()
        };
        assert!(SimulatedSensor::new(no_interval).is_err());
    }

    #[test]
    fn test_pull_sensor_handshake_and_interval() {
        let config = DeviceConfig::default();
        let latency = Duration::from_millis(config.connect_latency_ms);
        let interval = Duration::from_millis(config.poll_interval_ms);
        let mut sensor = SimulatedSensor::with_seed(config, 42).expect("sensor");
        let t0 = Instant::now();

        assert!(sensor.poll(t0).is_none());

        sensor.connect(t0);
        assert_eq!(sensor.state(), ConnectionState::Connecting);
        assert!(sensor.poll(t0).is_none());

        let first = sensor.poll(t0 + latency).expect("first reading");
        assert!(sensor.is_connected());
        assert!((350.0..=2000.0).contains(&first.value));

        assert!(sensor.poll(t0 + latency + interval / 2).is_none());
        assert!(sensor.poll(t0 + latency + interval).is_some());

        sensor.disconnect();
        assert!(sensor.poll(t0 + latency + interval * 3).is_none());
        assert!(sensor.last_reading().is_some());
    }

    fn connection_events(rx: &crossbeam_channel::Receiver<DeviceEvent>) -> Vec<ConnectionState> {
        rx.try_iter()
            .filter_map(|e| match e {
                DeviceEvent::ConnectionChanged { state } => Some(state),
                DeviceEvent::Reading(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_handshake_superseded_by_disconnect_is_ignored() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let shared = TickerShared::new(fast_config(), tx);

        let epoch = shared.begin_connect().expect("disconnected");
        assert!(shared.disconnect());
        assert!(!shared.complete_handshake(epoch));

        assert_eq!(shared.state(), ConnectionState::Disconnected);
        assert_eq!(
            connection_events(&rx),
            vec![ConnectionState::Connecting, ConnectionState::Disconnected]
        );
    }

    #[test]
    fn test_stale_handshake_does_not_promote_new_connect() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let shared = TickerShared::new(fast_config(), tx);

        let stale = shared.begin_connect().expect("disconnected");
        shared.disconnect();
        let fresh = shared.begin_connect().expect("disconnected");
        assert!(shared.begin_connect().is_none());

        assert!(!shared.complete_handshake(stale));
        assert_eq!(shared.state(), ConnectionState::Connecting);
        assert!(shared.complete_handshake(fresh));
        assert_eq!(shared.state(), ConnectionState::Connected);

        let events = connection_events(&rx);
        assert_eq!(events.last(), Some(&ConnectionState::Connected));
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_last_connection_event_matches_state_under_contention() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let shared = Arc::new(TickerShared::new(fast_config(), tx));

        for _ in 0..200 {
            let epoch = shared.begin_connect().expect("disconnected");
            let promoter = {
                let shared = shared.clone();
                std::thread::spawn(move || shared.complete_handshake(epoch))
            };
            shared.disconnect();
            promoter.join().expect("join");

            assert_eq!(shared.state(), ConnectionState::Disconnected);
            assert_eq!(connection_events(&rx).last(), Some(&ConnectionState::Disconnected));
        }
    }

    #[test]
    fn test_transition_without_receiver_still_changes_state() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let shared = TickerShared::new(fast_config(), tx);

        let epoch = shared.begin_connect().expect("disconnected");
        assert!(shared.complete_handshake(epoch));
        assert_eq!(shared.state(), ConnectionState::Connected);
    }

    #[tokio::test]
    async fn test_ticker_pushes_readings_while_connected() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let ticker = DeviceTicker::start(&Handle::current(), fast_config(), tx).expect("ticker");

        ticker.connect();
        let mut events = Vec::new();
        for _ in 0..200 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            events.extend(rx.try_iter());
            if events.iter().filter(|e| matches!(e, DeviceEvent::Reading(_))).count() >= 3 {
                break;
            }
        }

        assert_eq!(
            events.first(),
            Some(&DeviceEvent::ConnectionChanged { state: ConnectionState::Connecting })
        );
        assert!(events.contains(&DeviceEvent::ConnectionChanged { state: ConnectionState::Connected }));
        let readings: Vec<f64> = events
            .iter()
            .filter_map(|e| match e {
                DeviceEvent::Reading(r) => Some(r.value),
                _ => None,
            })
            .collect();
        assert!(readings.len() >= 3);
        assert!(readings.iter().all(|v| (350.0..=2000.0).contains(v)));

        ticker.disconnect();
        assert_eq!(ticker.state(), ConnectionState::Disconnected);
        tokio::time::sleep(Duration::from_millis(30)).await;
        rx.try_iter().for_each(drop);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!rx.try_iter().any(|e| matches!(e, DeviceEvent::Reading(_))));
    }

    #[tokio::test]
    async fn test_ticker_stops_when_receiver_dropped() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let ticker = DeviceTicker::start(&Handle::current(), fast_config(), tx).expect("ticker");
        drop(rx);

        ticker.connect();
        for _ in 0..200 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            if !ticker.is_running() {
                break;
            }
        }
        assert!(!ticker.is_running());
    }
}
