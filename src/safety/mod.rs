//! # Safety Monitor
//!
//! A monitoring session samples the thermal sensors on a fixed interval from a
//! background tokio task and flips a shared health flag when any enforced channel
//! reaches its critical threshold. Workloads poll that flag through a cheap
//! [`SafetyHandle`] at the top of every iteration.
//!
//! ## Session states
//!
//! ```text
//! Running ──(critical reading)──> Unsafe ──(stop)──> Stopped
//!    └──────────────────(stop)───────────────────────> Stopped
//! ```
//!
//! `Unsafe` is terminal for the session: later cool readings do not clear it. The
//! sampler itself never fails, because [`SensorReader`] already substitutes defaults.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use thermal_bench::safety::SafetyMonitor;
//! use thermal_bench::temperature::{SafetyThresholds, SensorReader, SyntheticSensor};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let sensor = SyntheticSensor::constant(50.0);
//! let reader = SensorReader::new(Arc::new(sensor.clone()));
//! let monitor = SafetyMonitor::new(reader, SafetyThresholds::benchmarking(), Duration::from_millis(10));
//!
//! let mut session = monitor.start_session().await;
//! let handle = session.handle();
//! assert!(handle.is_healthy().safe);
//!
//! sensor.set_cpu(95.0);
//! tokio::time::sleep(Duration::from_millis(50)).await;
//! assert!(!handle.is_healthy().safe);
//!
//! session.stop().await;
//! # }
//! ```

mod types;

#[cfg(test)]
mod tests;

pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::analysis::{select_profile, ThermalTrend};
use crate::temperature::{SafetyThresholds, SafetyViolation, SensorReader, ThermalReading};

/// Upper bound on waiting for the sampling task during `stop`
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Shortest sampling interval accepted by a session
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Starts monitoring sessions with a fixed reader, threshold table and interval
#[derive(Debug, Clone)]
pub struct SafetyMonitor {
    reader: SensorReader,
    thresholds: SafetyThresholds,
    interval: Duration,
}

impl SafetyMonitor {
    pub fn new(reader: SensorReader, thresholds: SafetyThresholds, interval: Duration) -> Self {
        Self { reader, thresholds, interval: interval.max(MIN_INTERVAL) }
    }

    pub fn thresholds(&self) -> &SafetyThresholds {
        &self.thresholds
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start a new session.
    ///
    /// One reading is taken and evaluated before this returns, so the session
    /// always has a last reading and may already be unsafe.
    pub async fn start_session(&self) -> SafetySession {
        let mut history = ThermalHistory::new();
        let initial = self.reader.read().await;
        history.record(&initial);

        let shared = Arc::new(RwLock::new(SessionShared::new(initial, &history, &self.thresholds)));

        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
        let reader = self.reader.clone();
        let thresholds = self.thresholds;
        let interval = self.interval;
        let task_shared = Arc::clone(&shared);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately and the initial reading covers it
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = stop_rx.recv() => break,
                    _ = ticker.tick() => {
                        let reading = reader.read().await;
                        debug!(
                            cpu = reading.cpu_temp_c,
                            disk = reading.disk_temp_c,
                            ambient = reading.ambient_temp_c,
                            "thermal sample"
                        );
                        history.record(&reading);

                        task_shared.write().record(reading, &history, &thresholds);
                    }
                }
            }
        });

        SafetySession { shared, stop_tx, task: Some(task) }
    }
}

/// State shared between the sampling task and every handle of a session
#[derive(Debug)]
struct SessionShared {
    state: SessionState,
    violation: Option<SafetyViolation>,
    last_reading: ThermalReading,
    snapshot: SafetySnapshot,
    cpu_sum: f64,
    cpu_max: f64,
    samples: usize,
}

impl SessionShared {
    fn new(initial: ThermalReading, history: &ThermalHistory, thresholds: &SafetyThresholds) -> Self {
        let mut shared = Self {
            state: SessionState::Running,
            violation: None,
            cpu_sum: 0.0,
            cpu_max: f64::MIN,
            samples: 0,
            snapshot: SafetySnapshot {
                statuses: thresholds.classify_reading(&initial),
                cpu_trend: ThermalTrend::InsufficientData,
                disk_trend: ThermalTrend::InsufficientData,
                profile: select_profile(initial.cpu_temp_c, initial.disk_temp_c),
                samples: 0,
                reading: initial.clone(),
            },
            last_reading: initial.clone(),
        };
        shared.record(initial, history, thresholds);
        shared
    }

    /// Fold a new reading into the statistics and re-evaluate safety
    fn record(&mut self, reading: ThermalReading, history: &ThermalHistory, thresholds: &SafetyThresholds) {
        self.last_reading = reading.clone();

        self.samples += 1;
        self.cpu_sum += reading.cpu_temp_c;
        self.cpu_max = self.cpu_max.max(reading.cpu_temp_c);

        if self.violation.is_none() {
            if let Some(violation) = thresholds.evaluate(&reading) {
                warn!(reason = %violation, "thermal safety limit reached");
                self.violation = Some(violation);
                if self.state == SessionState::Running {
                    self.state = SessionState::Unsafe;
                }
            }
        }

        self.snapshot = SafetySnapshot {
            statuses: thresholds.classify_reading(&reading),
            cpu_trend: history.cpu_trend(),
            disk_trend: history.disk_trend(),
            profile: select_profile(reading.cpu_temp_c, reading.disk_temp_c),
            samples: self.samples,
            reading,
        };
    }
}

/// A running monitoring session; dropping it aborts the sampling task
#[derive(Debug)]
pub struct SafetySession {
    shared: Arc<RwLock<SessionShared>>,
    stop_tx: mpsc::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl SafetySession {
    /// A cloneable handle for workloads to poll
    pub fn handle(&self) -> SafetyHandle {
        SafetyHandle { shared: Arc::clone(&self.shared) }
    }

    pub fn state(&self) -> SessionState {
        self.shared.read().state
    }

    /// Stop sampling. Calling this more than once has no further effect.
    pub async fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = self.stop_tx.send(()).await;

            match tokio::time::timeout(STOP_TIMEOUT, task).await {
                Ok(Ok(())) => {},
                Ok(Err(e)) => debug!(error = %e, "sampling task ended abnormally"),
                Err(_) => debug!("timed out waiting for sampling task to stop"),
            }
        }

        self.shared.write().state = SessionState::Stopped;
    }
}

impl Drop for SafetySession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = self.stop_tx.try_send(());
            task.abort();
        }
    }
}

/// Read-only view of a session, shared with workloads
#[derive(Debug, Clone)]
pub struct SafetyHandle {
    shared: Arc<RwLock<SessionShared>>,
}

impl SafetyHandle {
    /// Whether the workload may continue, without waiting on the sampler
    pub fn is_healthy(&self) -> HealthReport {
        let shared = self.shared.read();
        HealthReport {
            safe: shared.violation.is_none(),
            reason: shared.violation.as_ref().map(SafetyViolation::reason),
            last_reading: shared.last_reading.clone(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.shared.read().state
    }

    /// The violation that made the session unsafe, if any
    pub fn violation(&self) -> Option<SafetyViolation> {
        self.shared.read().violation.clone()
    }

    pub fn snapshot(&self) -> SafetySnapshot {
        self.shared.read().snapshot.clone()
    }

    /// Average and maximum CPU temperature over every reading of the session
    pub fn cpu_stats(&self) -> CpuStats {
        let shared = self.shared.read();
        CpuStats { avg: shared.cpu_sum / shared.samples as f64, max: shared.cpu_max, samples: shared.samples }
    }
}
