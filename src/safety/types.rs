use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::{analyze_trend, PerformanceProfile, ThermalTrend};
use crate::core::metrics::{Metric, MetricSeries};
use crate::temperature::constants::HISTORY_SIZE;
use crate::temperature::{ChannelStatuses, ThermalReading};

/// Lifecycle of a monitoring session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Running,
    /// A critical threshold was reached; never returns to `Running`
    Unsafe,
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Running => write!(f, "running"),
            SessionState::Unsafe => write!(f, "unsafe"),
            SessionState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Answer to "may the workload continue?"
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub safe: bool,
    /// Why the session turned unsafe
    pub reason: Option<String>,
    pub last_reading: ThermalReading,
}

/// Live view of a session for dashboards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetySnapshot {
    pub reading: ThermalReading,
    pub statuses: ChannelStatuses,
    pub cpu_trend: ThermalTrend,
    pub disk_trend: ThermalTrend,
    pub profile: PerformanceProfile,
    /// Readings taken so far, including the initial one
    pub samples: usize,
}

/// Running CPU temperature statistics over a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpuStats {
    pub avg: f64,
    pub max: f64,
    pub samples: usize,
}

/// Per-channel bounded history, owned by one session's sampling task
#[derive(Debug, Clone)]
pub struct ThermalHistory {
    cpu: MetricSeries<f64>,
    disk: MetricSeries<f64>,
    ambient: MetricSeries<f64>,
}

impl ThermalHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cpu: MetricSeries::with_capacity(capacity),
            disk: MetricSeries::with_capacity(capacity),
            ambient: MetricSeries::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, reading: &ThermalReading) {
        self.cpu.add(Metric::with_timestamp(reading.cpu_temp_c, reading.timestamp));
        self.disk.add(Metric::with_timestamp(reading.disk_temp_c, reading.timestamp));
        self.ambient.add(Metric::with_timestamp(reading.ambient_temp_c, reading.timestamp));
    }

    pub fn len(&self) -> usize {
        self.cpu.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cpu.is_empty()
    }

    pub fn cpu(&self) -> &MetricSeries<f64> {
        &self.cpu
    }

    pub fn disk(&self) -> &MetricSeries<f64> {
        &self.disk
    }

    pub fn ambient(&self) -> &MetricSeries<f64> {
        &self.ambient
    }

    pub fn cpu_trend(&self) -> ThermalTrend {
        analyze_trend(&self.cpu.values().collect::<Vec<_>>())
    }

    pub fn disk_trend(&self) -> ThermalTrend {
        analyze_trend(&self.disk.values().collect::<Vec<_>>())
    }
}

impl Default for ThermalHistory {
    fn default() -> Self {
        Self::new()
    }
}
