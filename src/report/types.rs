use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::analysis::{PerformanceProfile, ThermalTrend};
use crate::scenario::{ScenarioResult, ThermalEvent};
use crate::temperature::{ChannelStatuses, ThermalChannel, ThermalReading, ThermalStatus};

/// A channel at warning level or above
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalAlert {
    pub channel: ThermalChannel,
    pub status: ThermalStatus,
    pub value: f64,
}

/// Result of a one-shot thermal check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalSnapshot {
    pub reading: ThermalReading,
    pub statuses: ChannelStatuses,
    pub profile: PerformanceProfile,
    pub alerts: Vec<ThermalAlert>,
}

impl ThermalSnapshot {
    /// Most severe status across channels
    pub fn overall(&self) -> ThermalStatus {
        self.statuses.worst()
    }
}

/// Outcome of a logging session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    pub samples: usize,
    pub max_cpu_c: f64,
    pub max_disk_c: f64,
    pub cpu_trend: ThermalTrend,
    /// Set when the session ended on an emergency
    pub emergency: Option<ThermalEvent>,
}

/// Average, maximum and minimum of one channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub avg: f64,
    pub max: f64,
    pub min: f64,
}

impl ChannelSummary {
    pub(crate) fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let (count, sum, max, min) = values.fold((0usize, 0.0, f64::MIN, f64::MAX), |(n, sum, max, min), v| {
            (n + 1, sum + v, max.max(v), min.min(v))
        });
        (count > 0).then(|| Self { avg: sum / count as f64, max, min })
    }
}

/// Statistics over stored readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalReport {
    pub count: usize,
    pub cpu: Option<ChannelSummary>,
    pub disk: Option<ChannelSummary>,
    pub recent_events: Vec<ThermalEvent>,
}

impl ThermalReport {
    pub fn from_readings(readings: &[ThermalReading], events: Vec<ThermalEvent>) -> Self {
        Self {
            count: readings.len(),
            cpu: ChannelSummary::from_values(readings.iter().map(|r| r.cpu_temp_c)),
            disk: ChannelSummary::from_values(readings.iter().map(|r| r.disk_temp_c)),
            recent_events: events,
        }
    }
}

/// One stored scenario as shown in a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub scenario_name: String,
    pub started_at: SystemTime,
    pub total_score: f64,
    pub max_temp_c: Option<f64>,
    pub passed: bool,
}

impl From<&ScenarioResult> for ComparisonEntry {
    fn from(result: &ScenarioResult) -> Self {
        Self {
            scenario_name: result.scenario_name.clone(),
            started_at: result.started_at,
            total_score: result.total_score(),
            max_temp_c: result.max_temp_c(),
            passed: result.passed,
        }
    }
}
