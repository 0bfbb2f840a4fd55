use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::constants::*;
use crate::error::{Error, Result};

/// A thermal channel with its own threshold table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalChannel {
    Cpu,
    Disk,
    Ambient,
}

impl ThermalChannel {
    pub const ALL: [ThermalChannel; 3] = [ThermalChannel::Cpu, ThermalChannel::Disk, ThermalChannel::Ambient];
}

impl fmt::Display for ThermalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThermalChannel::Cpu => write!(f, "CPU"),
            ThermalChannel::Disk => write!(f, "Disk"),
            ThermalChannel::Ambient => write!(f, "Ambient"),
        }
    }
}

/// One sampling tick across all channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalReading {
    pub timestamp: SystemTime,
    pub cpu_temp_c: f64,
    pub disk_temp_c: f64,
    pub ambient_temp_c: f64,
    /// Set when the ambient value was estimated from the CPU temperature
    #[serde(default)]
    pub ambient_estimated: bool,
}

impl ThermalReading {
    /// Creates a reading stamped with the current time
    pub fn new(cpu_temp_c: f64, disk_temp_c: f64, ambient_temp_c: f64) -> Self {
        Self {
            timestamp: SystemTime::now(),
            cpu_temp_c,
            disk_temp_c,
            ambient_temp_c,
            ambient_estimated: false,
        }
    }

    /// Creates a reading whose ambient value is estimated from `cpu_temp_c`
    pub fn with_estimated_ambient(cpu_temp_c: f64, disk_temp_c: f64) -> Self {
        Self {
            ambient_estimated: true,
            ..Self::new(cpu_temp_c, disk_temp_c, estimate_ambient(cpu_temp_c))
        }
    }

    /// Temperature of the given channel in Celsius
    pub fn value(&self, channel: ThermalChannel) -> f64 {
        match channel {
            ThermalChannel::Cpu => self.cpu_temp_c,
            ThermalChannel::Disk => self.disk_temp_c,
            ThermalChannel::Ambient => self.ambient_temp_c,
        }
    }
}

/// Ambient estimate used when no ambient sensor answers
pub fn estimate_ambient(cpu_temp_c: f64) -> f64 {
    (cpu_temp_c - AMBIENT_ESTIMATE_OFFSET).max(AMBIENT_ESTIMATE_FLOOR)
}

/// Discrete status of a single channel, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThermalStatus {
    Safe,
    Normal,
    Warning,
    Critical,
}

impl fmt::Display for ThermalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThermalStatus::Safe => write!(f, "SAFE"),
            ThermalStatus::Normal => write!(f, "NORMAL"),
            ThermalStatus::Warning => write!(f, "WARNING"),
            ThermalStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Threshold table for one channel, in degrees Celsius.
///
/// Valid tables satisfy `safe < warning < critical < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelThresholds {
    pub safe: f64,
    pub warning: f64,
    pub critical: f64,
    pub max: f64,
}

impl ChannelThresholds {
    pub const fn new(safe: f64, warning: f64, critical: f64, max: f64) -> Self {
        Self { safe, warning, critical, max }
    }

    /// Classify `value` against this table
    pub fn classify(&self, value: f64) -> ThermalStatus {
        classify(value, self)
    }

    pub fn validate(&self, channel: ThermalChannel) -> Result<()> {
        let ordered = self.safe < self.warning && self.warning < self.critical && self.critical < self.max;
        if ordered {
            Ok(())
        } else {
            Err(Error::config(format!(
                "{} thresholds must satisfy safe < warning < critical < max (got {} / {} / {} / {})",
                channel, self.safe, self.warning, self.critical, self.max
            )))
        }
    }
}

/// Map a raw channel value to a status.
///
/// Critical is checked before warning, and warning before safe, so a value sitting
/// exactly on a boundary always gets the more severe status.
///
/// # Examples
///
/// ```rust
/// use thermal_bench::temperature::{classify, SafetyThresholds, ThermalStatus};
///
/// let cpu = SafetyThresholds::monitoring().cpu;
/// assert_eq!(classify(90.0, &cpu), ThermalStatus::Critical);
/// assert_eq!(classify(80.0, &cpu), ThermalStatus::Warning);
/// assert_eq!(classify(75.0, &cpu), ThermalStatus::Normal);
/// assert_eq!(classify(70.0, &cpu), ThermalStatus::Safe);
/// ```
pub fn classify(value: f64, thresholds: &ChannelThresholds) -> ThermalStatus {
    if value >= thresholds.critical {
        ThermalStatus::Critical
    } else if value >= thresholds.warning {
        ThermalStatus::Warning
    } else if value <= thresholds.safe {
        ThermalStatus::Safe
    } else {
        ThermalStatus::Normal
    }
}

/// Which limit of a channel table a reading crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdLimit {
    Critical,
    Max,
}

impl fmt::Display for ThresholdLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdLimit::Critical => write!(f, "critical"),
            ThresholdLimit::Max => write!(f, "maximum"),
        }
    }
}

/// A channel reading at or above one of its limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyViolation {
    pub channel: ThermalChannel,
    pub value: f64,
    pub threshold: f64,
    pub limit: ThresholdLimit,
}

impl SafetyViolation {
    /// Human-readable description naming channel, value and limit
    pub fn reason(&self) -> String {
        format!(
            "{} temperature {:.1}°C reached {} limit {:.1}°C",
            self.channel, self.value, self.limit, self.threshold
        )
    }
}

impl fmt::Display for SafetyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

/// Per-channel statuses for one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStatuses {
    pub cpu: ThermalStatus,
    pub disk: ThermalStatus,
    pub ambient: ThermalStatus,
}

impl ChannelStatuses {
    /// The most severe status across channels
    pub fn worst(&self) -> ThermalStatus {
        self.cpu.max(self.disk).max(self.ambient)
    }
}

/// Threshold tables for every channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyThresholds {
    pub cpu: ChannelThresholds,
    pub disk: ChannelThresholds,
    pub ambient: ChannelThresholds,
}

impl SafetyThresholds {
    /// Table used by live monitoring and logging sessions
    pub const fn monitoring() -> Self {
        Self {
            cpu: ChannelThresholds::new(
                MONITORING_CPU_SAFE,
                MONITORING_CPU_WARNING,
                MONITORING_CPU_CRITICAL,
                MONITORING_CPU_MAX,
            ),
            disk: ChannelThresholds::new(
                MONITORING_DISK_SAFE,
                MONITORING_DISK_WARNING,
                MONITORING_DISK_CRITICAL,
                MONITORING_DISK_MAX,
            ),
            ambient: ChannelThresholds::new(
                MONITORING_AMBIENT_SAFE,
                MONITORING_AMBIENT_WARNING,
                MONITORING_AMBIENT_CRITICAL,
                MONITORING_AMBIENT_MAX,
            ),
        }
    }

    /// Stricter table used while a workload is running
    pub const fn benchmarking() -> Self {
        Self {
            cpu: ChannelThresholds::new(
                BENCHMARK_CPU_SAFE,
                BENCHMARK_CPU_WARNING,
                BENCHMARK_CPU_CRITICAL,
                BENCHMARK_CPU_MAX,
            ),
            disk: ChannelThresholds::new(
                BENCHMARK_DISK_SAFE,
                BENCHMARK_DISK_WARNING,
                BENCHMARK_DISK_CRITICAL,
                BENCHMARK_DISK_MAX,
            ),
            ambient: ChannelThresholds::new(
                MONITORING_AMBIENT_SAFE,
                MONITORING_AMBIENT_WARNING,
                MONITORING_AMBIENT_CRITICAL,
                MONITORING_AMBIENT_MAX,
            ),
        }
    }

    pub fn for_channel(&self, channel: ThermalChannel) -> &ChannelThresholds {
        match channel {
            ThermalChannel::Cpu => &self.cpu,
            ThermalChannel::Disk => &self.disk,
            ThermalChannel::Ambient => &self.ambient,
        }
    }

    /// Classify every channel of `reading` independently
    pub fn classify_reading(&self, reading: &ThermalReading) -> ChannelStatuses {
        ChannelStatuses {
            cpu: self.cpu.classify(reading.cpu_temp_c),
            disk: self.disk.classify(reading.disk_temp_c),
            ambient: self.ambient.classify(reading.ambient_temp_c),
        }
    }

    /// First enforced channel at or above its critical threshold
    pub fn evaluate(&self, reading: &ThermalReading) -> Option<SafetyViolation> {
        self.first_violation(reading, ThresholdLimit::Critical)
    }

    /// First enforced channel at or above its absolute maximum
    pub fn exceeds_max(&self, reading: &ThermalReading) -> Option<SafetyViolation> {
        self.first_violation(reading, ThresholdLimit::Max)
    }

    fn first_violation(&self, reading: &ThermalReading, limit: ThresholdLimit) -> Option<SafetyViolation> {
        ThermalChannel::ALL
            .into_iter()
            // An estimated ambient value only mirrors the CPU channel.
            .filter(|channel| !(*channel == ThermalChannel::Ambient && reading.ambient_estimated))
            .find_map(|channel| {
                let table = self.for_channel(channel);
                let threshold = match limit {
                    ThresholdLimit::Critical => table.critical,
                    ThresholdLimit::Max => table.max,
                };
                let value = reading.value(channel);
                (value >= threshold).then_some(SafetyViolation { channel, value, threshold, limit })
            })
    }

    pub fn validate(&self) -> Result<()> {
        for channel in ThermalChannel::ALL {
            self.for_channel(channel).validate(channel)?;
        }
        Ok(())
    }
}

impl Default for SafetyThresholds {
    fn default() -> Self {
        Self::monitoring()
    }
}
