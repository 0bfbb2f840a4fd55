use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::Percentage;

/// Direction of a channel's temperature over the recent history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalTrend {
    RisingFast,
    Rising,
    Stable,
    Cooling,
    CoolingFast,
    InsufficientData,
}

impl ThermalTrend {
    /// Whether the channel is heating up at any rate
    pub fn is_rising(&self) -> bool {
        matches!(self, ThermalTrend::RisingFast | ThermalTrend::Rising)
    }
}

impl fmt::Display for ThermalTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ThermalTrend::RisingFast => "rising fast",
            ThermalTrend::Rising => "rising",
            ThermalTrend::Stable => "stable",
            ThermalTrend::Cooling => "cooling",
            ThermalTrend::CoolingFast => "cooling fast",
            ThermalTrend::InsufficientData => "insufficient data",
        };
        f.write_str(label)
    }
}

/// Advisory workload envelope derived from the current temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceProfile {
    Cool,
    Warm,
    Hot,
    Critical,
}

impl PerformanceProfile {
    pub const ALL: [PerformanceProfile; 4] =
        [PerformanceProfile::Cool, PerformanceProfile::Warm, PerformanceProfile::Hot, PerformanceProfile::Critical];

    pub fn name(&self) -> &'static str {
        match self {
            PerformanceProfile::Cool => "FULL PERFORMANCE",
            PerformanceProfile::Warm => "BALANCED",
            PerformanceProfile::Hot => "THERMAL THROTTLE",
            PerformanceProfile::Critical => "EMERGENCY MODE",
        }
    }

    /// Suggested ceiling on CPU utilization
    pub fn cpu_limit(&self) -> Percentage {
        match self {
            PerformanceProfile::Cool => Percentage::from_f64_unchecked(100.0),
            PerformanceProfile::Warm => Percentage::from_f64_unchecked(80.0),
            PerformanceProfile::Hot => Percentage::from_f64_unchecked(60.0),
            PerformanceProfile::Critical => Percentage::from_f64_unchecked(40.0),
        }
    }

    /// Suggested ceiling on memory utilization
    pub fn memory_limit(&self) -> Percentage {
        match self {
            PerformanceProfile::Cool => Percentage::from_f64_unchecked(100.0),
            PerformanceProfile::Warm => Percentage::from_f64_unchecked(90.0),
            PerformanceProfile::Hot => Percentage::from_f64_unchecked(80.0),
            PerformanceProfile::Critical => Percentage::from_f64_unchecked(70.0),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PerformanceProfile::Cool => "System is cool, all workloads can run at full speed",
            PerformanceProfile::Warm => "System is warm, reduce sustained load slightly",
            PerformanceProfile::Hot => "System is hot, throttle heavy workloads",
            PerformanceProfile::Critical => "System is overheating, run only essential work",
        }
    }
}

impl fmt::Display for PerformanceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (CPU {}, memory {})", self.name(), self.cpu_limit(), self.memory_limit())
    }
}
