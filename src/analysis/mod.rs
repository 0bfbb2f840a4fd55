//! Thermal trend analysis and performance profile selection
//!
//! Both outputs are advisory. They feed dashboards and result summaries but never
//! throttle or stop a workload; only the safety monitor does that.
//!
//! # Examples
//!
//! ```rust
//! use thermal_bench::analysis::{analyze_trend, select_profile, PerformanceProfile, ThermalTrend};
//!
//! let history = [50.0, 50.0, 50.0, 50.0, 50.0, 56.0, 56.0, 56.0, 56.0, 56.0];
//! assert_eq!(analyze_trend(&history), ThermalTrend::RisingFast);
//!
//! assert_eq!(select_profile(82.0, 40.0), PerformanceProfile::Hot);
//! ```

/// Trend window sizes and deltas
pub mod constants;

mod types;


pub use types::*;

use constants::{FAST_TREND_DELTA, FULL_TREND_SAMPLES, MIN_TREND_SAMPLES, TREND_DELTA, TREND_WINDOW};

use crate::temperature::{ChannelThresholds, SafetyThresholds};

/// Classify the direction of a channel's history, oldest sample first.
///
/// Compares the mean of the last five samples with the mean of the five before
/// them. Fewer than five samples yield `InsufficientData`, fewer than ten `Stable`.
pub fn analyze_trend(history: &[f64]) -> ThermalTrend {
    if history.len() < MIN_TREND_SAMPLES {
        return ThermalTrend::InsufficientData;
    }
    if history.len() < FULL_TREND_SAMPLES {
        return ThermalTrend::Stable;
    }

    let split = history.len() - TREND_WINDOW;
    let recent = mean(&history[split..]);
    let previous = mean(&history[split - TREND_WINDOW..split]);
    let delta = recent - previous;

    if delta > FAST_TREND_DELTA {
        ThermalTrend::RisingFast
    } else if delta > TREND_DELTA {
        ThermalTrend::Rising
    } else if delta < -FAST_TREND_DELTA {
        ThermalTrend::CoolingFast
    } else if delta < -TREND_DELTA {
        ThermalTrend::Cooling
    } else {
        ThermalTrend::Stable
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pick the advisory profile for the hotter of `cpu` and `disk`, using the
/// monitoring CPU thresholds
pub fn select_profile(cpu: f64, disk: f64) -> PerformanceProfile {
    select_profile_with(cpu, disk, &SafetyThresholds::monitoring().cpu)
}

/// Pick the advisory profile for the hotter of `cpu` and `disk` against `thresholds`
pub fn select_profile_with(cpu: f64, disk: f64, thresholds: &ChannelThresholds) -> PerformanceProfile {
    let hottest = cpu.max(disk);

    if hottest >= thresholds.critical {
        PerformanceProfile::Critical
    } else if hottest >= thresholds.warning {
        PerformanceProfile::Hot
    } else if hottest >= thresholds.safe {
        PerformanceProfile::Warm
    } else {
        PerformanceProfile::Cool
    }
}
