//! # Thermal Reporting
//!
//! Operator-facing views over the sensors and the result store:
//!
//! * [`check`] - one reading with statuses, profile and alerts
//! * [`ThermalLogger`] - periodic logging that stops on an emergency
//! * [`ThermalReport`] - statistics over stored readings
//! * [`compare`] - stored scenario runs side by side

mod logger;
mod types;


pub use logger::ThermalLogger;
pub use types::*;

use crate::analysis::select_profile;
use crate::error::Result;
use crate::temperature::{SafetyThresholds, SensorReader, ThermalChannel, ThermalStatus};
use crate::traits::ResultStore;

/// Take one reading and classify it
pub async fn check(reader: &SensorReader, thresholds: &SafetyThresholds) -> ThermalSnapshot {
    let reading = reader.read().await;
    let statuses = thresholds.classify_reading(&reading);

    let alerts = [(ThermalChannel::Cpu, statuses.cpu), (ThermalChannel::Disk, statuses.disk)]
        .into_iter()
        .filter(|(_, status)| *status >= ThermalStatus::Warning)
        .map(|(channel, status)| ThermalAlert { channel, status, value: reading.value(channel) })
        .collect();

    ThermalSnapshot { profile: select_profile(reading.cpu_temp_c, reading.disk_temp_c), statuses, alerts, reading }
}

/// Build a report from the most recent `limit` stored readings and events
pub async fn load_report(store: &dyn ResultStore, limit: usize) -> Result<ThermalReport> {
    let readings = store.recent_readings(limit).await?;
    let events = store.recent_events(limit).await?;
    Ok(ThermalReport::from_readings(&readings, events))
}

/// Summaries of the most recent `limit` stored scenarios, newest first
pub async fn compare(store: &dyn ResultStore, limit: usize) -> Result<Vec<ComparisonEntry>> {
    let results = store.recent_results(limit).await?;
    Ok(results.iter().map(ComparisonEntry::from).collect())
}
