use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::LogSummary;
use crate::safety::ThermalHistory;
use crate::scenario::{ThermalEvent, ThermalEventKind};
use crate::temperature::{SafetyThresholds, SensorReader, ThermalChannel};
use crate::traits::ResultStore;

/// Samples and persists temperatures until a sample limit or an emergency
pub struct ThermalLogger {
    reader: SensorReader,
    store: Arc<dyn ResultStore>,
    thresholds: SafetyThresholds,
    interval: Duration,
}

impl ThermalLogger {
    pub fn new(
        reader: SensorReader,
        store: Arc<dyn ResultStore>,
        thresholds: SafetyThresholds,
        interval: Duration,
    ) -> Self {
        Self { reader, store, thresholds, interval: interval.max(Duration::from_millis(1)) }
    }

    /// Log up to `max_samples` readings, one per interval.
    ///
    /// Stops early when the CPU or disk reaches its absolute maximum, saving an
    /// emergency event.
    pub async fn run(&self, max_samples: usize) -> LogSummary {
        let mut history = ThermalHistory::new();
        let mut summary = LogSummary {
            samples: 0,
            max_cpu_c: f64::MIN,
            max_disk_c: f64::MIN,
            cpu_trend: history.cpu_trend(),
            emergency: None,
        };

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while summary.samples < max_samples {
            ticker.tick().await;

            let reading = self.reader.read().await;
            history.record(&reading);
            summary.samples += 1;
            summary.max_cpu_c = summary.max_cpu_c.max(reading.cpu_temp_c);
            summary.max_disk_c = summary.max_disk_c.max(reading.disk_temp_c);

            let statuses = self.thresholds.classify_reading(&reading);
            info!(
                cpu = reading.cpu_temp_c,
                cpu_status = %statuses.cpu,
                disk = reading.disk_temp_c,
                disk_status = %statuses.disk,
                ambient = reading.ambient_temp_c,
                "thermal reading"
            );

            if let Err(e) = self.store.save_reading(&reading).await {
                warn!(error = %e, "failed to persist thermal reading");
            }

            let emergency =
                self.thresholds.exceeds_max(&reading).filter(|violation| violation.channel != ThermalChannel::Ambient);
            if let Some(violation) = emergency {
                warn!(reason = %violation, "emergency temperature reached, stopping logging");
                let event = ThermalEvent::new(ThermalEventKind::EmergencyShutdown, violation.reason(), &reading);
                if let Err(e) = self.store.save_event(&event).await {
                    warn!(error = %e, "failed to persist emergency event");
                }
                summary.emergency = Some(event);
                break;
            }
        }

        summary.cpu_trend = history.cpu_trend();
        summary
    }
}

impl fmt::Debug for ThermalLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThermalLogger")
            .field("reader", &self.reader)
            .field("thresholds", &self.thresholds)
            .field("interval", &self.interval)
            .finish()
    }
}
