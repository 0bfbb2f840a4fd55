//! Temperature sensing and classification
//!
//! This module reads CPU, disk and ambient temperatures through a pluggable
//! [`ThermalSensor`](crate::traits::ThermalSensor) and classifies them against
//! per-channel threshold tables.
//!
//! Sensor access never fails from the caller's point of view: [`SensorReader`]
//! bounds every channel read with a timeout and substitutes safe defaults
//! (45°C CPU, 35°C disk, ambient estimated as CPU minus 15°C, floored at 25°C).
//!
//! # Examples
//!
//! ```no_run
//! use thermal_bench::temperature::{SafetyThresholds, SensorReader};
//!
//! #[tokio::main]
//! async fn main() {
//!     let reader = SensorReader::system();
//!     let reading = reader.read().await;
//!     let statuses = SafetyThresholds::monitoring().classify_reading(&reading);
//!
//!     println!("CPU: {:.1}°C [{}]", reading.cpu_temp_c, statuses.cpu);
//! }
//! ```

/// Temperature defaults and threshold values
pub mod constants;

mod monitors;
mod types;

#[cfg(test)]
mod tests;

pub use monitors::*;
pub use types::*;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::traits::ThermalSensor;
use constants::{DEFAULT_CPU_TEMPERATURE, DEFAULT_DISK_TEMPERATURE, DEFAULT_SENSOR_TIMEOUT_MS};

/// Reads all channels of a [`ThermalSensor`] with timeouts and safe defaults
#[derive(Clone)]
pub struct SensorReader {
    sensor: Arc<dyn ThermalSensor>,
    timeout: Duration,
}

impl SensorReader {
    /// Creates a reader with the default per-channel timeout
    pub fn new(sensor: Arc<dyn ThermalSensor>) -> Self {
        Self::with_timeout(sensor, Duration::from_millis(DEFAULT_SENSOR_TIMEOUT_MS))
    }

    pub fn with_timeout(sensor: Arc<dyn ThermalSensor>, timeout: Duration) -> Self {
        Self { sensor, timeout }
    }

    /// Creates a reader backed by the Linux sysfs sensors
    pub fn system() -> Self {
        Self::new(Arc::new(SysfsSensor::new()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Take one reading across all channels.
    ///
    /// Channels are read concurrently. Any channel that fails or exceeds the
    /// timeout is replaced by its documented default.
    pub async fn read(&self) -> ThermalReading {
        let (cpu, disk, ambient) = futures::join!(
            self.channel(ThermalChannel::Cpu, self.sensor.cpu_temperature()),
            self.channel(ThermalChannel::Disk, self.sensor.disk_temperature()),
            self.channel(ThermalChannel::Ambient, self.sensor.ambient_temperature()),
        );

        let cpu = cpu.unwrap_or(DEFAULT_CPU_TEMPERATURE);
        let disk = disk.unwrap_or(DEFAULT_DISK_TEMPERATURE);

        match ambient {
            Some(ambient) => ThermalReading::new(cpu, disk, ambient),
            None => ThermalReading::with_estimated_ambient(cpu, disk),
        }
    }

    async fn channel<F>(&self, channel: ThermalChannel, read: F) -> Option<f64>
    where
        F: Future<Output = Result<f64>>,
    {
        match tokio::time::timeout(self.timeout, read).await {
            Ok(Ok(value)) if value.is_finite() => Some(value),
            Ok(Ok(value)) => {
                debug!(%channel, value, "non-finite sensor value, using fallback");
                None
            },
            Ok(Err(e)) => {
                debug!(%channel, error = %e, "sensor read failed, using fallback");
                None
            },
            Err(_) => {
                debug!(%channel, timeout_ms = self.timeout.as_millis() as u64, "sensor read timed out, using fallback");
                None
            },
        }
    }
}

impl fmt::Debug for SensorReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorReader")
            .field("sensor", &"<dyn ThermalSensor>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
