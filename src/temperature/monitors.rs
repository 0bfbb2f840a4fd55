/// Temperature sensor backends
///
/// * `SysfsSensor` reads Linux hwmon and thermal-zone files
/// * `SyntheticSensor` holds settable values shared between clones
/// * `ScriptedSensor` replays a fixed sequence of CPU readings
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::constants::*;
use crate::error::{Error, Result};
use crate::traits::ThermalSensor;

//
// Sysfs Sensor
//
/// Reads temperatures from the Linux sysfs class tree
#[derive(Debug, Clone)]
pub struct SysfsSensor {
    root: PathBuf,
}

impl SysfsSensor {
    /// Create a sensor reading from `/sys/class`
    pub fn new() -> Self {
        Self::with_root(SYSFS_CLASS_ROOT)
    }

    /// Create a sensor reading from an alternative class tree
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of `temp1_input` for the first hwmon device whose name matches
    async fn find_hwmon(&self, names: &[&str]) -> Result<PathBuf> {
        let hwmon = self.root.join("hwmon");
        let mut entries = tokio::fs::read_dir(&hwmon).await?;
        let mut candidates = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            candidates.push(entry.path());
        }
        // read_dir order is unspecified; hwmon0 should win over hwmon1
        candidates.sort();

        for device in candidates {
            let Ok(name) = tokio::fs::read_to_string(device.join("name")).await else {
                continue;
            };
            if names.contains(&name.trim()) {
                return Ok(device.join("temp1_input"));
            }
        }

        Err(Error::sensor_unavailable(format!("no hwmon device named any of {:?}", names)))
    }

    async fn read_hwmon(&self, names: &[&str]) -> Result<f64> {
        let path = self.find_hwmon(names).await?;
        read_millidegrees(&path).await
    }
}

impl Default for SysfsSensor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ThermalSensor for SysfsSensor {
    async fn cpu_temperature(&self) -> Result<f64> {
        match self.read_hwmon(CPU_HWMON_NAMES).await {
            Ok(temp) => Ok(temp),
            Err(_) => read_millidegrees(&self.root.join("thermal/thermal_zone0/temp")).await,
        }
    }

    async fn disk_temperature(&self) -> Result<f64> {
        self.read_hwmon(DISK_HWMON_NAMES).await
    }

    async fn ambient_temperature(&self) -> Result<f64> {
        self.read_hwmon(AMBIENT_HWMON_NAMES).await
    }
}

async fn read_millidegrees(path: &Path) -> Result<f64> {
    let raw = tokio::fs::read_to_string(path).await?;
    let millidegrees: f64 = raw
        .trim()
        .parse()
        .map_err(|e| Error::sensor_unavailable(format!("{}: {}", path.display(), e)))?;
    let celsius = millidegrees / 1000.0;

    if PLAUSIBLE_TEMPERATURE_RANGE.contains(&celsius) {
        Ok(celsius)
    } else {
        Err(Error::sensor_unavailable(format!("{}: implausible value {:.1}°C", path.display(), celsius)))
    }
}

//
// Synthetic Sensor
//
#[derive(Debug)]
struct SyntheticState {
    cpu: f64,
    disk: f64,
    ambient: Option<f64>,
    failing: bool,
}

/// Sensor with settable values, shared between clones.
///
/// Without an explicit ambient value the ambient channel reports as unavailable, so
/// readers fall back to their ambient estimate.
///
/// # Examples
///
/// ```rust
/// use thermal_bench::temperature::{SensorReader, SyntheticSensor};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let sensor = SyntheticSensor::constant(45.0);
/// let reader = SensorReader::new(Arc::new(sensor.clone()));
///
/// sensor.set_cpu(92.0);
/// let reading = reader.read().await;
/// assert_eq!(reading.cpu_temp_c, 92.0);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticSensor {
    state: Arc<RwLock<SyntheticState>>,
}

impl SyntheticSensor {
    /// A sensor reporting `cpu` and the default disk temperature
    pub fn constant(cpu: f64) -> Self {
        Self::new(cpu, DEFAULT_DISK_TEMPERATURE, None)
    }

    pub fn new(cpu: f64, disk: f64, ambient: Option<f64>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SyntheticState { cpu, disk, ambient, failing: false })),
        }
    }

    pub fn set_cpu(&self, cpu: f64) {
        self.state.write().cpu = cpu;
    }

    pub fn set_disk(&self, disk: f64) {
        self.state.write().disk = disk;
    }

    pub fn set_ambient(&self, ambient: Option<f64>) {
        self.state.write().ambient = ambient;
    }

    /// Make every channel report as unavailable
    pub fn fail_all(&self, failing: bool) {
        self.state.write().failing = failing;
    }

    fn channel(&self, pick: impl FnOnce(&SyntheticState) -> Option<f64>, what: &str) -> Result<f64> {
        let state = self.state.read();
        if state.failing {
            return Err(Error::sensor_unavailable(format!("synthetic {} sensor disabled", what)));
        }
        pick(&state).ok_or_else(|| Error::sensor_unavailable(format!("synthetic {} sensor not set", what)))
    }
}

#[async_trait]
impl ThermalSensor for SyntheticSensor {
    async fn cpu_temperature(&self) -> Result<f64> {
        self.channel(|s| Some(s.cpu), "cpu")
    }

    async fn disk_temperature(&self) -> Result<f64> {
        self.channel(|s| Some(s.disk), "disk")
    }

    async fn ambient_temperature(&self) -> Result<f64> {
        self.channel(|s| s.ambient, "ambient")
    }
}

//
// Scripted Sensor
//
/// Replays a sequence of CPU temperatures, one per read, then holds the last value
#[derive(Debug, Clone)]
pub struct ScriptedSensor {
    cpu: Arc<Vec<f64>>,
    disk: f64,
    reads: Arc<AtomicUsize>,
}

impl ScriptedSensor {
    pub fn new(cpu: Vec<f64>) -> Self {
        Self { cpu: Arc::new(cpu), disk: DEFAULT_DISK_TEMPERATURE, reads: Arc::new(AtomicUsize::new(0)) }
    }

    /// Number of CPU reads served so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThermalSensor for ScriptedSensor {
    async fn cpu_temperature(&self) -> Result<f64> {
        let index = self.reads.fetch_add(1, Ordering::SeqCst);
        self.cpu
            .get(index)
            .or_else(|| self.cpu.last())
            .copied()
            .ok_or_else(|| Error::sensor_unavailable("empty script"))
    }

    async fn disk_temperature(&self) -> Result<f64> {
        Ok(self.disk)
    }

    async fn ambient_temperature(&self) -> Result<f64> {
        Err(Error::sensor_unavailable("scripted sensor has no ambient channel"))
    }
}
