//! Engine configuration
//!
//! [`BenchConfig`] gathers every tunable of the engine: sampling cadence, cooldown,
//! sensor timeout, both threshold tables and the scenario catalog. It is plain
//! serde data and loads from JSON; missing fields take their defaults.
//!
//! ```rust
//! use thermal_bench::config::BenchConfig;
//!
//! let config = BenchConfig::from_json_str(r#"{ "cooldown_ms": 5000 }"#).unwrap();
//! assert_eq!(config.cooldown_ms, 5000);
//! assert_eq!(config.sampling_interval_ms, 2000);
//! assert!(config.scenario("quick").is_ok());
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scenario::{default_scenarios, ScenarioDefinition};
use crate::temperature::constants::DEFAULT_SENSOR_TIMEOUT_MS;
use crate::temperature::SafetyThresholds;

/// Milliseconds between safety samples while a workload runs
pub const DEFAULT_SAMPLING_INTERVAL_MS: u64 = 2_000;

/// Milliseconds of rest between two tests of a scenario
pub const DEFAULT_COOLDOWN_MS: u64 = 30_000;

/// Milliseconds between samples of a logging session
pub const DEFAULT_LOG_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub sampling_interval_ms: u64,
    pub cooldown_ms: u64,
    pub sensor_timeout_ms: u64,
    pub log_interval_ms: u64,
    /// Thresholds for live monitoring and logging
    pub monitoring: SafetyThresholds,
    /// Stricter thresholds enforced while a workload runs
    pub benchmarking: SafetyThresholds,
    /// Directory for the disk workload's scratch file
    pub scratch_dir: PathBuf,
    pub scenarios: Vec<ScenarioDefinition>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sampling_interval_ms: DEFAULT_SAMPLING_INTERVAL_MS,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            sensor_timeout_ms: DEFAULT_SENSOR_TIMEOUT_MS,
            log_interval_ms: DEFAULT_LOG_INTERVAL_MS,
            monitoring: SafetyThresholds::monitoring(),
            benchmarking: SafetyThresholds::benchmarking(),
            scratch_dir: std::env::temp_dir(),
            scenarios: default_scenarios(),
        }
    }
}

impl BenchConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.monitoring.validate()?;
        self.benchmarking.validate()?;

        for (name, value) in [
            ("sampling_interval_ms", self.sampling_interval_ms),
            ("sensor_timeout_ms", self.sensor_timeout_ms),
            ("log_interval_ms", self.log_interval_ms),
        ] {
            if value == 0 {
                return Err(Error::config(format!("{} must be greater than zero", name)));
            }
        }

        let mut names = HashSet::new();
        for scenario in &self.scenarios {
            if !names.insert(scenario.name.as_str()) {
                return Err(Error::config(format!("scenario '{}' is defined twice", scenario.name)));
            }
            if scenario.tests.is_empty() {
                return Err(Error::config(format!("scenario '{}' has no tests", scenario.name)));
            }
            if scenario.duration_ms == 0 {
                return Err(Error::config(format!("scenario '{}' has a zero duration", scenario.name)));
            }
        }

        Ok(())
    }

    /// Look up a scenario by name
    pub fn scenario(&self, name: &str) -> Result<&ScenarioDefinition> {
        self.scenarios.iter().find(|s| s.name == name).ok_or_else(|| Error::UnknownScenario {
            name: name.to_string(),
            available: self.scenario_names().join(", "),
        })
    }

    pub fn scenario_names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sampling_interval(&self) -> Duration {
        Duration::from_millis(self.sampling_interval_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn sensor_timeout(&self) -> Duration {
        Duration::from_millis(self.sensor_timeout_ms)
    }

    pub fn log_interval(&self) -> Duration {
        Duration::from_millis(self.log_interval_ms)
    }
}
