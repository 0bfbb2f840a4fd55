//! Thermal Bench - A thermal-safety-gated benchmarking engine
//!
//! This crate runs CPU, memory, disk and database workloads for bounded durations
//! while a background task samples the machine's temperature sensors. Any workload
//! is stopped promptly once a critical temperature is reached.
//!
//! # Features
//!
//! - **Sensor Reading**: CPU, disk and ambient temperatures with timeouts and safe defaults
//! - **Safety Classification**: Per-channel statuses against monitoring and benchmarking tables
//! - **Safety Sessions**: Background sampling that flips a shared health flag on critical readings
//! - **Workloads**: Prime search, array churn, scratch-file I/O and document store load
//! - **Scenarios**: Ordered tests with cooldowns, short-circuiting on the first thermal abort
//! - **Analysis**: Thermal trends and advisory performance profiles
//! - **Reporting**: One-shot checks, logging sessions, reading statistics and run comparison
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use thermal_bench::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let sensor = SyntheticSensor::constant(45.0);
//! let config = BenchConfig { cooldown_ms: 0, sampling_interval_ms: 10, ..BenchConfig::default() };
//! let runner = ScenarioRunner::new(SensorReader::new(Arc::new(sensor)), Arc::new(InMemoryResultStore::new()), config)
//!     .with_default_runners();
//!
//! let quick = ScenarioDefinition::new(
//!     "smoke",
//!     "Smoke Test",
//!     std::time::Duration::from_millis(100),
//!     vec!["cpu-low".parse()?, "memory-low".parse()?],
//! );
//! let result = runner.run_scenario(&quick).await?;
//!
//! assert!(result.passed);
//! assert_eq!(result.results.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Thermal stops are data, not errors: an aborted workload yields a
//! [`BenchmarkResult`](benchmark::BenchmarkResult) with `passed = false`. Errors
//! are reserved for configuration problems, persistence and infrastructure
//! failures inside a workload:
//!
//! ```rust
//! use thermal_bench::{Error, Result};
//! use thermal_bench::scenario::TestSpec;
//!
//! fn parse(spec: &str) -> Result<TestSpec> {
//!     spec.parse()
//! }
//!
//! assert!(matches!(parse("gpu-high"), Err(Error::InvalidTestSpec(_))));
//! ```
//!
//! # Thread Safety
//!
//! Sensors, stores and runners are `Send + Sync` trait objects. A
//! [`SafetyHandle`](safety::SafetyHandle) is a cheap clone that can be polled from
//! the blocking pool without waiting on the sampler.

pub mod analysis;
pub mod benchmark;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod report;
pub mod safety;
pub mod scenario;
pub mod store;
pub mod temperature;
pub mod traits;

pub use error::{Error, Result, RunnerFailure};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::analysis::{analyze_trend, select_profile, PerformanceProfile, ThermalTrend};
    pub use crate::benchmark::{
        BenchmarkResult, CpuRunner, DatabaseRunner, DiskRunner, InMemoryCollection, Intensity, MemoryRunner,
        WorkloadKind,
    };
    pub use crate::config::BenchConfig;
    pub use crate::error::{Error, Result, RunnerFailure};
    pub use crate::report::{check, compare, ThermalLogger, ThermalReport};
    pub use crate::safety::{HealthReport, SafetyHandle, SafetyMonitor, SafetySession};
    pub use crate::scenario::{ScenarioDefinition, ScenarioResult, ScenarioRunner, StopKind, TestSpec};
    pub use crate::store::{InMemoryResultStore, JsonLinesStore};
    pub use crate::temperature::{
        SafetyThresholds, ScriptedSensor, SensorReader, SyntheticSensor, SysfsSensor, ThermalReading, ThermalStatus,
    };
    pub use crate::traits::{DocumentStore, ResultStore, ThermalSensor, WorkloadRunner};
}
