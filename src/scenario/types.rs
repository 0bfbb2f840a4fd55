use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::benchmark::{BenchmarkResult, Intensity, WorkloadKind};
use crate::error::{Error, Result};
use crate::temperature::ThermalReading;

/// One test of a scenario, written as `"<workload>-<intensity>"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TestSpec {
    pub kind: WorkloadKind,
    pub intensity: Intensity,
}

impl TestSpec {
    pub const fn new(kind: WorkloadKind, intensity: Intensity) -> Self {
        Self { kind, intensity }
    }
}

impl fmt::Display for TestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.intensity)
    }
}

impl FromStr for TestSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, intensity) = s
            .split_once('-')
            .ok_or_else(|| Error::invalid_test_spec(format!("'{}' is not of the form <workload>-<intensity>", s)))?;
        Ok(Self { kind: kind.parse()?, intensity: intensity.parse()? })
    }
}

impl TryFrom<String> for TestSpec {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TestSpec> for String {
    fn from(spec: TestSpec) -> Self {
        spec.to_string()
    }
}

/// A named, ordered list of tests sharing a time budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    /// Human-readable title
    pub label: String,
    /// Total budget split evenly between the tests
    pub duration_ms: u64,
    pub tests: Vec<TestSpec>,
}

impl ScenarioDefinition {
    pub fn new(name: impl Into<String>, label: impl Into<String>, duration: Duration, tests: Vec<TestSpec>) -> Self {
        Self { name: name.into(), label: label.into(), duration_ms: duration.as_millis() as u64, tests }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Time given to each test
    pub fn per_test_duration(&self) -> Duration {
        match self.tests.len() {
            0 => Duration::ZERO,
            n => self.duration() / n as u32,
        }
    }
}

/// Why a scenario ended before running all of its tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    /// The machine was already too hot to start
    InitialUnsafe,
    /// A test was aborted by its safety session
    ThermalAbort,
    /// A test failed with an infrastructure error
    RunnerFailure,
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopKind::InitialUnsafe => write!(f, "initial-unsafe"),
            StopKind::ThermalAbort => write!(f, "thermal-abort"),
            StopKind::RunnerFailure => write!(f, "runner-failure"),
        }
    }
}

/// Reason recorded when the initial reading is already unsafe
pub const INITIAL_UNSAFE_REASON: &str = "initial-unsafe";

/// Everything a scenario run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub started_at: SystemTime,
    pub ended_at: SystemTime,
    pub results: Vec<BenchmarkResult>,
    pub stopped_early: bool,
    pub stop_reason: Option<String>,
    pub stop_kind: Option<StopKind>,
    pub passed: bool,
}

impl ScenarioResult {
    pub fn new(scenario_name: impl Into<String>) -> Self {
        let now = SystemTime::now();
        Self {
            scenario_name: scenario_name.into(),
            started_at: now,
            ended_at: now,
            results: Vec::new(),
            stopped_early: false,
            stop_reason: None,
            stop_kind: None,
            passed: false,
        }
    }

    pub(crate) fn stop(&mut self, kind: StopKind, reason: impl Into<String>) {
        self.stopped_early = true;
        self.stop_kind = Some(kind);
        self.stop_reason = Some(reason.into());
    }

    /// Stamp the end time and derive `passed`
    pub(crate) fn finish(&mut self) {
        self.ended_at = SystemTime::now();
        self.passed = !self.stopped_early && self.results.iter().all(|r| r.passed);
    }

    /// Sum of every test's score
    pub fn total_score(&self) -> f64 {
        self.results.iter().map(|r| r.score).sum()
    }

    /// Hottest CPU temperature seen by any test
    pub fn max_temp_c(&self) -> Option<f64> {
        self.results.iter().map(|r| r.max_temp_c).reduce(f64::max)
    }

    pub fn duration(&self) -> Duration {
        self.ended_at.duration_since(self.started_at).unwrap_or_default()
    }

    /// Exit code for a command that produced this result; thermal stops are
    /// expected outcomes
    pub fn exit_code(&self) -> i32 {
        match self.stop_kind {
            Some(StopKind::RunnerFailure) => 2,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalEventKind {
    EmergencyShutdown,
    BenchmarkAbort,
    InitialUnsafe,
}

impl fmt::Display for ThermalEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThermalEventKind::EmergencyShutdown => write!(f, "emergency shutdown"),
            ThermalEventKind::BenchmarkAbort => write!(f, "benchmark abort"),
            ThermalEventKind::InitialUnsafe => write!(f, "initial unsafe"),
        }
    }
}

/// A persisted record of a safety intervention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalEvent {
    pub kind: ThermalEventKind,
    pub reason: String,
    pub cpu_temp_c: f64,
    pub disk_temp_c: f64,
    pub timestamp: SystemTime,
}

impl ThermalEvent {
    pub fn new(kind: ThermalEventKind, reason: impl Into<String>, reading: &ThermalReading) -> Self {
        Self {
            kind,
            reason: reason.into(),
            cpu_temp_c: reading.cpu_temp_c,
            disk_temp_c: reading.disk_temp_c,
            timestamp: SystemTime::now(),
        }
    }
}
