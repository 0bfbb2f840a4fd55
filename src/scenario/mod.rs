//! # Scenario Orchestration
//!
//! A scenario is an ordered list of tests sharing one time budget. The
//! [`ScenarioRunner`] checks the machine is cool enough to start, then runs each
//! test under its own safety session with a cooldown between tests.
//!
//! A scenario ends in one of four ways:
//!
//! * every test completed: `passed` reflects the individual results
//! * the initial reading was already unsafe: no test runs
//! * a test was aborted by its safety session: later tests never run
//! * a test failed with an infrastructure error: the partial result is persisted
//!   and returned inside [`Error::Runner`]
//!
//! Persistence failures are logged and never change the outcome.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use thermal_bench::config::BenchConfig;
//! use thermal_bench::scenario::ScenarioRunner;
//! use thermal_bench::store::InMemoryResultStore;
//! use thermal_bench::temperature::SensorReader;
//!
//! #[tokio::main]
//! async fn main() -> thermal_bench::Result<()> {
//!     let runner = ScenarioRunner::new(SensorReader::system(), Arc::new(InMemoryResultStore::new()), BenchConfig::default())
//!         .with_default_runners();
//!
//!     let result = runner.run_named("quick").await?;
//!     println!("{}: passed = {}, score = {:.0}", result.scenario_name, result.passed, result.total_score());
//!     Ok(())
//! }
//! ```

mod catalog;
mod types;


pub use catalog::default_scenarios;
pub use types::*;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use crate::benchmark::{CpuRunner, DatabaseRunner, DiskRunner, MemoryRunner, WorkloadKind};
use crate::config::BenchConfig;
use crate::error::{Error, Result};
use crate::safety::SafetyMonitor;
use crate::temperature::SensorReader;
use crate::traits::{ResultStore, WorkloadRunner};

/// Runs scenarios against a set of registered workload runners
pub struct ScenarioRunner {
    reader: SensorReader,
    store: Arc<dyn ResultStore>,
    runners: HashMap<WorkloadKind, Arc<dyn WorkloadRunner>>,
    config: BenchConfig,
}

impl ScenarioRunner {
    /// Create an orchestrator with no runners registered
    pub fn new(reader: SensorReader, store: Arc<dyn ResultStore>, config: BenchConfig) -> Self {
        Self { reader, store, runners: HashMap::new(), config }
    }

    /// Register the built-in CPU, memory, disk and in-memory database runners
    pub fn with_default_runners(self) -> Self {
        let disk = DiskRunner::new(&self.config.scratch_dir);
        self.with_runner(Arc::new(CpuRunner::new()))
            .with_runner(Arc::new(MemoryRunner::new()))
            .with_runner(Arc::new(disk))
            .with_runner(Arc::new(DatabaseRunner::in_memory()))
    }

    /// Register `runner` for its workload kind, replacing any previous one
    pub fn with_runner(mut self, runner: Arc<dyn WorkloadRunner>) -> Self {
        self.runners.insert(runner.kind(), runner);
        self
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run a scenario from the configured catalog
    #[instrument(skip(self))]
    pub async fn run_named(&self, name: &str) -> Result<ScenarioResult> {
        let scenario = self.config.scenario(name)?.clone();
        self.run_scenario(&scenario).await
    }

    /// Run every test of `scenario` in order.
    ///
    /// Thermal stops are reported in the returned result. Only configuration
    /// problems and runner failures are errors.
    #[instrument(skip(self, scenario), fields(scenario = %scenario.name))]
    pub async fn run_scenario(&self, scenario: &ScenarioDefinition) -> Result<ScenarioResult> {
        self.check_runners(scenario)?;

        let mut result = ScenarioResult::new(&scenario.name);
        let thresholds = self.config.benchmarking;

        let initial = self.reader.read().await;
        if let Some(violation) = thresholds.evaluate(&initial) {
            warn!(reason = %violation, "cannot start scenario, machine is already too hot");
            result.stop(StopKind::InitialUnsafe, INITIAL_UNSAFE_REASON);
            result.finish();
            self.save_event(&ThermalEvent::new(ThermalEventKind::InitialUnsafe, violation.reason(), &initial)).await;
            self.save_result(&result).await;
            return Ok(result);
        }

        info!(
            label = %scenario.label,
            tests = scenario.tests.len(),
            cpu = initial.cpu_temp_c,
            disk = initial.disk_temp_c,
            "starting scenario"
        );

        let per_test = scenario.per_test_duration();
        let monitor = SafetyMonitor::new(self.reader.clone(), thresholds, self.config.sampling_interval());

        for (index, test) in scenario.tests.iter().enumerate() {
            let runner = self.runner_for(test)?;
            info!(test = %test, duration_ms = per_test.as_millis() as u64, "running test");

            let mut session = monitor.start_session().await;
            let handle = session.handle();
            let outcome = runner.run(per_test, test.intensity, &handle).await;
            session.stop().await;

            match outcome {
                Ok(bench) if !bench.passed => {
                    let reason = bench.abort_reason.clone().unwrap_or_else(|| "thermal limit exceeded".to_string());
                    warn!(test = %test, %reason, "test aborted by thermal safety, stopping scenario");

                    result.results.push(bench);
                    result.stop(StopKind::ThermalAbort, reason.clone());

                    let reading = handle.is_healthy().last_reading;
                    self.save_event(&ThermalEvent::new(ThermalEventKind::BenchmarkAbort, reason, &reading)).await;
                    break;
                },
                Ok(bench) => {
                    info!(
                        test = %test,
                        score = bench.score,
                        unit = %bench.unit,
                        avg_temp = bench.avg_temp_c,
                        max_temp = bench.max_temp_c,
                        "test completed"
                    );
                    result.results.push(bench);
                },
                Err(failure) => {
                    error!(test = %test, error = %failure, "test failed");
                    result.stop(StopKind::RunnerFailure, failure.to_string());
                    result.finish();
                    self.save_result(&result).await;
                    return Err(Error::Runner { test: test.to_string(), source: failure, partial: Box::new(result) });
                },
            }

            if index + 1 < scenario.tests.len() {
                self.cooldown().await;
            }
        }

        result.finish();
        info!(
            passed = result.passed,
            stopped_early = result.stopped_early,
            total_score = result.total_score(),
            "scenario finished"
        );
        self.save_result(&result).await;
        Ok(result)
    }

    fn runner_for(&self, test: &TestSpec) -> Result<&Arc<dyn WorkloadRunner>> {
        self.runners.get(&test.kind).ok_or_else(|| Error::RunnerUnavailable(test.kind.to_string()))
    }

    /// Reject a scenario before any work starts if a test has no runner
    fn check_runners(&self, scenario: &ScenarioDefinition) -> Result<()> {
        if scenario.tests.is_empty() {
            return Err(Error::config(format!("scenario '{}' has no tests", scenario.name)));
        }
        for test in &scenario.tests {
            self.runner_for(test)?;
        }
        Ok(())
    }

    /// Wait out the configured cooldown, sampling temperatures as it goes
    async fn cooldown(&self) {
        let cooldown = self.config.cooldown();
        if cooldown.is_zero() {
            return;
        }

        info!(cooldown_ms = cooldown.as_millis() as u64, "cooling down");
        let deadline = Instant::now() + cooldown;
        let interval = self.config.sampling_interval();

        loop {
            let reading = self.reader.read().await;
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let remaining = deadline - now;
            debug!(cpu = reading.cpu_temp_c, remaining_ms = remaining.as_millis() as u64, "cooldown");
            tokio::time::sleep(remaining.min(interval)).await;
        }

        info!("cooldown complete");
    }

    async fn save_result(&self, result: &ScenarioResult) {
        if let Err(e) = self.store.save_scenario(result).await {
            warn!(error = %e, "failed to persist scenario result");
        }
    }

    async fn save_event(&self, event: &ThermalEvent) {
        if let Err(e) = self.store.save_event(event).await {
            warn!(error = %e, kind = %event.kind, "failed to persist thermal event");
        }
    }
}

impl fmt::Debug for ScenarioRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.runners.keys().collect();
        kinds.sort();
        f.debug_struct("ScenarioRunner").field("reader", &self.reader).field("runners", &kinds).finish()
    }
}
