//! # Benchmark Workloads
//!
//! Four workload runners, each gated by a [`SafetyHandle`]:
//!
//! * [`CpuRunner`] - trial-division prime search up to a ceiling
//! * [`MemoryRunner`] - build, reverse-sort, map, filter and sum a large array
//! * [`DiskRunner`] - write then read back a scratch file
//! * [`DatabaseRunner`] - insert, query and aggregate against a [`DocumentStore`]
//!
//! Every runner checks the safety handle at the top of each iteration and stops
//! with a partial, failed result once the session is unsafe. CPU-bound loops run
//! on tokio's blocking pool so the sampling task keeps its schedule.
//!
//! [`DocumentStore`]: crate::traits::DocumentStore

/// Workload sizes and score units
pub mod constants;

mod cpu;
mod database;
mod disk;
mod memory;
mod types;


pub use cpu::{count_primes, CpuRunner};
pub use database::{DatabaseRunner, InMemoryCollection};
pub use disk::DiskRunner;
pub use memory::{memory_pass, MemoryRunner};
pub use types::*;

use std::time::{Duration, Instant};

use crate::safety::SafetyHandle;

/// Iteration count and timing of one workload loop
#[derive(Debug, Clone)]
pub(crate) struct LoopOutcome {
    pub iterations: u64,
    pub elapsed: Duration,
    pub abort_reason: Option<String>,
}

impl LoopOutcome {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// `count` per second over the loop, floored
    pub fn rate(&self, count: u64) -> f64 {
        (count as f64 * 1000.0 / self.elapsed_ms().max(1.0)).floor()
    }

    pub fn into_result(
        self,
        kind: WorkloadKind,
        intensity: Intensity,
        score: f64,
        safety: &SafetyHandle,
        details: WorkloadDetails,
    ) -> BenchmarkResult {
        let stats = safety.cpu_stats();
        BenchmarkResult {
            test_kind: kind,
            intensity,
            duration_ms: self.elapsed_ms(),
            iterations: self.iterations,
            score,
            unit: kind.unit().to_string(),
            avg_temp_c: stats.avg,
            max_temp_c: stats.max,
            passed: self.abort_reason.is_none(),
            abort_reason: self.abort_reason,
            details,
        }
    }
}

/// Health check at the top of an iteration.
///
/// Returns the abort reason once the session is unsafe.
pub(crate) fn should_abort(safety: &SafetyHandle) -> Option<String> {
    let health = safety.is_healthy();
    if health.safe {
        None
    } else {
        Some(health.reason.unwrap_or_else(|| "thermal safety limit reached".to_string()))
    }
}

/// Run `unit` repeatedly until `duration` elapses or the session turns unsafe.
///
/// Meant for the blocking pool; the caller wraps it in `spawn_blocking`.
pub(crate) fn run_blocking_loop(duration: Duration, safety: &SafetyHandle, mut unit: impl FnMut()) -> LoopOutcome {
    let started = Instant::now();
    let mut iterations = 0;

    loop {
        if let Some(reason) = should_abort(safety) {
            return LoopOutcome { iterations, elapsed: started.elapsed(), abort_reason: Some(reason) };
        }
        if started.elapsed() >= duration {
            break;
        }
        unit();
        iterations += 1;
    }

    LoopOutcome { iterations, elapsed: started.elapsed(), abort_reason: None }
}
