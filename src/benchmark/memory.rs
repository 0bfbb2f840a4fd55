use std::hint::black_box;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{run_blocking_loop, BenchmarkResult, Intensity, WorkloadDetails, WorkloadKind};
use crate::error::RunnerFailure;
use crate::safety::SafetyHandle;
use crate::traits::WorkloadRunner;

/// One unit of memory work over `size` elements.
///
/// Builds `0..size`, sorts it in reverse, doubles every element, keeps the even
/// ones and returns their sum.
pub fn memory_pass(size: usize) -> u64 {
    let mut values: Vec<u64> = (0..size as u64).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    let doubled: Vec<u64> = values.iter().map(|v| v * 2).collect();
    let even: Vec<u64> = doubled.into_iter().filter(|v| v % 2 == 0).collect();
    even.iter().sum()
}

/// Array-churn memory workload; scores in operations per second
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryRunner;

impl MemoryRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WorkloadRunner for MemoryRunner {
    fn kind(&self) -> WorkloadKind {
        WorkloadKind::Memory
    }

    async fn run(
        &self,
        duration: Duration,
        intensity: Intensity,
        safety: &SafetyHandle,
    ) -> Result<BenchmarkResult, RunnerFailure> {
        let array_size = intensity.array_size();
        let handle = safety.clone();

        let outcome = tokio::task::spawn_blocking(move || {
            run_blocking_loop(duration, &handle, || {
                black_box(memory_pass(black_box(array_size)));
            })
        })
        .await
        .map_err(|e| RunnerFailure::task(format!("memory workload: {}", e)))?;

        debug!(operations = outcome.iterations, array_size, "memory workload finished");

        let score = outcome.rate(outcome.iterations);
        Ok(outcome.into_result(WorkloadKind::Memory, intensity, score, safety, WorkloadDetails::Memory { array_size }))
    }
}
