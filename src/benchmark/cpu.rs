use std::hint::black_box;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{run_blocking_loop, BenchmarkResult, Intensity, WorkloadDetails, WorkloadKind};
use crate::error::RunnerFailure;
use crate::safety::SafetyHandle;
use crate::traits::WorkloadRunner;

/// Count the primes in `2..=ceiling` by trial division
pub fn count_primes(ceiling: u64) -> u64 {
    (2..=ceiling)
        .filter(|&n| {
            let mut divisor = 2;
            while divisor * divisor <= n {
                if n % divisor == 0 {
                    return false;
                }
                divisor += 1;
            }
            true
        })
        .count() as u64
}

/// Prime-search CPU workload; scores in iterations per second
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuRunner;

impl CpuRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WorkloadRunner for CpuRunner {
    fn kind(&self) -> WorkloadKind {
        WorkloadKind::Cpu
    }

    async fn run(
        &self,
        duration: Duration,
        intensity: Intensity,
        safety: &SafetyHandle,
    ) -> Result<BenchmarkResult, RunnerFailure> {
        let ceiling = intensity.prime_ceiling();
        let handle = safety.clone();

        let (outcome, primes_found) = tokio::task::spawn_blocking(move || {
            let mut primes_found = 0;
            let outcome = run_blocking_loop(duration, &handle, || {
                primes_found = black_box(count_primes(black_box(ceiling)));
            });
            (outcome, primes_found)
        })
        .await
        .map_err(|e| RunnerFailure::task(format!("cpu workload: {}", e)))?;

        debug!(iterations = outcome.iterations, ceiling, "cpu workload finished");

        let score = outcome.rate(outcome.iterations);
        Ok(outcome.into_result(
            WorkloadKind::Cpu,
            intensity,
            score,
            safety,
            WorkloadDetails::Cpu { prime_ceiling: ceiling, primes_found },
        ))
    }
}
