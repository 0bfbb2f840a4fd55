use std::time::Duration;

use async_trait::async_trait;

use crate::benchmark::{BenchmarkResult, Intensity, WorkloadKind};
use crate::error::RunnerFailure;
use crate::safety::SafetyHandle;

/// A benchmark workload gated by a safety session.
///
/// Runners check [`SafetyHandle::is_healthy`] at the top of every iteration and
/// return a partial result with `passed = false` once the session turns unsafe.
/// Infrastructure errors are returned as [`RunnerFailure`].
#[async_trait]
pub trait WorkloadRunner: Send + Sync {
    /// The kind of workload this runner executes
    fn kind(&self) -> WorkloadKind;

    /// Run the workload for `duration` at the given intensity
    async fn run(
        &self,
        duration: Duration,
        intensity: Intensity,
        safety: &SafetyHandle,
    ) -> Result<BenchmarkResult, RunnerFailure>;
}
