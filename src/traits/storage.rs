use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::benchmark::{BenchmarkDocument, ValueAggregate};
use crate::error::{Result, RunnerFailure};
use crate::scenario::{ScenarioResult, ThermalEvent};
use crate::temperature::ThermalReading;

/// Append-only archive for benchmark outcomes and thermal data.
///
/// The engine only ever writes scenario results and thermal events while a
/// benchmark is running; the read methods serve reporting.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persist a finished (or stopped) scenario
    async fn save_scenario(&self, result: &ScenarioResult) -> Result<()>;

    /// Persist a thermal event such as an abort or an emergency
    async fn save_event(&self, event: &ThermalEvent) -> Result<()>;

    /// Persist a single logged reading
    async fn save_reading(&self, reading: &ThermalReading) -> Result<()>;

    /// Most recent scenario results, newest first
    async fn recent_results(&self, limit: usize) -> Result<Vec<ScenarioResult>>;

    /// Most recent logged readings, newest first
    async fn recent_readings(&self, limit: usize) -> Result<Vec<ThermalReading>>;

    /// Most recent thermal events, newest first
    async fn recent_events(&self, limit: usize) -> Result<Vec<ThermalEvent>>;
}

/// Scratch collection targeted by the database workload.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Remove every document, returning how many were deleted
    async fn clear(&self) -> std::result::Result<u64, RunnerFailure>;

    /// Insert a batch of documents, returning how many were inserted
    async fn insert_many(&self, docs: Vec<BenchmarkDocument>) -> std::result::Result<usize, RunnerFailure>;

    /// Documents whose `value` is at least `min_value`, capped at `limit`
    async fn find_by_min_value(
        &self,
        min_value: f64,
        limit: usize,
    ) -> std::result::Result<Vec<BenchmarkDocument>, RunnerFailure>;

    /// Average `value` and document count over the whole collection
    async fn aggregate_values(&self) -> std::result::Result<ValueAggregate, RunnerFailure>;
}
