use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::constants::{COLLECTION_CAPACITY, QUERY_LIMIT, QUERY_MIN_VALUE};
use super::{
    should_abort, BenchmarkDocument, BenchmarkResult, Intensity, LoopOutcome, ValueAggregate, WorkloadDetails,
    WorkloadKind,
};
use crate::error::RunnerFailure;
use crate::safety::SafetyHandle;
use crate::traits::{DocumentStore, WorkloadRunner};

/// Document collection held in process memory.
///
/// Holds at most `capacity` documents; inserting past it evicts the oldest, so
/// a long run keeps a bounded working set and per-query cost stays flat.
#[derive(Debug, Clone)]
pub struct InMemoryCollection {
    docs: Arc<RwLock<VecDeque<BenchmarkDocument>>>,
    capacity: usize,
}

impl InMemoryCollection {
    /// A collection capped at [`COLLECTION_CAPACITY`] documents
    pub fn new() -> Self {
        Self::with_capacity(COLLECTION_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { docs: Arc::new(RwLock::new(VecDeque::new())), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }
}

impl Default for InMemoryCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryCollection {
    async fn clear(&self) -> Result<u64, RunnerFailure> {
        let mut docs = self.docs.write();
        let removed = docs.len() as u64;
        docs.clear();
        Ok(removed)
    }

    async fn insert_many(&self, batch: Vec<BenchmarkDocument>) -> Result<usize, RunnerFailure> {
        let inserted = batch.len();
        let mut docs = self.docs.write();
        docs.extend(batch);
        let overflow = docs.len().saturating_sub(self.capacity);
        docs.drain(..overflow);
        Ok(inserted)
    }

    async fn find_by_min_value(&self, min_value: f64, limit: usize) -> Result<Vec<BenchmarkDocument>, RunnerFailure> {
        Ok(self.docs.read().iter().filter(|doc| doc.value >= min_value).take(limit).cloned().collect())
    }

    async fn aggregate_values(&self) -> Result<ValueAggregate, RunnerFailure> {
        let docs = self.docs.read();
        let count = docs.len();
        let avg = if count == 0 { 0.0 } else { docs.iter().map(|doc| doc.value).sum::<f64>() / count as f64 };
        Ok(ValueAggregate { avg, count })
    }
}

#[derive(Debug, Default)]
struct DatabaseCounters {
    inserted: u64,
    queries: u64,
    aggregations: u64,
}

/// Insert/query/aggregate workload; scores in inserted documents per second
#[derive(Clone)]
pub struct DatabaseRunner {
    store: Arc<dyn DocumentStore>,
}

impl DatabaseRunner {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// A runner backed by a fresh [`InMemoryCollection`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryCollection::new()))
    }

    async fn exercise(
        &self,
        duration: Duration,
        intensity: Intensity,
        safety: &SafetyHandle,
        counters: &mut DatabaseCounters,
    ) -> Result<LoopOutcome, RunnerFailure> {
        let batch_size = intensity.batch_size();
        let started = Instant::now();
        let mut iterations = 0u64;

        loop {
            if let Some(reason) = should_abort(safety) {
                return Ok(LoopOutcome { iterations, elapsed: started.elapsed(), abort_reason: Some(reason) });
            }
            if started.elapsed() >= duration {
                break;
            }

            let batch = (0..batch_size).map(|index| BenchmarkDocument::random(iterations, index)).collect();
            counters.inserted += self.store.insert_many(batch).await? as u64;

            self.store.find_by_min_value(QUERY_MIN_VALUE, QUERY_LIMIT).await?;
            counters.queries += 1;

            if intensity != Intensity::Low {
                self.store.aggregate_values().await?;
                counters.aggregations += 1;
            }
            iterations += 1;

            // Stores that complete without suspending would otherwise starve the sampler
            tokio::task::yield_now().await;
        }

        Ok(LoopOutcome { iterations, elapsed: started.elapsed(), abort_reason: None })
    }
}

impl std::fmt::Debug for DatabaseRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseRunner").field("store", &"<dyn DocumentStore>").finish()
    }
}

#[async_trait]
impl WorkloadRunner for DatabaseRunner {
    fn kind(&self) -> WorkloadKind {
        WorkloadKind::Database
    }

    async fn run(
        &self,
        duration: Duration,
        intensity: Intensity,
        safety: &SafetyHandle,
    ) -> Result<BenchmarkResult, RunnerFailure> {
        self.store.clear().await?;

        let mut counters = DatabaseCounters::default();
        let exercised = self.exercise(duration, intensity, safety, &mut counters).await;

        // The scratch collection is emptied whatever happened above
        let cleanup = self.store.clear().await;
        let outcome = exercised?;
        if let Err(e) = cleanup {
            warn!(error = %e, "could not clear database scratch collection");
            return Err(e);
        }

        debug!(
            inserted = counters.inserted,
            queries = counters.queries,
            aggregations = counters.aggregations,
            "database workload finished"
        );

        let score = outcome.rate(counters.inserted);
        Ok(outcome.into_result(
            WorkloadKind::Database,
            intensity,
            score,
            safety,
            WorkloadDetails::Database {
                inserted: counters.inserted,
                queries: counters.queries,
                aggregations: counters.aggregations,
                batch_size: intensity.batch_size(),
            },
        ))
    }
}
