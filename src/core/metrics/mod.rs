/// # Core Metrics Module
///
/// Timestamped measurements and bounded time series used by the thermal history.
///
/// ## Example
///
/// ```rust
/// use thermal_bench::core::metrics::{Metric, MetricSeries};
///
/// let mut cpu = MetricSeries::with_capacity(3);
/// for value in [41.0, 42.0, 43.0, 44.0] {
///     cpu.add(Metric::new(value));
/// }
///
/// // The oldest sample was evicted
/// assert_eq!(cpu.len(), 3);
/// assert_eq!(cpu.values().collect::<Vec<_>>(), vec![42.0, 43.0, 44.0]);
/// ```
use std::collections::VecDeque;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// A single metric measurement with a timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric<T> {
    /// The value of the metric
    pub value: T,
    /// The timestamp when the metric was recorded
    pub timestamp: SystemTime,
}

impl<T> Metric<T> {
    /// Creates a new metric with the current time as timestamp
    pub fn new(value: T) -> Self {
        Self { value, timestamp: SystemTime::now() }
    }

    /// Creates a new metric with a specific timestamp
    pub fn with_timestamp(value: T, timestamp: SystemTime) -> Self {
        Self { value, timestamp }
    }
}

/// A bounded series of metrics over time.
///
/// Once `capacity` samples are held, adding a new one evicts the oldest.
#[derive(Debug, Clone)]
pub struct MetricSeries<T> {
    metrics: VecDeque<Metric<T>>,
    capacity: usize,
}

impl<T> MetricSeries<T> {
    /// Creates a new empty series holding at most `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { metrics: VecDeque::with_capacity(capacity), capacity }
    }

    /// Adds a metric to the series, evicting the oldest one when full
    pub fn add(&mut self, metric: Metric<T>) {
        if self.metrics.len() == self.capacity {
            self.metrics.pop_front();
        }
        self.metrics.push_back(metric);
    }

    /// Returns the most recent metric in the series, if any
    pub fn latest(&self) -> Option<&Metric<T>> {
        self.metrics.back()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over the samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Metric<T>> {
        self.metrics.iter()
    }
}

impl<T: Copy> MetricSeries<T> {
    /// Iterates over the sample values, oldest first
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.metrics.iter().map(|metric| metric.value)
    }
}
