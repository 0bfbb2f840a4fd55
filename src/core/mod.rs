// Core modules
pub mod metrics;
pub mod types;

pub use metrics::{Metric, MetricSeries};
pub use types::{ByteSize, Percentage};
