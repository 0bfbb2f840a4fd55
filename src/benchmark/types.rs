use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::constants::*;
use crate::core::types::ByteSize;
use crate::error::{Error, Result};

/// The resource a workload stresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadKind {
    Cpu,
    Memory,
    Disk,
    Database,
}

impl WorkloadKind {
    pub const ALL: [WorkloadKind; 4] =
        [WorkloadKind::Cpu, WorkloadKind::Memory, WorkloadKind::Disk, WorkloadKind::Database];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Cpu => "cpu",
            WorkloadKind::Memory => "memory",
            WorkloadKind::Disk => "disk",
            WorkloadKind::Database => "database",
        }
    }

    /// Unit of the score reported by this workload
    pub fn unit(&self) -> &'static str {
        match self {
            WorkloadKind::Cpu => UNIT_ITERATIONS,
            WorkloadKind::Memory => UNIT_OPERATIONS,
            WorkloadKind::Disk => UNIT_THROUGHPUT,
            WorkloadKind::Database => UNIT_DOCUMENTS,
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkloadKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(WorkloadKind::Cpu),
            "memory" | "mem" => Ok(WorkloadKind::Memory),
            "disk" | "io" => Ok(WorkloadKind::Disk),
            "database" | "db" | "mongodb" | "mongo" => Ok(WorkloadKind::Database),
            other => Err(Error::invalid_test_spec(format!("unknown workload '{}'", other))),
        }
    }
}

/// How heavy each unit of work is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    fn index(&self) -> usize {
        match self {
            Intensity::Low => 0,
            Intensity::Medium => 1,
            Intensity::High => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }

    pub fn prime_ceiling(&self) -> u64 {
        CPU_PRIME_CEILINGS[self.index()]
    }

    pub fn array_size(&self) -> usize {
        MEMORY_ARRAY_SIZES[self.index()]
    }

    pub fn buffer_size(&self) -> ByteSize {
        DISK_BUFFER_SIZES[self.index()]
    }

    pub fn batch_size(&self) -> usize {
        DATABASE_BATCH_SIZES[self.index()]
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "light" | "basic" => Ok(Intensity::Low),
            "medium" | "standard" => Ok(Intensity::Medium),
            "high" | "stress" => Ok(Intensity::High),
            other => Err(Error::invalid_test_spec(format!("unknown intensity '{}'", other))),
        }
    }
}

/// Runner-specific counters for one benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkloadDetails {
    Cpu { prime_ceiling: u64, primes_found: u64 },
    Memory { array_size: usize },
    Disk { writes: u64, reads: u64, file_size: ByteSize },
    Database { inserted: u64, queries: u64, aggregations: u64, batch_size: usize },
}

/// Outcome of one workload run.
///
/// A thermal abort is not an error: the result carries `passed = false` and the
/// safety monitor's reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub test_kind: WorkloadKind,
    pub intensity: Intensity,
    /// Wall-clock time actually spent, in milliseconds
    pub duration_ms: f64,
    pub iterations: u64,
    pub score: f64,
    pub unit: String,
    pub avg_temp_c: f64,
    pub max_temp_c: f64,
    pub passed: bool,
    pub abort_reason: Option<String>,
    pub details: WorkloadDetails,
}

impl BenchmarkResult {
    /// `"cpu-low"` style label
    pub fn label(&self) -> String {
        format!("{}-{}", self.test_kind, self.intensity)
    }
}

/// A document written by the database workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkDocument {
    pub timestamp: SystemTime,
    pub test_data: String,
    pub value: f64,
    pub iteration: u64,
    pub index: usize,
}

impl BenchmarkDocument {
    /// A document with a random value, tagged with its batch position
    pub fn random(iteration: u64, index: usize) -> Self {
        Self {
            timestamp: SystemTime::now(),
            test_data: format!("benchmark-{}-{}", iteration, index),
            value: fastrand::f64() * DOCUMENT_VALUE_RANGE,
            iteration,
            index,
        }
    }
}

/// Result of averaging `value` over a collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueAggregate {
    pub avg: f64,
    pub count: usize,
}
