use crate::core::types::ByteSize;

/// Prime search ceiling per unit of CPU work (low, medium, high)
pub const CPU_PRIME_CEILINGS: [u64; 3] = [10_000, 50_000, 100_000];

/// Elements in the array built per unit of memory work (low, medium, high)
pub const MEMORY_ARRAY_SIZES: [usize; 3] = [100_000, 500_000, 1_000_000];

/// Scratch file size per unit of disk work (low, medium, high)
pub const DISK_BUFFER_SIZES: [ByteSize; 3] = [ByteSize::from_kb(100), ByteSize::from_kb(500), ByteSize::from_kb(1024)];

/// Documents inserted per unit of database work (low, medium, high)
pub const DATABASE_BATCH_SIZES: [usize; 3] = [10, 50, 100];

/// Documents kept by an in-memory scratch collection before the oldest are evicted
pub const COLLECTION_CAPACITY: usize = 10_000;

/// Byte written to fill the disk scratch buffer
pub const DISK_FILL_BYTE: u8 = b'x';

/// File name prefix of the disk scratch file
pub const DISK_SCRATCH_PREFIX: &str = "thermal-bench-disk";

/// Documents get a random `value` in `0..DOCUMENT_VALUE_RANGE`
pub const DOCUMENT_VALUE_RANGE: f64 = 1_000.0;

/// Lower bound of the per-iteration range query
pub const QUERY_MIN_VALUE: f64 = 500.0;

/// Result cap of the per-iteration range query
pub const QUERY_LIMIT: usize = 100;

pub const UNIT_ITERATIONS: &str = "iterations/sec";
pub const UNIT_OPERATIONS: &str = "ops/sec";
pub const UNIT_THROUGHPUT: &str = "MB/sec";
pub const UNIT_DOCUMENTS: &str = "docs/sec";
