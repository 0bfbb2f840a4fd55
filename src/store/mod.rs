//! Result store implementations
//!
//! * [`InMemoryResultStore`] keeps everything in process memory
//! * [`JsonLinesStore`] appends one JSON document per line to a file per collection
//!
//! Both implement [`ResultStore`](crate::traits::ResultStore) and return the most
//! recent documents first.

/// File names used by the JSON lines store
pub mod constants;

mod jsonl;
mod memory;


pub use jsonl::JsonLinesStore;
pub use memory::InMemoryResultStore;
