// Traits module
//
// All trait definitions used across the crate live here: the sensor seam, the
// storage seams and the workload runner contract.

pub mod hardware;
pub mod storage;
pub mod workload;

pub use hardware::ThermalSensor;
pub use storage::{DocumentStore, ResultStore};
pub use workload::WorkloadRunner;

#[cfg(test)]
pub use hardware::MockThermalSensor;
#[cfg(test)]
pub use storage::{MockDocumentStore, MockResultStore};
