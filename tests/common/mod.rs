#![allow(dead_code)]

pub mod builders;

pub use builders::{fast_config, TestScenarioBuilder};
