use std::time::Duration;

use thermal_bench::config::BenchConfig;
use thermal_bench::scenario::{ScenarioDefinition, TestSpec};

/// Config with sub-second sampling and no cooldown
pub fn fast_config() -> BenchConfig {
    BenchConfig { sampling_interval_ms: 20, cooldown_ms: 0, sensor_timeout_ms: 200, ..BenchConfig::default() }
}

/// Builder for creating ScenarioDefinition test instances
pub struct TestScenarioBuilder {
    name: String,
    duration: Duration,
    tests: Vec<TestSpec>,
}

impl TestScenarioBuilder {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), duration: Duration::from_millis(400), tests: Vec::new() }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_test(mut self, spec: &str) -> Self {
        self.tests.push(spec.parse().unwrap());
        self
    }

    pub fn build(self) -> ScenarioDefinition {
        let label = format!("{} (test)", self.name);
        ScenarioDefinition::new(self.name, label, self.duration, self.tests)
    }
}

impl Default for TestScenarioBuilder {
    fn default() -> Self {
        Self::new("e2e").with_test("cpu-low").with_test("memory-low")
    }
}
