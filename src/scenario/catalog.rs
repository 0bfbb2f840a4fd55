use std::time::Duration;

use once_cell::sync::Lazy;

use super::{ScenarioDefinition, TestSpec};
use crate::benchmark::{Intensity, WorkloadKind};

fn full_suite(intensity: Intensity) -> Vec<TestSpec> {
    WorkloadKind::ALL.iter().map(|&kind| TestSpec::new(kind, intensity)).collect()
}

static DEFAULT_SCENARIOS: Lazy<Vec<ScenarioDefinition>> = Lazy::new(|| {
    vec![
        ScenarioDefinition::new(
            "quick",
            "Quick Validation",
            Duration::from_secs(60),
            vec![TestSpec::new(WorkloadKind::Cpu, Intensity::Low), TestSpec::new(WorkloadKind::Memory, Intensity::Low)],
        ),
        ScenarioDefinition::new(
            "standard",
            "Standard Benchmark",
            Duration::from_secs(5 * 60),
            full_suite(Intensity::Medium),
        ),
        ScenarioDefinition::new(
            "intensive",
            "Intensive Stress Test",
            Duration::from_secs(10 * 60),
            full_suite(Intensity::High),
        ),
    ]
});

/// The built-in quick, standard and intensive scenarios
pub fn default_scenarios() -> Vec<ScenarioDefinition> {
    DEFAULT_SCENARIOS.clone()
}
