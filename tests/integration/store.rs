use std::sync::Arc;
use std::time::Duration;

use crate::common::{fast_config, TestScenarioBuilder};
use thermal_bench::report::{compare, load_report, ThermalLogger};
use thermal_bench::scenario::{ScenarioRunner, ThermalEventKind};
use thermal_bench::store::JsonLinesStore;
use thermal_bench::temperature::{SafetyThresholds, ScriptedSensor, SensorReader, SyntheticSensor};
use thermal_bench::traits::ResultStore;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_runs_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonLinesStore::open(dir.path()).await.unwrap());
    let runner = ScenarioRunner::new(SensorReader::new(Arc::new(SyntheticSensor::constant(45.0))), store, fast_config())
        .with_default_runners();

    let first = runner.run_scenario(&TestScenarioBuilder::new("first").with_test("cpu-low").build()).await.unwrap();
    let second = runner.run_scenario(&TestScenarioBuilder::new("second").with_test("memory-low").build()).await.unwrap();

    let reopened = JsonLinesStore::open(dir.path()).await.unwrap();
    let stored = reopened.recent_results(10).await.unwrap();
    let names: Vec<_> = stored.iter().map(|r| r.scenario_name.as_str()).collect();
    assert_eq!(names, vec!["second", "first"]);
    assert_eq!(stored[0].results.len(), second.results.len());
    assert_eq!(stored[1].started_at, first.started_at);

    let entries = compare(&reopened, 10).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].scenario_name, "second");
    assert_eq!(entries[1].scenario_name, "first");
    assert_eq!(entries[1].total_score, first.total_score());
    assert!(entries.iter().all(|entry| entry.passed));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_logging_session_feeds_report() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonLinesStore::open(dir.path()).await.unwrap());
    let reader = SensorReader::new(Arc::new(ScriptedSensor::new(vec![50.0, 60.0, 70.0, 96.0])));
    let logger = ThermalLogger::new(reader, store.clone(), SafetyThresholds::monitoring(), Duration::from_millis(10));

    let summary = logger.run(10).await;

    assert_eq!(summary.samples, 4);
    assert_eq!(summary.max_cpu_c, 96.0);
    assert_eq!(summary.emergency.as_ref().map(|e| e.kind), Some(ThermalEventKind::EmergencyShutdown));

    let report = load_report(store.as_ref(), 100).await.unwrap();
    assert_eq!(report.count, 4);
    let cpu = report.cpu.unwrap();
    assert_eq!(cpu.max, 96.0);
    assert_eq!(cpu.min, 50.0);
    assert_eq!(cpu.avg, 69.0);
    assert_eq!(report.recent_events.len(), 1);
    assert_eq!(report.recent_events[0].kind, ThermalEventKind::EmergencyShutdown);
}

#[tokio::test]
async fn test_empty_store_reports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonLinesStore::open(dir.path().join("fresh")).await.unwrap();

    let report = load_report(&store, 10).await.unwrap();

    assert_eq!(report.count, 0);
    assert!(report.cpu.is_none());
    assert!(compare(&store, 10).await.unwrap().is_empty());
}
