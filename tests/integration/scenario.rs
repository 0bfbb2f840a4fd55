use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::common::{fast_config, TestScenarioBuilder};
use thermal_bench::benchmark::{DiskRunner, WorkloadKind};
use thermal_bench::scenario::{ScenarioRunner, StopKind, ThermalEventKind, INITIAL_UNSAFE_REASON};
use thermal_bench::store::InMemoryResultStore;
use thermal_bench::temperature::{SensorReader, SyntheticSensor};
use thermal_bench::{Error, RunnerFailure};

fn runner_with(sensor: &SyntheticSensor, store: &Arc<InMemoryResultStore>) -> ScenarioRunner {
    ScenarioRunner::new(SensorReader::new(Arc::new(sensor.clone())), store.clone(), fast_config())
        .with_default_runners()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cool_machine_completes_every_test() {
    let sensor = SyntheticSensor::constant(45.0);
    let store = Arc::new(InMemoryResultStore::new());
    let runner = runner_with(&sensor, &store);

    let result = runner.run_scenario(&TestScenarioBuilder::default().build()).await.unwrap();

    assert!(result.passed);
    assert!(!result.stopped_early);
    assert_eq!(result.stop_kind, None);
    assert_eq!(result.exit_code(), 0);

    let kinds: Vec<_> = result.results.iter().map(|r| r.test_kind).collect();
    assert_eq!(kinds, vec![WorkloadKind::Cpu, WorkloadKind::Memory]);
    for bench in &result.results {
        assert!(bench.passed);
        assert!(bench.iterations > 0);
        assert!(bench.score > 0.0);
        assert_eq!(bench.max_temp_c, 45.0);
    }

    assert_eq!(store.scenarios(), vec![result]);
    assert!(store.events().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_mid_run_spike_aborts_and_skips_remaining_tests() {
    let sensor = SyntheticSensor::constant(45.0);
    let store = Arc::new(InMemoryResultStore::new());
    let runner = runner_with(&sensor, &store);
    let scenario = TestScenarioBuilder::default().with_duration(Duration::from_secs(20)).build();

    let heater = sensor.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        heater.set_cpu(92.0);
    });

    let started = Instant::now();
    let result = runner.run_scenario(&scenario).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(5), "abort took {:?}", started.elapsed());
    assert!(!result.passed);
    assert!(result.stopped_early);
    assert_eq!(result.stop_kind, Some(StopKind::ThermalAbort));
    assert_eq!(result.exit_code(), 0);

    // Memory never ran
    assert_eq!(result.results.len(), 1);
    let cpu = &result.results[0];
    assert_eq!(cpu.test_kind, WorkloadKind::Cpu);
    assert!(!cpu.passed);
    assert!(cpu.abort_reason.as_deref().unwrap().contains("critical"));
    assert_eq!(cpu.max_temp_c, 92.0);
    assert!(result.stop_reason.as_deref().unwrap().contains("critical"));

    let events = store.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, ThermalEventKind::BenchmarkAbort);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_hot_machine_never_starts() {
    let sensor = SyntheticSensor::constant(88.0);
    let store = Arc::new(InMemoryResultStore::new());
    let runner = runner_with(&sensor, &store);

    let result = runner.run_scenario(&TestScenarioBuilder::default().build()).await.unwrap();

    assert!(!result.passed);
    assert!(result.results.is_empty());
    assert_eq!(result.stop_kind, Some(StopKind::InitialUnsafe));
    assert_eq!(result.stop_reason.as_deref(), Some(INITIAL_UNSAFE_REASON));
    assert_eq!(store.events()[0].kind, ThermalEventKind::InitialUnsafe);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_disk_failure_is_not_a_thermal_abort() {
    let dir = tempfile::tempdir().unwrap();
    let sensor = SyntheticSensor::constant(45.0);
    let store = Arc::new(InMemoryResultStore::new());
    let runner = runner_with(&sensor, &store)
        .with_runner(Arc::new(DiskRunner::with_scratch_file(dir.path().join("missing").join("scratch.tmp"))));
    let scenario = TestScenarioBuilder::new("broken-disk").with_test("cpu-low").with_test("disk-low").build();

    let err = runner.run_scenario(&scenario).await.unwrap_err();

    assert!(err.is_runner_failure());
    assert_eq!(err.exit_code(), 2);
    match err {
        Error::Runner { test, source, partial } => {
            assert_eq!(test, "disk-low");
            assert!(matches!(source, RunnerFailure::Io { .. }));
            assert_eq!(partial.stop_kind, Some(StopKind::RunnerFailure));
            assert_eq!(partial.exit_code(), 2);
            assert!(!partial.passed);
            // The CPU test before it still counts
            assert_eq!(partial.results.len(), 1);
            assert!(partial.results[0].passed);
            assert_eq!(store.scenarios(), vec![*partial]);
        },
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.events().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_disk_and_database_workloads_clean_up() {
    let dir = tempfile::tempdir().unwrap();
    let sensor = SyntheticSensor::constant(45.0);
    let store = Arc::new(InMemoryResultStore::new());
    let config = thermal_bench::config::BenchConfig { scratch_dir: dir.path().to_path_buf(), ..fast_config() };
    let runner =
        ScenarioRunner::new(SensorReader::new(Arc::new(sensor)), store, config).with_default_runners();
    let scenario = TestScenarioBuilder::new("io").with_test("disk-low").with_test("database-low").build();

    let result = runner.run_scenario(&scenario).await.unwrap();

    assert!(result.passed, "{result:?}");
    assert_eq!(result.results[0].unit, "MB/sec");
    assert_eq!(result.results[1].unit, "docs/sec");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_unknown_scenario_lists_catalog() {
    let sensor = SyntheticSensor::constant(45.0);
    let store = Arc::new(InMemoryResultStore::new());
    let runner = runner_with(&sensor, &store);

    let err = runner.run_named("marathon").await.unwrap_err();

    match err {
        Error::UnknownScenario { name, available } => {
            assert_eq!(name, "marathon");
            assert_eq!(available, "quick, standard, intensive");
        },
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.scenarios().is_empty());
}
