use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::analysis::PerformanceProfile;
use crate::temperature::{ScriptedSensor, SensorReader, SyntheticSensor, ThermalChannel, ThermalStatus};

const INTERVAL: Duration = Duration::from_millis(10);

fn monitor_for(sensor: impl crate::traits::ThermalSensor + 'static) -> SafetyMonitor {
    SafetyMonitor::new(SensorReader::new(Arc::new(sensor)), SafetyThresholds::benchmarking(), INTERVAL)
}

#[tokio::test(start_paused = true)]
async fn test_session_starts_with_a_reading() {
    let monitor = monitor_for(SyntheticSensor::constant(48.0));
    let mut session = monitor.start_session().await;
    let handle = session.handle();

    let health = handle.is_healthy();
    assert!(health.safe);
    assert!(health.reason.is_none());
    assert_eq!(health.last_reading.cpu_temp_c, 48.0);
    assert_eq!(session.state(), SessionState::Running);

    session.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_hot_initial_reading_is_unsafe_immediately() {
    let monitor = monitor_for(SyntheticSensor::constant(88.0));
    let session = monitor.start_session().await;

    let health = session.handle().is_healthy();
    assert!(!health.safe);
    assert!(health.reason.unwrap().contains("critical"));
    assert_eq!(session.state(), SessionState::Unsafe);
}

#[tokio::test(start_paused = true)]
async fn test_abort_is_prompt_and_terminal() {
    let sensor = ScriptedSensor::new(vec![50.0, 50.0, 92.0, 40.0, 40.0, 40.0]);
    let monitor = monitor_for(sensor.clone());
    let mut session = monitor.start_session().await;
    let handle = session.handle();

    // initial read, then ticks at 10ms (50) and 20ms (92)
    tokio::time::sleep(Duration::from_millis(25)).await;
    let health = handle.is_healthy();
    assert!(!health.safe);
    assert_eq!(health.last_reading.cpu_temp_c, 92.0);
    let violation = handle.violation().unwrap();
    assert_eq!(violation.channel, ThermalChannel::Cpu);

    // Cool readings afterwards never clear the flag
    tokio::time::sleep(Duration::from_millis(50)).await;
    let health = handle.is_healthy();
    assert!(!health.safe);
    assert_eq!(health.last_reading.cpu_temp_c, 40.0);
    assert!(health.reason.unwrap().contains("92.0"));
    assert_eq!(handle.state(), SessionState::Unsafe);

    session.stop().await;
    assert_eq!(handle.state(), SessionState::Stopped);
    assert!(!handle.is_healthy().safe);
}

#[tokio::test(start_paused = true)]
async fn test_stop_is_idempotent_and_halts_sampling() {
    let sensor = ScriptedSensor::new(vec![45.0]);
    let monitor = monitor_for(sensor.clone());
    let mut session = monitor.start_session().await;

    tokio::time::sleep(Duration::from_millis(35)).await;
    session.stop().await;
    let reads = sensor.reads();
    assert!(reads >= 4);

    session.stop().await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(sensor.reads(), reads);
    assert_eq!(session.state(), SessionState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_drop_aborts_sampling() {
    let sensor = ScriptedSensor::new(vec![45.0]);
    let monitor = monitor_for(sensor.clone());
    let session = monitor.start_session().await;
    let handle = session.handle();

    drop(session);
    let reads = sensor.reads();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(sensor.reads(), reads);
    assert!(handle.is_healthy().safe);
}

#[tokio::test(start_paused = true)]
async fn test_cpu_stats_cover_the_session() {
    let sensor = ScriptedSensor::new(vec![40.0, 50.0, 60.0]);
    let monitor = monitor_for(sensor);
    let mut session = monitor.start_session().await;

    tokio::time::sleep(Duration::from_millis(25)).await;
    session.stop().await;

    let stats = session.handle().cpu_stats();
    assert_eq!(stats.samples, 3);
    assert_eq!(stats.avg, 50.0);
    assert_eq!(stats.max, 60.0);
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_tracks_trend_and_profile() {
    let ramp: Vec<f64> = (0..12).map(|i| 40.0 + 2.0 * i as f64).collect();
    let monitor = SafetyMonitor::new(
        SensorReader::new(Arc::new(ScriptedSensor::new(ramp))),
        SafetyThresholds::monitoring(),
        INTERVAL,
    );
    let mut session = monitor.start_session().await;
    let handle = session.handle();

    let first = handle.snapshot();
    assert_eq!(first.samples, 1);
    assert_eq!(first.cpu_trend, ThermalTrend::InsufficientData);

    tokio::time::sleep(Duration::from_millis(115)).await;
    let snapshot = handle.snapshot();
    session.stop().await;

    assert_eq!(snapshot.samples, 12);
    assert_eq!(snapshot.reading.cpu_temp_c, 62.0);
    assert_eq!(snapshot.cpu_trend, ThermalTrend::RisingFast);
    assert_eq!(snapshot.disk_trend, ThermalTrend::Stable);
    assert_eq!(snapshot.statuses.cpu, ThermalStatus::Safe);
    assert_eq!(snapshot.profile, PerformanceProfile::Cool);
}

#[tokio::test(start_paused = true)]
async fn test_handle_is_shared_across_tasks() {
    let sensor = SyntheticSensor::constant(50.0);
    let monitor = monitor_for(sensor.clone());
    let mut session = monitor.start_session().await;
    let handle = session.handle();

    let watcher = tokio::spawn(async move {
        while handle.is_healthy().safe {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        handle.is_healthy().reason
    });

    sensor.set_disk(61.0);
    let reason = watcher.await.unwrap().unwrap();
    session.stop().await;

    assert!(reason.starts_with("Disk"));
}

#[test]
fn test_history_is_bounded() {
    let mut history = ThermalHistory::with_capacity(3);
    for cpu in [40.0, 41.0, 42.0, 43.0] {
        history.record(&crate::temperature::ThermalReading::new(cpu, 35.0, 25.0));
    }

    assert_eq!(history.len(), 3);
    assert_eq!(history.cpu().values().collect::<Vec<_>>(), vec![41.0, 42.0, 43.0]);
    assert_eq!(history.cpu_trend(), ThermalTrend::InsufficientData);
}
