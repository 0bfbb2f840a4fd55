use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::error::Error;
use crate::traits::MockThermalSensor;

#[test]
fn test_classification_is_monotonic() {
    let tables = [SafetyThresholds::monitoring(), SafetyThresholds::benchmarking()];

    for table in tables {
        for channel in ThermalChannel::ALL {
            let t = table.for_channel(channel);
            assert_eq!(classify(t.safe - 1.0, t), ThermalStatus::Safe);
            assert_eq!(classify(t.safe, t), ThermalStatus::Safe);
            assert_eq!(classify(t.safe + 0.5, t), ThermalStatus::Normal);
            assert_eq!(classify(t.warning, t), ThermalStatus::Warning);
            assert_eq!(classify(t.critical, t), ThermalStatus::Critical);
            assert_eq!(classify(t.max + 10.0, t), ThermalStatus::Critical);

            let mut previous = ThermalStatus::Safe;
            let mut value = t.safe - 20.0;
            while value <= t.max + 5.0 {
                let status = classify(value, t);
                assert!(status >= previous, "{} status dropped at {:.1}°C", channel, value);
                previous = status;
                value += 0.25;
            }
        }
    }
}

#[test]
fn test_threshold_tables_are_valid() {
    SafetyThresholds::monitoring().validate().unwrap();
    SafetyThresholds::benchmarking().validate().unwrap();

    let monitoring = SafetyThresholds::monitoring();
    let benchmarking = SafetyThresholds::benchmarking();
    assert!(benchmarking.cpu.critical < monitoring.cpu.critical);
    assert!(benchmarking.disk.critical < monitoring.disk.critical);
}

#[test]
fn test_unordered_thresholds_are_rejected() {
    let mut table = SafetyThresholds::monitoring();
    table.disk.warning = table.disk.critical;

    let err = table.validate().unwrap_err();
    assert!(matches!(err, Error::Config(ref msg) if msg.contains("Disk")));
}

#[test]
fn test_evaluate_reports_first_critical_channel() {
    let table = SafetyThresholds::benchmarking();

    let hot_cpu = ThermalReading::new(92.0, 61.0, 20.0);
    let violation = table.evaluate(&hot_cpu).unwrap();
    assert_eq!(violation.channel, ThermalChannel::Cpu);
    assert_eq!(violation.threshold, 85.0);
    assert!(violation.reason().contains("critical"));
    assert!(violation.reason().contains("92.0"));

    let hot_disk = ThermalReading::new(50.0, 60.0, 20.0);
    assert_eq!(table.evaluate(&hot_disk).map(|v| v.channel), Some(ThermalChannel::Disk));

    let fine = ThermalReading::new(84.9, 59.9, 20.0);
    assert!(table.evaluate(&fine).is_none());
}

#[test]
fn test_estimated_ambient_is_not_enforced() {
    let table = SafetyThresholds::benchmarking();

    // cpu 70 -> ambient estimate 55, far above the ambient critical limit
    let reading = ThermalReading::with_estimated_ambient(70.0, 35.0);
    assert_eq!(reading.ambient_temp_c, 55.0);
    assert!(table.evaluate(&reading).is_none());

    let measured = ThermalReading::new(70.0, 35.0, 55.0);
    assert_eq!(table.evaluate(&measured).map(|v| v.channel), Some(ThermalChannel::Ambient));
}

#[test]
fn test_exceeds_max_uses_absolute_limit() {
    let table = SafetyThresholds::monitoring();
    let reading = ThermalReading::new(93.0, 40.0, 25.0);

    assert!(table.evaluate(&reading).is_some());
    assert!(table.exceeds_max(&reading).is_none());

    let melting = ThermalReading::new(95.0, 40.0, 25.0);
    let violation = table.exceeds_max(&melting).unwrap();
    assert_eq!(violation.limit, ThresholdLimit::Max);
    assert!(violation.reason().contains("maximum"));
}

#[test]
fn test_ambient_estimate_floor() {
    assert_eq!(estimate_ambient(45.0), 30.0);
    assert_eq!(estimate_ambient(30.0), 25.0);
}

#[tokio::test]
async fn test_reader_substitutes_defaults_on_failure() {
    let mut sensor = MockThermalSensor::new();
    sensor.expect_cpu_temperature().returning(|| Err(Error::sensor_unavailable("no cpu")));
    sensor.expect_disk_temperature().returning(|| Err(Error::sensor_unavailable("no disk")));
    sensor.expect_ambient_temperature().returning(|| Err(Error::sensor_unavailable("no ambient")));

    let reading = SensorReader::new(Arc::new(sensor)).read().await;

    assert_eq!(reading.cpu_temp_c, 45.0);
    assert_eq!(reading.disk_temp_c, 35.0);
    assert_eq!(reading.ambient_temp_c, 30.0);
    assert!(reading.ambient_estimated);
}

#[tokio::test]
async fn test_reader_passes_through_valid_values() {
    let mut sensor = MockThermalSensor::new();
    sensor.expect_cpu_temperature().returning(|| Ok(61.5));
    sensor.expect_disk_temperature().returning(|| Ok(f64::NAN));
    sensor.expect_ambient_temperature().returning(|| Ok(27.0));

    let reading = SensorReader::new(Arc::new(sensor)).read().await;

    assert_eq!(reading.cpu_temp_c, 61.5);
    assert_eq!(reading.disk_temp_c, 35.0);
    assert_eq!(reading.ambient_temp_c, 27.0);
    assert!(!reading.ambient_estimated);
}

struct StuckSensor;

#[async_trait]
impl ThermalSensor for StuckSensor {
    async fn cpu_temperature(&self) -> Result<f64> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(99.0)
    }

    async fn disk_temperature(&self) -> Result<f64> {
        Ok(33.0)
    }

    async fn ambient_temperature(&self) -> Result<f64> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(99.0)
    }
}

#[tokio::test(start_paused = true)]
async fn test_reader_times_out_slow_channels() {
    let reader = SensorReader::with_timeout(Arc::new(StuckSensor), Duration::from_millis(250));

    let started = tokio::time::Instant::now();
    let reading = reader.read().await;

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(reading.cpu_temp_c, 45.0);
    assert_eq!(reading.disk_temp_c, 33.0);
    assert!(reading.ambient_estimated);
}

#[tokio::test]
async fn test_sysfs_sensor_reads_hwmon_tree() {
    let root = tempfile::tempdir().unwrap();
    let write = |rel: &str, contents: &str| {
        let path = root.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    };
    write("hwmon/hwmon0/name", "acpitz\n");
    write("hwmon/hwmon0/temp1_input", "27800\n");
    write("hwmon/hwmon1/name", "coretemp\n");
    write("hwmon/hwmon1/temp1_input", "52000\n");
    write("hwmon/hwmon2/name", "nvme\n");
    write("hwmon/hwmon2/temp1_input", "38850\n");

    let sensor = SysfsSensor::with_root(root.path());
    assert_eq!(sensor.cpu_temperature().await.unwrap(), 52.0);
    assert_eq!(sensor.disk_temperature().await.unwrap(), 38.85);
    assert_eq!(sensor.ambient_temperature().await.unwrap(), 27.8);
}

#[tokio::test]
async fn test_sysfs_sensor_falls_back_to_thermal_zone() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("hwmon")).unwrap();
    std::fs::create_dir_all(root.path().join("thermal/thermal_zone0")).unwrap();
    std::fs::write(root.path().join("thermal/thermal_zone0/temp"), "48000").unwrap();

    let sensor = SysfsSensor::with_root(root.path());
    assert_eq!(sensor.cpu_temperature().await.unwrap(), 48.0);
    assert!(matches!(sensor.disk_temperature().await, Err(Error::SensorUnavailable(_))));
}

#[tokio::test]
async fn test_sysfs_sensor_rejects_implausible_values() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("hwmon/hwmon0")).unwrap();
    std::fs::write(root.path().join("hwmon/hwmon0/name"), "drivetemp").unwrap();
    std::fs::write(root.path().join("hwmon/hwmon0/temp1_input"), "255000").unwrap();

    let sensor = SysfsSensor::with_root(root.path());
    assert!(sensor.disk_temperature().await.is_err());
}

#[tokio::test]
async fn test_scripted_sensor_holds_last_value() {
    let sensor = ScriptedSensor::new(vec![40.0, 50.0]);

    assert_eq!(sensor.cpu_temperature().await.unwrap(), 40.0);
    assert_eq!(sensor.cpu_temperature().await.unwrap(), 50.0);
    assert_eq!(sensor.cpu_temperature().await.unwrap(), 50.0);
    assert_eq!(sensor.reads(), 3);
}

#[tokio::test]
async fn test_synthetic_sensor_can_fail() {
    let sensor = SyntheticSensor::new(60.0, 40.0, Some(24.0));
    let reader = SensorReader::new(Arc::new(sensor.clone()));

    assert_eq!(reader.read().await.ambient_temp_c, 24.0);

    sensor.fail_all(true);
    let reading = reader.read().await;
    assert_eq!(reading.cpu_temp_c, 45.0);
    assert!(reading.ambient_estimated);
}
