/// Fallback CPU temperature when no sensor answers, in degrees Celsius
pub const DEFAULT_CPU_TEMPERATURE: f64 = 45.0;

/// Fallback disk temperature when no sensor answers, in degrees Celsius
pub const DEFAULT_DISK_TEMPERATURE: f64 = 35.0;

/// Estimated ambient temperature is the CPU temperature minus this offset
pub const AMBIENT_ESTIMATE_OFFSET: f64 = 15.0;

/// Estimated ambient temperature never goes below this floor
pub const AMBIENT_ESTIMATE_FLOOR: f64 = 25.0;

/// Upper bound on a single channel read before the fallback value is used
pub const DEFAULT_SENSOR_TIMEOUT_MS: u64 = 1_000;

/// Readings outside this range are treated as sensor faults
pub const PLAUSIBLE_TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = -40.0..=150.0;

/// Number of readings kept per channel in a session history
pub const HISTORY_SIZE: usize = 60;

/// Root of the Linux sysfs class tree
pub const SYSFS_CLASS_ROOT: &str = "/sys/class";

/// hwmon driver names that report the CPU package temperature
pub const CPU_HWMON_NAMES: &[&str] = &["coretemp", "k10temp", "zenpower", "cpu_thermal"];

/// hwmon driver names that report a drive temperature
pub const DISK_HWMON_NAMES: &[&str] = &["nvme", "drivetemp"];

/// hwmon driver names that report the ACPI (in-case) temperature
pub const AMBIENT_HWMON_NAMES: &[&str] = &["acpitz"];

//
// Monitoring mode thresholds
//
pub const MONITORING_CPU_SAFE: f64 = 70.0;
pub const MONITORING_CPU_WARNING: f64 = 80.0;
pub const MONITORING_CPU_CRITICAL: f64 = 90.0;
pub const MONITORING_CPU_MAX: f64 = 95.0;

pub const MONITORING_DISK_SAFE: f64 = 45.0;
pub const MONITORING_DISK_WARNING: f64 = 55.0;
pub const MONITORING_DISK_CRITICAL: f64 = 65.0;
pub const MONITORING_DISK_MAX: f64 = 70.0;

pub const MONITORING_AMBIENT_SAFE: f64 = 30.0;
pub const MONITORING_AMBIENT_WARNING: f64 = 35.0;
pub const MONITORING_AMBIENT_CRITICAL: f64 = 40.0;
pub const MONITORING_AMBIENT_MAX: f64 = 45.0;

//
// Benchmarking mode thresholds: workloads stop before the monitor's emergency limits
//
pub const BENCHMARK_CPU_SAFE: f64 = 65.0;
pub const BENCHMARK_CPU_WARNING: f64 = 75.0;
pub const BENCHMARK_CPU_CRITICAL: f64 = 85.0;
pub const BENCHMARK_CPU_MAX: f64 = 90.0;

pub const BENCHMARK_DISK_SAFE: f64 = 40.0;
pub const BENCHMARK_DISK_WARNING: f64 = 50.0;
pub const BENCHMARK_DISK_CRITICAL: f64 = 60.0;
pub const BENCHMARK_DISK_MAX: f64 = 65.0;
