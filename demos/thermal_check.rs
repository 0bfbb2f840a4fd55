use std::error::Error;

use thermal_bench::analysis::PerformanceProfile;
use thermal_bench::config::BenchConfig;
use thermal_bench::report::check;
use thermal_bench::temperature::SensorReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    thermal_bench::logging::init();

    let config = BenchConfig::default();
    let reader = SensorReader::system();
    let snapshot = check(&reader, &config.monitoring).await;

    println!("Thermal Check");
    println!("=============");

    let reading = &snapshot.reading;
    println!("CPU:     {:>5.1}°C [{}]", reading.cpu_temp_c, snapshot.statuses.cpu);
    println!("Disk:    {:>5.1}°C [{}]", reading.disk_temp_c, snapshot.statuses.disk);
    println!(
        "Ambient: {:>5.1}°C [{}]{}",
        reading.ambient_temp_c,
        snapshot.statuses.ambient,
        if reading.ambient_estimated { " (estimated)" } else { "" }
    );

    println!("\nPerformance Profile:");
    println!("-------------------");
    let profile: PerformanceProfile = snapshot.profile;
    println!("{}", profile);
    println!("{}", profile.description());

    if snapshot.alerts.is_empty() {
        println!("\nNo alerts");
    } else {
        println!("\nAlerts:");
        for alert in &snapshot.alerts {
            println!("  {} {} at {:.1}°C", alert.channel, alert.status, alert.value);
        }
    }

    Ok(())
}
