use std::sync::Arc;

use thermal_bench::config::BenchConfig;
use thermal_bench::report::compare;
use thermal_bench::scenario::ScenarioRunner;
use thermal_bench::store::JsonLinesStore;
use thermal_bench::temperature::{SensorReader, SysfsSensor};
use thermal_bench::traits::ResultStore;

#[tokio::main]
async fn main() {
    thermal_bench::logging::init();

    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Benchmark failed: {}", e);
            e.exit_code()
        },
    };
    std::process::exit(code);
}

async fn run() -> thermal_bench::Result<i32> {
    let name = std::env::args().nth(1).unwrap_or_else(|| "quick".to_string());
    let config = match std::env::var("THERMAL_BENCH_CONFIG") {
        Ok(path) => BenchConfig::from_file(path)?,
        Err(_) => BenchConfig::default(),
    };

    let store = Arc::new(JsonLinesStore::open(config.scratch_dir.join("thermal-bench")).await?);
    let reader = SensorReader::with_timeout(Arc::new(SysfsSensor::new()), config.sensor_timeout());
    let runner = ScenarioRunner::new(reader, store.clone(), config).with_default_runners();

    let result = runner.run_named(&name).await?;

    println!("\nBenchmark Summary: {}", result.scenario_name);
    println!("=================");
    for (index, test) in result.results.iter().enumerate() {
        println!(
            "{}. {} - {:.2} {} | avg {:.1}°C, max {:.1}°C | {}",
            index + 1,
            test.label(),
            test.score,
            test.unit,
            test.avg_temp_c,
            test.max_temp_c,
            if test.passed { "PASSED" } else { "FAILED" }
        );
    }
    if let Some(reason) = &result.stop_reason {
        println!("Stopped early: {}", reason);
    }
    println!("Overall score: {:.0}", result.total_score());
    println!("Status: {}", if result.passed { "PASSED" } else { "FAILED" });

    println!("\nRecent runs:");
    for entry in compare(store.as_ref() as &dyn ResultStore, 5).await? {
        println!(
            "  {} | score {:.0} | max {} | {}",
            entry.scenario_name,
            entry.total_score,
            entry.max_temp_c.map_or_else(|| "n/a".to_string(), |t| format!("{:.1}°C", t)),
            if entry.passed { "PASSED" } else { "FAILED" }
        );
    }

    Ok(result.exit_code())
}
