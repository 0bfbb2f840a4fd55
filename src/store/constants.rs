/// File holding scenario results
pub const SCENARIOS_FILE: &str = "benchmark-results.jsonl";

/// File holding thermal events
pub const EVENTS_FILE: &str = "thermal-events.jsonl";

/// File holding logged readings
pub const READINGS_FILE: &str = "thermal-readings.jsonl";
