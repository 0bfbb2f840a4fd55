/// Samples averaged on each side of the trend comparison
pub const TREND_WINDOW: usize = 5;

/// Below this many samples no trend is computed
pub const MIN_TREND_SAMPLES: usize = TREND_WINDOW;

/// Below this many samples the trend is reported as stable
pub const FULL_TREND_SAMPLES: usize = TREND_WINDOW * 2;

/// Window delta above which a channel is heating (or cooling) fast, in °C
pub const FAST_TREND_DELTA: f64 = 5.0;

/// Window delta above which a channel is heating (or cooling), in °C
pub const TREND_DELTA: f64 = 2.0;
