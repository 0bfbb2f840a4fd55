use crate::scenario::ScenarioResult;

/// Infrastructure failure inside a workload's unit of work.
///
/// A `RunnerFailure` is never a thermal stop: thermal aborts are reported as a
/// [`BenchmarkResult`](crate::benchmark::BenchmarkResult) with `passed = false`.
#[derive(Debug, thiserror::Error)]
pub enum RunnerFailure {
    #[error("I/O error during {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Workload task failed: {0}")]
    Task(String),
}

impl RunnerFailure {
    pub(crate) fn io<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        RunnerFailure::Io { context: context.into(), source }
    }

    /// Failure reported by a [`DocumentStore`](crate::traits::DocumentStore) backend
    pub fn database<S: Into<String>>(msg: S) -> Self {
        RunnerFailure::Database(msg.into())
    }

    pub(crate) fn task<S: Into<String>>(msg: S) -> Self {
        RunnerFailure::Task(msg.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown scenario '{name}' (available: {available})")]
    UnknownScenario { name: String, available: String },

    #[error("No runner registered for workload '{0}'")]
    RunnerUnavailable(String),

    #[error("Invalid test spec: {0}")]
    InvalidTestSpec(String),

    #[error("Test '{test}' failed with an infrastructure error: {source}")]
    Runner {
        test: String,
        #[source]
        source: RunnerFailure,
        partial: Box<ScenarioResult>,
    },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn sensor_unavailable<S: Into<String>>(msg: S) -> Self {
        Error::SensorUnavailable(msg.into())
    }

    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub(crate) fn invalid_test_spec<S: Into<String>>(msg: S) -> Self {
        Error::InvalidTestSpec(msg.into())
    }

    pub(crate) fn persistence<S: Into<String>>(msg: S) -> Self {
        Error::Persistence(msg.into())
    }

    /// Whether this error came from a workload's infrastructure rather than from
    /// configuration or persistence.
    pub fn is_runner_failure(&self) -> bool {
        matches!(self, Error::Runner { .. })
    }

    /// Process exit code for a command that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Runner { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
