// PROCRASTINATOR ERRORS
// LIBRARY-LEVEL FAILURES. THE BINARY WRAPS THESE IN anyhow WITH CONTEXT.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    // NO GROUND TRUTH EXISTS PAST THE DATASET'S OWN TIMEOUT
    #[error("timeout {timeout} outside [0, {ceiling}] (measurement ceiling)")]
    InvalidTimeout { timeout: f64, ceiling: f64 },

    #[error("{name} must be {expected}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("measurement table has no configurations or no instances")]
    EmptyPool,

    #[error("configuration {config} has {got} instances, expected {expected}")]
    RaggedMeasurements {
        config: usize,
        expected: usize,
        got: usize,
    },

    #[error("configuration {config} out of range (pool has {count})")]
    UnknownConfig { config: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
