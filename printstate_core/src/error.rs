use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimatorError {
    #[error("sample must be a finite number, got {0}")]
    NonFiniteSample(f64),
    #[error("sample {sample} would overflow the running total")]
    SumOverflow { sample: f64 },
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

#[derive(Debug, Error, Clone)]
pub enum RunError {
    #[error("estimate source failed after {consumed} samples: {message}")]
    Source { consumed: u64, message: String },
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
