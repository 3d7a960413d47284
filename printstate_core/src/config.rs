//! Runtime configuration for the estimator and the host runner.
//!
//! These are plain structs used by `StabilityEstimator` and `runner::run`.
//! They are separate from the TOML-deserialized config in `printstate_config`.

/// Estimator parameters. Immutable once an estimator is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorCfg {
    /// Number of samples (and distances) kept in each rolling window. Must be >= 1.
    pub window_size: usize,
    /// Consecutive in-band updates needed after arming before `is_stable()` turns true.
    /// Must be >= 1.
    pub countdown: u64,
    /// Half-width of the jitter band. Must be finite and > 0.
    pub threshold: f64,
}

impl Default for EstimatorCfg {
    fn default() -> Self {
        Self {
            window_size: 250,
            countdown: 250,
            threshold: 0.1,
        }
    }
}

/// Host runner limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerCfg {
    /// Stop pulling samples the first time the latch engages.
    pub stop_when_stable: bool,
    /// Stop after this many samples. `None` = run until the source is exhausted.
    pub max_samples: Option<u64>,
}
