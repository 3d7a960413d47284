//! Builder for `StabilityEstimator`.
//!
//! Every parameter is optional and falls back to `EstimatorCfg::default()`;
//! `try_build()` validates the combination and reports a typed `BuildError`
//! inside the returned report.

use crate::config::EstimatorCfg;
use crate::error::{BuildError, Result};
use crate::estimator::StabilityEstimator;

#[derive(Debug, Default, Clone)]
pub struct EstimatorBuilder {
    window_size: Option<usize>,
    countdown: Option<u64>,
    threshold: Option<f64>,
}

impl EstimatorBuilder {
    pub fn window_size(mut self, n: usize) -> Self {
        self.window_size = Some(n);
        self
    }

    pub fn countdown(mut self, n: u64) -> Self {
        self.countdown = Some(n);
        self
    }

    pub fn threshold(mut self, t: f64) -> Self {
        self.threshold = Some(t);
        self
    }

    /// Take every parameter from `cfg`, replacing anything set earlier.
    pub fn with_config(self, cfg: EstimatorCfg) -> Self {
        Self {
            window_size: Some(cfg.window_size),
            countdown: Some(cfg.countdown),
            threshold: Some(cfg.threshold),
        }
    }

    /// Resolve the effective config without validating it.
    pub fn resolve(&self) -> EstimatorCfg {
        let defaults = EstimatorCfg::default();
        EstimatorCfg {
            window_size: self.window_size.unwrap_or(defaults.window_size),
            countdown: self.countdown.unwrap_or(defaults.countdown),
            threshold: self.threshold.unwrap_or(defaults.threshold),
        }
    }

    pub fn try_build(self) -> Result<StabilityEstimator> {
        let cfg = self.resolve();
        validate(&cfg)?;
        Ok(StabilityEstimator::from_valid_cfg(cfg))
    }
}

/// Check estimator parameters; the error names the offending field.
pub fn validate(cfg: &EstimatorCfg) -> std::result::Result<(), BuildError> {
    if cfg.window_size == 0 {
        return Err(BuildError::InvalidConfig("window_size must be >= 1"));
    }
    if cfg.countdown == 0 {
        return Err(BuildError::InvalidConfig("countdown must be >= 1"));
    }
    if !cfg.threshold.is_finite() {
        return Err(BuildError::InvalidConfig("threshold must be finite"));
    }
    if cfg.threshold <= 0.0 {
        return Err(BuildError::InvalidConfig("threshold must be > 0"));
    }
    Ok(())
}
