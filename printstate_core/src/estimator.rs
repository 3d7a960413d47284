//! Rolling stability estimator.
//!
//! Smooths a stream of noisy scalar estimates (typically successive
//! total-print-time predictions) and latches a "stable" signal once the
//! estimate has stopped moving.
//!
//! ## Update order
//!
//! 1. Remember the cumulative mean before the sample.
//! 2. Accumulate the sample into the running total, the sample window, and the count.
//! 3. From the second update on, push `|mean_after - mean_before|` into the
//!    distance window. This is the change of the *cumulative* mean, so the
//!    jitter shrinks like O(1/count) even for non-stationary streams.
//! 4. Once the distance window is full, compare its mean against the
//!    threshold band: in band arms (counter = 0) or advances the counter,
//!    out of band disarms (counter unset).

use serde::Serialize;

use crate::builder::EstimatorBuilder;
use crate::config::EstimatorCfg;
use crate::error::{EstimatorError, Result};
use crate::status::StabilityState;
use crate::window::RollingWindow;

#[derive(Debug, Clone)]
pub struct StabilityEstimator {
    cfg: EstimatorCfg,
    sum_total: f64,
    count: u64,
    totals: RollingWindow,
    distances: RollingWindow,
    stable_counter: Option<u64>,
}

/// Point-in-time view of every estimator getter, for hosts that ship state elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatorSnapshot {
    pub count: u64,
    pub sum_total: f64,
    pub average_total: Option<f64>,
    pub average_total_rolling: Option<f64>,
    pub average_distance: Option<f64>,
    pub stable_counter: Option<u64>,
    pub stable: bool,
    #[serde(serialize_with = "serialize_state_name")]
    pub state: StabilityState,
}

fn serialize_state_name<S: serde::Serializer>(
    state: &StabilityState,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(state.name())
}

impl Default for StabilityEstimator {
    fn default() -> Self {
        Self::from_valid_cfg(EstimatorCfg::default())
    }
}

impl StabilityEstimator {
    /// Start building an estimator; unset parameters fall back to `EstimatorCfg::default()`.
    pub fn builder() -> EstimatorBuilder {
        EstimatorBuilder::default()
    }

    /// Build with explicit parameters. Fails with `BuildError::InvalidConfig`
    /// if `window_size == 0`, `countdown == 0`, or `threshold` is not finite and positive.
    pub fn new(window_size: usize, countdown: u64, threshold: f64) -> Result<Self> {
        Self::builder()
            .window_size(window_size)
            .countdown(countdown)
            .threshold(threshold)
            .try_build()
    }

    /// Build from a runtime config, validating it first.
    pub fn with_config(cfg: EstimatorCfg) -> Result<Self> {
        Self::builder().with_config(cfg).try_build()
    }

    /// Caller must have validated `cfg`.
    pub(crate) fn from_valid_cfg(cfg: EstimatorCfg) -> Self {
        Self {
            cfg,
            sum_total: 0.0,
            count: 0,
            totals: RollingWindow::new(cfg.window_size),
            distances: RollingWindow::new(cfg.window_size),
            stable_counter: None,
        }
    }

    /// Feed one sample and return the resulting latch state.
    ///
    /// Non-finite samples, and samples that would push the running total out
    /// of the finite range, are rejected with `EstimatorError` and leave the
    /// estimator untouched. After an accepted sample every getter is finite.
    pub fn update(&mut self, sample: f64) -> Result<StabilityState> {
        if !sample.is_finite() {
            return Err(EstimatorError::NonFiniteSample(sample).into());
        }
        let sum_total = self.sum_total + sample;
        if !sum_total.is_finite() {
            return Err(EstimatorError::SumOverflow { sample }.into());
        }

        let old_mean = self.average_total();

        self.sum_total = sum_total;
        self.totals.push(sample);
        self.count += 1;

        if let (Some(before), Some(after)) = (old_mean, self.average_total()) {
            self.distances.push((after - before).abs());
        }

        let threshold = self.cfg.threshold;
        self.stable_counter = match self.average_distance() {
            Some(d) if -threshold < d && d < threshold => {
                Some(self.stable_counter.map_or(0, |n| n.saturating_add(1)))
            }
            _ => None,
        };

        Ok(self.state())
    }

    /// Cumulative mean of every accepted sample; `None` before the first update.
    pub fn average_total(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum_total / self.count as f64)
        }
    }

    /// Mean of the newest `window_size` samples; `None` until that many have arrived.
    pub fn average_total_rolling(&self) -> Option<f64> {
        self.totals.full_mean()
    }

    /// Mean of the newest `window_size` cumulative-mean distances; `None`
    /// until `window_size + 1` samples have arrived.
    pub fn average_distance(&self) -> Option<f64> {
        self.distances.full_mean()
    }

    pub fn is_stable(&self) -> bool {
        self.stable_counter.is_some_and(|n| n >= self.cfg.countdown)
    }

    pub fn state(&self) -> StabilityState {
        StabilityState::from_counter(self.stable_counter, self.cfg.countdown)
    }

    pub fn stable_counter(&self) -> Option<u64> {
        self.stable_counter
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum_total(&self) -> f64 {
        self.sum_total
    }

    pub fn config(&self) -> &EstimatorCfg {
        &self.cfg
    }

    /// Number of samples currently held in the rolling sample window.
    pub fn totals_len(&self) -> usize {
        self.totals.len()
    }

    /// Number of distances currently held in the rolling distance window.
    pub fn distances_len(&self) -> usize {
        self.distances.len()
    }

    pub fn snapshot(&self) -> EstimatorSnapshot {
        EstimatorSnapshot {
            count: self.count,
            sum_total: self.sum_total,
            average_total: self.average_total(),
            average_total_rolling: self.average_total_rolling(),
            average_distance: self.average_distance(),
            stable_counter: self.stable_counter,
            stable: self.is_stable(),
            state: self.state(),
        }
    }
}
