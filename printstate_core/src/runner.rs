//! Host-side driver: pull estimates from a source into an estimator.
//!
//! The estimator itself never logs; this is where latch transitions become
//! tracing events and where milestones get timestamped.

use eyre::WrapErr;
use printstate_traits::{Clock, EstimateSource};
use serde::Serialize;

use crate::config::{EstimatorCfg, RunnerCfg};
use crate::error::{Result, RunError};
use crate::estimator::{EstimatorSnapshot, StabilityEstimator};
use crate::status::StabilityState;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The source returned `None`.
    Exhausted,
    /// The latch engaged and `stop_when_stable` was set.
    Stable,
    /// `max_samples` were consumed.
    MaxSamples,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Samples accepted by the estimator during this run.
    pub consumed: u64,
    pub stop: StopReason,
    /// Estimator sample count at which the latch first engaged during this run.
    pub first_stable_at: Option<u64>,
    /// Milliseconds from run start to the first latch.
    pub first_stable_ms: Option<u64>,
    /// How many times an engaged latch was knocked back to unarmed.
    pub resets: u64,
    pub final_state: EstimatorSnapshot,
}

/// Tracks latch transitions across updates and emits tracing events for them.
#[derive(Debug, Default)]
pub struct TransitionLog {
    prev: Option<StabilityState>,
    pub first_stable_at: Option<u64>,
    pub first_stable_ms: Option<u64>,
    pub resets: u64,
}

impl TransitionLog {
    /// Start tracking from an estimator's current state.
    pub fn starting_from(state: StabilityState) -> Self {
        Self {
            prev: Some(state),
            ..Self::default()
        }
    }

    /// Record the state after sample number `n`; returns true if the state
    /// kind (unarmed / armed / latched) changed.
    pub fn observe(&mut self, n: u64, elapsed_ms: u64, state: StabilityState) -> bool {
        let prev = self.prev.replace(state).unwrap_or(StabilityState::Unarmed);
        if prev.name() == state.name() {
            return false;
        }
        match (prev, state) {
            (_, StabilityState::Latched(counter)) => {
                if self.first_stable_at.is_none() {
                    self.first_stable_at = Some(n);
                    self.first_stable_ms = Some(elapsed_ms);
                }
                tracing::info!(sample = n, counter, elapsed_ms, "estimate stable");
            }
            (StabilityState::Latched(counter), StabilityState::Unarmed) => {
                self.resets += 1;
                tracing::warn!(sample = n, counter, "stability latch reset");
            }
            (_, StabilityState::Armed(_)) => {
                tracing::debug!(sample = n, "stability armed");
            }
            (_, StabilityState::Unarmed) => {
                tracing::debug!(sample = n, "stability disarmed");
            }
        }
        true
    }
}

/// Build a fresh estimator from `estimator` and run it over `source`.
pub fn run<S, C>(
    source: &mut S,
    estimator: EstimatorCfg,
    limits: RunnerCfg,
    clock: &C,
) -> Result<RunSummary>
where
    S: EstimateSource + ?Sized,
    C: Clock,
{
    let mut est = StabilityEstimator::with_config(estimator)?;
    run_with(&mut est, source, limits, clock, |_, _| {})
}

/// Drive an existing estimator, calling `on_update(sample, &estimator)` after
/// every accepted sample.
pub fn run_with<S, C, F>(
    est: &mut StabilityEstimator,
    source: &mut S,
    limits: RunnerCfg,
    clock: &C,
    mut on_update: F,
) -> Result<RunSummary>
where
    S: EstimateSource + ?Sized,
    C: Clock,
    F: FnMut(f64, &StabilityEstimator),
{
    let epoch = clock.now();
    let mut log = TransitionLog::starting_from(est.state());
    let mut consumed: u64 = 0;

    tracing::debug!(
        window_size = est.config().window_size,
        countdown = est.config().countdown,
        threshold = est.config().threshold,
        "run start"
    );

    let stop = loop {
        if limits.max_samples.is_some_and(|max| consumed >= max) {
            break StopReason::MaxSamples;
        }

        let sample = match source.next_estimate() {
            Ok(Some(v)) => v,
            Ok(None) => break StopReason::Exhausted,
            Err(e) => {
                return Err(RunError::Source {
                    consumed,
                    message: e.to_string(),
                }
                .into());
            }
        };

        let state = est
            .update(sample)
            .wrap_err_with(|| format!("sample {} rejected", consumed + 1))?;
        consumed += 1;
        log.observe(est.count(), clock.ms_since(epoch), state);
        on_update(sample, est);

        if limits.stop_when_stable && est.is_stable() {
            break StopReason::Stable;
        }
    };

    tracing::debug!(consumed, ?stop, "run finished");

    Ok(RunSummary {
        consumed,
        stop,
        first_stable_at: log.first_stable_at,
        first_stable_ms: log.first_stable_ms,
        resets: log.resets,
        final_state: est.snapshot(),
    })
}
