//! `From` implementations bridging `printstate_config` types to `printstate_core` types.

use crate::config::{EstimatorCfg, RunnerCfg};

// ── EstimatorCfg ─────────────────────────────────────────────────────────────

impl From<&printstate_config::EstimatorCfg> for EstimatorCfg {
    fn from(c: &printstate_config::EstimatorCfg) -> Self {
        Self {
            window_size: c.window_size,
            countdown: c.countdown,
            threshold: c.threshold,
        }
    }
}

// ── RunnerCfg ────────────────────────────────────────────────────────────────

impl From<&printstate_config::RunnerCfg> for RunnerCfg {
    fn from(c: &printstate_config::RunnerCfg) -> Self {
        Self {
            stop_when_stable: c.stop_when_stable,
            max_samples: (c.max_samples > 0).then_some(c.max_samples),
        }
    }
}
