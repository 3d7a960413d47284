//! `replay`: run a recorded trace through the estimator.

use std::path::Path;

use eyre::{Result, WrapErr};
use printstate_config::Config;
use printstate_core::runner::run_with;
use printstate_core::{EstimatorCfg, RunnerCfg, VecSource};
use printstate_traits::MonotonicClock;
use serde_json::json;

use crate::cli::EstimatorArgs;
use crate::output::print_summary;

pub fn run_replay(
    cfg: &Config,
    samples: &Path,
    overrides: EstimatorArgs,
    every: bool,
    json: bool,
) -> Result<()> {
    let mut est = overrides
        .builder(EstimatorCfg::from(&cfg.estimator))
        .try_build()?;
    let limits = RunnerCfg::from(&cfg.runner);

    let trace = printstate_config::load_samples_csv(samples)
        .wrap_err_with(|| format!("load samples {}", samples.display()))?;
    tracing::info!(samples = trace.len(), path = %samples.display(), "replaying trace");

    let mut source = VecSource::new(trace);
    let summary = run_with(&mut est, &mut source, limits, &MonotonicClock, |sample, e| {
        if !every {
            return;
        }
        match serde_json::to_value(e.snapshot()) {
            Ok(mut v) => {
                if let Some(obj) = v.as_object_mut() {
                    obj.insert("sample".to_string(), json!(sample));
                }
                println!("{v}");
            }
            Err(err) => tracing::warn!(error = %err, "failed to serialize update"),
        }
    })?;

    // --every output is JSON lines, so the summary joins them as one more line
    print_summary(&summary, json || every)
}
