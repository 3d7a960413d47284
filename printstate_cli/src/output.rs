//! Text and JSON rendering for run summaries and effective config.

use std::path::Path;

use eyre::Result;
use printstate_config::Config;
use printstate_core::{EstimatorCfg, RunSummary, RunnerCfg, StabilityEstimator, StopReason};
use serde_json::json;

fn fmt_opt(v: Option<f64>, precision: usize) -> String {
    v.map_or_else(|| "-".to_string(), |x| format!("{x:.precision$}"))
}

fn stop_name(stop: StopReason) -> &'static str {
    match stop {
        StopReason::Exhausted => "exhausted",
        StopReason::Stable => "stable",
        StopReason::MaxSamples => "max_samples",
    }
}

pub fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(summary)?);
        return Ok(());
    }
    let s = &summary.final_state;
    println!("samples: {}", summary.consumed);
    println!("stop: {}", stop_name(summary.stop));
    match (summary.first_stable_at, summary.first_stable_ms) {
        (Some(n), Some(ms)) => println!("first stable: sample {n} after {ms} ms"),
        (Some(n), None) => println!("first stable: sample {n}"),
        _ => println!("first stable: never"),
    }
    println!("state: {}", s.state.name());
    println!("average_total: {}", fmt_opt(s.average_total, 3));
    println!("average_total_rolling: {}", fmt_opt(s.average_total_rolling, 3));
    println!("average_distance: {}", fmt_opt(s.average_distance, 6));
    println!("resets: {}", summary.resets);
    Ok(())
}

/// One line per state change in `follow`.
pub fn print_transition(est: &StabilityEstimator, sample: f64, json: bool) -> Result<()> {
    if json {
        let mut v = serde_json::to_value(est.snapshot())?;
        if let Some(obj) = v.as_object_mut() {
            obj.insert("sample".to_string(), json!(sample));
        }
        println!("{v}");
    } else {
        println!(
            "sample {}: {} (estimate {}, average {})",
            est.count(),
            est.state().name(),
            sample,
            fmt_opt(est.average_total(), 3)
        );
    }
    Ok(())
}

pub fn print_check(cfg: &Config, path: Option<&Path>, json: bool) -> Result<()> {
    let est = EstimatorCfg::from(&cfg.estimator);
    StabilityEstimator::with_config(est)?;
    let runner = RunnerCfg::from(&cfg.runner);

    if json {
        let v = json!({
            "config": path.map(|p| p.display().to_string()),
            "estimator": {
                "window_size": est.window_size,
                "countdown": est.countdown,
                "threshold": est.threshold,
            },
            "runner": {
                "stop_when_stable": runner.stop_when_stable,
                "max_samples": runner.max_samples,
            },
        });
        println!("{v}");
        return Ok(());
    }

    match path {
        Some(p) => println!("config: {} (ok)", p.display()),
        None => println!("config: built-in defaults"),
    }
    println!("estimator.window_size: {}", est.window_size);
    println!("estimator.countdown: {}", est.countdown);
    println!("estimator.threshold: {}", est.threshold);
    println!("runner.stop_when_stable: {}", runner.stop_when_stable);
    match runner.max_samples {
        Some(n) => println!("runner.max_samples: {n}"),
        None => println!("runner.max_samples: unbounded"),
    }
    Ok(())
}
