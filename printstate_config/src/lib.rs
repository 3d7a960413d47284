#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and sample-trace parsing for printstate.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//! - The sample CSV loader enforces the header and rejects non-finite values
//!   before they ever reach an estimator.
use serde::Deserialize;

/// Sample trace CSV schema.
///
/// Expected headers:
/// estimate
///
/// Example:
/// estimate
/// 3605.0
/// 3598.5
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SampleRow {
    pub estimate: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EstimatorCfg {
    /// Number of samples in each rolling window
    pub window_size: usize,
    /// Consecutive in-band updates required before the latch engages
    pub countdown: u64,
    /// Jitter band; the rolling mean distance must stay strictly inside (-threshold, threshold)
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

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RunnerCfg {
    /// Stop consuming samples as soon as the latch engages
    pub stop_when_stable: bool,
    /// Upper bound on consumed samples (0 = unbounded)
    pub max_samples: u64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub estimator: EstimatorCfg,
    pub runner: RunnerCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse, and validate a config file.
pub fn load_file(path: &std::path::Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    let cfg = load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))?;
    cfg.validate()
        .map_err(|e| eyre::eyre!("invalid configuration in {:?}: {}", path, e))?;
    Ok(cfg)
}

pub fn load_samples_csv(path: &std::path::Path) -> eyre::Result<Vec<f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open samples CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = ["estimate"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "samples CSV must have header 'estimate', got: {}",
            actual.join(",")
        );
    }

    let mut samples = Vec::new();
    for (idx, rec) in rdr.deserialize::<SampleRow>().enumerate() {
        match rec {
            Ok(row) if row.estimate.is_finite() => samples.push(row.estimate),
            Ok(row) => {
                eyre::bail!("invalid CSV row {}: non-finite estimate {}", idx + 2, row.estimate);
            }
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }

    Ok(samples)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Estimator
        if self.estimator.window_size == 0 {
            eyre::bail!("estimator.window_size must be >= 1");
        }
        if self.estimator.countdown == 0 {
            eyre::bail!("estimator.countdown must be >= 1");
        }
        if !self.estimator.threshold.is_finite() || self.estimator.threshold <= 0.0 {
            eyre::bail!("estimator.threshold must be finite and > 0");
        }

        // Logging
        if let Some(rotation) = self.logging.rotation.as_deref()
            && !matches!(rotation, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of: never, daily, hourly");
        }
        if let Some(level) = self.logging.level.as_deref()
            && !matches!(
                level.to_ascii_lowercase().as_str(),
                "error" | "warn" | "info" | "debug" | "trace"
            )
        {
            eyre::bail!("logging.level must be one of: error, warn, info, debug, trace");
        }

        // Runner: max_samples = 0 means unbounded; nothing else to check

        Ok(())
    }
}
