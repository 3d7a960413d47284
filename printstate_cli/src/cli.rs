//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use printstate_core::{EstimatorBuilder, EstimatorCfg};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(
    name = "printstate",
    version,
    about = "Print-time stability estimation"
)]
pub struct Cli {
    /// Path to config TOML (all sections optional)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results and logs as JSON instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG takes precedence,
    /// then this flag, then `[logging].level`, then `warn`
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Command-line overrides for `[estimator]`.
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct EstimatorArgs {
    /// Samples per rolling window
    #[arg(long, value_name = "N")]
    pub window: Option<usize>,
    /// Consecutive in-band updates before the latch engages
    #[arg(long, value_name = "N")]
    pub countdown: Option<u64>,
    /// Half-width of the stability band around zero
    #[arg(long, value_name = "X")]
    pub threshold: Option<f64>,
}

impl EstimatorArgs {
    /// Start from `base` and apply whichever flags were given.
    pub fn builder(&self, base: EstimatorCfg) -> EstimatorBuilder {
        let mut b = EstimatorBuilder::default().with_config(base);
        if let Some(n) = self.window {
            b = b.window_size(n);
        }
        if let Some(n) = self.countdown {
            b = b.countdown(n);
        }
        if let Some(t) = self.threshold {
            b = b.threshold(t);
        }
        b
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Feed a recorded estimate trace through the estimator
    Replay {
        /// CSV file with a single `estimate` column
        #[arg(long, value_name = "FILE")]
        samples: PathBuf,
        #[command(flatten)]
        estimator: EstimatorArgs,
        /// Print the estimator state after every sample (JSON lines)
        #[arg(long, action = ArgAction::SetTrue)]
        every: bool,
    },
    /// Read one estimate per line from stdin and report state changes
    Follow {
        #[command(flatten)]
        estimator: EstimatorArgs,
    },
    /// Validate the config and print the effective parameters
    Check,
}
