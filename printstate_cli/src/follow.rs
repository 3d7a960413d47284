//! `follow`: read estimates from stdin and report stability changes live.
//!
//! A reader thread owns stdin and forwards lines over a bounded channel; the
//! main thread drives the runner and polls a shutdown flag set by Ctrl-C.

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};
use eyre::{Result, WrapErr};
use printstate_config::Config;
use printstate_core::runner::run_with;
use printstate_core::{EstimatorCfg, RunnerCfg, StabilityState};
use printstate_traits::{BoxError, EstimateSource, MonotonicClock};

use crate::cli::EstimatorArgs;
use crate::output::{print_summary, print_transition};

const CHANNEL_CAPACITY: usize = 1024;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Estimate source fed by the stdin reader thread.
pub struct ChannelSource {
    rx: Receiver<std::io::Result<String>>,
    shutdown: Arc<AtomicBool>,
    line_no: u64,
}

impl ChannelSource {
    pub fn new(rx: Receiver<std::io::Result<String>>, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            rx,
            shutdown,
            line_no: 0,
        }
    }
}

impl EstimateSource for ChannelSource {
    fn next_estimate(&mut self) -> Result<Option<f64>, BoxError> {
        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                return Ok(None);
            }
            let line = match self.rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => line?,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Ok(None),
            };
            self.line_no += 1;
            let text = line.trim();
            // blank lines and comments
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            return match text.parse::<f64>() {
                Ok(v) => Ok(Some(v)),
                Err(e) => {
                    let line_no = self.line_no;
                    Err(format!("line {line_no}: invalid estimate {text:?}: {e}").into())
                }
            };
        }
    }
}

fn spawn_stdin_reader(tx: crossbeam_channel::Sender<std::io::Result<String>>) -> Result<()> {
    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        })
        .wrap_err("spawn stdin reader")?;
    Ok(())
}

pub fn run_follow(cfg: &Config, overrides: EstimatorArgs, json: bool) -> Result<()> {
    let mut est = overrides
        .builder(EstimatorCfg::from(&cfg.estimator))
        .try_build()?;
    let limits = RunnerCfg::from(&cfg.runner);

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = shutdown.clone();
        ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
            .wrap_err("install Ctrl-C handler")?;
    }

    let (tx, rx) = bounded(CHANNEL_CAPACITY);
    spawn_stdin_reader(tx)?;
    let mut source = ChannelSource::new(rx, shutdown.clone());

    let mut last = est.state();
    let mut print_err = None;
    let summary = run_with(&mut est, &mut source, limits, &MonotonicClock, |sample, e| {
        let state = e.state();
        if same_kind(last, state) {
            return;
        }
        last = state;
        if let Err(err) = print_transition(e, sample, json) {
            print_err.get_or_insert(err);
        }
    })?;
    if let Some(err) = print_err {
        return Err(err);
    }

    if shutdown.load(Ordering::Relaxed) {
        tracing::info!(consumed = summary.consumed, "interrupted");
    }
    print_summary(&summary, json)
}

fn same_kind(a: StabilityState, b: StabilityState) -> bool {
    a.name() == b.name()
}
