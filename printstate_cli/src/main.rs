//! `printstate` command-line entry point.

mod cli;
mod error_fmt;
mod follow;
mod logging;
mod output;
mod replay;

use clap::Parser;
use eyre::Result;
use printstate_config::Config;

use crate::cli::{Cli, Commands, JSON_MODE};

fn main() {
    // clap prints usage and exits with 2 on bad arguments
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = color_eyre::install() {
        eprintln!("failed to install error reporter: {e}");
    }

    if let Err(e) = run(cli) {
        let code = error_fmt::exit_code_for_error(&e);
        tracing::error!(code, error = %e, "command failed");
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", error_fmt::format_error_json(&e));
        } else {
            eprintln!("{}", error_fmt::humanize(&e));
        }
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = match &cli.config {
        Some(path) => printstate_config::load_file(path)?,
        None => Config::default(),
    };

    let _log_guard = logging::init(cli.json, cli.log_level.as_deref(), &cfg.logging)?;
    tracing::debug!(config = ?cli.config, "configuration loaded");

    match cli.cmd {
        Commands::Replay {
            samples,
            estimator,
            every,
        } => replay::run_replay(&cfg, &samples, estimator, every, cli.json),
        Commands::Follow { estimator } => follow::run_follow(&cfg, estimator, cli.json),
        Commands::Check => output::print_check(&cfg, cli.config.as_deref(), cli.json),
    }
}
