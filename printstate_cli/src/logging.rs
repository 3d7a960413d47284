//! Tracing subscriber setup: console on stderr, optional JSON-lines file.

use std::path::Path;

use eyre::{Result, WrapErr};
use printstate_config::Logging;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LEVEL: &str = "warn";

/// Install the global subscriber.
///
/// Filter precedence: `RUST_LOG`, then `--log-level`, then `[logging].level`.
/// The returned guard flushes the log file when dropped; hold it until exit.
pub fn init(json: bool, cli_level: Option<&str>, logging: &Logging) -> Result<Option<WorkerGuard>> {
    let level = cli_level
        .or(logging.level.as_deref())
        .unwrap_or(DEFAULT_LEVEL)
        .to_ascii_lowercase();
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(&level)
            .wrap_err_with(|| format!("invalid log level {level:?}"))?,
    };

    let (pretty, json_console) = if json {
        (
            None,
            Some(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            ),
        )
    } else {
        (
            Some(fmt::layer().with_writer(std::io::stderr).with_target(false)),
            None,
        )
    };

    let mut guard = None;
    let file_layer = match logging.file.as_deref() {
        Some(file) => {
            let appender = file_appender(Path::new(file), logging.rotation.as_deref())?;
            let (writer, g) = tracing_appender::non_blocking(appender);
            guard = Some(g);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json_console)
        .with(file_layer)
        .try_init()
        .wrap_err("install tracing subscriber")?;
    Ok(guard)
}

fn file_appender(path: &Path, rotation: Option<&str>) -> Result<rolling::RollingFileAppender> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let Some(name) = path.file_name() else {
        eyre::bail!("logging.file {path:?} has no file name");
    };
    let appender = match rotation.map(str::to_ascii_lowercase).as_deref() {
        Some("daily") => rolling::daily(dir, name),
        Some("hourly") => rolling::hourly(dir, name),
        _ => rolling::never(dir, name),
    };
    Ok(appender)
}
