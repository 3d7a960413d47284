//! Human-readable error descriptions, exit codes and structured JSON errors.

use printstate_core::error::{BuildError, EstimatorError, RunError};

pub const EXIT_GENERIC: i32 = 1;
pub const EXIT_INVALID_CONFIG: i32 = 3;
pub const EXIT_INVALID_SAMPLE: i32 = 4;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(BuildError::InvalidConfig(msg)) = err.downcast_ref::<BuildError>() {
        return format!(
            "What happened: Invalid estimator parameters ({msg}).\nLikely causes: A zero window or countdown, or a threshold that is not a positive number.\nHow to fix: Adjust [estimator] in the config or the --window/--countdown/--threshold flags."
        );
    }

    if let Some(ee) = err.downcast_ref::<EstimatorError>() {
        return match ee {
            EstimatorError::NonFiniteSample(v) => format!(
                "What happened: The estimator rejected a non-finite sample ({v}) at {err}.\nLikely causes: The estimate producer emitted NaN or infinity.\nHow to fix: Filter the feed so only finite estimates reach the estimator."
            ),
            EstimatorError::SumOverflow { sample } => format!(
                "What happened: Sample {sample} would overflow the running total ({err}).\nLikely causes: Estimates are in the wrong unit or corrupted.\nHow to fix: Check the producer's units; estimates are expected in seconds."
            ),
        };
    }

    if let Some(RunError::Source { consumed, message }) = err.downcast_ref::<RunError>() {
        return format!(
            "What happened: The estimate feed failed after {consumed} samples ({message}).\nLikely causes: The input stream closed or produced unreadable data.\nHow to fix: Check the producer, then re-run."
        );
    }

    let msg = full_message(err);
    let lower = msg.to_ascii_lowercase();

    if is_config_failure(&lower) {
        return format!(
            "What happened: Configuration is invalid ({msg}).\nLikely causes: Out-of-range values or typos in the TOML.\nHow to fix: Run `printstate check` after editing the config."
        );
    }

    if lower.contains("samples csv must have header") {
        return "Invalid header in samples CSV. Expected a single 'estimate' column.".to_string();
    }

    if lower.contains("invalid csv row") {
        return format!(
            "What happened: The samples CSV contains an unusable value ({msg}).\nLikely causes: Empty cells, text, NaN or infinity in the estimate column.\nHow to fix: Fix or drop the reported row."
        );
    }

    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Every message in the report chain, outermost first.
fn full_message(err: &eyre::Report) -> String {
    err.chain()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

fn is_config_failure(lower: &str) -> bool {
    lower.contains("invalid configuration") || lower.contains("parse config")
}

/// Stable process exit code for an error.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if err.downcast_ref::<BuildError>().is_some() {
        return EXIT_INVALID_CONFIG;
    }
    if err.downcast_ref::<EstimatorError>().is_some() {
        return EXIT_INVALID_SAMPLE;
    }
    let lower = full_message(err).to_ascii_lowercase();
    if is_config_failure(&lower) {
        return EXIT_INVALID_CONFIG;
    }
    if lower.contains("invalid csv row") {
        return EXIT_INVALID_SAMPLE;
    }
    EXIT_GENERIC
}

fn reason_name(err: &eyre::Report) -> &'static str {
    if err.downcast_ref::<BuildError>().is_some() {
        return "InvalidConfig";
    }
    if let Some(ee) = err.downcast_ref::<EstimatorError>() {
        return match ee {
            EstimatorError::NonFiniteSample(_) => "NonFiniteSample",
            EstimatorError::SumOverflow { .. } => "SumOverflow",
        };
    }
    if err.downcast_ref::<RunError>().is_some() {
        return "SourceFailed";
    }
    match exit_code_for_error(err) {
        EXIT_INVALID_CONFIG => return "InvalidConfig",
        EXIT_INVALID_SAMPLE => return "InvalidSample",
        _ => {}
    }
    "Error"
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    json!({
        "reason": reason_name(err),
        "exit_code": exit_code_for_error(err),
        "message": humanize(err),
    })
    .to_string()
}
