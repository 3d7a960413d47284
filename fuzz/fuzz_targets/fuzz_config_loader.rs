#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary TOML must parse-or-reject and validate-or-reject without panicking.
    if let Ok(cfg) = toml::from_str::<printstate_config::Config>(data) {
        if cfg.validate().is_ok() {
            let est = printstate_core::EstimatorCfg::from(&cfg.estimator);
            let _ = printstate_core::StabilityEstimator::with_config(est);
        }
    }
});
