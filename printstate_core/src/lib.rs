#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Print-time stability estimation and printer telemetry records.
//!
//! ## Architecture
//!
//! - **Estimator**: rolling stability estimator over a stream of scalar
//!   estimates (`estimator`, built through `builder`)
//! - **Windows**: bounded FIFO buffers backing the rolling means (`window`)
//! - **Status**: stability latch state machine (`status`)
//! - **Records**: temperature and position telemetry containers
//!   (`temperature`, `position`)
//! - **Runner**: host-side driver pulling estimates from a
//!   `printstate_traits::EstimateSource` (`runner`, `source`)
//! - **Configuration**: runtime config structs and bridges from
//!   `printstate_config` (`config`, `conversions`)
//!
//! The estimator and records are single-owner values: no internal locking,
//! no I/O, no logging. Only the runner emits tracing events.

pub mod builder;
pub mod config;
pub mod conversions;
pub mod error;
pub mod estimator;
pub mod mocks;
pub mod position;
pub mod runner;
pub mod source;
pub mod status;
pub mod temperature;
pub mod window;

pub use builder::EstimatorBuilder;
pub use config::{EstimatorCfg, RunnerCfg};
pub use error::{BuildError, EstimatorError, RunError};
pub use estimator::{EstimatorSnapshot, StabilityEstimator};
pub use position::{Axis, PositionKey, PositionRecord};
pub use runner::{RunSummary, StopReason};
pub use source::VecSource;
pub use status::StabilityState;
pub use temperature::{TemperaturePair, TemperatureRecord, ToolId};
