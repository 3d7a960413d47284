pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

/// Error type returned by host-provided sources.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Producer of scalar estimates (for example successive total-print-time
/// predictions). `Ok(None)` marks the end of the stream.
pub trait EstimateSource {
    fn next_estimate(&mut self) -> Result<Option<f64>, BoxError>;
}

impl<S: EstimateSource + ?Sized> EstimateSource for Box<S> {
    fn next_estimate(&mut self) -> Result<Option<f64>, BoxError> {
        (**self).next_estimate()
    }
}
