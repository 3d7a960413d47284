//! Test and helper mocks for printstate_core

use printstate_traits::{BoxError, EstimateSource, ManualClock};

/// Yields `ok_samples` copies of `value`, then fails on every further read.
pub struct FailingSource {
    pub value: f64,
    pub ok_samples: usize,
    served: usize,
}

impl FailingSource {
    pub fn new(value: f64, ok_samples: usize) -> Self {
        Self {
            value,
            ok_samples,
            served: 0,
        }
    }
}

impl EstimateSource for FailingSource {
    fn next_estimate(&mut self) -> Result<Option<f64>, BoxError> {
        if self.served < self.ok_samples {
            self.served += 1;
            Ok(Some(self.value))
        } else {
            Err(Box::new(std::io::Error::other("estimate feed closed")))
        }
    }
}

/// Wraps a source and advances a shared `ManualClock` by `step_ms` per read,
/// so runs see deterministic elapsed times.
pub struct TickingSource<S> {
    pub inner: S,
    pub clock: ManualClock,
    pub step_ms: u64,
}

impl<S: EstimateSource> EstimateSource for TickingSource<S> {
    fn next_estimate(&mut self) -> Result<Option<f64>, BoxError> {
        self.clock.advance_ms(self.step_ms);
        self.inner.next_estimate()
    }
}
