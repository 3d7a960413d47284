//! In-memory estimate sources.

use printstate_traits::{BoxError, EstimateSource};

/// Replays a fixed list of estimates in order, then ends the stream.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    samples: std::vec::IntoIter<f64>,
}

impl VecSource {
    pub fn new(samples: Vec<f64>) -> Self {
        Self {
            samples: samples.into_iter(),
        }
    }

    /// Samples not yet handed out.
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl From<Vec<f64>> for VecSource {
    fn from(samples: Vec<f64>) -> Self {
        Self::new(samples)
    }
}

impl EstimateSource for VecSource {
    fn next_estimate(&mut self) -> Result<Option<f64>, BoxError> {
        Ok(self.samples.next())
    }
}
