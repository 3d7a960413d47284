//! Stability latch state reported after each estimator update.

use serde::Serialize;

/// Where the stability latch currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityState {
    /// Jitter unknown or out of band; the counter is unset.
    Unarmed,
    /// Jitter in band; counting consecutive in-band updates.
    Armed(u64),
    /// Counter reached the countdown; `is_stable()` is true.
    Latched(u64),
}

impl StabilityState {
    /// Classify a raw counter against the configured countdown.
    pub fn from_counter(counter: Option<u64>, countdown: u64) -> Self {
        match counter {
            None => Self::Unarmed,
            Some(n) if n >= countdown => Self::Latched(n),
            Some(n) => Self::Armed(n),
        }
    }

    #[inline]
    pub fn is_latched(&self) -> bool {
        matches!(self, Self::Latched(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unarmed => "unarmed",
            Self::Armed(_) => "armed",
            Self::Latched(_) => "latched",
        }
    }
}
