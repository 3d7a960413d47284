//! Bounded FIFO buffer used for the estimator's rolling windows.

use std::collections::VecDeque;

/// Holds at most `capacity` values, newest at the back. Pushing into a full
/// window evicts the oldest value; the newest is never dropped.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    buf: VecDeque<f64>,
    capacity: usize,
}

impl RollingWindow {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `value`, returning the evicted value when the window was full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.buf.len() == self.capacity {
            self.buf.pop_front()
        } else {
            None
        };
        self.buf.push_back(value);
        evicted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Arithmetic mean over the values currently held (divisor = current length).
    /// `None` when empty. Finite whenever every held value is finite, even if
    /// the plain sum would leave the `f64` range.
    pub fn mean(&self) -> Option<f64> {
        if self.buf.is_empty() {
            return None;
        }
        let len = self.buf.len() as f64;
        let sum: f64 = self.buf.iter().sum();
        if sum.is_finite() {
            return Some(sum / len);
        }
        // the mean lies within [min, max]; only rounding can push it past MAX
        let scaled: f64 = self.buf.iter().map(|v| v / len).sum();
        Some(scaled.clamp(f64::MIN, f64::MAX))
    }

    /// Mean, but only once the window has filled up.
    pub fn full_mean(&self) -> Option<f64> {
        if self.is_full() { self.mean() } else { None }
    }

    /// Oldest-to-newest view of the held values.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.buf.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut w = RollingWindow::new(3);
        assert_eq!(w.push(1.0), None);
        assert_eq!(w.push(2.0), None);
        assert_eq!(w.push(3.0), None);
        assert!(w.is_full());
        assert_eq!(w.push(4.0), Some(1.0));
        assert_eq!(w.iter().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
        assert_eq!(w.len(), 3);
    }

    #[test]
    fn mean_uses_current_length() {
        let mut w = RollingWindow::new(4);
        assert_eq!(w.mean(), None);
        w.push(1.0);
        w.push(2.0);
        assert_eq!(w.mean(), Some(1.5));
        assert_eq!(w.full_mean(), None);
        w.push(3.0);
        w.push(6.0);
        assert_eq!(w.full_mean(), Some(3.0));
    }

    #[test]
    fn mean_survives_sum_overflow() {
        let mut w = RollingWindow::new(3);
        for v in [f64::MAX, f64::MAX, f64::MAX] {
            w.push(v);
        }
        assert_eq!(w.full_mean(), Some(f64::MAX));

        let mut w = RollingWindow::new(2);
        w.push(f64::MIN);
        w.push(f64::MIN);
        assert_eq!(w.mean(), Some(f64::MIN));
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut w = RollingWindow::new(0);
        assert_eq!(w.capacity(), 1);
        w.push(5.0);
        assert_eq!(w.push(7.0), Some(5.0));
        assert_eq!(w.full_mean(), Some(7.0));
    }
}
