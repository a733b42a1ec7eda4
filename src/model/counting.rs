//! Counting estimator of the forward-backward asymmetry.
//!
//! `A = 2 N₊ / N - 1` with binomial error `σ = 2 sqrt(p (1 - p) / N)`,
//! `p = N₊ / N`, where `N₊` counts events with `cos θ > 0`. Events at
//! exactly `cos θ = 0` count as backward.
use crate::events::EventSample;

/// Closed-form asymmetry estimate used as a cross-check on the fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountingEstimate {
    pub asymmetry: f64,
    pub error: f64,
    pub forward: usize,
    pub total: usize,
}

impl CountingEstimate {
    /// Count forward events in `sample`. A validated sample is never empty,
    /// so `N > 0`.
    pub fn from_sample(sample: &EventSample) -> Self {
        let total = sample.len();
        let forward = sample.iter().filter(|&&c| c > 0.0).count();
        let n = total as f64;
        let p = forward as f64 / n;
        Self {
            asymmetry: 2.0 * p - 1.0,
            error: 2.0 * (p * (1.0 - p) / n).sqrt(),
            forward,
            total,
        }
    }

    /// Forward fraction `p = N₊ / N`.
    pub fn forward_fraction(&self) -> f64 {
        self.forward as f64 / self.total as f64
    }
}
