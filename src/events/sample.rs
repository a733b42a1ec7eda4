//! Validated event sample of decay-angle cosines.
//!
//! Purpose
//! -------
//! Hold the per-event `cos θ` values that every downstream stage reads. The
//! sample is built once, validated once, and then only borrowed.
//!
//! Invariants & assumptions
//! ------------------------
//! - Non-empty.
//! - Every value is finite and lies in `[-1, 1]`.
//!
//! Conventions
//! -----------
//! - Event order is file order.
//! - [`SampleMeta`] records how the sample was obtained; it never changes
//!   the values.
use crate::events::errors::{DataError, DataResult};
use ndarray::Array1;

/// Provenance of an [`EventSample`].
///
/// - `records_read`: complete records consumed from the input.
/// - `truncated`: `true` when loading stopped at the capacity limit with
///   records left unread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleMeta {
    pub records_read: usize,
    pub truncated: bool,
}

/// Immutable, validated sequence of `cos θ` values.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSample {
    cos_theta: Array1<f64>,
    meta: SampleMeta,
}

impl EventSample {
    /// Validate `cos_theta` and wrap it with its provenance.
    ///
    /// # Errors
    /// - [`DataError::EmptySample`] when no values are given.
    /// - [`DataError::InvalidCosTheta`] for the first value that is
    ///   non-finite or outside `[-1, 1]`.
    pub fn new(cos_theta: Array1<f64>, meta: SampleMeta) -> DataResult<Self> {
        if cos_theta.is_empty() {
            return Err(DataError::EmptySample);
        }
        for (index, &value) in cos_theta.iter().enumerate() {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(DataError::InvalidCosTheta { index, value });
            }
        }
        Ok(Self { cos_theta, meta })
    }

    /// Sample built from in-memory values, e.g. simulated events.
    pub fn from_values(values: Vec<f64>) -> DataResult<Self> {
        let records_read = values.len();
        Self::new(Array1::from(values), SampleMeta { records_read, truncated: false })
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.cos_theta
    }

    pub fn meta(&self) -> SampleMeta {
        self.meta
    }

    pub fn len(&self) -> usize {
        self.cos_theta.len()
    }

    /// Always `false` for a constructed sample; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.cos_theta.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.cos_theta.iter()
    }
}
