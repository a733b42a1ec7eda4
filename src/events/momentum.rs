//! Momentum value types for one decay record.
//!
//! A record carries the three-momenta of the plus- and minus-charge
//! particles. Only the minus-charge polar angle enters the fit; the plus
//! momentum is kept so records stay complete and validated as a whole.
use crate::events::errors::{DataError, DataResult};

/// Cartesian three-momentum `(px, py, pz)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum3 {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
}

impl Momentum3 {
    pub fn new(px: f64, py: f64, pz: f64) -> Self {
        Self { px, py, pz }
    }

    /// Euclidean norm `|p|`.
    pub fn magnitude(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Cosine of the polar angle, `pz / |p|`, clamped to `[-1, 1]`.
    ///
    /// Returns `None` for a zero-length vector.
    pub fn cos_theta(&self) -> Option<f64> {
        let mag = self.magnitude();
        if mag > 0.0 { Some((self.pz / mag).clamp(-1.0, 1.0)) } else { None }
    }
}

/// The two momenta of one record, in file order `plus` then `minus`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumPair {
    pub plus: Momentum3,
    pub minus: Momentum3,
}

impl MomentumPair {
    /// Build a pair from the six raw fields of record `record`.
    ///
    /// # Errors
    /// - [`DataError::NonFiniteMomentum`] for the first NaN/±inf field.
    pub fn from_fields(record: usize, fields: &[f64; 6]) -> DataResult<Self> {
        for (field, &value) in fields.iter().enumerate() {
            if !value.is_finite() {
                return Err(DataError::NonFiniteMomentum { record, field, value });
            }
        }
        Ok(Self {
            plus: Momentum3::new(fields[0], fields[1], fields[2]),
            minus: Momentum3::new(fields[3], fields[4], fields[5]),
        })
    }

    /// `cos θ` of the minus-charge momentum.
    ///
    /// # Errors
    /// - [`DataError::ZeroMomentum`] if the minus momentum has zero length.
    pub fn cos_theta(&self, record: usize) -> DataResult<f64> {
        self.minus.cos_theta().ok_or(DataError::ZeroMomentum { record })
    }
}
