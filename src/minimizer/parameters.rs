//! Fit parameters, parameter sets and bound transforms.
//!
//! Purpose
//! -------
//! Describe the named parameters of a fit (start value, step, optional
//! bounds, fixed flag) and the map between a parameter's external value
//! and the unconstrained internal coordinate the solver moves.
//!
//! Key behaviors
//! -------------
//! - [`Parameter`] validates itself on construction: finite value, positive
//!   step, `lower < upper`, start value strictly inside the bounds.
//! - [`ParameterSet`] keeps insertion order and rejects duplicate names.
//! - [`ParamTransform`] maps bounded parameters onto ℝ:
//!   - two bounds: `x = l + (u - l) · logistic(z)`,
//!   - lower bound only: `x = l + softplus(z)`,
//!   - upper bound only: `x = u - softplus(z)`,
//!   - none: identity.
//!
//! Conventions
//! -----------
//! - "External" is the value the user sees; "internal" is the solver
//!   coordinate. Fixed parameters never get an internal coordinate.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::Theta,
    numerical_stability::{safe_logistic, safe_logit, safe_softplus, safe_softplus_inv},
};

/// External ↔ internal coordinate map for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamTransform {
    Identity,
    Lower(f64),
    Upper(f64),
    Double(f64, f64),
}

impl ParamTransform {
    /// Internal coordinate of the external value `x`.
    pub fn to_internal(&self, x: f64) -> f64 {
        match *self {
            ParamTransform::Identity => x,
            ParamTransform::Lower(l) => safe_softplus_inv((x - l).max(f64::MIN_POSITIVE)),
            ParamTransform::Upper(u) => safe_softplus_inv((u - x).max(f64::MIN_POSITIVE)),
            ParamTransform::Double(l, u) => safe_logit((x - l) / (u - l)),
        }
    }

    /// External value of the internal coordinate `z`.
    pub fn to_external(&self, z: f64) -> f64 {
        match *self {
            ParamTransform::Identity => z,
            ParamTransform::Lower(l) => l + safe_softplus(z),
            ParamTransform::Upper(u) => u - safe_softplus(z),
            ParamTransform::Double(l, u) => l + (u - l) * safe_logistic(z),
        }
    }

    /// `dx/dz` at the internal coordinate `z`.
    pub fn derivative(&self, z: f64) -> f64 {
        match *self {
            ParamTransform::Identity => 1.0,
            ParamTransform::Lower(_) => safe_logistic(z),
            ParamTransform::Upper(_) => -safe_logistic(z),
            ParamTransform::Double(l, u) => {
                let s = safe_logistic(z);
                (u - l) * s * (1.0 - s)
            }
        }
    }
}

/// One named fit parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
    pub step: f64,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub fixed: bool,
}

impl Parameter {
    /// Free, unbounded parameter.
    ///
    /// # Errors
    /// - [`OptError::ValueOutsideBounds`] for a non-finite value.
    /// - [`OptError::InvalidStep`] unless `step` is finite and > 0.
    pub fn new(name: impl Into<String>, value: f64, step: f64) -> OptResult<Self> {
        let name = name.into();
        if !value.is_finite() {
            return Err(OptError::ValueOutsideBounds { name, value });
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(OptError::InvalidStep { name, step });
        }
        Ok(Self { name, value, step, lower: None, upper: None, fixed: false })
    }

    /// Attach optional bounds.
    ///
    /// # Errors
    /// - [`OptError::InvalidBounds`] for non-finite bounds or `lower >= upper`.
    /// - [`OptError::ValueOutsideBounds`] unless the value lies strictly
    ///   inside the bounds.
    pub fn with_bounds(mut self, lower: Option<f64>, upper: Option<f64>) -> OptResult<Self> {
        let bad = |name: &str| OptError::InvalidBounds {
            name: name.to_string(),
            lower: lower.unwrap_or(f64::NEG_INFINITY),
            upper: upper.unwrap_or(f64::INFINITY),
        };
        if lower.is_some_and(|l| !l.is_finite()) || upper.is_some_and(|u| !u.is_finite()) {
            return Err(bad(&self.name));
        }
        if let (Some(l), Some(u)) = (lower, upper) {
            if l >= u {
                return Err(bad(&self.name));
            }
        }
        let inside =
            lower.map_or(true, |l| self.value > l) && upper.map_or(true, |u| self.value < u);
        if !inside {
            return Err(OptError::ValueOutsideBounds { name: self.name, value: self.value });
        }
        self.lower = lower;
        self.upper = upper;
        Ok(self)
    }

    /// Mark the parameter as fixed at its current value.
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn is_bounded(&self) -> bool {
        self.lower.is_some() || self.upper.is_some()
    }

    pub fn transform(&self) -> ParamTransform {
        match (self.lower, self.upper) {
            (None, None) => ParamTransform::Identity,
            (Some(l), None) => ParamTransform::Lower(l),
            (None, Some(u)) => ParamTransform::Upper(u),
            (Some(l), Some(u)) => ParamTransform::Double(l, u),
        }
    }

    /// Clamp `x` into the parameter's bounds.
    pub fn clamp(&self, x: f64) -> f64 {
        let x = self.lower.map_or(x, |l| x.max(l));
        self.upper.map_or(x, |u| x.min(u))
    }
}

/// Ordered collection of uniquely named parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

impl ParameterSet {
    /// # Errors
    /// - [`OptError::DuplicateParameter`] if two parameters share a name.
    pub fn new(params: Vec<Parameter>) -> OptResult<Self> {
        for (i, p) in params.iter().enumerate() {
            if params[..i].iter().any(|q| q.name == p.name) {
                return Err(OptError::DuplicateParameter { name: p.name.clone() });
            }
        }
        Ok(Self { params })
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Parameter> {
        self.params.get(index)
    }

    /// # Errors
    /// - [`OptError::UnknownParameter`] if no parameter has this name.
    pub fn index_of(&self, name: &str) -> OptResult<usize> {
        self.params
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| OptError::UnknownParameter { name: name.to_string() })
    }

    /// Indices of the non-fixed parameters, in set order.
    pub fn free_indices(&self) -> Vec<usize> {
        self.params.iter().enumerate().filter(|(_, p)| !p.fixed).map(|(i, _)| i).collect()
    }

    /// Current external values of all parameters.
    pub fn values(&self) -> Theta {
        self.params.iter().map(|p| p.value).collect()
    }

    /// Copy with every value replaced by `values` (clamped into bounds).
    ///
    /// # Errors
    /// - [`OptError::ThetaLengthMismatch`] if lengths differ.
    pub fn with_values(&self, values: &Theta) -> OptResult<Self> {
        if values.len() != self.params.len() {
            return Err(OptError::ThetaLengthMismatch {
                expected: self.params.len(),
                actual: values.len(),
            });
        }
        let params = self
            .params
            .iter()
            .zip(values.iter())
            .map(|(p, &v)| Parameter { value: p.clamp(v), ..p.clone() })
            .collect();
        Ok(Self { params })
    }

    /// Copy with parameter `index` fixed at `value`.
    ///
    /// # Errors
    /// - [`OptError::UnknownParameter`] for an out-of-range index.
    pub fn with_fixed(&self, index: usize, value: f64) -> OptResult<Self> {
        let mut params = self.params.clone();
        let p = params
            .get_mut(index)
            .ok_or_else(|| OptError::UnknownParameter { name: format!("#{index}") })?;
        p.value = value;
        p.fixed = true;
        Ok(Self { params })
    }
}
