//! numerical_stability — stable transforms for bounded parameters.
//!
//! Purpose
//! -------
//! Collect the scalar transforms that map bounded fit parameters onto the
//! unconstrained line the solver works in, plus the small tolerances shared
//! by the covariance code.
//!
//! Key behaviors
//! -------------
//! - `safe_softplus` / `safe_softplus_inv` for one-sided bounds.
//! - `safe_logistic` / `safe_logit` for two-sided bounds.
//! - `COV_EPS` and `EIGEN_EPS` as the shared negligibility cutoffs.
//!
//! Conventions
//! -----------
//! - Pure `f64 → f64` helpers; no logging, no I/O, no panics.

pub mod transformations;

pub use self::transformations::{
    COV_EPS, EIGEN_EPS, LOGIT_EPS, safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
};

pub mod prelude {
    pub use super::transformations::{
        COV_EPS, EIGEN_EPS, safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
    };
}
