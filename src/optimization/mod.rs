//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the numerical engine beneath the minimizer: an argmin-backed
//! log-likelihood maximizer, finite-difference derivatives, stable
//! parameter transforms, and a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: maximize `ℓ(θ)` with L-BFGS, validate solver
//!   configuration, and compute cost Hessians at the optimum.
//! - `numerical_stability`: logistic/softplus transforms used to map
//!   bounded parameters into unconstrained solver space.
//! - `errors`: [`OptError`](errors::OptError) and
//!   [`OptResult`](errors::OptResult), including conversions from argmin
//!   errors.
//!
//! Conventions
//! -----------
//! - Solvers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`; outcomes are
//!   reported in terms of `ℓ`.
//! - This module does not log or print; the `minimizer` and `analysis`
//!   layers report progress.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
