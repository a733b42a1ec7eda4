//! loglik_optimizer — argmin-powered log-likelihood maximizer.
//!
//! Purpose
//! -------
//! Maximize log-likelihoods `ℓ(θ)` over a vector of free parameters.
//! Callers implement [`LogLikelihood`] and call [`maximize`], which runs
//! L-BFGS with a configurable line search, tolerances, and
//! finite-difference fallbacks.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] turns `ℓ(θ)` into the argmin cost
//!   `c(θ) = -ℓ(θ)`.
//! - [`maximize`] validates the start point with [`LogLikelihood::check`],
//!   builds the solver ([`builders`]), runs it ([`run::run_lbfgs`]) and
//!   returns an [`OptimOutcome`].
//! - [`finite_diff`] supplies gradients and Hessians when analytic
//!   derivatives are missing, and the cost Hessian used for covariance
//!   estimation.
//!
//! Invariants & assumptions
//! ------------------------
//! - User code implements `ℓ(θ)` and `∇ℓ(θ)`, never the cost.
//! - `value`/`grad` report invalid inputs as [`OptError`] values, not panics.
//! - [`Tolerances`] and [`MLEOptions`] are validated on construction.
//!
//! Conventions
//! -----------
//! - `θ` is an unconstrained vector ([`Theta`]); bounds and fixed parameters
//!   are handled by the `minimizer` layer before values reach this module.
//! - Errors bubble up as [`OptResult<T>`](crate::optimization::errors::OptResult).
//!
//! Testing notes
//! -------------
//! - Submodule tests cover sign conventions ([`adapter`]), solver wiring
//!   ([`builders`]), derivative helpers ([`finite_diff`]), validation
//!   ([`validation`]) and outcome construction ([`traits`]).
//! - [`api`] tests run full maximizations on a quadratic toy likelihood.
//!
//! [`OptError`]: crate::optimization::errors::OptError

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
