//! minimizer — parameter handling, MIGRAD/HESSE/MINOS and fit results.
//!
//! Purpose
//! -------
//! Provide the fit driver on top of the log-likelihood optimizer: named,
//! optionally bounded or fixed parameters; minimization with covariance and
//! EDM; and asymmetric errors from profile-likelihood scans.
//!
//! Key behaviors
//! -------------
//! - [`ParameterSet`] / [`Parameter`]: validated parameter descriptions.
//! - [`Minimizer::migrad`]: minimize, then run [`hesse`] for the covariance
//!   `V = 2 · up · H⁻¹` and `EDM = ½ gᵀ H⁻¹ g`.
//! - [`Minimizer::minos`]: profile scans for every free parameter.
//! - [`FitResult`]: the complete, immutable outcome handed to the report.
//!
//! Invariants & assumptions
//! ------------------------
//! - Models implement [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood)
//!   over the full parameter vector, in [`ParameterSet`] order.
//! - The objective reported everywhere in this module is `-ℓ`.
//!
//! Conventions
//! -----------
//! - Fit-quality problems (degraded covariance, EDM above target, invalid
//!   MINOS sides) are data in [`FitResult`], never errors.
//!
//! Testing notes
//! -------------
//! - Gaussian toy likelihoods with known minima, variances and split
//!   widths cover each stage; the integration suite fits the angular model.

pub mod hesse;
pub mod migrad;
pub mod minos;
pub mod options;
pub mod parameters;
pub mod result;
pub mod subspace;

pub use self::hesse::{HesseOutcome, hesse, invert_hessian};
pub use self::migrad::Minimizer;
pub use self::options::{ErrorDef, MinimizerOptions};
pub use self::parameters::{ParamTransform, Parameter, ParameterSet};
pub use self::result::{CovarianceStatus, FitResult, MinosError, ParameterResult};
pub use self::subspace::SubspaceLikelihood;
