//! Minimizer configuration: error definition and MIGRAD/MINOS budgets.
//!
//! Purpose
//! -------
//! Bundle the knobs of a fit in one validated struct: iteration cap,
//! convergence tolerance factor, error definition `up`, and the L-BFGS
//! settings forwarded to the optimizer.
//!
//! Key behaviors
//! -------------
//! - [`ErrorDef`] is the objective increase that defines a 1σ interval:
//!   0.5 for a negative log-likelihood, 1.0 for a χ². Other coverages come
//!   from the χ²₁ quantile via `statrs`.
//! - [`MinimizerOptions::mle_options`] derives the solver tolerances:
//!   gradient tolerance `1e-6 · tolerance`, `max_iter` iterations.
//! - [`MinimizerOptions::edm_target`] is `0.002 · tolerance · up`, the EDM
//!   below which a minimum counts as converged.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{LineSearcher, MLEOptions, Tolerances},
};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Objective increase defining the reported parameter errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorDef(f64);

impl ErrorDef {
    /// 1σ for a negative log-likelihood.
    pub const NLL_ONE_SIGMA: ErrorDef = ErrorDef(0.5);

    /// 1σ for a χ² objective.
    pub const CHI2_ONE_SIGMA: ErrorDef = ErrorDef(1.0);

    /// # Errors
    /// - [`OptError::InvalidErrorDef`] unless `up` is finite and > 0.
    pub fn new(up: f64) -> OptResult<Self> {
        if !(up.is_finite() && up > 0.0) {
            return Err(OptError::InvalidErrorDef { up });
        }
        Ok(Self(up))
    }

    /// `nσ` interval of a negative log-likelihood: `up = n² / 2`.
    pub fn for_nll_sigmas(n: f64) -> OptResult<Self> {
        Self::new(0.5 * n * n)
    }

    /// `nσ` interval of a χ² objective: `up = n²`.
    pub fn for_chi2_sigmas(n: f64) -> OptResult<Self> {
        Self::new(n * n)
    }

    /// Interval with coverage `cl` for one parameter of a negative
    /// log-likelihood: `up = χ²₁⁻¹(cl) / 2`.
    ///
    /// # Errors
    /// - [`OptError::InvalidErrorDef`] unless `0 < cl < 1`.
    pub fn for_nll_confidence(cl: f64) -> OptResult<Self> {
        if !(cl > 0.0 && cl < 1.0) {
            return Err(OptError::InvalidErrorDef { up: cl });
        }
        let chi2 = ChiSquared::new(1.0).map_err(|e| OptError::BackendError { text: e.to_string() })?;
        Self::new(0.5 * chi2.inverse_cdf(cl))
    }

    pub fn up(&self) -> f64 {
        self.0
    }
}

impl Default for ErrorDef {
    fn default() -> Self {
        Self::NLL_ONE_SIGMA
    }
}

/// Fit configuration.
///
/// Default: `max_iter = 500`, `tolerance = 1.0`, `error_def = 0.5`,
/// More–Thuente line search, default L-BFGS memory, not verbose.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizerOptions {
    pub max_iter: usize,
    pub tolerance: f64,
    pub error_def: ErrorDef,
    pub line_searcher: LineSearcher,
    pub lbfgs_mem: Option<usize>,
    pub verbose: bool,
}

impl MinimizerOptions {
    /// # Errors
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    /// - [`OptError::InvalidTolerance`] unless `tolerance` is finite and > 0.
    pub fn new(max_iter: usize, tolerance: f64, error_def: ErrorDef) -> OptResult<Self> {
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(OptError::InvalidTolerance {
                tol: tolerance,
                reason: "Tolerance factor must be finite and greater than zero.",
            });
        }
        Ok(Self { max_iter, tolerance, error_def, ..Self::default() })
    }

    pub fn with_line_searcher(mut self, line_searcher: LineSearcher) -> Self {
        self.line_searcher = line_searcher;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Solver options for one minimization under these settings.
    ///
    /// # Errors
    /// - Validation errors from [`Tolerances::new`] / [`MLEOptions::new`].
    pub fn mle_options(&self) -> OptResult<MLEOptions> {
        let tols = Tolerances::new(Some(1e-6 * self.tolerance), None, Some(self.max_iter))?;
        MLEOptions::new(tols, self.line_searcher, self.verbose, self.lbfgs_mem)
    }

    /// EDM below which a minimum counts as converged.
    pub fn edm_target(&self) -> f64 {
        0.002 * self.tolerance * self.error_def.up()
    }
}

impl Default for MinimizerOptions {
    fn default() -> Self {
        Self {
            max_iter: 500,
            tolerance: 1.0,
            error_def: ErrorDef::NLL_ONE_SIGMA,
            line_searcher: LineSearcher::MoreThuente,
            lbfgs_mem: None,
            verbose: false,
        }
    }
}
