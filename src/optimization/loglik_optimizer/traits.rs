//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait implemented by likelihood models (and by the
//!   reparameterizing wrappers in `minimizer`).
//! - [`MLEOptions`] and [`Tolerances`]: solver configuration.
//! - [`LineSearcher`]: line search used by L-BFGS.
//! - [`OptimOutcome`]: normalized result of [`maximize`](super::maximize).
//!
//! Convention: we *maximize* `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`. An analytic
//! gradient, when provided, is `∇ℓ(θ)`; the adapter flips the sign.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::TerminationStatus;
use argmin_math::ArgminL2Norm;

/// User-implemented log-likelihood interface.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
/// - `check(&Theta, &Data) -> OptResult<()>`: reject invalid `θ`/`data`
///   pairs once, before the solver starts.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic `∇ℓ(θ)`. Without it
///   the adapter falls back to finite differences of the cost.
/// - `in_physical_region(&Theta, &Data) -> bool`: whether `θ` describes a
///   proper probability density. Defaults to `true`.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }

    fn in_physical_region(&self, _theta: &Theta, _data: &Self::Data) -> bool {
        true
    }
}

/// Line search used inside the L-BFGS solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

/// Solver-level configuration.
///
/// Default:
/// - `tols`: `tol_grad = 1e-6`, `tol_cost = None`, `max_iter = 500`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None` (uses [`DEFAULT_LBFGS_MEM`](super::DEFAULT_LBFGS_MEM))
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// Create solver options. Tolerances are validated by [`Tolerances::new`];
    /// this only checks the L-BFGS memory.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(500) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits.
///
/// - `tol_grad`: stop when the gradient norm falls below this threshold.
/// - `tol_cost`: stop when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// At least one of the three must be provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == Some(0)`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best free-parameter vector found.
/// - `value`: best **log-likelihood** `ℓ(θ̂)` (not the cost).
/// - `converged`: `true` unless argmin reported `NotTerminated`.
/// - `status`: human-readable termination status.
/// - `iterations`: solver iterations performed.
/// - `fn_evals`: argmin counters (`cost_count`, `gradient_count`, ...).
/// - `grad_norm`: norm of the last available gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            other => (true, format!("{other:?}")),
        };
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm,
        })
    }

    /// Total number of cost and gradient evaluations reported by the solver.
    pub fn total_calls(&self) -> u64 {
        self.fn_evals.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argmin::core::TerminationReason;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // `Tolerances::new` must refuse a configuration with no stopping rule.
    //
    // Given
    // -----
    // - All three fields `None`.
    //
    // Expect
    // ------
    // - `Err(OptError::NoTolerancesProvided)`.
    fn tolerances_new_rejects_all_none() {
        let result = Tolerances::new(None, None, None);

        assert_eq!(result.unwrap_err(), OptError::NoTolerancesProvided);
    }

    #[test]
    // Purpose
    // -------
    // Non-positive tolerances and a zero iteration cap are rejected.
    //
    // Given
    // -----
    // - `tol_grad = -1.0`, then `max_iter = 0`.
    //
    // Expect
    // ------
    // - `InvalidTolGrad` and `InvalidMaxIter` respectively.
    fn tolerances_new_rejects_invalid_values() {
        let bad_grad = Tolerances::new(Some(-1.0), None, None);
        let bad_iter = Tolerances::new(Some(1e-6), None, Some(0));

        assert!(matches!(bad_grad, Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(bad_iter, Err(OptError::InvalidMaxIter { max_iter: 0, .. })));
    }

    #[test]
    // Purpose
    // -------
    // `MLEOptions::new` rejects an L-BFGS memory of zero.
    //
    // Given
    // -----
    // - Valid tolerances and `lbfgs_mem = Some(0)`.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidLBFGSMem { mem: 0, .. })`.
    fn mle_options_new_rejects_zero_memory() {
        let tols = Tolerances::new(Some(1e-6), None, Some(10)).unwrap();

        let result = MLEOptions::new(tols, LineSearcher::MoreThuente, false, Some(0));

        assert!(matches!(result, Err(OptError::InvalidLBFGSMem { mem: 0, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Map argmin termination into `(converged, status)` and count calls.
    //
    // Given
    // -----
    // - A finite `theta_hat`, a solver-converged termination status and
    //   counters `cost_count = 4`, `gradient_count = 3`.
    //
    // Expect
    // ------
    // - `converged == true`, `total_calls() == 7`, gradient norm present.
    fn optim_outcome_new_maps_termination_and_counts() {
        let mut evals = FnEvalMap::new();
        evals.insert("cost_count".to_string(), 4);
        evals.insert("gradient_count".to_string(), 3);

        let outcome = OptimOutcome::new(
            Some(array![0.25]),
            -10.0,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            5,
            evals,
            Some(array![3.0, 4.0]),
        )
        .expect("valid raw state");

        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 5);
        assert_eq!(outcome.total_calls(), 7);
        assert!((outcome.grad_norm.unwrap() - 5.0).abs() < 1e-12);
    }
}
