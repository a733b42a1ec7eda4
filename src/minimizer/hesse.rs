//! minimizer::hesse — covariance and EDM from the Hessian at the minimum.
//!
//! Purpose
//! -------
//! Turn the finite-difference Hessian `H` of the objective (the NLL, in
//! external coordinates of the free parameters) into a covariance matrix
//! `V = 2 · up · H⁻¹`, a quality status, and the estimated distance to
//! minimum `EDM = ½ gᵀ H⁻¹ g`.
//!
//! Key behaviors
//! -------------
//! - `H` is copied into a `nalgebra::DMatrix` and inverted through the
//!   first strategy that works:
//!   1. Cholesky → [`CovarianceStatus::Exact`].
//!   2. Symmetric eigendecomposition with eigenvalues lifted to at least
//!      `PD_FLOOR · λ_max`, when the most negative eigenvalue is small
//!      (`λ_min ≥ -FORCED_PD_RATIO · λ_max`) →
//!      [`CovarianceStatus::ForcedPositiveDefinite`].
//!   3. Inverse of the diagonal when every `H_ii > 0` →
//!      [`CovarianceStatus::Diagonal`].
//!   4. Otherwise [`CovarianceStatus::NotAvailable`] with infinite EDM.
//!
//! Invariants & assumptions
//! ------------------------
//! - `H` is finite and symmetric (guaranteed by `cost_hessian`).
//! - Every returned covariance has a strictly positive diagonal.
//!
//! Conventions
//! -----------
//! - Degraded statuses are logged with `warn!`; they never fail the fit.
use crate::{
    minimizer::{parameters::ParameterSet, result::CovarianceStatus, subspace::SubspaceLikelihood},
    optimization::{
        errors::OptResult,
        loglik_optimizer::{
            Hessian, LogLikelihood, adapter::ArgMinAdapter, finite_diff::cost_hessian,
        },
        numerical_stability::EIGEN_EPS,
    },
};
use argmin::core::Gradient;
use nalgebra::{Cholesky, DMatrix};
use ndarray::Array2;
use tracing::{debug, warn};

/// Largest tolerated `|λ_min| / λ_max` for forcing positive definiteness.
pub const FORCED_PD_RATIO: f64 = 0.1;

/// Eigenvalues are lifted to at least this fraction of `λ_max`.
pub const PD_FLOOR: f64 = 1e-3;

/// Covariance, its quality and the EDM at a candidate minimum.
#[derive(Debug, Clone, PartialEq)]
pub struct HesseOutcome {
    pub covariance: Option<Array2<f64>>,
    pub status: CovarianceStatus,
    pub edm: f64,
}

/// Evaluate HESSE for `model` at the current values of `params`.
///
/// # Errors
/// - Objective or gradient failures while differentiating.
/// - [`OptError::NoFreeParameters`](crate::optimization::errors::OptError::NoFreeParameters)
///   if every parameter is fixed.
pub fn hesse<F: LogLikelihood>(
    model: &F, data: &F::Data, params: &ParameterSet, up: f64,
) -> OptResult<HesseOutcome> {
    let sub = SubspaceLikelihood::external(model, params)?;
    let x = sub.initial_internal();
    let hessian = cost_hessian(&sub, data, &x)?;
    let grad = ArgMinAdapter::new(&sub, data).gradient(&x)?;

    let (inverse, status) = invert_hessian(&hessian);
    let edm = match &inverse {
        Some(inv) => 0.5 * grad.dot(&inv.dot(&grad)),
        None => f64::INFINITY,
    };
    match status {
        CovarianceStatus::Exact => debug!(edm, "covariance matrix is exact"),
        other => warn!(status = other.code(), edm, "covariance matrix is not exact"),
    }
    Ok(HesseOutcome { covariance: inverse.map(|inv| inv * (2.0 * up)), status, edm })
}

/// Invert a symmetric Hessian, reporting how the inverse was obtained.
pub fn invert_hessian(hessian: &Hessian) -> (Option<Array2<f64>>, CovarianceStatus) {
    let n = hessian.nrows();
    if n == 0 || hessian.iter().any(|v| !v.is_finite()) {
        return (None, CovarianceStatus::NotAvailable);
    }
    let h = to_dmatrix(hessian);

    if let Some(chol) = Cholesky::new(h.clone()) {
        return (Some(to_array(&chol.inverse())), CovarianceStatus::Exact);
    }
    if let Some(forced) = forced_pd_inverse(h) {
        return (Some(to_array(&forced)), CovarianceStatus::ForcedPositiveDefinite);
    }
    if (0..n).all(|i| hessian[[i, i]] > 0.0) {
        let diag = Array2::from_shape_fn((n, n), |(i, j)| {
            if i == j { 1.0 / hessian[[i, i]] } else { 0.0 }
        });
        return (Some(diag), CovarianceStatus::Diagonal);
    }
    (None, CovarianceStatus::NotAvailable)
}

// ---- Helper methods ----

/// Inverse from the eigendecomposition `H = Q Λ Qᵀ` with
/// `λ_k ← max(λ_k, PD_FLOOR · λ_max)`, if `H` is only mildly indefinite.
fn forced_pd_inverse(h: DMatrix<f64>) -> Option<DMatrix<f64>> {
    let eigen = h.symmetric_eigen();
    let lambdas = &eigen.eigenvalues;
    let lambda_max = lambdas.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lambda_min = lambdas.iter().copied().fold(f64::INFINITY, f64::min);
    if !(lambda_max > EIGEN_EPS && lambda_min >= -FORCED_PD_RATIO * lambda_max) {
        return None;
    }
    let floor = PD_FLOOR * lambda_max;
    let q = &eigen.eigenvectors;
    let n = lambdas.len();
    let mut inv = DMatrix::<f64>::zeros(n, n);
    for (k, &lambda) in lambdas.iter().enumerate() {
        let w = 1.0 / lambda.max(floor);
        for i in 0..n {
            for j in 0..n {
                inv[(i, j)] += w * q[(i, k)] * q[(j, k)];
            }
        }
    }
    Some(inv)
}

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

fn to_array(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}
