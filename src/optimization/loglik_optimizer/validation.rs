//! Validation helpers for log-likelihood optimization.
//!
//! - Tolerance checks: [`verify_tol_grad`], [`verify_tol_cost`].
//! - Derivatives: [`validate_grad`], [`validate_hessian`].
//! - Inputs and outcomes: [`validate_theta_input`], [`validate_theta_hat`],
//!   [`validate_value`].
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta, types::Hessian},
};

/// Shared rule for optional tolerances: `None` passes, `Some` must be finite
/// and strictly positive. Returns the failure reason.
fn tolerance_problem(tol: Option<f64>) -> Option<(f64, &'static str)> {
    match tol {
        Some(t) if !t.is_finite() => Some((t, "Tolerance must be finite.")),
        Some(t) if t <= 0.0 => Some((t, "Tolerance must be positive.")),
        _ => None,
    }
}

/// Validate the optional gradient-norm tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    match tolerance_problem(tol) {
        Some((tol, reason)) => Err(OptError::InvalidTolGrad { tol, reason }),
        None => Ok(()),
    }
}

/// Validate the optional cost-change tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    match tolerance_problem(tol) {
        Some((tol, reason)) => Err(OptError::InvalidTolCost { tol, reason }),
        None => Ok(()),
    }
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] for the first non-finite element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match grad.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        }),
        None => Ok(()),
    }
}

/// Validate a parameter vector handed to a likelihood: expected length and
/// finite entries.
///
/// # Errors
/// - [`OptError::ThetaLengthMismatch`] on length mismatch.
/// - [`OptError::InvalidThetaInput`] for the first non-finite entry.
pub fn validate_theta_input(theta: &Theta, expected: usize) -> OptResult<()> {
    if theta.len() != expected {
        return Err(OptError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    match theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(OptError::InvalidThetaInput { index, value }),
        None => Ok(()),
    }
}

/// Validate and unwrap an estimated parameter vector.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let t = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some((index, &value)) = t.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(t)
}

/// Validate that a scalar log-likelihood value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Validate the shape (`dim × dim`) and finiteness of a Hessian.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`] if dimensions do not match `dim`.
/// - [`OptError::InvalidHessian`] for the first non-finite entry.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((row, col), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row, col, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    #[test]
    // Purpose
    // -------
    // Gradient validation reports the first offending entry.
    //
    // Given
    // -----
    // - `[1.0, NaN, inf]` validated against `dim = 3`, then against `dim = 2`.
    //
    // Expect
    // ------
    // - `InvalidGradient { index: 1, .. }` and `GradientDimMismatch`.
    fn validate_grad_reports_first_non_finite_and_dimension() {
        let g = array![1.0, f64::NAN, f64::INFINITY];

        assert!(matches!(validate_grad(&g, 3), Err(OptError::InvalidGradient { index: 1, .. })));
        assert_eq!(
            validate_grad(&g, 2).unwrap_err(),
            OptError::GradientDimMismatch { expected: 2, found: 3 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Likelihood inputs must have the declared length and finite entries.
    //
    // Given
    // -----
    // - `[0.1]` against 2 expected entries; `[inf]` against 1.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch` then `InvalidThetaInput { index: 0 }`.
    fn validate_theta_input_checks_length_then_finiteness() {
        assert_eq!(
            validate_theta_input(&array![0.1], 2).unwrap_err(),
            OptError::ThetaLengthMismatch { expected: 2, actual: 1 }
        );
        assert!(matches!(
            validate_theta_input(&array![f64::INFINITY], 1),
            Err(OptError::InvalidThetaInput { index: 0, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Missing or non-finite estimates are rejected, finite ones returned.
    //
    // Given
    // -----
    // - `None`, `Some([NaN])`, `Some([0.3])`.
    //
    // Expect
    // ------
    // - `MissingThetaHat`, `InvalidThetaHat`, `Ok([0.3])`.
    fn validate_theta_hat_handles_all_cases() {
        assert_eq!(validate_theta_hat(None).unwrap_err(), OptError::MissingThetaHat);
        assert!(matches!(
            validate_theta_hat(Some(array![f64::NAN])),
            Err(OptError::InvalidThetaHat { index: 0, .. })
        ));
        assert_eq!(validate_theta_hat(Some(array![0.3])).unwrap(), array![0.3]);
    }

    #[test]
    // Purpose
    // -------
    // Hessian validation catches wrong shapes and non-finite entries.
    //
    // Given
    // -----
    // - A 1×2 matrix for `dim = 1`; a 1×1 matrix holding NaN.
    //
    // Expect
    // ------
    // - `HessianDimMismatch` and `InvalidHessian { row: 0, col: 0 }`.
    fn validate_hessian_checks_shape_and_entries() {
        let wide = Array2::<f64>::zeros((1, 2));
        let nan = Array2::from_elem((1, 1), f64::NAN);

        assert!(matches!(
            validate_hessian(&wide, 1),
            Err(OptError::HessianDimMismatch { expected: 1, found: (1, 2) })
        ));
        assert!(matches!(
            validate_hessian(&nan, 1),
            Err(OptError::InvalidHessian { row: 0, col: 0, .. })
        ));
    }
}
