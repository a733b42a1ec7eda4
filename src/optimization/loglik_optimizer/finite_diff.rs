//! loglik_optimizer::finite_diff — finite-difference gradient and Hessian helpers.
//!
//! Purpose
//! -------
//! Provide finite-difference gradients and Hessians around a free-parameter
//! vector, with validation and symmetry cleanup, so the minimizer can ask
//! for curvature at the optimum without touching the `finitediff` API.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward-difference gradient with error capture.
//! - [`compute_hessian`]: central-difference Hessian of a gradient map,
//!   falling back to forward differences when validation fails.
//! - [`cost_hessian`]: Hessian of the cost `c(θ) = -ℓ(θ)` of a
//!   [`LogLikelihood`], built on the adapter's gradient (analytic when the
//!   model provides one).
//!
//! Invariants & assumptions
//! ------------------------
//! - Errors raised by the objective inside a finite-difference closure are
//!   stored in a `RefCell` slot (the closures must return plain numbers)
//!   and surfaced afterwards as hard failures.
//! - Returned Hessians satisfy [`validate_hessian`] and are symmetric.
//!
//! Testing notes
//! -------------
//! - Quadratic objectives with known curvature, closure-error propagation
//!   and non-finite outputs are covered below.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, Theta,
        adapter::ArgMinAdapter,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::{Error, Gradient};
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta`, with error capture.
///
/// Clears `closure_err`, differentiates, then returns the first error the
/// closure recorded (if any) before validating the gradient.
///
/// # Errors
/// - Any error captured in `closure_err` during evaluation.
/// - [`validate_grad`] failures (non-finite entries).
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Central-difference Hessian of the gradient map `f` at `theta`.
///
/// Falls back to forward differences when the central estimate contains
/// non-finite entries; the result is symmetrized in place.
///
/// # Errors
/// - [`validate_hessian`] failures on the forward-difference fallback.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut cent_hess = theta.central_hessian(f);
    match validate_hessian(&cent_hess, dim) {
        Ok(()) => {
            symmetrize_hess(&mut cent_hess);
            Ok(cent_hess)
        }
        Err(_) => {
            let mut forward_hess = theta.forward_hessian(f);
            validate_hessian(&forward_hess, dim)?;
            symmetrize_hess(&mut forward_hess);
            Ok(forward_hess)
        }
    }
}

/// Hessian of the cost `c(θ) = -ℓ(θ)` of `f` at `theta`.
///
/// Gradients come from [`ArgMinAdapter`], so analytic `∇ℓ` is used when the
/// model implements it and finite differences of the cost otherwise.
///
/// # Errors
/// - The first error raised by any gradient evaluation.
/// - Hessian validation errors from [`compute_hessian`].
pub fn cost_hessian<F: LogLikelihood>(f: &F, data: &F::Data, theta: &Theta) -> OptResult<Hessian> {
    let adapter = ArgMinAdapter::new(f, data);
    let closure_err: RefCell<Option<Error>> = RefCell::new(None);
    let grad_fn = |x: &Theta| -> Grad {
        match adapter.gradient(x) {
            Ok(g) => g,
            Err(e) => {
                let mut slot = closure_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                Grad::from_elem(x.len(), f64::NAN)
            }
        }
    };
    let hessian = compute_hessian(&grad_fn, theta);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    hessian
}

/// Average off-diagonal pairs so that `H = Hᵀ`.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use argmin::core::ArgminError;
    use ndarray::{Array1, Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Forward-difference gradients with error capture.
    // - Central/forward Hessians and symmetrization.
    // - Cost Hessians of a small LogLikelihood.
    // -------------------------------------------------------------------------

    struct Parabola;

    impl LogLikelihood for Parabola {
        type Data = f64;

        // ℓ(θ) = -curv/2 · θ², so the cost Hessian is `curv`.
        fn value(&self, theta: &Theta, curv: &f64) -> OptResult<f64> {
            Ok(-0.5 * curv * theta.dot(theta))
        }

        fn check(&self, _theta: &Theta, _curv: &f64) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, curv: &f64) -> OptResult<Grad> {
            Ok(theta.mapv(|t| -curv * t))
        }
    }

    #[test]
    // Purpose
    // -------
    // A smooth quadratic yields a finite gradient of the right length.
    //
    // Given
    // -----
    // - f(x) = x·x at θ = (0, 1).
    //
    // Expect
    // ------
    // - Gradient ≈ (0, 2).
    fn run_fd_diff_quadratic_returns_valid_gradient() {
        let theta: Theta = array![0.0, 1.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x.dot(x);

        let grad = run_fd_diff(&theta, &f, &closure_err).expect("quadratic gradient");

        assert_eq!(grad.len(), 2);
        assert!(grad[0].abs() < 1e-6);
        assert!((grad[1] - 2.0).abs() < 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Errors recorded by the closure win over the numeric result.
    //
    // Given
    // -----
    // - A closure that stores `ArgminError::NotImplemented` and returns NaN.
    //
    // Expect
    // ------
    // - `OptError::NotImplemented`.
    fn run_fd_diff_closure_error_is_propagated() {
        let theta: Theta = Array1::from(vec![1.0_f64]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            let argmin_err = ArgminError::NotImplemented { text: "fd test".to_string() };
            closure_err.replace(Some(argmin_err.into()));
            f64::NAN
        };

        let err = run_fd_diff(&theta, &f, &closure_err).expect_err("closure error");

        assert!(matches!(err, OptError::NotImplemented { .. }));
    }

    #[test]
    // Purpose
    // -------
    // A linear gradient map has a constant, symmetric Hessian.
    //
    // Given
    // -----
    // - g(θ) = Aθ with A = [[2, 1], [1, 4]].
    //
    // Expect
    // ------
    // - H ≈ A.
    fn compute_hessian_linear_gradient_recovers_matrix() {
        let a: Array2<f64> = array![[2.0, 1.0], [1.0, 4.0]];
        let theta: Theta = array![0.5, -0.5];
        let grad_fn = |x: &Theta| a.dot(x);

        let hess = compute_hessian(&grad_fn, &theta).expect("linear map Hessian");

        for ((i, j), &v) in hess.indexed_iter() {
            assert!((v - a[[i, j]]).abs() < 1e-5, "H[{i},{j}] = {v}");
        }
        assert_eq!(hess[[0, 1]], hess[[1, 0]]);
    }

    #[test]
    // Purpose
    // -------
    // Non-finite gradients surface as `InvalidHessian`.
    //
    // Given
    // -----
    // - A gradient map returning NaN.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidHessian { .. })`.
    fn compute_hessian_non_finite_entries_yield_invalidhessian_error() {
        let theta: Theta = array![0.0];
        let grad_fn = |_theta: &Theta| array![f64::NAN];

        let err = compute_hessian(&grad_fn, &theta).expect_err("NaN Hessian");

        assert!(matches!(err, OptError::InvalidHessian { .. }));
    }

    #[test]
    // Purpose
    // -------
    // The cost Hessian of a log-likelihood has the cost's sign convention.
    //
    // Given
    // -----
    // - ℓ(θ) = -1.5 θ² with analytic gradient -3θ.
    //
    // Expect
    // ------
    // - H ≈ 3 (positive curvature of the cost).
    fn cost_hessian_uses_cost_sign_convention() {
        let theta: Theta = array![0.2];

        let hess = cost_hessian(&Parabola, &3.0, &theta).expect("parabola Hessian");

        assert!((hess[[0, 0]] - 3.0).abs() < 1e-5, "H = {}", hess[[0, 0]]);
    }

    #[test]
    // Purpose
    // -------
    // Symmetrization averages off-diagonal entries and leaves the diagonal.
    //
    // Given
    // -----
    // - [[1, 2], [0, 3]].
    //
    // Expect
    // ------
    // - Off-diagonals both 1.0, diagonal unchanged.
    fn symmetrize_hess_makes_matrix_symmetric() {
        let mut h: Hessian = array![[1.0, 2.0], [0.0, 3.0]];

        symmetrize_hess(&mut h);

        assert_eq!(h, array![[1.0, 1.0], [1.0, 3.0]]);
    }
}
