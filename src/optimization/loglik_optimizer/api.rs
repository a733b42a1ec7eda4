//! High-level entry point for maximizing a `LogLikelihood`.
//!
//! Selects L-BFGS with Hager–Zhang or More–Thuente line search, wraps the
//! model in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`), and delegates
//! the run to `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
    },
};

/// Maximize `ℓ(θ)` with L-BFGS and the line search chosen in `opts`.
///
/// # Errors
/// - Errors from `f.check(theta0, data)`.
/// - Builder errors (rejected tolerances).
/// - Runtime errors from `run_lbfgs`.
///
/// # Example
/// ```no_run
/// use asymmetry_fit::optimization::errors::OptResult;
/// use asymmetry_fit::optimization::loglik_optimizer::{LogLikelihood, MLEOptions, Theta, maximize};
/// use ndarray::array;
///
/// struct Bowl;
/// impl LogLikelihood for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Bowl, array![0.1, -0.2], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), asymmetry_fit::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        loglik_optimizer::{Grad, Tolerances},
    };
    use ndarray::array;

    struct Gaussian;

    impl LogLikelihood for Gaussian {
        type Data = (f64, f64);

        // ℓ(μ) for unit-variance Gaussian data summarised by (mean, n).
        fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
            let (mean, n) = *data;
            Ok(-0.5 * n * (theta[0] - mean).powi(2))
        }

        fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
            if theta.len() != 1 {
                return Err(OptError::ThetaLengthMismatch { expected: 1, actual: theta.len() });
            }
            Ok(())
        }

        fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
            let (mean, n) = *data;
            Ok(array![-n * (theta[0] - mean)])
        }
    }

    #[test]
    // Purpose
    // -------
    // Both line searches find the maximum of a concave quadratic.
    //
    // Given
    // -----
    // - ℓ(μ) = -50 (μ - 0.4)², start at μ = 0.
    //
    // Expect
    // ------
    // - μ̂ ≈ 0.4, ℓ(μ̂) ≈ 0, converged.
    fn maximize_finds_quadratic_peak_with_both_line_searches() {
        for ls in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            let tols = Tolerances::new(Some(1e-8), None, Some(100)).unwrap();
            let opts = MLEOptions::new(tols, ls, false, None).unwrap();

            let out = maximize(&Gaussian, array![0.0], &(0.4, 100.0), &opts).expect("fit");

            assert!((out.theta_hat[0] - 0.4).abs() < 1e-6, "{ls:?}: {}", out.theta_hat[0]);
            assert!(out.value.abs() < 1e-8);
            assert!(out.converged);
        }
    }

    #[test]
    // Purpose
    // -------
    // `check` runs before the solver and its error is returned unchanged.
    //
    // Given
    // -----
    // - A two-element start vector for a one-parameter model.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch { expected: 1, actual: 2 }`.
    fn maximize_propagates_check_failure() {
        let err = maximize(&Gaussian, array![0.0, 0.0], &(0.0, 1.0), &MLEOptions::default())
            .unwrap_err();

        assert_eq!(err, OptError::ThetaLengthMismatch { expected: 1, actual: 2 });
    }
}
