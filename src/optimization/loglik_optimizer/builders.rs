//! loglik_optimizer::builders — L-BFGS solver construction helpers.
//!
//! Builders pair an L-BFGS solver with the chosen line search and apply the
//! optional tolerances from [`MLEOptions`]. Initial parameters and the
//! iteration cap are runtime concerns applied by the runner
//! ([`run_lbfgs`](super::run::run_lbfgs)).
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// L-BFGS with Hager–Zhang line search.
///
/// # Errors
/// - `OptError` when argmin rejects a tolerance setting.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsHagerZhang::new(HagerZhangLS::new(), mem), opts)
}

/// L-BFGS with More–Thuente line search.
///
/// # Errors
/// - `OptError` when argmin rejects a tolerance setting.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply `tol_grad` / `tol_cost` when present; argmin defaults otherwise.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances};

    fn options(line_searcher: LineSearcher, mem: Option<usize>) -> MLEOptions {
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-10), Some(50)).expect("Tolerances should be valid");
        MLEOptions::new(tols, line_searcher, false, mem).expect("MLEOptions should be valid")
    }

    #[test]
    // Purpose
    // -------
    // Both builders succeed with default and explicit L-BFGS memory.
    //
    // Given
    // -----
    // - Valid tolerances; `lbfgs_mem` of `None` and `Some(3)`.
    //
    // Expect
    // ------
    // - All four builder calls return `Ok`.
    fn builders_accept_default_and_explicit_memory() {
        for mem in [None, Some(3)] {
            assert!(build_optimizer_hager_zhang(&options(LineSearcher::HagerZhang, mem)).is_ok());
            assert!(
                build_optimizer_more_thuente(&options(LineSearcher::MoreThuente, mem)).is_ok()
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` leaves argmin defaults in place when both tolerances
    // are absent.
    //
    // Given
    // -----
    // - `tol_grad = None`, `tol_cost = None`, `max_iter = Some(10)`.
    //
    // Expect
    // ------
    // - `Ok(_)`.
    fn configure_lbfgs_respects_absent_tolerances() {
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(10)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("MLEOptions should be valid");

        assert!(configure_lbfgs(raw, &opts).is_ok());
    }
}
