//! minimizer::migrad — minimization followed by HESSE.
//!
//! Purpose
//! -------
//! Drive one fit of a [`LogLikelihood`] over a [`ParameterSet`]: map free
//! parameters into internal coordinates, maximize `ℓ` with the L-BFGS
//! optimizer, map the optimum back, and attach covariance, EDM and
//! per-parameter errors.
//!
//! Key behaviors
//! -------------
//! - [`Minimizer`] borrows the model and its data; it owns nothing else but
//!   its [`MinimizerOptions`].
//! - The returned [`FitResult`] is `valid` when the solver stopped before
//!   its iteration cap, EDM is below `0.002 · tolerance · up`, and some
//!   covariance is available. An invalid fit is still returned; only
//!   configuration and evaluation failures are errors.
//!
//! Conventions
//! -----------
//! - `fmin` is the objective `-ℓ(θ̂)`, i.e. the negative log-likelihood.
//! - Progress is logged at `info!`; solver details at `debug!`.
use crate::{
    minimizer::{
        hesse::{HesseOutcome, hesse},
        options::MinimizerOptions,
        parameters::ParameterSet,
        result::{FitResult, ParameterResult},
        subspace::SubspaceLikelihood,
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{LogLikelihood, maximize},
    },
};
use tracing::{debug, info};

/// Fit driver bound to one model and one data set.
#[derive(Clone)]
pub struct Minimizer<'a, F: LogLikelihood> {
    pub(crate) model: &'a F,
    pub(crate) data: &'a F::Data,
    pub(crate) options: MinimizerOptions,
}

impl<'a, F: LogLikelihood> Minimizer<'a, F> {
    pub fn new(model: &'a F, data: &'a F::Data, options: MinimizerOptions) -> Self {
        Self { model, data, options }
    }

    pub fn options(&self) -> &MinimizerOptions {
        &self.options
    }

    /// Minimize the objective starting from `params`, then run HESSE.
    ///
    /// # Errors
    /// - [`OptError::NoFreeParameters`](crate::optimization::errors::OptError::NoFreeParameters).
    /// - Start-point rejection from the model's `check`.
    /// - Solver and derivative failures from the optimization layer.
    pub fn migrad(&self, params: &ParameterSet) -> OptResult<FitResult> {
        let sub = SubspaceLikelihood::bounded(self.model, params)?;
        let mle = self.options.mle_options()?;
        debug!(free = sub.dim(), total = params.len(), "starting minimization");

        let outcome = maximize(&sub, sub.initial_internal(), self.data, &mle)?;
        let best = params.with_values(&sub.to_full(&outcome.theta_hat)?)?;
        let fmin = -outcome.value;

        let up = self.options.error_def.up();
        let hesse_out = hesse(self.model, self.data, &best, up)?;
        let within_budget = outcome.iterations < self.options.max_iter;
        let edm_target = self.options.edm_target();
        let valid = outcome.converged
            && within_budget
            && hesse_out.edm <= edm_target
            && hesse_out.covariance.is_some();
        let physical = self.model.in_physical_region(&best.values(), self.data);

        info!(
            fmin,
            edm = hesse_out.edm,
            iterations = outcome.iterations,
            cov_status = hesse_out.status.code(),
            valid,
            physical,
            "minimization finished"
        );

        let calls = outcome.total_calls();
        Ok(FitResult {
            fmin,
            edm: hesse_out.edm,
            edm_target,
            error_def: up,
            n_variable: sub.dim(),
            n_total: params.len(),
            covariance_status: hesse_out.status,
            valid,
            physical,
            status: outcome.status,
            iterations: outcome.iterations,
            calls,
            parameters: parameter_results(&best, &hesse_out),
            covariance: hesse_out.covariance,
        })
    }
}

/// Per-parameter values and symmetric errors; the k-th free parameter
/// reads the k-th covariance diagonal.
fn parameter_results(best: &ParameterSet, hesse_out: &HesseOutcome) -> Vec<ParameterResult> {
    let mut k = 0usize;
    best.iter()
        .map(|p| {
            let error = if p.fixed {
                0.0
            } else {
                let var = hesse_out.covariance.as_ref().map_or(0.0, |c| c[[k, k]]);
                k += 1;
                var.max(0.0).sqrt()
            };
            ParameterResult {
                name: p.name.clone(),
                value: p.value,
                error,
                minos: None,
                lower: p.lower,
                upper: p.upper,
                fixed: p.fixed,
            }
        })
        .collect()
}
