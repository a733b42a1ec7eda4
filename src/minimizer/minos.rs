//! minimizer::minos — asymmetric errors from profile-likelihood scans.
//!
//! Purpose
//! -------
//! For each free parameter `x`, find the two points where the profile
//! `p(x) = min over the other free parameters of NLL(x, ·)` rises by `up`
//! above the minimum.
//!
//! Key behaviors
//! -------------
//! - Bracketing starts one symmetric error (or one step when no error is
//!   available) away from `x̂` and doubles the distance, at most
//!   [`MAX_BRACKET_EXPANSIONS`] times, clipping at parameter bounds.
//! - The crossing is refined by bisection with relative tolerance
//!   [`BISECTION_RTOL`] and at most `max_iter` steps.
//! - A side whose bracket runs into a bound, fails to straddle the target,
//!   or exhausts its bisection budget is marked invalid. Profile
//!   evaluation failures on one side are logged and mark that side
//!   invalid; they do not fail the call.
//!
//! Conventions
//! -----------
//! - With a single free parameter the profile is the objective itself.
//!   Otherwise each profile point is a nested MIGRAD run with the scanned
//!   parameter fixed, started from the best-fit values.
use crate::{
    minimizer::{
        migrad::Minimizer,
        parameters::ParameterSet,
        result::{FitResult, MinosError},
        subspace::SubspaceLikelihood,
    },
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{LogLikelihood, Theta, maximize},
    },
};
use tracing::{debug, info, warn};

/// Upper limit on doublings while bracketing a crossing.
pub const MAX_BRACKET_EXPANSIONS: usize = 50;

/// Relative width at which bisection stops.
pub const BISECTION_RTOL: f64 = 1e-6;

/// Outcome of a one-sided crossing search: offset from `x̂` and validity.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Crossing {
    offset: f64,
    valid: bool,
}

impl<'a, F: LogLikelihood> Minimizer<'a, F> {
    /// Add MINOS errors for every free parameter of `fit`.
    ///
    /// `params` must be the set `fit` was produced from (names, bounds and
    /// fixed flags); values are taken from `fit`.
    ///
    /// # Errors
    /// - [`OptError::ThetaLengthMismatch`] if `params` and `fit` disagree in
    ///   size.
    pub fn minos(&self, params: &ParameterSet, fit: &FitResult) -> OptResult<FitResult> {
        let mut out = fit.clone();
        let best_values: Theta = fit.parameters.iter().map(|p| p.value).collect();
        let best = params.with_values(&best_values)?;
        for index in best.free_indices() {
            let minos = self.minos_parameter(&best, fit, index)?;
            if let Some(p) = out.parameters.get_mut(index) {
                info!(
                    parameter = %p.name,
                    lower = minos.lower,
                    upper = minos.upper,
                    valid = minos.is_valid(),
                    "MINOS errors"
                );
                p.minos = Some(minos);
            }
        }
        Ok(out)
    }

    /// MINOS errors for the parameter at `index`.
    ///
    /// # Errors
    /// - [`OptError::UnknownParameter`] if `index` is out of range.
    pub fn minos_parameter(
        &self, best: &ParameterSet, fit: &FitResult, index: usize,
    ) -> OptResult<MinosError> {
        let param = best.get(index).ok_or_else(|| OptError::UnknownParameter {
            name: format!("#{index}"),
        })?;
        let sigma = fit
            .parameters
            .get(index)
            .map(|p| p.error)
            .filter(|e| e.is_finite() && *e > 0.0)
            .unwrap_or(param.step);
        let target = fit.fmin + self.options.error_def.up();

        let profile = |x: f64| self.profile_value(best, index, x);
        let upper = self.find_crossing(param.value, sigma, 1.0, param.upper, target, &profile);
        let lower = self.find_crossing(param.value, sigma, -1.0, param.lower, target, &profile);

        Ok(MinosError {
            lower: lower.offset,
            upper: upper.offset,
            lower_valid: lower.valid,
            upper_valid: upper.valid,
        })
    }

    /// Profile `p(x)`: the objective minimized over every free parameter
    /// except `index`, which is fixed at `x`.
    fn profile_value(&self, best: &ParameterSet, index: usize, x: f64) -> OptResult<f64> {
        let scan = best.with_fixed(index, x)?;
        if scan.free_indices().is_empty() {
            return Ok(-self.model.value(&scan.values(), self.data)?);
        }
        let sub = SubspaceLikelihood::bounded(self.model, &scan)?;
        let outcome =
            maximize(&sub, sub.initial_internal(), self.data, &self.options.mle_options()?)?;
        Ok(-outcome.value)
    }

    /// Search one side (`direction = ±1`) for `p(x) = target`.
    fn find_crossing<P: Fn(f64) -> OptResult<f64>>(
        &self, x_hat: f64, sigma: f64, direction: f64, bound: Option<f64>, target: f64,
        profile: &P,
    ) -> Crossing {
        match self.bracket_and_bisect(x_hat, sigma, direction, bound, target, profile) {
            Ok(crossing) => crossing,
            Err(err) => {
                warn!(direction, error = %err, "profile scan failed");
                Crossing { offset: direction * sigma, valid: false }
            }
        }
    }

    fn bracket_and_bisect<P: Fn(f64) -> OptResult<f64>>(
        &self, x_hat: f64, sigma: f64, direction: f64, bound: Option<f64>, target: f64,
        profile: &P,
    ) -> OptResult<Crossing> {
        // Bracket: `inside` stays below target, `outside` reaches it.
        let mut inside = x_hat;
        let mut distance = sigma;
        let mut outside = None;
        for _ in 0..=MAX_BRACKET_EXPANSIONS {
            let mut x = x_hat + direction * distance;
            let clipped = match bound {
                Some(b) if direction * (x - b) >= 0.0 => {
                    x = b;
                    true
                }
                _ => false,
            };
            if profile(x)? >= target {
                outside = Some(x);
                break;
            }
            inside = x;
            if clipped {
                debug!(direction, bound = x, "profile stays below target up to the bound");
                return Ok(Crossing { offset: x - x_hat, valid: false });
            }
            distance *= 2.0;
        }
        let Some(mut outside) = outside else {
            return Ok(Crossing { offset: inside - x_hat, valid: false });
        };

        // Bisect on [inside, outside].
        for _ in 0..self.options.max_iter {
            let mid = 0.5 * (inside + outside);
            if profile(mid)? >= target {
                outside = mid;
            } else {
                inside = mid;
            }
            let denom = outside.abs().max(1.0);
            if (outside - inside).abs() / denom < BISECTION_RTOL {
                return Ok(Crossing { offset: 0.5 * (inside + outside) - x_hat, valid: true });
            }
        }
        Ok(Crossing { offset: 0.5 * (inside + outside) - x_hat, valid: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        minimizer::{options::MinimizerOptions, parameters::Parameter},
        optimization::loglik_optimizer::Grad,
    };
    use ndarray::array;

    // NLL = (x - 1)² / (2 · 0.2²) for x ≤ 1 and (x - 1)² / (2 · 0.5²) above:
    // a split Gaussian with known asymmetric 1σ errors (-0.2, +0.5).
    struct SplitGauss;

    impl LogLikelihood for SplitGauss {
        type Data = ();

        fn value(&self, t: &Theta, _: &()) -> OptResult<f64> {
            let s = if t[0] <= 1.0 { 0.2 } else { 0.5 };
            Ok(-(t[0] - 1.0).powi(2) / (2.0 * s * s))
        }

        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, t: &Theta, _: &()) -> OptResult<Grad> {
            let s = if t[0] <= 1.0 { 0.2 } else { 0.5 };
            Ok(array![-(t[0] - 1.0) / (s * s)])
        }
    }

    // NLL = ½ (x² - 2ρxy + y²) / (1 - ρ²): correlated unit Gaussian.
    struct Correlated {
        rho: f64,
    }

    impl LogLikelihood for Correlated {
        type Data = ();

        fn value(&self, t: &Theta, _: &()) -> OptResult<f64> {
            let r = self.rho;
            Ok(-0.5 * (t[0] * t[0] - 2.0 * r * t[0] * t[1] + t[1] * t[1]) / (1.0 - r * r))
        }

        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, t: &Theta, _: &()) -> OptResult<Grad> {
            let r = self.rho;
            let d = 1.0 - r * r;
            Ok(array![-(t[0] - r * t[1]) / d, -(t[1] - r * t[0]) / d])
        }
    }

    #[test]
    // Purpose
    // -------
    // MINOS recovers asymmetric errors that HESSE cannot see.
    //
    // Given
    // -----
    // - Split Gaussian with σ₋ = 0.2, σ₊ = 0.5 around x̂ = 1.
    //
    // Expect
    // ------
    // - lower ≈ -0.2, upper ≈ +0.5, both valid.
    fn minos_finds_asymmetric_errors() {
        let params = ParameterSet::new(vec![Parameter::new("x", 0.0, 0.1).unwrap()]).unwrap();
        let minimizer = Minimizer::new(&SplitGauss, &(), MinimizerOptions::default());
        let fit = minimizer.migrad(&params).unwrap();

        let with_minos = minimizer.minos(&params, &fit).unwrap();
        let m = with_minos.parameter("x").unwrap().minos.unwrap();

        assert!((m.lower + 0.2).abs() < 1e-4, "lower = {}", m.lower);
        assert!((m.upper - 0.5).abs() < 1e-4, "upper = {}", m.upper);
        assert!(m.is_valid());
        assert!(fit.parameter("x").unwrap().minos.is_none());
    }

    #[test]
    // Purpose
    // -------
    // With several free parameters the scan profiles out the others, so
    // MINOS matches the marginal σ of a correlated Gaussian.
    //
    // Given
    // -----
    // - Unit-variance bivariate Gaussian with ρ = 0.6, minimum at 0.
    //
    // Expect
    // ------
    // - Both parameters: lower ≈ -1, upper ≈ +1.
    fn minos_profiles_out_correlated_parameters() {
        let params = ParameterSet::new(vec![
            Parameter::new("x", 0.3, 0.1).unwrap(),
            Parameter::new("y", -0.2, 0.1).unwrap(),
        ])
        .unwrap();
        let model = Correlated { rho: 0.6 };
        let minimizer = Minimizer::new(&model, &(), MinimizerOptions::default());
        let fit = minimizer.migrad(&params).unwrap();

        let with_minos = minimizer.minos(&params, &fit).unwrap();

        for p in with_minos.variable_parameters() {
            let m = p.minos.unwrap();
            assert!((m.lower + 1.0).abs() < 1e-3, "{}: {}", p.name, m.lower);
            assert!((m.upper - 1.0).abs() < 1e-3, "{}: {}", p.name, m.upper);
        }
    }

    #[test]
    // Purpose
    // -------
    // A bound that cuts the interval makes that side invalid and stops the
    // scan at the bound.
    //
    // Given
    // -----
    // - Split Gaussian with x bounded to (0.5, 1.3).
    //
    // Expect
    // ------
    // - Lower side valid at -0.2; upper side invalid with offset 0.3.
    fn minos_marks_side_blocked_by_bound() {
        let params = ParameterSet::new(vec![
            Parameter::new("x", 0.9, 0.1).unwrap().with_bounds(Some(0.5), Some(1.3)).unwrap(),
        ])
        .unwrap();
        let minimizer = Minimizer::new(&SplitGauss, &(), MinimizerOptions::default());
        let fit = minimizer.migrad(&params).unwrap();

        let m = minimizer.minos(&params, &fit).unwrap().parameters[0].minos.unwrap();

        assert!(m.lower_valid && (m.lower + 0.2).abs() < 1e-3);
        assert!(!m.upper_valid);
        assert!((m.upper - (1.3 - fit.parameters[0].value)).abs() < 1e-12);
    }
}
