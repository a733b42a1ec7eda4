//! Numerical stability utilities.
//!
//! Stable scalar transforms used to map bounded parameters onto the real
//! line for the solver, with explicit cutoffs (`|x| > 20.0`) keeping `f64`
//! arithmetic in a well-conditioned regime.

/// Clamp margin for logit inputs, keeping `p` strictly inside `(0, 1)`.
pub const LOGIT_EPS: f64 = 1e-12;

/// Eigenvalues at or below this value (relative to the largest) are
/// treated as numerically non-positive.
pub const EIGEN_EPS: f64 = 1e-12;

/// Products of covariance diagonals at or below this value are treated as
/// zero when normalizing to correlations.
pub const COV_EPS: f64 = 1e-30;

/// Numerically stable softplus: `ln(1 + exp(x))`, mapping ℝ → (0, ∞).
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Inverse softplus on `(0, ∞)`: `ln(exp(x) - 1)`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic `1 / (1 + exp(-x))`, mapping ℝ → (0, 1).
///
/// Branches on the sign of `x` so `exp` is only ever called on a
/// non-positive argument.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Inverse logistic `ln(p / (1 - p))`, with `p` clamped into
/// `[LOGIT_EPS, 1 - LOGIT_EPS]`.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    (p / (1.0 - p)).ln()
}
