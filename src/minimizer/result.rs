//! Fit results: per-parameter outcomes, covariance status and MINOS errors.
//!
//! A [`FitResult`] is produced once by MIGRAD (and copied with asymmetric
//! errors by MINOS). It carries raw outcomes only; judging and presenting
//! them is the report's job.
use ndarray::Array2;

/// Quality of the covariance matrix, ordered from worst to best.
///
/// Codes: 0 not available, 1 diagonal approximation, 2 forced
/// positive-definite, 3 exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CovarianceStatus {
    NotAvailable,
    Diagonal,
    ForcedPositiveDefinite,
    Exact,
}

impl CovarianceStatus {
    pub fn code(&self) -> u8 {
        match self {
            CovarianceStatus::NotAvailable => 0,
            CovarianceStatus::Diagonal => 1,
            CovarianceStatus::ForcedPositiveDefinite => 2,
            CovarianceStatus::Exact => 3,
        }
    }

    pub fn is_exact(&self) -> bool {
        *self == CovarianceStatus::Exact
    }
}

/// Asymmetric errors from a profile-likelihood scan.
///
/// `lower ≤ 0 ≤ upper` are offsets from the best-fit value. A side is
/// invalid when no crossing was found (bound reached, bracket failure, or
/// bisection budget exhausted); its offset is then the last bracket edge
/// explored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinosError {
    pub lower: f64,
    pub upper: f64,
    pub lower_valid: bool,
    pub upper_valid: bool,
}

impl MinosError {
    pub fn is_valid(&self) -> bool {
        self.lower_valid && self.upper_valid
    }
}

/// Outcome for one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterResult {
    pub name: String,
    pub value: f64,
    /// Symmetric error `sqrt(V_ii)`; 0 for fixed parameters or when no
    /// covariance is available.
    pub error: f64,
    pub minos: Option<MinosError>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub fixed: bool,
}

/// Everything a fit reports.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Objective value at the minimum (the NLL, not ℓ).
    pub fmin: f64,
    /// Estimated distance to minimum `½ gᵀ H⁻¹ g`.
    pub edm: f64,
    pub edm_target: f64,
    pub error_def: f64,
    pub n_variable: usize,
    pub n_total: usize,
    pub covariance_status: CovarianceStatus,
    /// Converged within budget, EDM below target, some covariance available.
    pub valid: bool,
    /// The model accepts the fitted values as a proper density. A fit that
    /// ran away from every maximum ends up outside this region.
    pub physical: bool,
    /// Solver termination status as reported by the backend.
    pub status: String,
    pub iterations: usize,
    pub calls: u64,
    pub parameters: Vec<ParameterResult>,
    /// Covariance over the variable parameters, in parameter order.
    pub covariance: Option<Array2<f64>>,
}

impl FitResult {
    pub fn parameter(&self, name: &str) -> Option<&ParameterResult> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn variable_parameters(&self) -> impl Iterator<Item = &ParameterResult> {
        self.parameters.iter().filter(|p| !p.fixed)
    }

    pub fn covariance_exact(&self) -> bool {
        self.covariance_status.is_exact()
    }
}
