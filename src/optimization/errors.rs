use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- MLEOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- MinimizerOptions ----
    /// Convergence tolerance factor needs to be positive and finite.
    InvalidTolerance {
        tol: f64,
        reason: &'static str,
    },
    /// Error definition (`up`) needs to be positive and finite.
    InvalidErrorDef {
        up: f64,
    },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Theta hat is missing
    MissingThetaHat,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Finite Diffs ----
    /// Hessian matrix dimensions do not match parameter dimensions.
    HessianDimMismatch {
        expected: usize,
        found: (usize, usize),
    },

    /// Hessian values need to be finite.
    InvalidHessian {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Likelihood input ----
    /// Likelihood evaluated on a sample without events.
    EmptySample,

    /// Theta length does not match the model's parameter count.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// Likelihood input must have finite values.
    InvalidThetaInput {
        index: usize,
        value: f64,
    },

    // ---- Parameter set ----
    /// Two parameters share the same name.
    DuplicateParameter {
        name: String,
    },
    /// Step size must be finite and > 0.
    InvalidStep {
        name: String,
        step: f64,
    },
    /// Bounds must be finite with lower < upper.
    InvalidBounds {
        name: String,
        lower: f64,
        upper: f64,
    },
    /// Initial value must be finite and strictly inside the bounds.
    ValueOutsideBounds {
        name: String,
        value: f64,
    },
    /// Every parameter is fixed.
    NoFreeParameters,
    /// Lookup of a parameter name that is not in the set.
    UnknownParameter {
        name: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MLEOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- MinimizerOptions ----
            OptError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid convergence tolerance {tol}: {reason}")
            }
            OptError::InvalidErrorDef { up } => {
                write!(f, "Invalid error definition {up}, must be finite and > 0")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Finite Diffs ----
            OptError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }

            // ---- Likelihood input ----
            OptError::EmptySample => {
                write!(f, "Likelihood requires at least one event")
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }

            // ---- Parameter set ----
            OptError::DuplicateParameter { name } => {
                write!(f, "Parameter '{name}' is defined more than once")
            }
            OptError::InvalidStep { name, step } => {
                write!(f, "Invalid step {step} for parameter '{name}', must be finite and > 0")
            }
            OptError::InvalidBounds { name, lower, upper } => {
                write!(
                    f,
                    "Invalid bounds [{lower}, {upper}] for parameter '{name}', need lower < upper"
                )
            }
            OptError::ValueOutsideBounds { name, value } => {
                write!(f, "Initial value {value} of parameter '{name}' is not inside its bounds")
            }
            OptError::NoFreeParameters => {
                write!(f, "All parameters are fixed, nothing to minimize")
            }
            OptError::UnknownParameter { name } => {
                write!(f, "Unknown parameter '{name}'")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast::<OptError>() {
            Ok(opt_err) => opt_err,
            Err(original_err) => match original_err.downcast() {
                Ok(argmin_err) => match argmin_err {
                    ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                    ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                    ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                    ArgminError::ConditionViolated { text } => {
                        OptError::ConditionViolated { text }
                    }
                    ArgminError::CheckpointNotFound { text } => {
                        OptError::CheckPointNotFound { text }
                    }
                    ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                    ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                    _ => OptError::UnknownError,
                },
                Err(err) => OptError::BackendError { text: err.to_string() },
            },
        }
    }
}
