//! Errors for event loading and sample validation.
//!
//! [`DataError`] covers everything that can go wrong between opening the
//! momentum file and holding a validated [`EventSample`](super::EventSample):
//! I/O, token parsing, malformed records, degenerate momenta and capacity
//! overflow under [`OverflowPolicy::Error`](super::OverflowPolicy::Error).
//!
//! ## Conventions
//! - **Record indices are 0-based** and count complete six-field records.
//! - **Field indices are 0-based** within a record, in the order
//!   `px+ py+ pz+ px- py- pz-`.

/// Result alias for loader and sample construction paths.
pub type DataResult<T> = Result<T, DataError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    // ---- I/O ----
    /// The input could not be opened or read.
    Io { path: String, message: String },

    // ---- Record parsing ----
    /// A token could not be parsed as a floating-point number.
    ParseField { record: usize, field: usize, token: String },

    /// The input ended in the middle of a record.
    IncompleteRecord { record: usize, fields: usize },

    /// A momentum component is NaN or ±inf.
    NonFiniteMomentum { record: usize, field: usize, value: f64 },

    /// The minus-charge momentum has zero magnitude, so `cos θ` is undefined.
    ZeroMomentum { record: usize },

    // ---- Sample validation ----
    /// No events were read.
    EmptySample,

    /// A `cos θ` value is non-finite or outside `[-1, 1]`.
    InvalidCosTheta { index: usize, value: f64 },

    /// More records than the configured capacity under the `Error` policy.
    CapacityExceeded { capacity: usize },

    // ---- Options ----
    /// A capacity of zero can never hold an event.
    InvalidCapacity { capacity: usize },
}

impl std::error::Error for DataError {}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- I/O ----
            DataError::Io { path, message } => {
                write!(f, "Cannot read event file '{path}': {message}")
            }

            // ---- Record parsing ----
            DataError::ParseField { record, field, token } => {
                write!(f, "Record {record}, field {field}: '{token}' is not a number")
            }
            DataError::IncompleteRecord { record, fields } => {
                write!(f, "Record {record} is incomplete: found {fields} of 6 fields")
            }
            DataError::NonFiniteMomentum { record, field, value } => {
                write!(f, "Record {record}, field {field}: momentum component {value} is not finite")
            }
            DataError::ZeroMomentum { record } => {
                write!(f, "Record {record}: minus-charge momentum has zero magnitude")
            }

            // ---- Sample validation ----
            DataError::EmptySample => {
                write!(f, "Event sample is empty, nothing to fit")
            }
            DataError::InvalidCosTheta { index, value } => {
                write!(f, "cos(theta) at index {index} is {value}, must be finite and in [-1, 1]")
            }
            DataError::CapacityExceeded { capacity } => {
                write!(f, "Input holds more than {capacity} events")
            }

            // ---- Options ----
            DataError::InvalidCapacity { capacity } => {
                write!(f, "Invalid event capacity {capacity}, must be greater than zero")
            }
        }
    }
}
