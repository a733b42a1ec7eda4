//! model — asymmetry estimators over an [`EventSample`](crate::events::EventSample).
//!
//! - [`angular`]: the angular distribution, its negative log-likelihood and
//!   the [`AngularDistribution`] likelihood handed to the minimizer.
//! - [`counting`]: the closed-form [`CountingEstimate`] cross-check.

pub mod angular;
pub mod counting;

pub use self::angular::{
    AngularDistribution, DENSITY_FLOOR, PHYSICAL_LIMIT, density, negative_log_likelihood,
    negative_log_likelihood_grad, physical_region,
};
pub use self::counting::CountingEstimate;
