//! asymmetry_fit — forward-backward asymmetry of a two-body decay sample.
//!
//! Purpose
//! -------
//! Measure the asymmetry parameter `A` of the angular distribution
//! `dN/dcos θ ∝ 3/8 (1 + cos² θ) + A cos θ` from recorded momentum pairs,
//! both by counting forward/backward events and by an unbinned
//! maximum-likelihood fit with profile-likelihood (MINOS) errors.
//!
//! Key behaviors
//! -------------
//! - [`events`]: load `L3.dat`-style records into an immutable
//!   [`EventSample`](events::EventSample) of `cos θ` values.
//! - [`model`]: the angular density, its negative log-likelihood and the
//!   counting estimator.
//! - [`minimizer`]: MIGRAD/HESSE/MINOS on top of the L-BFGS log-likelihood
//!   optimizer in [`optimization`].
//! - [`histogram`]: the binned `cos θ` distribution, persisted as JSON.
//! - [`report`]: the console report as plain strings.
//! - [`analysis`]: the pipeline tying the stages together.
//!
//! Invariants & assumptions
//! ------------------------
//! - Everything is single-threaded and owned; the sample is passed by
//!   reference and never mutated after loading.
//! - Library code never prints. Diagnostics go through `tracing`; the
//!   binary decides where they end up.
//!
//! Conventions
//! -----------
//! - Every layer has its own error enum and `Result` alias; the binary
//!   collects them with `anyhow`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` runs the full pipeline
//!   on files written to a temporary directory.

pub mod analysis;
pub mod events;
pub mod histogram;
pub mod minimizer;
pub mod model;
pub mod optimization;
pub mod report;
