//! events — decay-record loading and the validated event sample.
//!
//! Purpose
//! -------
//! Read momentum records from disk (or any reader), derive the minus-charge
//! `cos θ` per record, and hand downstream stages an immutable
//! [`EventSample`].
//!
//! Key behaviors
//! -------------
//! - [`load_events`] / [`parse_events`]: parse six-field records with
//!   explicit capacity handling ([`LoadOptions`], [`OverflowPolicy`]).
//! - [`EventSample`]: non-empty, finite, `[-1, 1]`-valued sample plus
//!   [`SampleMeta`].
//! - [`DataError`]: every loader and validation failure.
//!
//! Testing notes
//! -------------
//! - Loader tests run on in-memory cursors; the integration suite covers
//!   real files.

pub mod errors;
pub mod loader;
pub mod momentum;
pub mod options;
pub mod sample;

pub use self::errors::{DataError, DataResult};
pub use self::loader::{FIELDS_PER_RECORD, load_events, parse_events};
pub use self::momentum::{Momentum3, MomentumPair};
pub use self::options::{DEFAULT_CAPACITY, LoadOptions, OverflowPolicy};
pub use self::sample::{EventSample, SampleMeta};
